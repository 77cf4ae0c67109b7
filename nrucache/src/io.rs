use std::fs::File;
use std::io::{self, Read};

/// Gets a reader over a whole file, which will be read front to back
pub fn get_reader(file: File) -> io::Result<impl Read> {
    // Compatibility on other systems
    #[cfg(not(unix))]
    {
        use std::io::BufReader;
        // Trace lines are short, a few pages at a time is plenty
        const BUFFER_SIZE: usize = 4 * 4096;
        Ok(BufReader::with_capacity(BUFFER_SIZE, file))
    }
    // Memory map the file on unix systems, the kernel can read ahead as we only read sequentially
    #[cfg(unix)]
    {
        use std::io::Cursor;
        use memmap2::{Advice, Mmap};
        // Empty files can't be mapped
        if file.metadata()?.len() == 0 {
            return Ok(Cursor::new(MappedOrEmpty::Empty));
        }
        // SAFETY: the map is only read, and the simulator doesn't modify its own inputs
        let m = unsafe { Mmap::map(&file)? };
        m.advise(Advice::Sequential)?;
        Ok(Cursor::new(MappedOrEmpty::Mapped(m)))
    }
}

#[cfg(unix)]
enum MappedOrEmpty {
    Mapped(memmap2::Mmap),
    Empty,
}

#[cfg(unix)]
impl AsRef<[u8]> for MappedOrEmpty {
    fn as_ref(&self) -> &[u8] {
        match self {
            MappedOrEmpty::Mapped(m) => &m[..],
            MappedOrEmpty::Empty => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use super::*;

    #[test]
    fn reads_whole_file() {
        let path = std::env::temp_dir().join(format!("nrucache-io-{}.lst", std::process::id()));
        File::create(&path).unwrap().write_all(b".benchmark t\n0001\n.end\n").unwrap();
        let mut contents = String::new();
        get_reader(File::open(&path).unwrap()).unwrap().read_to_string(&mut contents).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(contents, ".benchmark t\n0001\n.end\n");
    }

    #[test]
    fn reads_empty_file() {
        let path = std::env::temp_dir().join(format!("nrucache-io-empty-{}.lst", std::process::id()));
        File::create(&path).unwrap();
        let mut contents = Vec::new();
        get_reader(File::open(&path).unwrap()).unwrap().read_to_end(&mut contents).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(contents.is_empty());
    }
}
