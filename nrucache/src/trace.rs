use std::fs::File;
use std::io::Read;
use std::path::Path;
use lazy_static::lazy_static;
use regex::Regex;
use crate::error::TraceError;
use crate::io::get_reader;

lazy_static! {
    static ref BENCHMARK: Regex = Regex::new(r"^\.benchmark\b(?:\s+(?P<name>\S+))?").unwrap();
    static ref END: Regex = Regex::new(r"^\.end\b").unwrap();
    static ref ADDRESS: Regex = Regex::new(r"^[01]+$").unwrap();
}

/// A benchmark's address trace, in access order
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Trace {
    pub benchmark: Option<String>,
    pub addresses: Vec<u64>,
}

impl Trace {
    /// Opens and parses a trace file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let io_error = |source| TraceError::Io { path: path.to_path_buf(), source };
        let file = File::open(path).map_err(io_error)?;
        let mut bytes = Vec::new();
        get_reader(file).map_err(io_error)?.read_to_end(&mut bytes).map_err(io_error)?;
        Self::parse(std::str::from_utf8(&bytes)?)
    }

    /// Parses a trace
    ///
    /// The format is line oriented: `.benchmark <name>` names the trace, each following line holds
    /// one address written in binary, and `.end` finishes the trace. Blank lines are skipped and
    /// anything after `.end` is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use nrucache::trace::Trace;
    /// let trace = Trace::parse(".benchmark testcase1\n00101100\n00000011\n.end\n").unwrap();
    /// assert_eq!(trace.benchmark.as_deref(), Some("testcase1"));
    /// assert_eq!(trace.addresses, vec![0b00101100, 0b11]);
    /// ```
    pub fn parse(text: &str) -> Result<Self, TraceError> {
        let mut trace = Trace::default();
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if END.is_match(line) {
                break;
            }
            if let Some(captures) = BENCHMARK.captures(line) {
                trace.benchmark = captures.name("name").map(|m| m.as_str().to_string());
                continue;
            }
            let token = || line.to_string();
            if !ADDRESS.is_match(line) {
                return Err(TraceError::InvalidAddress { line: number + 1, token: token() });
            }
            // Leading zeros don't count towards the width
            let address = u64::from_str_radix(line, 2)
                .map_err(|_| TraceError::AddressTooWide { line: number + 1, token: token() })?;
            trace.addresses.push(address);
        }
        Ok(trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_benchmark() {
        let trace = Trace::parse(".benchmark testcase1\n00101100\n00101101\n\n11111111\n.end\n").unwrap();
        assert_eq!(trace, Trace {
            benchmark: Some("testcase1".to_string()),
            addresses: vec![0b00101100, 0b00101101, 0b11111111],
        });
    }

    #[test]
    fn stops_at_end() {
        let trace = Trace::parse("0001\n.end\n0010\nnot an address\n").unwrap();
        assert_eq!(trace.addresses, vec![1]);
        assert_eq!(trace.benchmark, None);
    }

    #[test]
    fn unnamed_benchmark_and_windows_line_endings() {
        let trace = Trace::parse(".benchmark\r\n  0110  \r\n.end\r\n").unwrap();
        assert_eq!(trace, Trace { benchmark: None, addresses: vec![6] });
    }

    #[test]
    fn rejects_non_binary_tokens() {
        let err = Trace::parse(".benchmark t\n0101\n0121\n.end\n").unwrap_err();
        assert!(matches!(err, TraceError::InvalidAddress { line: 3, ref token } if token == "0121"));
        let err = Trace::parse(".section data\n").unwrap_err();
        assert!(matches!(err, TraceError::InvalidAddress { line: 1, .. }));
    }

    #[test]
    fn benchmark_directive_must_be_a_whole_word() {
        let err = Trace::parse(".benchmarkfoo\n0001\n.end\n").unwrap_err();
        assert!(matches!(err, TraceError::InvalidAddress { line: 1, ref token } if token == ".benchmarkfoo"));
    }

    #[test]
    fn address_width() {
        let wide = "1".repeat(65);
        let err = Trace::parse(&wide).unwrap_err();
        assert!(matches!(err, TraceError::AddressTooWide { line: 1, .. }));
        let padded = format!("{}{}", "0".repeat(70), "1".repeat(64));
        assert_eq!(Trace::parse(&padded).unwrap().addresses, vec![u64::MAX]);
    }

    #[test]
    fn missing_file() {
        assert!(matches!(Trace::load("does/not/exist.lst"), Err(TraceError::Io { .. })));
    }
}
