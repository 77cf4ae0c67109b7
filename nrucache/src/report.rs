use std::io::{self, Write};
use crate::simulator::SimulationResult;

/// Writes the plain text report for a simulation
///
/// The report lists the geometry, the index bit positions, every address in binary with its
/// outcome, and the total miss count:
///
/// ```text
/// Address bits: 8
/// Block size: 4
/// Cache sets: 8
/// Associativity: 1
///
/// Offset bit count: 2
/// Indexing bit count: 3
/// Indexing bits: 5 4 3
///
/// .benchmark testcase1
/// 00101100 miss
/// .end
///
/// Total cache miss count: 1
/// ```
///
/// # Arguments
///
/// * `out`: Where the report is written
/// * `benchmark`: The benchmark name from the trace, the `.benchmark` line is left out without one
/// * `result`: The finished simulation
///
/// returns: Result<(), io::Error>
pub fn write_report(out: &mut impl Write, benchmark: Option<&str>, result: &SimulationResult) -> io::Result<()> {
    let geometry = &result.geometry;
    writeln!(out, "Address bits: {}", geometry.address_bits)?;
    writeln!(out, "Block size: {}", geometry.block_size)?;
    writeln!(out, "Cache sets: {}", geometry.set_count)?;
    writeln!(out, "Associativity: {}", geometry.associativity)?;
    writeln!(out)?;
    writeln!(out, "Offset bit count: {}", geometry.offset_bits)?;
    writeln!(out, "Indexing bit count: {}", geometry.index_bits)?;
    let positions = geometry.index_bit_positions()
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(out, "Indexing bits: {positions}")?;
    writeln!(out)?;
    if let Some(name) = benchmark {
        writeln!(out, ".benchmark {name}")?;
    }
    let width = geometry.address_bits as usize;
    for record in &result.records {
        writeln!(out, "{:0width$b} {}", record.address, record.outcome)?;
    }
    writeln!(out, ".end")?;
    writeln!(out)?;
    writeln!(out, "Total cache miss count: {}", result.miss_count)
}

/// Renders the report into a string
pub fn render_report(benchmark: Option<&str>, result: &SimulationResult) -> String {
    let mut buf = Vec::new();
    // Writing to a Vec can't fail
    let _ = write_report(&mut buf, benchmark, result);
    String::from_utf8_lossy(&buf).into_owned()
}
