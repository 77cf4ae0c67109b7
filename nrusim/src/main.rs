use std::fs::File;
use std::io::{BufWriter, Write};
use std::process;
use std::time::Instant;
use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;
use nrucache::config::CacheConfig;
use nrucache::geometry::{CacheGeometry, GeometryMode};
use nrucache::report::write_report;
use nrucache::simulator::Simulator;
use nrucache::trace::Trace;

#[cfg(debug_assertions)]
const DEBUG_DEFAULT: bool = true;

#[cfg(not(debug_assertions))]
const DEBUG_DEFAULT: bool = false;

#[derive(Parser, Debug)]
#[command(about = String::from("Set-associative cache simulator with NRU replacement"))]
struct Args {
    /// Cache configuration, `header value` pairs or a .json file
    config: String,
    /// Address trace
    trace: String,
    /// Where the report is written
    report: String,

    #[arg(short, long)]
    performance: bool,

    /// Print diagnostics after the run. On by default in debug builds, `--debug=false` turns it off
    #[arg(short, long, default_value_t = DEBUG_DEFAULT, action = ArgAction::Set, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    debug: bool,

    /// Also print the full result as JSON
    #[arg(short, long)]
    json: bool,

    /// Round non-power-of-two block sizes and set counts down instead of rejecting them
    #[arg(long)]
    legacy_geometry: bool,
}

fn main() -> Result<(), String> {
    let start = Instant::now();
    // Usage errors exit with 1 like every other failure, help and version exit cleanly
    let args = Args::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        process::exit(if e.use_stderr() { 1 } else { 0 })
    });
    let default_level = if args.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let config = CacheConfig::load(&args.config).map_err(|e| format!("Couldn't load the config file: {e}"))?;
    let mode = if args.legacy_geometry { GeometryMode::Truncating } else { GeometryMode::Strict };
    let geometry = CacheGeometry::resolve(&config, mode).map_err(|e| format!("Invalid cache configuration: {e}"))?;
    let trace = Trace::load(&args.trace).map_err(|e| format!("Couldn't load the trace file: {e}"))?;
    info!(accesses = trace.addresses.len(), benchmark = ?trace.benchmark, "loaded trace");

    let mut simulator = Simulator::new(geometry);
    simulator.simulate(trace.addresses.iter().copied());
    let simulation_time = *simulator.get_execution_time();
    let empty_ways = simulator.get_cache().get_empty_way_count();
    let result = simulator.finish();

    // Only create the report once the simulation has succeeded
    let report_file = File::create(&args.report).map_err(|e| format!("Couldn't create the report file at path {}: {e}", args.report))?;
    let mut writer = BufWriter::new(report_file);
    write_report(&mut writer, trace.benchmark.as_deref(), &result)
        .and_then(|_| writer.flush())
        .map_err(|e| format!("Couldn't write the report: {e}"))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result).map_err(|e| format!("Couldn't serialise the output {e}"))?);
    }
    if args.performance {
        let total_time = start.elapsed();
        println!("Simulation time: {}s", simulation_time.as_nanos() as f64 / 1e9);
        println!("Total execution time (includes initial parsing, configuration, and output): {}s", total_time.as_nanos() as f64 / 1e9)
    }
    if args.debug {
        #[cfg(debug_assertions)]
        println!("Running the debug binary, debug mode is enabled by default. If benchmarking, do not use this binary, re-compile with the --release argument when using cargo run");
        println!("Parsed input configuration: {config:?}");
        println!("Resolved geometry: tag bits {}, index bits {}, offset bits {}", geometry.tag_bits, geometry.index_bits, geometry.offset_bits);
        println!("Empty ways after simulation: {empty_ways} of {}", geometry.set_count.saturating_mul(geometry.associativity));
        println!("Total cache miss count: {}", result.miss_count)
    }
    Ok(())
}
