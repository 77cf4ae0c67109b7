//! # NruCache
//!
//! NruCache is a library for simulating a single set-associative cache against an address trace
//!
//! It splits addresses into tag, index, and offset for a configurable geometry, runs them through a
//! cache using a Not Recently Used replacement policy, and records every hit and miss. The file
//! formats used by the simulator (configuration, trace, and report) are provided alongside
//!
//! Simulation is strictly sequential, the outcome of each access depends on every access before it

/// Splits addresses into tag, index, and offset
pub mod address;

/// Contains the implementation of the cache and its sets
pub mod cache;

/// Contains the configuration formats, text `header value` pairs or JSON
pub mod config;

/// Errors for the configuration and trace boundaries
pub mod error;

/// Derives the address bit layout from a configuration
pub mod geometry;

/// Contains the replacement policies, with a trait for implementing custom replacement policies
pub mod replacement_policies;

/// Writes the plain text report
pub mod report;

/// Contains the simulator used to run a trace through a cache
pub mod simulator;

/// Reads address traces
pub mod trace;

/// File reading helpers
pub mod io;


/// Contains utilities for running tests and benchmarks.
pub mod util;
