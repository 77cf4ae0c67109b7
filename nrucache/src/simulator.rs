use std::time::{Duration, Instant};
use serde::Serialize;
use tracing::debug;
use crate::address::AddressDecoder;
use crate::cache::{AccessOutcome, Cache};
use crate::geometry::CacheGeometry;
use crate::replacement_policies::NotRecentlyUsed;

/// The simulator decodes each address, runs it through the cache, and collects results.
///
/// It supports calling simulate multiple times, the cache state and results carry over between
/// calls, so a trace can be fed in pieces. Addresses are always processed one at a time in the
/// order given, as each lookup depends on the state left by the ones before it.
#[derive(Debug)]
pub struct Simulator {
    geometry: CacheGeometry,
    decoder: AddressDecoder,
    cache: Cache,
    records: Vec<AccessRecord>,
    miss_count: u64,
    simulation_time: Duration,
}

/// The outcome of a single access
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct AccessRecord {
    pub address: u64,
    pub tag: u64,
    pub index: u64,
    pub offset: u64,
    pub outcome: AccessOutcome,
}

/// The result of a simulation. Can be serialised to JSON
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    pub geometry: CacheGeometry,
    /// One record per address, in input order
    pub records: Vec<AccessRecord>,
    pub miss_count: u64,
    pub final_cache: Cache,
}

impl Simulator {

    /// Creates a new simulator with an empty NRU cache
    ///
    /// # Arguments
    ///
    /// * `geometry`: The resolved cache geometry
    ///
    /// returns: Simulator
    pub fn new(geometry: CacheGeometry) -> Self {
        Self {
            geometry,
            decoder: AddressDecoder::new(&geometry),
            cache: Cache::with_geometry(&geometry, NotRecentlyUsed),
            records: Vec::new(),
            miss_count: 0,
            simulation_time: Duration::new(0, 0),
        }
    }

    /// Simulates a single access
    pub fn access(&mut self, address: u64) -> AccessRecord {
        let decoded = self.decoder.decode(address);
        // The index is masked to index_bits, and 2^index_bits never exceeds the set count, which
        // fits in a usize
        let outcome = self.cache.lookup(decoded.tag, decoded.index as usize);
        if outcome == AccessOutcome::Miss {
            self.miss_count += 1;
        }
        let record = AccessRecord {
            address,
            tag: decoded.tag,
            index: decoded.index,
            offset: decoded.offset,
            outcome,
        };
        self.records.push(record);
        record
    }

    /// Simulates a sequence of accesses in order
    ///
    /// # Arguments
    ///
    /// * `addresses`: The addresses, in access order
    ///
    /// returns: the records for these addresses
    pub fn simulate(&mut self, addresses: impl IntoIterator<Item = u64>) -> &[AccessRecord] {
        let start = Instant::now();
        let first = self.records.len();
        for address in addresses {
            self.access(address);
        }
        self.simulation_time += start.elapsed();
        debug!(accesses = self.records.len() - first, misses = self.miss_count, "simulated trace");
        &self.records[first..]
    }

    /// Finishes the simulation, handing over the records and the final cache state
    pub fn finish(self) -> SimulationResult {
        SimulationResult {
            geometry: self.geometry,
            records: self.records,
            miss_count: self.miss_count,
            final_cache: self.cache,
        }
    }

    pub fn get_miss_count(&self) -> u64 {
        self.miss_count
    }

    pub fn get_cache(&self) -> &Cache {
        &self.cache
    }

    /// Gets the wall-clock execution time for processing
    pub fn get_execution_time(&self) -> &Duration {
        &self.simulation_time
    }
}

/// Runs a whole trace through a fresh cache
///
/// # Examples
///
/// ```
/// use nrucache::config::CacheConfig;
/// use nrucache::geometry::{CacheGeometry, GeometryMode};
/// use nrucache::simulator::simulate;
/// let config = CacheConfig { address_bits: 8, block_size: 2, cache_sets: 4, associativity: 2 };
/// let geometry = CacheGeometry::resolve(&config, GeometryMode::Strict).unwrap();
/// let result = simulate(geometry, [0, 2, 4, 0, 6, 8]);
/// assert_eq!(result.miss_count, 5);
/// ```
pub fn simulate(geometry: CacheGeometry, addresses: impl IntoIterator<Item = u64>) -> SimulationResult {
    let mut simulator = Simulator::new(geometry);
    simulator.simulate(addresses);
    simulator.finish()
}
