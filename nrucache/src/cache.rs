use std::fmt;
use serde::Serialize;
use tracing::trace;
use crate::geometry::CacheGeometry;
use crate::replacement_policies::{NotRecentlyUsed, ReplacementPolicy};

/// One slot of a cache set
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct Way {
    /// The tag held by this way, `None` while the way is empty
    pub tag: Option<u64>,
    /// Whether the replacement policy may pick this way. Cleared on hits and installs
    pub evictable: bool,
}

impl Way {
    pub fn is_empty(&self) -> bool {
        self.tag.is_none()
    }
}

impl Default for Way {
    // Empty ways start out evictable
    fn default() -> Self {
        Self { tag: None, evictable: true }
    }
}

/// The ways of one set, in way order
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct CacheSet {
    pub ways: Vec<Way>,
}

/// Whether a lookup found its tag
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessOutcome {
    Hit,
    Miss,
}

impl fmt::Display for AccessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessOutcome::Hit => f.write_str("hit"),
            AccessOutcome::Miss => f.write_str("miss"),
        }
    }
}

/// A set-associative cache, parameterised by a replacement policy
///
/// Only tags are stored, there is no data. Sets are independent of each other: a lookup only ever
/// reads or changes the set its index selects.
///
/// Hits and install targets are both found by a linear scan in way order, so the lowest way wins
/// any tie. This keeps the simulation deterministic.
#[derive(Debug, Clone, Serialize)]
pub struct Cache<R: ReplacementPolicy = NotRecentlyUsed> {
    sets: Vec<CacheSet>,
    #[serde(skip)]
    replacement_policy: R,
}

impl<R: ReplacementPolicy> Cache<R> {
    /// Creates an empty cache with `set_count` sets of `associativity` ways each
    pub fn new(set_count: usize, associativity: usize, policy: R) -> Self {
        Self {
            sets: vec![CacheSet { ways: vec![Way::default(); associativity] }; set_count],
            replacement_policy: policy,
        }
    }

    /// Creates an empty cache sized for a geometry
    pub fn with_geometry(geometry: &CacheGeometry, policy: R) -> Self {
        Self::new(geometry.set_count, geometry.associativity, policy)
    }

    /// Looks up a tag in a set, installing it on a miss
    ///
    /// On a hit the replacement policy is told which way was read. On a miss the policy picks a
    /// way and the new tag overwrites whatever it held.
    ///
    /// # Arguments
    ///
    /// * `tag`: The tag of the address
    /// * `index`: The set the address maps to. Must be less than the number of sets
    ///
    /// returns: AccessOutcome
    ///
    /// # Panics
    ///
    /// If `index` is not less than the number of sets
    pub fn lookup(&mut self, tag: u64, index: usize) -> AccessOutcome {
        assert!(index < self.sets.len(), "set index {index} out of range for {} sets", self.sets.len());
        let ways = &mut self.sets[index].ways;
        if let Some(way) = ways.iter().position(|w| w.tag == Some(tag)) {
            self.replacement_policy.update_on_hit(ways, way);
            trace!(tag, index, way, "hit");
            return AccessOutcome::Hit;
        }
        let way = self.replacement_policy.get_new_way(ways);
        trace!(tag, index, way, evicted = ?ways[way].tag, "miss");
        ways[way].tag = Some(tag);
        AccessOutcome::Miss
    }

    pub fn sets(&self) -> &[CacheSet] {
        &self.sets
    }

    /// Gets the number of ways which have never been filled. Useful for analysing cache
    /// utilisation or debugging
    pub fn get_empty_way_count(&self) -> usize {
        self.sets.iter()
            .flat_map(|s| s.ways.iter())
            .filter(|w| w.is_empty())
            .count()
    }
}
