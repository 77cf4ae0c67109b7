use tracing::debug;
use crate::cache::Way;

/// A generic trait for implementing replacement policies. Can be used to parameterise a Cache.
///
/// Policies see the ways of one set at a time, and keep any per-way state they need in the ways
/// themselves
pub trait ReplacementPolicy {
    /// Updates the policy when a way hits
    ///
    /// Not applicable for some policies, a default which does nothing is provided
    ///
    /// # Arguments
    ///
    /// * `ways`: The ways of the set which was read
    /// * `way`: The index of the way which hit
    ///
    /// returns: ()
    fn update_on_hit(&mut self, _ways: &mut [Way], _way: usize) {}

    /// Used by the cache to pick the way a new tag is installed into after a miss.
    ///
    /// Implementations should assume that when this method is called, the returned way will be
    /// overwritten, and update their state for it accordingly
    ///
    /// # Arguments
    ///
    /// * `ways`: The ways of the set which missed, never empty
    ///
    /// returns: usize
    fn get_new_way(&mut self, ways: &mut [Way]) -> usize;
}

/// Not Recently Used replacement policy
///
/// Each way carries a single `evictable` bit. Hits and installs clear it, and a new tag goes into
/// the first empty way, or failing that the first evictable way.
///
/// When every way in the set has been used since the last clear, all bits are set again and way 0
/// is overwritten. The scan is not repeated after the clear, so this path always picks way 0
/// rather than whichever way a fresh scan would find.
#[derive(Debug, Default, Copy, Clone)]
pub struct NotRecentlyUsed;

impl ReplacementPolicy for NotRecentlyUsed {
    fn update_on_hit(&mut self, ways: &mut [Way], way: usize) {
        ways[way].evictable = false;
    }

    fn get_new_way(&mut self, ways: &mut [Way]) -> usize {
        let way = ways.iter()
            .position(Way::is_empty)
            .or_else(|| ways.iter().position(|w| w.evictable))
            .unwrap_or_else(|| {
                debug!(ways = ways.len(), "every way recently used, clearing reference bits");
                ways.iter_mut().for_each(|w| w.evictable = true);
                0
            });
        ways[way].evictable = false;
        way
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn way(tag: u64, evictable: bool) -> Way {
        Way { tag: Some(tag), evictable }
    }

    #[test]
    fn prefers_first_empty_way() {
        let mut ways = [way(1, true), Way::default(), Way::default()];
        assert_eq!(NotRecentlyUsed.get_new_way(&mut ways), 1);
        assert!(!ways[1].evictable);
        assert!(ways[0].evictable);
    }

    #[test]
    fn empty_beats_evictable() {
        let mut ways = [way(1, true), way(2, false), Way::default()];
        assert_eq!(NotRecentlyUsed.get_new_way(&mut ways), 2);
    }

    #[test]
    fn then_first_evictable_way() {
        let mut ways = [way(1, false), way(2, true), way(3, true)];
        assert_eq!(NotRecentlyUsed.get_new_way(&mut ways), 1);
        assert_eq!(ways.map(|w| w.evictable), [false, false, true]);
    }

    #[test]
    fn exhausted_set_clears_and_picks_way_zero() {
        let mut ways = [way(1, false), way(2, false), way(3, false), way(4, false)];
        assert_eq!(NotRecentlyUsed.get_new_way(&mut ways), 0);
        assert_eq!(ways.map(|w| w.evictable), [false, true, true, true]);
    }

    #[test]
    fn hit_protects_way() {
        let mut ways = [way(1, true), way(2, true)];
        NotRecentlyUsed.update_on_hit(&mut ways, 1);
        assert_eq!(ways.map(|w| w.evictable), [true, false]);
    }
}
