//! No-repeat selection engine
//!
//! Tracks which item IDs have already been returned per category key and
//! selects uniformly at random among the not-yet-shown remainder. When a
//! key's shown-set covers the whole pool, the set is cleared and a new cycle
//! begins.
//!
//! Shown state is shared mutable state touched by request callers and
//! scheduled jobs concurrently. The map of keys is behind a read/write lock;
//! each key owns its own mutex, and the whole size-check / clear / filter /
//! insert sequence runs under that per-key lock. State is process-lifetime
//! only and never persisted.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, RwLock};

use rand::seq::SliceRandom;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::ContentItem;

/// Selects pool items without repeats within a cycle, per category key
#[derive(Default)]
pub struct NoRepeatSelector {
    shown: RwLock<HashMap<String, Arc<Mutex<HashSet<i64>>>>>,
}

impl NoRepeatSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select one item from `pool` not yet returned for `key` in the
    /// current cycle
    ///
    /// The pool must be non-empty; an empty pool is the caller's
    /// precondition violation and comes back as [`Error::EmptyPool`], never
    /// a panic. Distribution is uniform over the not-yet-shown items.
    pub fn select(&self, key: &str, pool: &[ContentItem]) -> Result<ContentItem> {
        if pool.is_empty() {
            return Err(Error::empty_pool(key));
        }

        let shown = self.shown_for(key);
        let mut shown = shown.lock().expect("shown-state lock poisoned");

        if shown.len() >= pool.len() {
            debug!(key, cycle_size = pool.len(), "cycle complete, resetting shown set");
            shown.clear();
        }

        let available: Vec<&ContentItem> =
            pool.iter().filter(|item| !shown.contains(&item.id)).collect();

        // A pool that shrank since the shown-set was built can leave no
        // unshown items even without a completed cycle; fall back to the
        // full pool rather than failing.
        let candidates = if available.is_empty() {
            pool.iter().collect()
        } else {
            available
        };

        let mut rng = rand::thread_rng();
        let selected = candidates
            .choose(&mut rng)
            .ok_or_else(|| Error::empty_pool(key))?;

        shown.insert(selected.id);
        debug!(
            key,
            id = selected.id,
            shown = shown.len(),
            pool = pool.len(),
            "item selected"
        );

        Ok((*selected).clone())
    }

    /// Number of items already shown for a key in the current cycle
    pub fn shown_count(&self, key: &str) -> usize {
        self.shown
            .read()
            .expect("shown-state lock poisoned")
            .get(key)
            .map(|set| set.lock().expect("shown-state lock poisoned").len())
            .unwrap_or(0)
    }

    /// Get or lazily create the shown-set for a key
    fn shown_for(&self, key: &str) -> Arc<Mutex<HashSet<i64>>> {
        if let Some(set) = self
            .shown
            .read()
            .expect("shown-state lock poisoned")
            .get(key)
        {
            return Arc::clone(set);
        }

        let mut map = self.shown.write().expect("shown-state lock poisoned");
        Arc::clone(
            map.entry(key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(HashSet::new()))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;

    fn pool(size: i64) -> Vec<ContentItem> {
        (1..=size)
            .map(|id| ContentItem {
                id,
                language: "Yoruba".into(),
                text: format!("proverb {id}"),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_full_cycle_has_no_repeats() {
        let selector = NoRepeatSelector::new();
        let pool = pool(7);

        let mut seen = HashSet::new();
        for _ in 0..pool.len() {
            let item = selector.select("ALL", &pool).unwrap();
            assert!(seen.insert(item.id), "repeat within a cycle: {}", item.id);
        }
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn test_next_cycle_starts_after_exhaustion() {
        let selector = NoRepeatSelector::new();
        let pool = pool(3);

        for _ in 0..3 {
            selector.select("ALL", &pool).unwrap();
        }
        assert_eq!(selector.shown_count("ALL"), 3);

        // The (K+1)-th call resets and may repeat an earlier item
        let item = selector.select("ALL", &pool).unwrap();
        assert!(pool.iter().any(|p| p.id == item.id));
        assert_eq!(selector.shown_count("ALL"), 1);
    }

    #[test]
    fn test_empty_pool_is_an_error() {
        let selector = NoRepeatSelector::new();
        let result = selector.select("Efik", &[]);
        assert!(matches!(result, Err(Error::EmptyPool(_))));
    }

    #[test]
    fn test_keys_track_independent_cycles() {
        let selector = NoRepeatSelector::new();
        let pool = pool(2);

        selector.select("MORNING", &pool).unwrap();
        selector.select("MORNING", &pool).unwrap();
        selector.select("EVENING", &pool).unwrap();

        assert_eq!(selector.shown_count("MORNING"), 2);
        assert_eq!(selector.shown_count("EVENING"), 1);
    }

    #[test]
    fn test_shrunken_pool_falls_back_to_full_pool() {
        let selector = NoRepeatSelector::new();
        let big = pool(3);
        for _ in 0..2 {
            selector.select("ALL", &big).unwrap();
        }

        // Shrink the pool so shown may cover it without len >= pool check
        // having fired yet for the smaller pool.
        let small: Vec<_> = big.into_iter().take(2).collect();
        let item = selector.select("ALL", &small).unwrap();
        assert!(small.iter().any(|p| p.id == item.id));
    }

    #[test]
    fn test_concurrent_selection_never_duplicates_before_reset() {
        let selector = Arc::new(NoRepeatSelector::new());
        let pool = Arc::new(pool(2));

        for _ in 0..50 {
            // fresh key per round so each round is one cycle
            let key = format!("ROUND-{}", rand::random::<u64>());
            let barrier = Arc::new(Barrier::new(2));

            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let selector = Arc::clone(&selector);
                    let pool = Arc::clone(&pool);
                    let key = key.clone();
                    let barrier = Arc::clone(&barrier);
                    std::thread::spawn(move || {
                        barrier.wait();
                        selector.select(&key, &pool).unwrap().id
                    })
                })
                .collect();

            let ids: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
            assert_ne!(ids[0], ids[1], "both callers won the same item");
        }
    }
}
