//! Measure result cache for grid children.
//!
//! A single measure pass can propose the same size to a child more than once (cells that
//! mix star and auto tracks are measured twice), and consecutive layout passes usually
//! propose exactly what they proposed last time. Children are required to answer the same
//! proposal with the same desired size, so the grid remembers each answer.
//!
//! # Design
//!
//! Entries live in two generations. Every measure pass starts a new generation with
//! [`MeasureCache::begin_pass`]: answers from the pass before stay available and are
//! promoted when looked up again, anything older is dropped. The cache therefore holds
//! at most two passes worth of answers however many different sizes the grid is given.
//!
//! Anything that may change a child's answer (definitions edited, children added, removed
//! or moved, an explicit invalidation) starts a new epoch, which drops both generations.
//! A single child can also be dropped on its own.
//!
//! Cache keys are composed of:
//! - Child index within the grid
//! - Proposed width and height, compared bit-for-bit so `INFINITY` is a valid key

use std::collections::HashMap;

use crate::Size;

/// Cache key: (child index, proposed width bits, proposed height bits).
type CacheKey = (usize, u32, u32);

/// Lookup counters for debugging and profiling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeasureCacheStats {
    pub lookups: usize,
    pub hits: usize,
    pub stores: usize,
}

impl MeasureCacheStats {
    pub fn misses(&self) -> usize {
        self.lookups - self.hits
    }
}

/// Per-grid cache of child desired sizes.
#[derive(Debug)]
pub struct MeasureCache {
    epoch: u64,
    current: HashMap<CacheKey, Size>,
    previous: HashMap<CacheKey, Size>,
    stats: MeasureCacheStats,
}

impl Default for MeasureCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MeasureCache {
    pub fn new() -> Self {
        Self {
            epoch: 1,
            current: HashMap::new(),
            previous: HashMap::new(),
            stats: MeasureCacheStats::default(),
        }
    }

    fn key(child: usize, proposed: Size) -> CacheKey {
        (child, proposed.width.to_bits(), proposed.height.to_bits())
    }

    /// Current epoch. Starts at 1.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Start a new epoch; every stored answer becomes stale.
    pub fn advance_epoch(&mut self) {
        self.epoch += 1;
        self.current.clear();
        self.previous.clear();
    }

    /// Start a new generation. Answers not used since the previous call are dropped.
    pub fn begin_pass(&mut self) {
        self.previous = std::mem::take(&mut self.current);
    }

    /// Look up the desired size `child` reported for `proposed` in this or the last pass.
    pub fn lookup(&mut self, child: usize, proposed: Size) -> Option<Size> {
        self.stats.lookups += 1;
        let key = Self::key(child, proposed);
        let hit = self.current.get(&key).copied().or_else(|| {
            let size = self.previous.remove(&key)?;
            self.current.insert(key, size);
            Some(size)
        });
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    /// Remember a child's answer. Non-finite answers are not kept.
    pub fn store(&mut self, child: usize, proposed: Size, desired: Size) {
        if !desired.width.is_finite() || !desired.height.is_finite() {
            return;
        }
        self.current.insert(Self::key(child, proposed), desired);
        self.stats.stores += 1;
    }

    /// Drop every answer recorded for one child.
    pub fn forget_child(&mut self, child: usize) {
        self.current.retain(|(index, _, _), _| *index != child);
        self.previous.retain(|(index, _, _), _| *index != child);
    }

    pub fn stats(&self) -> MeasureCacheStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = MeasureCacheStats::default();
    }

    pub fn len(&self) -> usize {
        self.current.len() + self.previous.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty() && self.previous.is_empty()
    }
}
