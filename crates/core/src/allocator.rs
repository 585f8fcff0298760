//! Monotonic identifier allocation.

/// Hands out increasing identifiers, never repeating one.
///
/// Starts at 1. IDs that enter a store from outside (seed data) are reported
/// through [`IdAllocator::observe`] so later allocations skip past them.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    /// Create an allocator whose first ID is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocate the next ID.
    pub fn allocate<I: From<u64>>(&mut self) -> I {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        I::from(id)
    }

    /// Record an externally assigned ID so it is never allocated.
    pub fn observe(&mut self, id: u64) {
        if id >= self.next {
            self.next = id.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserId;

    #[test]
    fn test_allocate_is_monotonic() {
        let mut ids = IdAllocator::new();
        let a: UserId = ids.allocate();
        let b: UserId = ids.allocate();
        let c: UserId = ids.allocate();
        assert_eq!((a.as_u64(), b.as_u64(), c.as_u64()), (1, 2, 3));
    }

    #[test]
    fn test_observe_skips_past_seen_ids() {
        let mut ids = IdAllocator::new();
        ids.observe(10);
        ids.observe(4);
        assert_eq!(ids.allocate::<u64>(), 11);
    }

    #[test]
    fn test_rapid_allocations_never_collide() {
        let mut ids = IdAllocator::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(ids.allocate::<u64>()));
        }
    }
}
