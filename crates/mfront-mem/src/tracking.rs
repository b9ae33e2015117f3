//! Allocation counters scoped to an explicit context.
//!
//! One `AllocTracker` is shared (via `Arc`) between an allocator and every
//! buffer it hands out. Leak audits compare `outstanding()` before and after.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use serde::Serialize;

/// Outcome of reserving bytes ahead of an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reservation {
    Reserved,
    OverCapacity,
    /// Live bytes plus the request do not fit `usize`.
    Overflow,
}

#[derive(Default)]
pub struct AllocTracker {
    outstanding: AtomicUsize,
    used_bytes: AtomicUsize,
    peak_bytes: AtomicUsize,
    requests: AtomicU64,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllocStats {
    pub outstanding: usize,
    pub used_bytes: usize,
    pub peak_bytes: usize,
    pub requests: u64,
}

impl AllocTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number the next request (1-based).
    pub(crate) fn next_request(&self) -> u64 {
        self.requests.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Try to reserve `bytes` under an optional cap. The peak is not touched
    /// until the reservation becomes an allocation.
    pub(crate) fn try_reserve(&self, bytes: usize, cap: Option<usize>) -> Reservation {
        loop {
            let cur = self.used_bytes.load(Ordering::Relaxed);
            let Some(next) = cur.checked_add(bytes) else {
                return Reservation::Overflow;
            };
            if let Some(cap) = cap {
                if next > cap {
                    return Reservation::OverCapacity;
                }
            }
            if self
                .used_bytes
                .compare_exchange(cur, next, Ordering::AcqRel, Ordering::Relaxed)
                .is_ok()
            {
                return Reservation::Reserved;
            }
        }
    }

    /// Undo a reservation that never became an allocation.
    pub(crate) fn unreserve(&self, bytes: usize) {
        self.used_bytes.fetch_sub(bytes, Ordering::AcqRel);
    }

    /// Commit a reservation as a live allocation.
    pub(crate) fn record_alloc(&self) {
        self.outstanding.fetch_add(1, Ordering::AcqRel);
        self.record_peak(self.used_bytes.load(Ordering::Acquire));
    }

    pub(crate) fn record_free(&self, bytes: usize) {
        self.outstanding.fetch_sub(1, Ordering::AcqRel);
        self.used_bytes.fetch_sub(bytes, Ordering::AcqRel);
    }

    fn record_peak(&self, used_bytes: usize) {
        let mut cur = self.peak_bytes.load(Ordering::Relaxed);
        while used_bytes > cur {
            match self.peak_bytes.compare_exchange(
                cur,
                used_bytes,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(observed) => cur = observed,
            }
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(
            used_bytes,
            peak = self.peak_bytes.load(Ordering::Relaxed),
            "mem usage"
        );
    }

    /// Live allocations not yet dropped.
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Relaxed)
    }

    pub fn used_bytes(&self) -> usize {
        self.used_bytes.load(Ordering::Relaxed)
    }

    pub fn peak_bytes(&self) -> usize {
        self.peak_bytes.load(Ordering::Relaxed)
    }

    /// Requests seen so far, including refused ones.
    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> AllocStats {
        AllocStats {
            outstanding: self.outstanding(),
            used_bytes: self.used_bytes(),
            peak_bytes: self.peak_bytes(),
            requests: self.requests(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_respects_cap() {
        let t = AllocTracker::new();
        assert_eq!(t.try_reserve(60, Some(100)), Reservation::Reserved);
        assert_eq!(t.try_reserve(50, Some(100)), Reservation::OverCapacity);
        assert_eq!(t.used_bytes(), 60);
        t.unreserve(60);
        assert_eq!(t.used_bytes(), 0);
        // never committed, so no peak
        assert_eq!(t.peak_bytes(), 0);
    }

    #[test]
    fn test_alloc_free_balance() {
        let t = AllocTracker::new();
        assert_eq!(t.try_reserve(32, None), Reservation::Reserved);
        t.record_alloc();
        assert_eq!(t.outstanding(), 1);
        t.record_free(32);
        assert_eq!(
            t.snapshot(),
            AllocStats {
                outstanding: 0,
                used_bytes: 0,
                peak_bytes: 32,
                requests: 0,
            }
        );
    }

    #[test]
    fn test_reserve_overflow_leaves_usage_intact() {
        let t = AllocTracker::new();
        assert_eq!(t.try_reserve(100, None), Reservation::Reserved);
        assert_eq!(t.try_reserve(usize::MAX - 50, None), Reservation::Overflow);
        assert_eq!(t.used_bytes(), 100);
    }
}
