//! Counting, fallible allocator.
//!
//! Every buffer handed out is a `TrackedBuf` that returns its bytes and its
//! allocation count to the shared `AllocTracker` on drop (panic-safe).

use std::fmt;
use std::mem::size_of;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use mfront_core::alloc::{FaultPolicy, NeverFail};
use mfront_core::config::SolverConfig;

use crate::error::{Error, Result};
use crate::fault::FailWindow;
use crate::tracking::{AllocStats, AllocTracker, Reservation};

/// Owned buffer accounted against an `AllocTracker`.
pub struct TrackedBuf<T> {
    tracker: Arc<AllocTracker>,
    bytes: usize,
    tag: &'static str,
    buf: Vec<T>,
}

impl<T> TrackedBuf<T> {
    /// Accounted size in bytes.
    pub fn bytes(&self) -> usize {
        self.bytes
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }
}

impl<T> Drop for TrackedBuf<T> {
    fn drop(&mut self) {
        // NOTE: do not log here to keep drop path fast.
        self.tracker.record_free(self.bytes);
    }
}

impl<T> Deref for TrackedBuf<T> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl<T> DerefMut for TrackedBuf<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buf
    }
}

impl<T> fmt::Debug for TrackedBuf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedBuf")
            .field("tag", &self.tag)
            .field("len", &self.buf.len())
            .field("bytes", &self.bytes)
            .finish()
    }
}

/// Allocator handle. Cheap to clone; clones share counters and fault policy.
#[derive(Clone)]
pub struct MemoryAllocator {
    tracker: Arc<AllocTracker>,
    fault: Arc<dyn FaultPolicy>,
    capacity: Option<usize>,
}

impl Default for MemoryAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAllocator {
    /// Uncapped allocator that never injects failures.
    pub fn new() -> Self {
        Self::with_policy(NeverFail)
    }

    pub fn with_policy(policy: impl FaultPolicy + 'static) -> Self {
        Self {
            tracker: Arc::new(AllocTracker::new()),
            fault: Arc::new(policy),
            capacity: None,
        }
    }

    /// Cap live bytes; requests beyond the cap fail with `CapacityExceeded`.
    pub fn with_capacity(mut self, capacity_bytes: usize) -> Self {
        self.capacity = Some(capacity_bytes);
        self
    }

    pub fn from_config(cfg: &SolverConfig) -> Self {
        let alloc = match &cfg.fault_window {
            Some(w) => Self::with_policy(FailWindow::from_config(w)),
            None => Self::new(),
        };
        match cfg.mem_cap_bytes {
            Some(cap) => alloc.with_capacity(cap),
            None => alloc,
        }
    }

    /// Allocate `count` default-initialized elements of `T`.
    ///
    /// Zero-length requests succeed and still count as one allocation.
    pub fn allocate<T: Clone + Default>(
        &self,
        count: usize,
        tag: &'static str,
    ) -> Result<TrackedBuf<T>> {
        let element_size = size_of::<T>();
        let request = self.tracker.next_request();

        if self.fault.should_fail(request) {
            #[cfg(feature = "tracing")]
            tracing::debug!(request, tag, policy = self.fault.name(), "injected allocation failure");
            return Err(Error::InjectedFault { tag, request });
        }

        let bytes = count.checked_mul(element_size).ok_or(Error::SizeOverflow {
            tag,
            count,
            element_size,
        })?;

        match self.tracker.try_reserve(bytes, self.capacity) {
            Reservation::Reserved => {}
            Reservation::OverCapacity => {
                return Err(Error::CapacityExceeded {
                    tag,
                    requested: bytes,
                    capacity: self.capacity.unwrap_or(usize::MAX),
                    used: self.tracker.used_bytes(),
                });
            }
            Reservation::Overflow => {
                return Err(Error::OutOfMemory {
                    tag,
                    count,
                    element_size,
                });
            }
        }

        let mut buf = Vec::new();
        if buf.try_reserve_exact(count).is_err() {
            self.tracker.unreserve(bytes);
            return Err(Error::OutOfMemory {
                tag,
                count,
                element_size,
            });
        }
        buf.resize(count, T::default());
        self.tracker.record_alloc();

        #[cfg(feature = "tracing")]
        tracing::trace!(
            request,
            tag,
            count,
            bytes,
            outstanding = self.tracker.outstanding(),
            "allocated"
        );

        Ok(TrackedBuf {
            tracker: Arc::clone(&self.tracker),
            bytes,
            tag,
            buf,
        })
    }

    /// Live allocations (leak audit).
    pub fn outstanding(&self) -> usize {
        self.tracker.outstanding()
    }

    pub fn used_bytes(&self) -> usize {
        self.tracker.used_bytes()
    }

    pub fn capacity_bytes(&self) -> Option<usize> {
        self.capacity
    }

    pub fn stats(&self) -> AllocStats {
        self.tracker.snapshot()
    }

    pub fn tracker(&self) -> &Arc<AllocTracker> {
        &self.tracker
    }
}
