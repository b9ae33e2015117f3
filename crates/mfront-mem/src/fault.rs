//! Deterministic fault-injection policies.
//!
//! `NeverFail` is re-exported from core; `FailWindow` reproduces the classic
//! countdown scheme: a counter is decremented on every request and requests
//! that land inside `lo..=hi` are refused.

use std::sync::atomic::{AtomicI64, Ordering};

use mfront_core::alloc::FaultPolicy;
use mfront_core::config::FaultWindowConfig;

pub use mfront_core::alloc::NeverFail;

#[derive(Debug)]
pub struct FailWindow {
    counter: AtomicI64,
    lo: i64,
    hi: i64,
}

impl FailWindow {
    pub fn new(start: i64, lo: i64, hi: i64) -> Self {
        Self {
            counter: AtomicI64::new(start),
            lo,
            hi,
        }
    }

    /// Let `ok` requests succeed, then refuse the next `fail` requests.
    pub fn after(ok: u32, fail: u32) -> Self {
        // Request k sees counter = start - k; we want k in ok+1..=ok+fail to fail.
        let start = i64::from(ok) + i64::from(fail);
        Self::new(start, 0, i64::from(fail) - 1)
    }

    /// Refuse only the `k`-th request (1-based). `nth(0)` refuses nothing.
    pub fn nth(k: u32) -> Self {
        match k {
            0 => Self::after(0, 0),
            k => Self::after(k - 1, 1),
        }
    }

    pub fn from_config(cfg: &FaultWindowConfig) -> Self {
        Self::new(cfg.start, cfg.lo, cfg.hi)
    }
}

impl FaultPolicy for FailWindow {
    fn should_fail(&self, _request: u64) -> bool {
        let now = self.counter.fetch_sub(1, Ordering::AcqRel) - 1;
        now >= self.lo && now <= self.hi
    }

    fn name(&self) -> &'static str {
        "fail-window"
    }
}
