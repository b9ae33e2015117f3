#![forbid(unsafe_code)]
//! mfront-mem: counting allocator, fault injection, and frontal element storage.
//!
//! All numeric-phase buffers should flow through `MemoryAllocator` so leak
//! audits and out-of-memory recovery can be exercised in tests. Diagnostic
//! counters live in an explicit `AllocTracker`, never in a global.

pub mod alloc;
pub mod element;
pub mod error;
pub mod fault;
pub mod tracking;

pub use alloc::{MemoryAllocator, TrackedBuf};
pub use element::{Element, ElementPool};
pub use error::{Error, Result};
pub use fault::{FailWindow, NeverFail};
pub use tracking::{AllocStats, AllocTracker};
