//! Convenient re-exports for downstream crates.

pub use crate::alloc::{FaultPolicy, NeverFail};
pub use crate::config::{FaultWindowConfig, SolverConfig};
pub use crate::error::{Error, Result};
pub use crate::forest::EliminationForest;
pub use crate::index::FrontIndex;
