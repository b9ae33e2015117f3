#![forbid(unsafe_code)]
//! mfront-core: index types, the elimination-forest data model, solver
//! configuration, and allocation-policy interfaces.
//!
//! No allocation policy and no tree algorithms live here; `mfront-mem` and
//! `mfront-tree` build on these types.

pub mod alloc;
pub mod config;
pub mod error;
pub mod forest;
pub mod index;
pub mod prelude;

pub use error::{Error, Result};
pub use forest::EliminationForest;
pub use index::FrontIndex;
