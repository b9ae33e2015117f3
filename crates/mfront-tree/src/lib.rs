#![forbid(unsafe_code)]
//! mfront-tree: analysis passes over an elimination forest.
//!
//! Responsibilities:
//! - Propagate the largest frontal matrix size up every subtree (`fsize`).
//! - Order siblings by that size and produce a depth-first postorder.
//! - Size one working buffer per root for numeric factorization.
//! - Provide debug-time verification helpers.
//!
//! Only `RootWorkspace::acquire` requests memory through `mfront-mem`.

pub mod fsize;
pub mod order;
pub mod plan;
pub mod verify;

pub use fsize::{
    front_element_count, max_front_sizes, max_front_sizes_into, ForestFrontSizes, FrontSizes,
};
pub use order::{positions, postorder, sorted_children};
pub use plan::{RootWorkspace, WorkspacePlan};
