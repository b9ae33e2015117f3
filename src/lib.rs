#![forbid(unsafe_code)]
//! mfront: frontal-matrix memory planning for multifrontal sparse LU.
//!
//! Given an elimination forest from symbolic analysis, compute the largest
//! front in every subtree, order siblings by it, and size the working buffer
//! numeric factorization needs per root.
//!
//! The member crates can be used on their own; this crate re-exports them and
//! wires the passes together in [`analyze`].

pub use mfront_core;
pub use mfront_mem;
pub use mfront_tree;

use mfront_core::config::SolverConfig;
use mfront_core::forest::EliminationForest;
use mfront_core::index::FrontIndex;
use mfront_tree::{postorder, verify, FrontSizes, WorkspacePlan};

/// Everything the numeric phase needs to plan memory for one forest.
#[derive(Debug, Clone)]
pub struct Analysis<I> {
    pub fsize: FrontSizes<I>,
    pub postorder: Vec<usize>,
    pub plan: WorkspacePlan,
    /// Structural nodes whose subtree size never reached their parent.
    pub dropped_links: Vec<usize>,
}

/// Run size propagation, sibling ordering and workspace planning.
pub fn analyze<I: FrontIndex>(forest: &EliminationForest<I>, cfg: &SolverConfig) -> Analysis<I> {
    let fsize = FrontSizes::compute(forest);
    let dropped_links = verify::dropped_links(forest, fsize.as_slice());
    let postorder = postorder(forest, fsize.as_slice());
    let plan = WorkspacePlan::from_config(forest, fsize.as_slice(), cfg);
    Analysis {
        fsize,
        postorder,
        plan,
        dropped_links,
    }
}

pub mod prelude {
    pub use crate::{analyze, Analysis};
    pub use mfront_core::prelude::*;
    pub use mfront_mem::{Element, ElementPool, FailWindow, MemoryAllocator, TrackedBuf};
    pub use mfront_tree::{
        max_front_sizes, max_front_sizes_into, ForestFrontSizes, FrontSizes, RootWorkspace,
        WorkspacePlan,
    };
}
