//! Working-buffer sizing for numeric factorization.
//!
//! Each root gets one buffer sized by its subtree peak front, `fsize[root]`
//! entries of `entry_bytes` each. A clamped size or a byte count that does
//! not fit `usize` yields `bytes: None`: allocate the largest practical
//! buffer, or let the allocator report out-of-memory when asked.

use serde::{Deserialize, Serialize};

use mfront_core::config::SolverConfig;
use mfront_core::forest::EliminationForest;
use mfront_core::index::FrontIndex;
use mfront_mem::{ElementPool, Result as MemResult, TrackedBuf};

/// Buffer requirement for one root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootWorkspace {
    pub root: usize,
    /// Peak front entries in the subtree; 0 when the subtree has no pivotal node.
    pub entries: usize,
    pub bytes: Option<usize>,
    pub clamped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspacePlan {
    pub entry_bytes: usize,
    pub roots: Vec<RootWorkspace>,
}

impl WorkspacePlan {
    pub fn new<I: FrontIndex>(forest: &EliminationForest<I>, fsize: &[I], entry_bytes: usize) -> Self {
        debug_assert_eq!(fsize.len(), forest.len());
        let roots: Vec<RootWorkspace> = forest
            .roots()
            .into_iter()
            .map(|root| {
                let size = fsize[root];
                let clamped = size == I::MAX;
                // EMPTY has no position and means "nothing to factorize".
                let entries = size.to_usize().unwrap_or(0);
                let bytes = if clamped {
                    None
                } else {
                    entries.checked_mul(entry_bytes)
                };
                RootWorkspace {
                    root,
                    entries,
                    bytes,
                    clamped,
                }
            })
            .collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(roots = roots.len(), entry_bytes, "workspace plan built");

        Self { entry_bytes, roots }
    }

    pub fn from_config<I: FrontIndex>(
        forest: &EliminationForest<I>,
        fsize: &[I],
        cfg: &SolverConfig,
    ) -> Self {
        Self::new(forest, fsize, cfg.entry_bytes)
    }

    /// Largest single buffer. Roots are factorized one after another, so this
    /// is the plan's peak; `None` if any root's size is unbounded.
    pub fn peak_bytes(&self) -> Option<usize> {
        self.roots
            .iter()
            .try_fold(0usize, |peak, r| r.bytes.map(|b| peak.max(b)))
    }

    pub fn any_clamped(&self) -> bool {
        self.roots.iter().any(|r| r.clamped)
    }

    pub fn root(&self, root: usize) -> Option<&RootWorkspace> {
        self.roots.iter().find(|r| r.root == root)
    }
}

impl RootWorkspace {
    /// Allocate this root's working buffer through `pool`.
    ///
    /// Clamped sizes are still requested at their clamped entry count; the
    /// allocator decides whether that is satisfiable.
    pub fn acquire(&self, pool: &ElementPool) -> MemResult<TrackedBuf<f64>> {
        pool.alloc_workspace(self.entries)
    }
}
