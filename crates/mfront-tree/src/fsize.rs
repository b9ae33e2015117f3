//! Largest frontal matrix in every subtree.
//!
//! Inputs (parallel arrays, topological order, `parent[j] > j`):
//! - `fnrows`, `fncols`: dense front dimensions.
//! - `parent`: parent node or `EMPTY`.
//! - `npiv`: pivots owned by the node; `<= 0` marks a structural node.
//!
//! Output: `fsize[j]` is the largest `fnrows * fncols` over pivotal nodes in
//! the subtree rooted at `j`, or `EMPTY` if none was ever recorded.
//!
//! Only the peak matters, not the sum: siblings are factorized one after the
//! other and reuse a single working buffer.
//!
//! A structural node (`npiv <= 0`) is skipped entirely. Whatever its children
//! folded into its `fsize` is kept, but it is NOT forwarded to its own parent.
//! See `verify::dropped_links` to detect forests where that matters.

use serde::{Deserialize, Serialize};

use mfront_core::forest::EliminationForest;
use mfront_core::index::FrontIndex;

/// Element count of an `r x c` front, clamped to `I::MAX` when the true
/// product does not fit. A clamped value means "as large as it gets", never
/// an exact size.
#[inline]
pub fn front_element_count<I: FrontIndex>(r: I, c: I) -> I {
    I::narrow_saturating(r.widen() * c.widen())
}

/// Compute subtree peak front sizes into `fsize`. Never allocates.
///
/// All slices must have the same length and satisfy the topological-order
/// precondition; both are asserted in debug builds only.
pub fn max_front_sizes_into<I: FrontIndex>(
    fsize: &mut [I],
    fnrows: &[I],
    fncols: &[I],
    parent: &[I],
    npiv: &[I],
) {
    let n = fsize.len();
    debug_assert_eq!(fnrows.len(), n, "fnrows length");
    debug_assert_eq!(fncols.len(), n, "fncols length");
    debug_assert_eq!(parent.len(), n, "parent length");
    debug_assert_eq!(npiv.len(), n, "npiv length");

    fsize.fill(I::EMPTY);

    for j in 0..n {
        if npiv[j] <= I::ZERO {
            continue;
        }

        let frsize = front_element_count(fnrows[j], fncols[j]);
        #[cfg(feature = "tracing")]
        {
            if frsize == I::MAX {
                tracing::warn!(node = j, rows = %fnrows[j], cols = %fncols[j], "front size clamped");
            }
        }

        fsize[j] = fsize[j].max(frsize);

        if let Some(p) = parent[j].to_usize() {
            debug_assert!(p > j && p < n, "node {j} has parent {p}; not topological");
            fsize[p] = fsize[p].max(fsize[j]);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(node = j, npiv = %npiv[j], size = %frsize, subtree = %fsize[j], parent = %parent[j], "front");
    }
}

/// Allocating convenience over [`max_front_sizes_into`].
pub fn max_front_sizes<I: FrontIndex>(fnrows: &[I], fncols: &[I], parent: &[I], npiv: &[I]) -> Vec<I> {
    let mut fsize = vec![I::EMPTY; npiv.len()];
    max_front_sizes_into(&mut fsize, fnrows, fncols, parent, npiv);
    fsize
}

/// Per-node subtree peak front sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrontSizes<I>(Vec<I>);

impl<I: FrontIndex> FrontSizes<I> {
    pub fn compute(forest: &EliminationForest<I>) -> Self {
        Self(max_front_sizes(
            forest.fnrows(),
            forest.fncols(),
            forest.parent(),
            forest.npiv(),
        ))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw values, `EMPTY` included.
    pub fn as_slice(&self) -> &[I] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<I> {
        self.0
    }

    /// Size at node `j`, or `None` if it was never set.
    pub fn get(&self, j: usize) -> Option<I> {
        let v = self.0[j];
        (!v.is_empty()).then_some(v)
    }

    /// The value hit the clamp and is not an exact element count.
    pub fn is_clamped(&self, j: usize) -> bool {
        self.0[j] == I::MAX
    }

    /// Largest size over the roots of `forest`.
    pub fn max_root_size(&self, forest: &EliminationForest<I>) -> Option<I> {
        forest.roots().into_iter().filter_map(|r| self.get(r)).max()
    }
}

impl<I: FrontIndex> From<FrontSizes<I>> for Vec<I> {
    fn from(sizes: FrontSizes<I>) -> Self {
        sizes.0
    }
}

/// Extension so callers can write `forest.max_front_sizes()`.
pub trait ForestFrontSizes<I> {
    fn max_front_sizes(&self) -> FrontSizes<I>;
}

impl<I: FrontIndex> ForestFrontSizes<I> for EliminationForest<I> {
    fn max_front_sizes(&self) -> FrontSizes<I> {
        FrontSizes::compute(self)
    }
}
