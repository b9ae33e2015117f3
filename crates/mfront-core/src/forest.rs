//! Elimination forest: the per-node arrays produced by symbolic analysis.
//!
//! Nodes are stored in topological order (`parent[j] > j` for every non-root),
//! so children always precede their parent. Algorithms in `mfront-tree` rely
//! on that order to run in a single increasing-index pass.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::index::FrontIndex;

/// Parallel per-node arrays describing the assembly tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EliminationForest<I> {
    fnrows: Vec<I>,
    fncols: Vec<I>,
    parent: Vec<I>,
    npiv: Vec<I>,
}

impl<I: FrontIndex> EliminationForest<I> {
    /// Build a forest, validating lengths, parent range and topological order.
    pub fn new(fnrows: Vec<I>, fncols: Vec<I>, parent: Vec<I>, npiv: Vec<I>) -> Result<Self> {
        let forest = Self {
            fnrows,
            fncols,
            parent,
            npiv,
        };
        forest.validate()?;
        Ok(forest)
    }

    /// Build a forest without validation. The topological-order precondition
    /// is still asserted in debug builds.
    pub fn new_unchecked(fnrows: Vec<I>, fncols: Vec<I>, parent: Vec<I>, npiv: Vec<I>) -> Self {
        let forest = Self {
            fnrows,
            fncols,
            parent,
            npiv,
        };
        debug_assert!(
            forest.validate().is_ok(),
            "elimination forest violates its preconditions"
        );
        forest
    }

    /// Check the structural preconditions.
    pub fn validate(&self) -> Result<()> {
        let n = self.npiv.len();
        for (field, len) in [
            ("fnrows", self.fnrows.len()),
            ("fncols", self.fncols.len()),
            ("parent", self.parent.len()),
        ] {
            if len != n {
                return Err(Error::LengthMismatch {
                    field,
                    expected: n,
                    actual: len,
                });
            }
        }
        if n > 0 && I::from_usize(n - 1).is_none() {
            return Err(Error::TooManyNodes(n));
        }

        for (j, &p) in self.parent.iter().enumerate() {
            if p.is_empty() {
                continue;
            }
            let parent = match p.to_usize() {
                Some(parent) if parent < n => parent,
                _ => {
                    return Err(Error::ParentOutOfRange {
                        node: j,
                        parent: p.widen(),
                        len: n,
                    })
                }
            };
            if parent <= j {
                #[cfg(feature = "tracing")]
                tracing::warn!(node = j, parent, "forest not in topological order");
                return Err(Error::NotTopological { node: j, parent });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.npiv.len()
    }

    pub fn is_empty(&self) -> bool {
        self.npiv.is_empty()
    }

    pub fn fnrows(&self) -> &[I] {
        &self.fnrows
    }

    pub fn fncols(&self) -> &[I] {
        &self.fncols
    }

    pub fn parent(&self) -> &[I] {
        &self.parent
    }

    pub fn npiv(&self) -> &[I] {
        &self.npiv
    }

    /// Parent position of node `j`, or `None` for a root.
    pub fn parent_of(&self, j: usize) -> Option<usize> {
        self.parent[j].to_usize()
    }

    /// A node owns at least one pivot.
    pub fn is_pivotal(&self, j: usize) -> bool {
        self.npiv[j] > I::ZERO
    }

    /// Root nodes in increasing index order.
    pub fn roots(&self) -> Vec<usize> {
        (0..self.len())
            .filter(|&j| self.parent_of(j).is_none())
            .collect()
    }

    /// Child lists, each in increasing index order.
    pub fn children(&self) -> Vec<Vec<usize>> {
        let mut children = vec![Vec::new(); self.len()];
        for j in 0..self.len() {
            if let Some(p) = self.parent_of(j) {
                children[p].push(j);
            }
        }
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> EliminationForest<i32> {
        EliminationForest::new(vec![2, 3, 1], vec![2, 3, 5], vec![1, 2, -1], vec![1, 1, 1])
            .unwrap()
    }

    #[test]
    fn test_roots_and_children() {
        let f = chain();
        assert_eq!(f.len(), 3);
        assert_eq!(f.roots(), vec![2]);
        assert_eq!(f.children(), vec![vec![], vec![0], vec![1]]);
        assert_eq!(f.parent_of(0), Some(1));
        assert_eq!(f.parent_of(2), None);
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let err = EliminationForest::new(vec![1, 1], vec![1], vec![-1, -1], vec![1, 1]).unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                field: "fncols",
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_rejects_parent_before_child() {
        let err =
            EliminationForest::new(vec![1, 1], vec![1, 1], vec![-1, 0], vec![1, 1]).unwrap_err();
        assert!(matches!(err, Error::NotTopological { node: 1, parent: 0 }));
    }

    #[test]
    fn test_rejects_self_parent_and_out_of_range() {
        let err = EliminationForest::new(vec![1], vec![1], vec![0], vec![1]).unwrap_err();
        assert!(matches!(err, Error::NotTopological { node: 0, parent: 0 }));

        let err = EliminationForest::new(vec![1], vec![1], vec![5], vec![1]).unwrap_err();
        assert!(matches!(err, Error::ParentOutOfRange { node: 0, parent: 5, len: 1 }));

        let err = EliminationForest::new(vec![1], vec![1], vec![-3], vec![1]).unwrap_err();
        assert!(matches!(err, Error::ParentOutOfRange { parent: -3, .. }));
    }

    #[test]
    fn test_empty_forest_is_valid() {
        let f = EliminationForest::<i64>::new(vec![], vec![], vec![], vec![]).unwrap();
        assert!(f.is_empty());
        assert!(f.roots().is_empty());
    }

    #[test]
    fn test_forest_serde_roundtrip() {
        let f = chain();
        let json = serde_json::to_string(&f).unwrap();
        let back: EliminationForest<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, f);
    }
}
