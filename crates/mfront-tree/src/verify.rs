//! Debug-time verification helpers for forests and front sizes.
//!
//! These functions are intended for testing and debug builds to catch
//! violations early. They are linear in the forest size.

use mfront_core::forest::EliminationForest;
use mfront_core::index::FrontIndex;

/// Verify that every parent comes after its child.
pub fn assert_topological<I: FrontIndex>(forest: &EliminationForest<I>) {
    for j in 0..forest.len() {
        if let Some(p) = forest.parent_of(j) {
            assert!(p > j, "node {j} has parent {p}; forest is not topological");
        }
    }
}

/// Verify that sizes never decrease along a root-ward path through pivotal
/// nodes.
pub fn assert_monotone<I: FrontIndex>(forest: &EliminationForest<I>, fsize: &[I]) {
    for j in 0..forest.len() {
        if !forest.is_pivotal(j) {
            continue;
        }
        if let Some(p) = forest.parent_of(j) {
            assert!(
                fsize[p] >= fsize[j],
                "front size drops from {} at node {j} to {} at parent {p}",
                fsize[j],
                fsize[p]
            );
        }
    }
}

/// Structural nodes whose accumulated size is set but never reaches their
/// parent.
///
/// Size propagation skips nodes with `npiv <= 0`, so a pivotal subtree hanging
/// below a structural node is invisible to everything above it. An empty
/// result means the computed sizes are true subtree maxima.
pub fn dropped_links<I: FrontIndex>(forest: &EliminationForest<I>, fsize: &[I]) -> Vec<usize> {
    let dropped: Vec<usize> = (0..forest.len())
        .filter(|&j| {
            !forest.is_pivotal(j) && !fsize[j].is_empty() && forest.parent_of(j).is_some()
        })
        .collect();

    #[cfg(feature = "tracing")]
    {
        if !dropped.is_empty() {
            tracing::warn!(count = dropped.len(), nodes = ?dropped, "structural nodes hide subtree front sizes");
        }
    }

    dropped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsize::max_front_sizes;

    fn forest(parent: Vec<i32>, npiv: Vec<i32>) -> EliminationForest<i32> {
        let n = parent.len();
        EliminationForest::new(vec![3; n], vec![3; n], parent, npiv).unwrap()
    }

    #[test]
    fn test_topological_forest_passes() {
        let f = forest(vec![2, 2, -1], vec![1, 1, 1]);
        assert_topological(&f);
    }

    #[test]
    #[should_panic(expected = "not topological")]
    fn test_misordered_forest_panics() {
        // Deserialization bypasses validation.
        let f: EliminationForest<i32> = serde_json::from_str(
            r#"{"fnrows":[1,1],"fncols":[1,1],"parent":[-1,0],"npiv":[1,1]}"#,
        )
        .unwrap();
        assert_topological(&f);
    }

    #[test]
    #[should_panic(expected = "front size drops")]
    fn test_monotone_rejects_shrinking_parent() {
        let f = forest(vec![1, -1], vec![1, 1]);
        assert_monotone(&f, &[9, 4]);
    }

    #[test]
    fn test_dropped_links_reports_structural_interior() {
        let f = forest(vec![1, 2, -1], vec![1, 0, 1]);
        let fs = max_front_sizes(f.fnrows(), f.fncols(), f.parent(), f.npiv());
        assert_monotone(&f, &fs);
        assert_eq!(dropped_links(&f, &fs), vec![1]);
    }

    #[test]
    fn test_dropped_links_ignores_structural_roots_and_leaves() {
        // node 0 structural leaf, node 2 structural root fed by pivotal node 1
        let f = forest(vec![1, 2, -1], vec![0, 1, 0]);
        let fs = max_front_sizes(f.fnrows(), f.fncols(), f.parent(), f.npiv());
        assert_eq!(fs, vec![-1, 9, 9]);
        assert!(dropped_links(&f, &fs).is_empty());
    }
}
