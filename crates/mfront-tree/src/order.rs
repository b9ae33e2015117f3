//! Sibling ordering and depth-first postorder.
//!
//! Children of each node are visited largest subtree front first. Unset sizes
//! (`EMPTY`) sort last; ties keep increasing index.

use std::cmp::Reverse;

use mfront_core::forest::EliminationForest;
use mfront_core::index::FrontIndex;

/// Child lists ordered by descending `fsize`, then increasing index.
pub fn sorted_children<I: FrontIndex>(forest: &EliminationForest<I>, fsize: &[I]) -> Vec<Vec<usize>> {
    debug_assert_eq!(fsize.len(), forest.len());
    let mut children = forest.children();
    for kids in &mut children {
        // EMPTY is -1, below every real size, so it naturally sorts last.
        kids.sort_by_key(|&c| (Reverse(fsize[c]), c));
    }
    children
}

/// Postorder of the whole forest: every node after all of its descendants.
/// Roots are taken in increasing index order.
pub fn postorder<I: FrontIndex>(forest: &EliminationForest<I>, fsize: &[I]) -> Vec<usize> {
    let children = sorted_children(forest, fsize);
    let mut order = Vec::with_capacity(forest.len());
    // (node, next child position)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in forest.roots() {
        stack.push((root, 0));
        while let Some(top) = stack.last_mut() {
            let (node, next) = *top;
            if let Some(&child) = children[node].get(next) {
                top.1 += 1;
                stack.push((child, 0));
            } else {
                stack.pop();
                order.push(node);
            }
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(nodes = order.len(), "postorder computed");

    order
}

/// Inverse permutation: `position[node]` is the node's slot in `order`.
pub fn positions(order: &[usize]) -> Vec<usize> {
    let mut position = vec![0; order.len()];
    for (k, &node) in order.iter().enumerate() {
        position[node] = k;
    }
    position
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsize::max_front_sizes;

    //        4
    //      /   \
    //     2     3
    //    / \
    //   0   1
    fn tree() -> EliminationForest<i64> {
        EliminationForest::new(
            vec![1, 6, 2, 8, 1],
            vec![1, 6, 2, 8, 1],
            vec![2, 2, 4, 4, -1],
            vec![1, 1, 1, 1, 1],
        )
        .unwrap()
    }

    #[test]
    fn test_children_sorted_by_descending_size() {
        let f = tree();
        let fs = max_front_sizes(f.fnrows(), f.fncols(), f.parent(), f.npiv());
        assert_eq!(fs, vec![1, 36, 36, 64, 64]);
        let kids = sorted_children(&f, &fs);
        assert_eq!(kids[2], vec![1, 0]);
        assert_eq!(kids[4], vec![3, 2]);
    }

    #[test]
    fn test_postorder_visits_children_first() {
        let f = tree();
        let fs = max_front_sizes(f.fnrows(), f.fncols(), f.parent(), f.npiv());
        let order = postorder(&f, &fs);
        assert_eq!(order, vec![3, 1, 0, 2, 4]);

        let pos = positions(&order);
        for j in 0..f.len() {
            if let Some(p) = f.parent_of(j) {
                assert!(pos[j] < pos[p]);
            }
        }
    }

    #[test]
    fn test_empty_sizes_sort_last_and_ties_by_index() {
        let f = EliminationForest::new(
            vec![2, 2, 2, 1],
            vec![2, 2, 2, 1],
            vec![3, 3, 3, -1],
            vec![0, 1, 1, 1],
        )
        .unwrap();
        let fs = max_front_sizes(f.fnrows(), f.fncols(), f.parent(), f.npiv());
        assert_eq!(fs, vec![-1, 4, 4, 4]);
        assert_eq!(sorted_children(&f, &fs)[3], vec![1, 2, 0]);
    }

    #[test]
    fn test_forest_with_several_roots() {
        let f = EliminationForest::new(vec![1, 3], vec![1, 3], vec![-1, -1], vec![1, 1]).unwrap();
        let fs = max_front_sizes(f.fnrows(), f.fncols(), f.parent(), f.npiv());
        assert_eq!(postorder(&f, &fs), vec![0, 1]);
    }
}
