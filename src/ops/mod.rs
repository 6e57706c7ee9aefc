//! Public concatenation and splitting, built on the fringe machinery.
//!
//! The empty sequence is `None`; every operation is total and boundary
//! indices coerce to the empty or full tree instead of failing.

use crate::fringe::{
    concat_fringes, to_tmp_tree, transform_left, transform_right, LeftFringe, RightFringe,
};
use crate::node::{Element, NodeRef};
use crate::round::compress;

/// Concatenates two sequences into one canonical tree in O(log² n).
pub fn concat<X: Element>(
    left: Option<NodeRef<X>>,
    right: Option<NodeRef<X>>,
) -> Option<NodeRef<X>> {
    let left = match left {
        Some(node) => node,
        None => return right,
    };
    let right = match right {
        Some(node) => node,
        None => return Some(left),
    };
    Some(concat_fringes(transform_right(&left), transform_left(&right)))
}

/// Splits a tree at `at`, returning the canonical prefix and suffix.
/// Indices past the end coerce to the full size.
pub fn split<X: Element>(tree: &NodeRef<X>, at: usize) -> (Option<NodeRef<X>>, Option<NodeRef<X>>) {
    (left_split(tree, at), right_split(tree, at))
}

/// Canonical tree covering the first `at` elements; `None` when `at` is 0.
pub fn left_split<X: Element>(tree: &NodeRef<X>, at: usize) -> Option<NodeRef<X>> {
    if at == 0 {
        return None;
    }
    if at >= tree.size() as usize {
        return Some(tree.clone());
    }

    let mut parts = Vec::new();
    collect_left_parts(tree, at, &mut parts);
    rebuild_as_canonical(parts, true)
}

/// Canonical tree covering everything after the first `at` elements;
/// `None` when `at` reaches the size.
pub fn right_split<X: Element>(tree: &NodeRef<X>, at: usize) -> Option<NodeRef<X>> {
    if at == 0 {
        return Some(tree.clone());
    }
    let size = tree.size() as usize;
    if at >= size {
        return None;
    }

    let mut parts = Vec::new();
    collect_right_parts(tree, size - at, &mut parts);
    parts.reverse();
    rebuild_as_canonical(parts, false)
}

/// Collects subtrees left-to-right that together cover exactly `pos`
/// elements.
fn collect_left_parts<X: Element>(tree: &NodeRef<X>, pos: usize, parts: &mut Vec<NodeRef<X>>) {
    if pos == 0 {
        return;
    }
    let left = tree.left();
    let left_size = left.size() as usize;
    if pos >= left_size {
        parts.push(left);
        collect_left_parts(&tree.right(), pos - left_size, parts);
    } else {
        collect_left_parts(&left, pos, parts);
    }
}

/// Collects subtrees right-to-left that together cover exactly `pos`
/// elements.
fn collect_right_parts<X: Element>(tree: &NodeRef<X>, pos: usize, parts: &mut Vec<NodeRef<X>>) {
    if pos == 0 {
        return;
    }
    let right = tree.right();
    let right_size = right.size() as usize;
    if pos >= right_size {
        parts.push(right);
        collect_right_parts(&tree.left(), pos - right_size, parts);
    } else {
        collect_right_parts(&right, pos, parts);
    }
}

/// Shared tail of both split directions: compress the cover, fold it into a
/// transient tree, decompose it into the matching fringe and recombine
/// against the empty opposite fringe.
fn rebuild_as_canonical<X: Element>(
    parts: Vec<NodeRef<X>>,
    as_right_fringe: bool,
) -> Option<NodeRef<X>> {
    let compressed = compress(parts);
    let tmp = to_tmp_tree(&compressed)?;
    let root = if as_right_fringe {
        concat_fringes(transform_right(&tmp), LeftFringe::empty())
    } else {
        concat_fringes(RightFringe::empty(), transform_left(&tmp))
    };
    Some(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::leaf;

    fn fold(values: impl IntoIterator<Item = i32>) -> Option<NodeRef<i32>> {
        values
            .into_iter()
            .fold(None, |tree, value| concat(tree, Some(leaf(value))))
    }

    #[test]
    fn concat_treats_none_as_empty() {
        let tree = fold(0..4).unwrap();
        assert!(concat::<i32>(None, None).is_none());
        let same = concat(Some(tree.clone()), None).unwrap();
        assert!(std::sync::Arc::ptr_eq(&same, &tree));
        let same = concat(None, Some(tree.clone())).unwrap();
        assert!(std::sync::Arc::ptr_eq(&same, &tree));
    }

    #[test]
    fn split_boundaries_coerce() {
        let tree = fold(0..10).unwrap();
        let (left, right) = split(&tree, 0);
        assert!(left.is_none());
        assert!(right.unwrap().equal_to(&tree));

        let (left, right) = split(&tree, 10);
        assert!(left.unwrap().equal_to(&tree));
        assert!(right.is_none());

        let (left, right) = split(&tree, 99);
        assert!(left.unwrap().equal_to(&tree));
        assert!(right.is_none());
    }

    #[test]
    fn split_partitions_sizes() {
        let tree = fold(0..100).unwrap();
        for at in [1, 17, 50, 63, 99] {
            let (left, right) = split(&tree, at);
            let left = left.unwrap();
            let right = right.unwrap();
            assert_eq!(left.size() as usize, at);
            assert_eq!(right.size() as usize, 100 - at);
            assert_eq!(*left.first(), 0);
            assert_eq!(*left.last(), at as i32 - 1);
            assert_eq!(*right.first(), at as i32);
            assert_eq!(*right.last(), 99);
        }
    }

    #[test]
    fn split_then_concat_restores_the_tree() {
        let tree = fold(0..64).unwrap();
        for at in 0..=64 {
            let (left, right) = split(&tree, at);
            let rebuilt = concat(left, right).unwrap();
            assert_eq!(rebuilt.hash_code(), tree.hash_code());
            assert!(rebuilt.equal_to(&tree));
        }
    }
}
