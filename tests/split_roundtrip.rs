//! Splitting at any position and re-concatenating restores the canonical
//! tree, including across chunking.

use splithash::{chunk, concat, leaf, split, NodeRef};

fn fold(values: impl IntoIterator<Item = i32>) -> Option<NodeRef<i32>> {
    values
        .into_iter()
        .fold(None, |tree, value| concat(tree, Some(leaf(value))))
}

fn nodes_equal(a: &NodeRef<i32>, b: &NodeRef<i32>) -> bool {
    a.hash_code() == b.hash_code() && a.size() == b.size() && a.equal_to(b)
}

#[test]
fn three_element_split_inspection() {
    let seq = concat(
        Some(leaf(1)),
        concat(Some(leaf(2)), Some(leaf(3))),
    )
    .expect("non-empty");
    assert_eq!(seq.size(), 3);

    let (front, back) = split(&seq, 1);
    let front = front.expect("non-empty");
    let back = back.expect("non-empty");

    assert_eq!(front.size(), 1);
    assert_eq!(*front.first(), 1);
    assert_eq!(*front.last(), 1);

    assert_eq!(back.size(), 2);
    assert_eq!(*back.first(), 2);
    assert_eq!(*back.last(), 3);

    let rebuilt = concat(Some(front), Some(back)).expect("non-empty");
    assert!(nodes_equal(&rebuilt, &seq));
}

#[test]
fn every_position_round_trips_with_chunking() {
    let n = 2_000;
    let tree = fold(0..n).expect("non-empty");

    for at in 1..n as usize {
        let (front, back) = split(&tree, at);
        let rebuilt = concat(front, back).expect("non-empty");
        let rebuilt = chunk(&rebuilt);
        assert!(
            nodes_equal(&rebuilt, &tree),
            "split/concat mismatch at position {at}"
        );
    }
}

#[test]
fn repeated_content_round_trips() {
    let n = 2_000;
    let tree = fold((0..n).map(|i| i % 63)).expect("non-empty");

    for at in 1..n as usize {
        let (front, back) = split(&tree, at);
        let rebuilt = concat(front, back).expect("non-empty");
        let rebuilt = chunk(&rebuilt);
        assert!(
            nodes_equal(&rebuilt, &tree),
            "repetition split mismatch at position {at}"
        );
    }
}

#[test]
fn split_halves_carry_the_right_elements() {
    let n = 500;
    let tree = fold(0..n).expect("non-empty");
    for at in 1..n as usize {
        let (front, back) = split(&tree, at);
        let front = front.expect("non-empty");
        let back = back.expect("non-empty");
        assert_eq!(front.size() as usize, at);
        assert_eq!(back.size() as usize, n as usize - at);
        assert_eq!(*front.first(), 0);
        assert_eq!(*front.last(), at as i32 - 1);
        assert_eq!(*back.first(), at as i32);
        assert_eq!(*back.last(), n - 1);
    }
}

#[test]
#[ignore = "full 50,000-element sweep; minutes in debug builds"]
fn full_sequence_round_trips() {
    let n = 50_000;
    let mut tree: Option<NodeRef<i32>> = None;
    for i in 0..n {
        tree = concat(tree, Some(leaf(i)));
        if (i + 1) % 1000 == 0 {
            tree = tree.map(|t| chunk(&t));
        }
    }
    let tree = tree.expect("non-empty");

    for at in 1..n as usize {
        let (front, back) = split(&tree, at);
        let rebuilt = chunk(&concat(front, back).expect("non-empty"));
        assert!(
            nodes_equal(&rebuilt, &tree),
            "split/concat mismatch at position {at}"
        );
    }
}
