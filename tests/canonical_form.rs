//! History independence of the canonical form: every construction order
//! converges on the same tree.

use splithash::{chunk, concat, do_round, leaf, Node, NodeRef};

fn fold_forward(values: impl IntoIterator<Item = i32>) -> Option<NodeRef<i32>> {
    values
        .into_iter()
        .fold(None, |tree, value| concat(tree, Some(leaf(value))))
}

fn fold_backward(values: impl DoubleEndedIterator<Item = i32>) -> Option<NodeRef<i32>> {
    values
        .rev()
        .fold(None, |tree, value| concat(Some(leaf(value)), tree))
}

fn nodes_equal(a: &NodeRef<i32>, b: &NodeRef<i32>) -> bool {
    a.hash_code() == b.hash_code() && a.size() == b.size() && a.equal_to(b)
}

#[test]
fn fold_direction_is_irrelevant_for_50k_elements() {
    let n = 50_000;
    let forward = fold_forward(0..n).expect("non-empty");
    let backward = fold_backward(0..n).expect("non-empty");

    assert_eq!(forward.hash_code(), backward.hash_code());
    assert_eq!(forward.size(), n as u32);
    assert_eq!(*forward.first(), 0);
    assert_eq!(*forward.last(), n - 1);
    assert!(nodes_equal(&forward, &backward));
}

#[test]
fn chunking_during_construction_does_not_change_the_hash() {
    let n = 20_000;
    let plain = fold_forward(0..n).expect("non-empty");

    let mut chunked: Option<NodeRef<i32>> = None;
    for i in 0..n {
        chunked = concat(chunked, Some(leaf(i)));
        if (i + 1) % 1000 == 0 {
            chunked = chunked.map(|tree| chunk(&tree));
        }
    }
    let chunked = chunked.expect("non-empty");

    assert_eq!(chunked.hash_code(), plain.hash_code());
    assert_eq!(chunked.size(), plain.size());
    assert!(chunked.equal_to(&plain));
}

#[test]
fn repeating_modulus_sequence_is_stable_and_run_compressed() {
    let n = 50_000;
    let first = fold_forward((0..n).map(|i| i % 63)).expect("non-empty");
    let second = fold_forward((0..n).map(|i| i % 63)).expect("non-empty");

    assert_eq!(first.hash_code(), second.hash_code());
    assert_eq!(first.size(), n as u32);
    assert!(nodes_equal(&first, &second));
    assert!(contains_run(&first));
}

fn contains_run(node: &NodeRef<i32>) -> bool {
    match node.as_ref() {
        Node::Rle(_) => true,
        Node::Binary(bin) => contains_run(&bin.left()) || contains_run(&bin.right()),
        Node::Chunked(packed) => packed.nodes().iter().any(contains_run),
        _ => false,
    }
}

#[test]
fn block_construction_matches_element_folding() {
    let n = 50_000;
    let block_size = 1_000;
    let folded = fold_forward(0..n).expect("non-empty");

    let mut built: Option<NodeRef<i32>> = None;
    for block in 0..(n / block_size) {
        let offset = block * block_size;
        let mut level: Vec<NodeRef<i32>> =
            (offset..offset + block_size).map(leaf).collect();
        while level.len() > 1 {
            level = do_round(level);
        }
        let root = chunk(&level.remove(0));
        built = concat(built, Some(root)).map(|tree| chunk(&tree));
    }
    let built = built.expect("non-empty");

    assert_eq!(built.hash_code(), folded.hash_code());
    assert!(nodes_equal(&built, &folded));
}

#[test]
fn bracketing_is_irrelevant() {
    let values: Vec<i32> = (0..200).collect();
    let whole = fold_forward(values.iter().copied()).expect("non-empty");

    for cut in [1, 50, 101, 199] {
        let front = fold_forward(values[..cut].iter().copied());
        let back = fold_forward(values[cut..].iter().copied());
        let joined = concat(front, back).expect("non-empty");
        assert!(nodes_equal(&joined, &whole));
    }
}
