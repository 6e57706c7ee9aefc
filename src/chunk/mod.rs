//! Chunking codec: packs bounded-height binary subtrees into flat arrays
//! and restores them on demand.
//!
//! A chunk stores the leaf-of-chunk nodes in traversal order next to a
//! pre-order structure bit-sequence. Decoding recombines with the canonical
//! [`combine`], so a round trip reproduces the original hashes exactly; the
//! packed form only trades pointer-chasing depth for flat arrays.

use std::sync::Arc;

use bitvec::prelude::*;

use crate::node::{
    combine, internal_inconsistency, BinaryNode, ChunkedNode, Element, Node, NodeRef, RleNode,
};

/// Chunk heights above this threshold are re-chunked into a fresh flat node.
pub const MAX_CHUNK_HEIGHT: u32 = 5;

/// Chunks a tree. Idempotent: chunked nodes (and runs over chunked bases)
/// are returned unchanged.
pub fn chunk<X: Element>(node: &NodeRef<X>) -> NodeRef<X> {
    match node.as_ref() {
        Node::Leaf(_) | Node::Chunked(_) => node.clone(),
        Node::Rle(run) => {
            if run.base().is_chunked() {
                return node.clone();
            }
            Arc::new(Node::Rle(RleNode::new(
                chunk(run.base()),
                run.multiplicity(),
            )))
        }
        Node::Binary(bin) => {
            if bin.is_chunked() {
                return node.clone();
            }
            let left = chunk(&bin.left());
            let right = chunk(&bin.right());
            let size = left.size() + right.size();
            let packed = Arc::new(Node::Binary(BinaryNode::new(left, right, -(size as i32))));
            if packed.chunk_height() > MAX_CHUNK_HEIGHT {
                chunk_tree(&packed)
            } else {
                packed
            }
        }
        Node::Temp(_) => internal_inconsistency("chunk"),
    }
}

/// Flattens a tree into a chunked node, caching its hash, size and height.
pub fn chunk_tree<X: Element>(tree: &NodeRef<X>) -> NodeRef<X> {
    let mut nodes = Vec::new();
    let mut structure = BitVec::new();
    encode_chunk_tree(tree, &mut nodes, &mut structure);
    Arc::new(Node::Chunked(ChunkedNode::new(
        nodes,
        structure,
        tree.hash_code(),
        tree.size(),
        tree.height(),
    )))
}

/// Pre-order encoder. Internal nodes emit `true, <left>, true, <right>`;
/// leaf-of-chunk nodes (chunk height 0) emit `false` and join the node list.
fn encode_chunk_tree<X: Element>(
    node: &NodeRef<X>,
    nodes: &mut Vec<NodeRef<X>>,
    structure: &mut BitVec,
) {
    if node.chunk_height() == 0 {
        nodes.push(node.clone());
        structure.push(false);
        return;
    }
    structure.push(true);
    encode_chunk_tree(&node.left(), nodes, structure);
    structure.push(true);
    encode_chunk_tree(&node.right(), nodes, structure);
}

/// Rebuilds the binary form of a chunked node.
pub fn unchunk<X: Element>(chunked: &ChunkedNode<X>) -> NodeRef<X> {
    let (_, _, node) = decode_chunk_tree(chunked.nodes(), chunked.structure(), 0, 0);
    node
}

fn decode_chunk_tree<X: Element>(
    nodes: &[NodeRef<X>],
    structure: &BitSlice,
    node_idx: usize,
    tree_idx: usize,
) -> (usize, usize, NodeRef<X>) {
    if !structure[tree_idx] {
        return (node_idx + 1, tree_idx + 1, nodes[node_idx].clone());
    }
    let (node_idx, tree_idx, left) = decode_chunk_tree(nodes, structure, node_idx, tree_idx + 1);
    let (node_idx, tree_idx, right) = decode_chunk_tree(nodes, structure, node_idx, tree_idx + 1);
    (node_idx, tree_idx, combine(&left, &right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::leaf;
    use crate::round::do_round;

    fn build(count: i32) -> NodeRef<i32> {
        let mut level: Vec<NodeRef<i32>> = (0..count).map(leaf).collect();
        while level.len() > 1 {
            level = do_round(level);
        }
        level.remove(0)
    }

    #[test]
    fn chunking_preserves_hash_and_shape_queries() {
        let tree = build(512);
        let chunked = chunk(&tree);
        assert_eq!(chunked.hash_code(), tree.hash_code());
        assert_eq!(chunked.size(), tree.size());
        assert_eq!(chunked.height(), tree.height());
        assert_eq!(chunked.first(), tree.first());
        assert_eq!(chunked.last(), tree.last());
        assert!(chunked.is_chunked());
        assert!(chunked.equal_to(&tree));
    }

    #[test]
    fn deep_trees_flatten_below_the_threshold() {
        let tree = build(512);
        assert!(tree.height() > MAX_CHUNK_HEIGHT);
        assert!(tree.chunk_height() > MAX_CHUNK_HEIGHT);
        let chunked = chunk(&tree);
        assert!(chunked.is_chunked());
        assert!(chunked.chunk_height() <= MAX_CHUNK_HEIGHT);
        assert!(contains_chunk_root(&chunked));
    }

    fn contains_chunk_root(node: &NodeRef<i32>) -> bool {
        match node.as_ref() {
            Node::Chunked(_) => true,
            Node::Binary(bin) => {
                contains_chunk_root(&bin.left()) || contains_chunk_root(&bin.right())
            }
            Node::Rle(run) => contains_chunk_root(run.base()),
            _ => false,
        }
    }

    #[test]
    fn rechunking_a_chunk_root_is_identity() {
        let chunked = chunk_tree(&build(512));
        let again = chunk(&chunked);
        assert!(Arc::ptr_eq(&chunked, &again));
    }

    #[test]
    fn codec_round_trips() {
        let tree = build(300);
        let packed = chunk_tree(&tree);
        let Node::Chunked(chunk_root) = packed.as_ref() else {
            panic!("expected a chunk root");
        };
        assert_eq!(chunk_root.nodes().len(), 300);
        let restored = unchunk(chunk_root);
        assert_eq!(restored.hash_code(), tree.hash_code());
        assert!(restored.equal_to(&tree));
    }
}
