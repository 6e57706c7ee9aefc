use std::sync::{Arc, PoisonError, RwLock, Weak};

use bitvec::prelude::*;

use super::{Element, Node, NodeRef};
use crate::chunk::unchunk;

/// Flattened representation of a bounded-height binary subtree.
///
/// The subtree is stored as its leaf-of-chunk nodes in traversal order plus
/// a pre-order structure bit-sequence; hash, size and height of the encoded
/// root are cached so the packed form answers them without reconstruction.
/// The reconstructed binary form is kept behind a weak reference and rebuilt
/// on demand; rebuilding is deterministic, so racing readers converge on
/// equal trees.
#[derive(Debug)]
pub struct ChunkedNode<X> {
    nodes: Vec<NodeRef<X>>,
    tree: BitVec,
    hash: i32,
    size: u32,
    height: u32,
    cache: RwLock<Weak<Node<X>>>,
}

impl<X: Element> ChunkedNode<X> {
    pub fn new(nodes: Vec<NodeRef<X>>, tree: BitVec, hash: i32, size: u32, height: u32) -> Self {
        Self {
            nodes,
            tree,
            hash,
            size,
            height,
            cache: RwLock::new(Weak::new()),
        }
    }

    /// Leaf-of-chunk nodes in traversal order.
    pub fn nodes(&self) -> &[NodeRef<X>] {
        &self.nodes
    }

    /// Pre-order structure bits; `true` marks an internal node.
    pub fn structure(&self) -> &BitSlice {
        self.tree.as_bitslice()
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn first(&self) -> &X {
        self.nodes[0].first()
    }

    pub(crate) fn last(&self) -> &X {
        self.nodes[self.nodes.len() - 1].last()
    }

    pub(crate) fn hash_code(&self) -> i32 {
        self.hash
    }

    pub(crate) fn hash_at(&self, index: i32) -> i32 {
        if index == 0 {
            return self.hash;
        }
        self.unchunked().hash_at(index)
    }

    /// Returns the reconstructed binary form, rebuilding it if the weak
    /// cache was collected.
    pub fn unchunked(&self) -> NodeRef<X> {
        if let Some(node) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .upgrade()
        {
            return node;
        }

        let mut slot = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(node) = slot.upgrade() {
            return node;
        }
        let rebuilt = unchunk(self);
        *slot = Arc::downgrade(&rebuilt);
        rebuilt
    }

    pub(crate) fn equal_to(&self, other: &Node<X>) -> bool {
        match other {
            Node::Chunked(o) => {
                self.size == o.size
                    && self.height == o.height
                    && self.nodes.len() == o.nodes.len()
                    && self
                        .nodes
                        .iter()
                        .zip(o.nodes.iter())
                        .all(|(a, b)| a.equal_to(b))
                    && self.tree == o.tree
            }
            _ => {
                let expanded = self.unchunked();
                expanded.left().equal_to(&other.left())
                    && expanded.right().equal_to(&other.right())
            }
        }
    }
}
