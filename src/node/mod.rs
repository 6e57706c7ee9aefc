//! Node model of the canonical sequence tree.
//!
//! A tree is a DAG of reference-counted, immutable [`Node`] values; subtrees
//! are shared freely between parents. Five variants cover the whole model:
//! leaves, canonical binary nodes, run-length (RLE) nodes, flattened chunk
//! nodes and the transient binary nodes used while reassembling fringes.
//!
//! Content equality ([`Node::equal_to`]) and the infinite hash family
//! ([`Node::hash_at`]) are the two capabilities everything else is built on:
//! merge rounds read hash words, RLE compression compares unwrapped bases,
//! and the chunk codec round-trips through `combine`.

mod binary;
mod chunked;
mod element;
mod leaf;
mod rle;
mod temp;

use std::sync::Arc;

pub use binary::{deep_extension_count, BinaryNode, HashStats};
pub use chunked::ChunkedNode;
pub use element::Element;
pub use leaf::LeafNode;
pub use rle::RleNode;
pub use temp::TempNode;

/// Shared handle to an immutable tree node.
pub type NodeRef<X> = Arc<Node<X>>;

/// A node of a canonical sequence tree.
#[derive(Debug)]
pub enum Node<X> {
    /// Single element; height 0.
    Leaf(LeafNode<X>),
    /// Canonical interior node.
    Binary(BinaryNode<X>),
    /// Run of adjacent repetitions of one subtree.
    Rle(RleNode<X>),
    /// Flattened bounded-height subtree.
    Chunked(ChunkedNode<X>),
    /// Transient reassembly node; never part of a canonical tree.
    Temp(TempNode<X>),
}

/// Constructs a leaf node.
pub fn leaf<X: Element>(value: X) -> NodeRef<X> {
    Arc::new(Node::Leaf(LeafNode::new(value)))
}

impl<X: Element> Node<X> {
    /// Number of elements covered by this node.
    pub fn size(&self) -> u32 {
        match self {
            Node::Leaf(_) => 1,
            Node::Binary(node) => node.size(),
            Node::Rle(node) => node.size(),
            Node::Chunked(node) => node.size(),
            Node::Temp(_) => internal_inconsistency("size"),
        }
    }

    /// Height of the node; leaves sit at height 0 and runs share the height
    /// of their base.
    pub fn height(&self) -> u32 {
        match self {
            Node::Leaf(_) => 0,
            Node::Binary(node) => node.height(),
            Node::Rle(node) => node.base().height(),
            Node::Chunked(node) => node.height(),
            Node::Temp(node) => node.height(),
        }
    }

    /// Distance to the nearest chunk boundary below this node.
    pub fn chunk_height(&self) -> u32 {
        match self {
            Node::Leaf(_) => 0,
            Node::Binary(node) => node.chunk_height(),
            Node::Rle(node) => node.base().chunk_height(),
            Node::Chunked(_) => 0,
            Node::Temp(_) => internal_inconsistency("chunk_height"),
        }
    }

    /// First element of the covered sequence.
    pub fn first(&self) -> &X {
        match self {
            Node::Leaf(node) => node.value(),
            Node::Binary(node) => node.first(),
            Node::Rle(node) => node.base().first(),
            Node::Chunked(node) => node.first(),
            Node::Temp(_) => internal_inconsistency("first"),
        }
    }

    /// Last element of the covered sequence.
    pub fn last(&self) -> &X {
        match self {
            Node::Leaf(node) => node.value(),
            Node::Binary(node) => node.last(),
            Node::Rle(node) => node.base().last(),
            Node::Chunked(node) => node.last(),
            Node::Temp(_) => internal_inconsistency("last"),
        }
    }

    /// Left child view. Runs split their multiplicity; chunked nodes expand
    /// through the reconstruction cache.
    pub fn left(&self) -> NodeRef<X> {
        match self {
            Node::Leaf(_) => internal_inconsistency("left"),
            Node::Binary(node) => node.left(),
            Node::Rle(node) => node.left(),
            Node::Chunked(node) => node.unchunked().left(),
            Node::Temp(node) => node.left(),
        }
    }

    /// Right child view, symmetric to [`Node::left`].
    pub fn right(&self) -> NodeRef<X> {
        match self {
            Node::Leaf(_) => internal_inconsistency("right"),
            Node::Binary(node) => node.right(),
            Node::Rle(node) => node.right(),
            Node::Chunked(node) => node.unchunked().right(),
            Node::Temp(node) => node.right(),
        }
    }

    /// Whether this node sits at or below a chunk boundary.
    pub fn is_chunked(&self) -> bool {
        match self {
            Node::Leaf(_) => false,
            Node::Binary(node) => node.is_chunked(),
            Node::Rle(node) => node.base().is_chunked(),
            Node::Chunked(_) => true,
            Node::Temp(_) => internal_inconsistency("is_chunked"),
        }
    }

    /// Canonical 32-bit node hash, equal to `hash_at(0)`.
    pub fn hash_code(&self) -> i32 {
        match self {
            Node::Leaf(node) => node.hash_code(),
            Node::Binary(node) => node.hash_code(),
            Node::Rle(node) => node.hash_code(),
            Node::Chunked(node) => node.hash_code(),
            Node::Temp(_) => internal_inconsistency("hash_code"),
        }
    }

    /// Infinite hash family indexed by `index >= 0`.
    ///
    /// The family must collide for unequal nodes with probability decreasing
    /// exponentially in the index; merge rounds draw fresh words from it
    /// until every adjacent pair is decided, so a weaker family could stall
    /// canonicalization.
    pub fn hash_at(&self, index: i32) -> i32 {
        match self {
            Node::Leaf(node) => node.hash_at(index),
            Node::Binary(node) => node.hash_at(index),
            Node::Rle(node) => node.hash_at(index),
            Node::Chunked(node) => node.hash_at(index),
            Node::Temp(_) => internal_inconsistency("hash_at"),
        }
    }

    /// Children of this node, or the flat leaf array of a chunk.
    pub fn split_parts(&self) -> Vec<NodeRef<X>> {
        match self {
            Node::Leaf(_) => Vec::new(),
            Node::Binary(node) => vec![node.left(), node.right()],
            Node::Rle(node) => vec![node.left(), node.right()],
            Node::Chunked(node) => node.nodes().to_vec(),
            Node::Temp(_) => internal_inconsistency("split_parts"),
        }
    }

    /// Content equality: the two nodes cover the same element sequence.
    ///
    /// Hash inequality short-circuits to `false`; equal hashes fall back to
    /// structural recursion, so a hash collision never produces a false
    /// positive.
    pub fn equal_to(&self, other: &Node<X>) -> bool {
        match self {
            Node::Leaf(node) => {
                if std::ptr::eq(self, other) {
                    return true;
                }
                match other {
                    Node::Leaf(o) => node.value() == o.value(),
                    _ => false,
                }
            }
            Node::Binary(node) => {
                if self.hash_code() != other.hash_code() {
                    return false;
                }
                if std::ptr::eq(self, other) {
                    return true;
                }
                node.left().equal_to(&other.left()) && node.right().equal_to(&other.right())
            }
            Node::Rle(node) => {
                if self.hash_code() != other.hash_code() {
                    return false;
                }
                if std::ptr::eq(self, other) {
                    return true;
                }
                match other {
                    Node::Rle(o) => {
                        node.multiplicity() == o.multiplicity() && node.base().equal_to(o.base())
                    }
                    _ => false,
                }
            }
            Node::Chunked(node) => {
                if self.hash_code() != other.hash_code() {
                    return false;
                }
                if std::ptr::eq(self, other) {
                    return true;
                }
                node.equal_to(other)
            }
            Node::Temp(_) => internal_inconsistency("equal_to"),
        }
    }
}

impl<X: Element> PartialEq for Node<X> {
    fn eq(&self, other: &Self) -> bool {
        self.equal_to(other)
    }
}

impl<X: Element> Eq for Node<X> {}

/// Unwraps a run to its repeated base; other nodes are their own base.
pub fn rle_base<X: Element>(node: &NodeRef<X>) -> &NodeRef<X> {
    match node.as_ref() {
        Node::Rle(run) => run.base(),
        _ => node,
    }
}

/// Multiplicity of a run; 1 for every other node.
pub fn rle_multiplicity<X: Element>(node: &Node<X>) -> u32 {
    match node {
        Node::Rle(run) => run.multiplicity(),
        _ => 1,
    }
}

/// Whether two nodes repeat the same content once unwrapped from any run.
pub fn is_multiple_of<X: Element>(a: &NodeRef<X>, b: &NodeRef<X>) -> bool {
    rle_base(a).equal_to(rle_base(b))
}

/// Combines two adjacent nodes into their canonical parent: a run when the
/// contents repeat, a binary node otherwise.
pub fn combine<X: Element>(a: &NodeRef<X>, b: &NodeRef<X>) -> NodeRef<X> {
    if is_multiple_of(a, b) {
        return Arc::new(Node::Rle(RleNode::new(
            rle_base(a).clone(),
            rle_multiplicity(a) + rle_multiplicity(b),
        )));
    }
    let size = (a.size() + b.size()) as i32;
    Arc::new(Node::Binary(BinaryNode::new(a.clone(), b.clone(), size)))
}

/// Like [`combine`], but pairs non-repeating nodes into a transient binary
/// node, deferring canonicalization to the fringe transforms.
pub fn combine2<X: Element>(a: &NodeRef<X>, b: &NodeRef<X>) -> NodeRef<X> {
    if is_multiple_of(a, b) {
        return Arc::new(Node::Rle(RleNode::new(
            rle_base(a).clone(),
            rle_multiplicity(a) + rle_multiplicity(b),
        )));
    }
    Arc::new(Node::Temp(TempNode::new(a.clone(), b.clone())))
}

pub(crate) fn internal_inconsistency(operation: &str) -> ! {
    panic!("internal inconsistency: {operation} queried on a node that cannot answer it")
}
