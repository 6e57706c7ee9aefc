use std::sync::Arc;

use crate::hash::{siphash24, MAGIC_P1, MAGIC_P2, MAGIC_P3};

use super::{Element, Node, NodeRef};

/// Run-length node: `multiplicity` adjacent repetitions of `base`.
///
/// The base is never itself a run of the same content; callers construct
/// runs through [`combine`](super::combine), which unwraps nested runs and
/// adds their multiplicities.
#[derive(Debug)]
pub struct RleNode<X> {
    base: NodeRef<X>,
    multiplicity: u32,
    hash: i32,
}

impl<X: Element> RleNode<X> {
    pub fn new(base: NodeRef<X>, multiplicity: u32) -> Self {
        let hash = siphash24(
            base.hash_code().wrapping_add(MAGIC_P1),
            (multiplicity as i32).wrapping_sub(MAGIC_P3),
        );
        Self {
            base,
            multiplicity,
            hash,
        }
    }

    pub fn base(&self) -> &NodeRef<X> {
        &self.base
    }

    pub fn multiplicity(&self) -> u32 {
        self.multiplicity
    }

    pub fn size(&self) -> u32 {
        self.base.size().wrapping_mul(self.multiplicity)
    }

    /// Left half view: the first `multiplicity / 2` repetitions.
    pub(crate) fn left(&self) -> NodeRef<X> {
        if self.multiplicity < 4 {
            return self.base.clone();
        }
        Arc::new(Node::Rle(RleNode::new(
            self.base.clone(),
            self.multiplicity / 2,
        )))
    }

    /// Right half view: the remaining repetitions.
    pub(crate) fn right(&self) -> NodeRef<X> {
        if self.multiplicity < 3 {
            return self.base.clone();
        }
        Arc::new(Node::Rle(RleNode::new(
            self.base.clone(),
            self.multiplicity - self.multiplicity / 2,
        )))
    }

    pub(crate) fn hash_code(&self) -> i32 {
        self.hash
    }

    pub(crate) fn hash_at(&self, index: i32) -> i32 {
        if index == 0 {
            return self.hash;
        }
        siphash24(
            self.hash_at(index - 1).wrapping_add(MAGIC_P2),
            (self.multiplicity as i32).wrapping_sub(MAGIC_P3.wrapping_mul(index)),
        )
    }
}
