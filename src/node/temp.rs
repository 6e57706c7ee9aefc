use super::{Element, NodeRef};

/// Transient binary node used while reassembling fringe remainders.
///
/// Only height and child access are meaningful; a temporary node never
/// appears in a canonical tree and every other capability is an internal
/// inconsistency.
#[derive(Debug)]
pub struct TempNode<X> {
    left: NodeRef<X>,
    right: NodeRef<X>,
}

impl<X: Element> TempNode<X> {
    pub fn new(left: NodeRef<X>, right: NodeRef<X>) -> Self {
        Self { left, right }
    }

    pub fn left(&self) -> NodeRef<X> {
        self.left.clone()
    }

    pub fn right(&self) -> NodeRef<X> {
        self.right.clone()
    }

    pub fn height(&self) -> u32 {
        1 + self.left.height().max(self.right.height())
    }
}
