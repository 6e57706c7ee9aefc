//! Traversal support: the height-band iterator feeding fringe scans and the
//! lazy random-access cache layered over it.

use crate::node::{Element, NodeRef};

/// Primary descent direction of a height-band traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Descend through left children; yields the band left-to-right.
    Left,
    /// Descend through right children; yields the band right-to-left.
    Right,
}

/// Iterates every node of a tree at a target height.
///
/// Descends along the primary direction until the band is reached, keeping
/// the visited spine on an explicit stack; backtracking pops the spine and
/// descends into the opposite child. Nodes already at or below the target
/// height are yielded as-is, so a tree shorter than the band yields itself.
pub struct HeightIterator<X> {
    pending: Option<NodeRef<X>>,
    stack: Vec<NodeRef<X>>,
    target_height: u32,
    direction: Direction,
}

impl<X: Element> HeightIterator<X> {
    pub fn new(tree: NodeRef<X>, target_height: u32, direction: Direction) -> Self {
        Self {
            pending: Some(tree),
            stack: Vec::new(),
            target_height,
            direction,
        }
    }

    fn descend_to_band(&mut self, node: NodeRef<X>) -> NodeRef<X> {
        let mut current = node;
        while current.height() > self.target_height {
            self.stack.push(current.clone());
            current = match self.direction {
                Direction::Left => current.left(),
                Direction::Right => current.right(),
            };
        }
        current
    }
}

impl<X: Element> Iterator for HeightIterator<X> {
    type Item = NodeRef<X>;

    fn next(&mut self) -> Option<NodeRef<X>> {
        if let Some(tree) = self.pending.take() {
            return Some(self.descend_to_band(tree));
        }
        let head = self.stack.pop()?;
        let opposite = match self.direction {
            Direction::Left => head.right(),
            Direction::Right => head.left(),
        };
        Some(self.descend_to_band(opposite))
    }
}

/// Random-access cache over a one-shot node iterator.
///
/// Fringe scans revisit the same positions across many hash-bit iterations;
/// the cache consumes the underlying traversal only as far as the highest
/// index requested.
pub struct LazyIndexable<X, I> {
    iter: I,
    cached: Vec<NodeRef<X>>,
}

impl<X, I> LazyIndexable<X, I>
where
    I: Iterator<Item = NodeRef<X>>,
{
    pub fn new(iter: I) -> Self {
        Self {
            iter,
            cached: Vec::new(),
        }
    }

    /// Returns the node at `index`, consuming the traversal as needed;
    /// `None` once the traversal is exhausted before `index`.
    pub fn get(&mut self, index: usize) -> Option<&NodeRef<X>> {
        while self.cached.len() <= index {
            match self.iter.next() {
                Some(node) => self.cached.push(node),
                None => break,
            }
        }
        self.cached.get(index)
    }

    /// First `len` cached nodes in reverse order.
    pub fn first_reversed(&self, len: usize) -> Vec<NodeRef<X>> {
        self.cached[..len].iter().rev().cloned().collect()
    }
}
