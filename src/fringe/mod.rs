//! Fringe decomposition and recombination.
//!
//! A fringe decomposes a canonical tree into a top-level node array at some
//! height plus, for every height below, the nodes stripped from one side of
//! the tree. Fringe nodes are exactly those whose hash bits prevent them
//! from merging inward, so the decomposition is canonical: it depends only
//! on the tree contents, never on how much of the tree a scan examined.
//! Concatenation and splitting are both built by recombining two opposite
//! fringes layer by layer through merge rounds.

use std::mem;

use crate::hash::bit_at;
use crate::iter::{Direction, HeightIterator, LazyIndexable};
use crate::node::{combine2, Element, NodeRef};
use crate::round::{compress, do_round, MergeState};

/// Width by which the scan frontier grows while searching for a stable
/// fringe boundary.
pub const FRINGE_SCAN_WIDTH: usize = 5;

/// Decomposition of a canonical tree stripped from its right side; the
/// left-catenable form consumed by [`concat_fringes`].
#[derive(Debug)]
pub struct RightFringe<X> {
    height: i32,
    top: Vec<NodeRef<X>>,
    fringes: Vec<Vec<NodeRef<X>>>,
}

/// Decomposition of a canonical tree stripped from its left side; the
/// right-catenable form consumed by [`concat_fringes`].
#[derive(Debug)]
pub struct LeftFringe<X> {
    height: i32,
    top: Vec<NodeRef<X>>,
    fringes: Vec<Vec<NodeRef<X>>>,
}

impl<X> RightFringe<X> {
    /// Fringe of the empty sequence: height -1, no layers.
    pub fn empty() -> Self {
        Self {
            height: -1,
            top: Vec::new(),
            fringes: Vec::new(),
        }
    }

    /// Height of the top layer; -1 for the empty fringe.
    pub fn height(&self) -> i32 {
        self.height
    }
}

impl<X> LeftFringe<X> {
    /// Fringe of the empty sequence: height -1, no layers.
    pub fn empty() -> Self {
        Self {
            height: -1,
            top: Vec::new(),
            fringes: Vec::new(),
        }
    }

    /// Height of the top layer; -1 for the empty fringe.
    pub fn height(&self) -> i32 {
        self.height
    }
}

/// Decomposes a canonical tree into its right fringe.
///
/// At each height the right-side fringe is peeled off, the remaining sibling
/// subtrees are reassembled into a transient tree, and the transform recurses
/// on the remainder; the last non-empty layer becomes the top.
pub fn transform_right<X: Element>(tree: &NodeRef<X>) -> RightFringe<X> {
    let mut current = tree.clone();
    let mut height: u32 = 0;
    let mut fringes = Vec::new();

    loop {
        let fringe = compute_fringe(&current, height, Direction::Right);
        match collect_remaining(height, fringe.len(), &current, false) {
            Some(remaining) => {
                fringes.push(fringe);
                current = remaining;
                height += 1;
            }
            None => {
                return RightFringe {
                    height: height as i32,
                    top: fringe,
                    fringes,
                };
            }
        }
    }
}

/// Decomposes a canonical tree into its left fringe, symmetric to
/// [`transform_right`].
pub fn transform_left<X: Element>(tree: &NodeRef<X>) -> LeftFringe<X> {
    let mut current = tree.clone();
    let mut height: u32 = 0;
    let mut fringes = Vec::new();

    loop {
        let fringe = compute_fringe(&current, height, Direction::Left);
        match collect_remaining(height, fringe.len(), &current, true) {
            Some(remaining) => {
                fringes.push(fringe);
                current = remaining;
                height += 1;
            }
            None => {
                return LeftFringe {
                    height: height as i32,
                    top: fringe,
                    fringes,
                };
            }
        }
    }
}

/// Recombines a right fringe and a left fringe into one canonical tree.
///
/// Walks heights bottom-up, prepending the right-fringe layer (or top) and
/// appending the left-fringe layer (or top) to the working array, then runs
/// one merge round per height until a single root survives above both tops.
pub fn concat_fringes<X: Element>(
    mut right: RightFringe<X>,
    mut left: LeftFringe<X>,
) -> NodeRef<X> {
    let right_height = right.height;
    let left_height = left.height;

    let mut elems: Vec<NodeRef<X>> = Vec::new();
    let mut height: i32 = 0;
    let mut right_idx = 0;
    let mut left_idx = 0;

    loop {
        if height < right_height {
            let mut layer = mem::take(&mut right.fringes[right_idx]);
            right_idx += 1;
            layer.append(&mut elems);
            elems = layer;
        } else if height == right_height {
            let mut layer = mem::take(&mut right.top);
            layer.append(&mut elems);
            elems = layer;
        }

        if height < left_height {
            elems.append(&mut left.fringes[left_idx]);
            left_idx += 1;
        } else if height == left_height {
            elems.append(&mut left.top);
        }

        if height >= right_height && height >= left_height {
            if let [root] = elems.as_slice() {
                return root.clone();
            }
        }

        elems = do_round(elems);
        height += 1;
    }
}

/// Computes the fringe of `tree` at the given height and direction, in
/// left-to-right order.
///
/// The left-descending traversal feeding a left fringe yields its nodes
/// innermost-first, so that side is reversed before use.
fn compute_fringe<X: Element>(
    tree: &NodeRef<X>,
    height: u32,
    direction: Direction,
) -> Vec<NodeRef<X>> {
    let direction_bit = match direction {
        Direction::Left => 0,
        Direction::Right => 1,
    };
    let mut elems = LazyIndexable::new(HeightIterator::new(tree.clone(), height, direction));
    let mut fringe = find_fringe_width(&mut elems, direction_bit);
    if direction == Direction::Left {
        fringe.reverse();
    }
    fringe
}

/// Widens the scan frontier until the fringe boundary stabilizes: the
/// boundary is correct once scanning one extra element does not move it.
fn find_fringe_width<X, I>(elems: &mut LazyIndexable<X, I>, direction: i32) -> Vec<NodeRef<X>>
where
    X: Element,
    I: Iterator<Item = NodeRef<X>>,
{
    let mut frontier = FRINGE_SCAN_WIDTH;

    loop {
        let widened = frontier + 1;
        let mut kind = vec![MergeState::Unknown; widened];
        let mut hashes = vec![0i32; widened];

        let first_pass = scan_fringe_boundary(elems, direction, frontier, &mut kind, &mut hashes);
        kind.fill(MergeState::Unknown);
        let second_pass = scan_fringe_boundary(elems, direction, widened, &mut kind, &mut hashes);

        if first_pass == second_pass {
            return elems.first_reversed(first_pass);
        }
        frontier += FRINGE_SCAN_WIDTH;
    }
}

/// Classifies positions up to the frontier with the same hash-bit iteration
/// as a merge round, extended with the rule that the first merge pair
/// terminates the fringe. Returns the fringe width.
///
/// Fringe nodes carry the direction bit at the current position; an adjacent
/// pair showing the opposite-then-direction pattern is a merge, which caps
/// the frontier at its left position.
fn scan_fringe_boundary<X, I>(
    elems: &mut LazyIndexable<X, I>,
    direction: i32,
    frontier: usize,
    kind: &mut [MergeState],
    hashes: &mut [i32],
) -> usize
where
    X: Element,
    I: Iterator<Item = NodeRef<X>>,
{
    let other_direction = 1 - direction;
    let mut min_frontier = frontier;
    let mut index = 1;
    let mut bit_index: u32 = 0;
    let mut word_index: i32 = 0;
    let mut done = false;
    kind[0] = MergeState::Fringe;

    while !done {
        done = true;

        // Fetch the next hash word for every undecided reachable position.
        if bit_index == 0 {
            for i in index..min_frontier {
                let Some(node) = elems.get(i) else { break };
                if kind[i] == MergeState::Unknown {
                    hashes[i] = node.hash_at(word_index);
                }
            }
            word_index += 1;
        }

        // Extend the fringe while positions carry the direction bit.
        if index < min_frontier && elems.get(index).is_some() {
            if kind[index] == MergeState::Unknown
                && bit_at(hashes[index], bit_index) == direction
            {
                kind[index] = MergeState::Fringe;
                index += 1;
            }
            if index < min_frontier && kind[index] == MergeState::Unknown {
                done = false;
            }
        }

        // Look for the merge pair that terminates the fringe.
        if !done {
            let scan_end = min_frontier - 1;
            let mut j = index;
            while j < scan_end {
                if kind[j] == MergeState::Unknown
                    && kind[j + 1] == MergeState::Unknown
                    && elems.get(j).is_some()
                    && elems.get(j + 1).is_some()
                {
                    if bit_at(hashes[j], bit_index) == other_direction
                        && bit_at(hashes[j + 1], bit_index) == direction
                    {
                        kind[j] = MergeState::Merge;
                        kind[j + 1] = MergeState::Merge;
                        min_frontier = j;
                    } else {
                        done = false;
                    }
                }
                j += 1;
            }
        }

        bit_index = (bit_index + 1) & 31;
    }
    index
}

/// After peeling `count` fringe nodes at `target_height` off one side,
/// collects the sibling subtrees left behind and reassembles them into a
/// transient tree; `None` when nothing remains.
fn collect_remaining<X: Element>(
    target_height: u32,
    count: usize,
    tree: &NodeRef<X>,
    leftward: bool,
) -> Option<NodeRef<X>> {
    let mut collected = Vec::new();
    collect_siblings(target_height, count, tree, &mut collected, leftward);
    if !leftward {
        collected.reverse();
    }
    let compressed = compress(collected);
    to_tmp_tree(&compressed)
}

/// Descends along the primary direction counting band nodes; once `count`
/// of them have been passed, the opposite subtree joins the collection.
/// Returns the number of band nodes seen in this subtree.
fn collect_siblings<X: Element>(
    target_height: u32,
    count: usize,
    tree: &NodeRef<X>,
    collected: &mut Vec<NodeRef<X>>,
    leftward: bool,
) -> usize {
    if tree.height() <= target_height {
        return 1;
    }

    let (primary, secondary) = if leftward {
        (tree.left(), tree.right())
    } else {
        (tree.right(), tree.left())
    };

    let primary_count = collect_siblings(target_height, count, &primary, collected, leftward);
    if primary_count < count {
        let secondary_count = collect_siblings(
            target_height,
            count - primary_count,
            &secondary,
            collected,
            leftward,
        );
        return primary_count + secondary_count;
    }
    collected.push(secondary);
    primary_count
}

/// Folds subtrees into a transient left-leaning tree for fringe consumption.
pub(crate) fn to_tmp_tree<X: Element>(subtrees: &[NodeRef<X>]) -> Option<NodeRef<X>> {
    let mut iter = subtrees.iter();
    let first = iter.next()?.clone();
    Some(iter.fold(first, |tree, next| combine2(&tree, next)))
}
