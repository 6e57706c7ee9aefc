//! One canonical merge round: RLE pre-compression followed by hash-bit
//! driven pairing of adjacent nodes.
//!
//! Merging is decided purely by the hash bits of the participating nodes, so
//! any two construction paths presenting the same node sequence at a level
//! merge identically; this is what makes the tree history-independent.

use crate::hash::bit_at;
use crate::node::{combine, is_multiple_of, Element, NodeRef};

/// Classification of a node position during a merge round or fringe scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MergeState {
    Unknown,
    Merge,
    Fringe,
}

/// Collapses adjacent repetitions into runs.
///
/// A prescan detects the common case of no adjacent repetition and returns
/// the input unchanged without allocating.
pub fn compress<X: Element>(elems: Vec<NodeRef<X>>) -> Vec<NodeRef<X>> {
    if elems.is_empty() {
        return elems;
    }
    let has_repetition = elems.windows(2).any(|pair| is_multiple_of(&pair[0], &pair[1]));
    if !has_repetition {
        return elems;
    }

    let mut stack: Vec<NodeRef<X>> = Vec::with_capacity(elems.len());
    stack.push(elems[0].clone());
    for elem in &elems[1..] {
        let top = stack.len() - 1;
        if is_multiple_of(&stack[top], elem) {
            let merged = combine(&stack[top], elem);
            stack[top] = merged;
        } else {
            stack.push(elem.clone());
        }
    }
    stack
}

/// Performs one merge round: compresses repetitions, then pairs adjacent
/// nodes whose hash bits show the (1, 0) merge pattern. Unpaired nodes pass
/// through unchanged.
pub fn do_round<X: Element>(elems: Vec<NodeRef<X>>) -> Vec<NodeRef<X>> {
    merge_round(compress(elems))
}

fn merge_round<X: Element>(elems: Vec<NodeRef<X>>) -> Vec<NodeRef<X>> {
    let len = elems.len();
    let mut kind = vec![MergeState::Unknown; len];
    let mut hashes = vec![0i32; len];
    let mut merges = 0usize;

    let mut bit_index: u32 = 0;
    let mut word_index: i32 = 0;
    let mut done = false;

    while !done {
        done = true;

        // Fetch the next 32-bit hash word for every undecided node.
        if bit_index == 0 {
            for i in 0..len {
                if kind[i] == MergeState::Unknown {
                    hashes[i] = elems[i].hash_at(word_index);
                }
            }
            word_index += 1;
        }

        let mut j = 0;
        while j + 1 < len {
            if kind[j] == MergeState::Unknown && kind[j + 1] == MergeState::Unknown {
                if bit_at(hashes[j], bit_index) == 1 && bit_at(hashes[j + 1], bit_index) == 0 {
                    kind[j] = MergeState::Merge;
                    kind[j + 1] = MergeState::Merge;
                    merges += 1;
                    j += 1;
                } else {
                    done = false;
                }
            }
            j += 1;
        }
        bit_index = (bit_index + 1) & 31;
    }

    let mut result = Vec::with_capacity(len - merges);
    let mut i = 0;
    while i < len {
        if kind[i] == MergeState::Unknown {
            result.push(elems[i].clone());
        } else {
            result.push(combine(&elems[i], &elems[i + 1]));
            i += 1;
        }
        i += 1;
    }
    result
}
