#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

//! Immutable, history-independent, authenticated sequence trees.
//!
//! A sequence is stored as a content-addressed tree whose canonical shape
//! depends only on the element sequence, never on the order of operations
//! that produced it: two sequences with the same elements in the same order
//! hash identically and compare equal, whether they were built by appending,
//! prepending, splitting and re-concatenating, or block-wise merge rounds.
//!
//! Canonicalization is driven by the hash bits of the nodes themselves
//! ([`round::do_round`]); adjacent repetitions collapse into run-length
//! nodes so repeats cost O(log m) structure; the fringe machinery
//! ([`fringe`]) makes [`concat`] and [`split`] O(log² n); and deep binary
//! regions can be packed into flat arrays ([`chunk`]) without disturbing a
//! single hash.
//!
//! The empty sequence is `None`; all operations are pure functions over
//! shared immutable nodes and may be called concurrently on the same tree.
//!
//! ```
//! use splithash::{concat, leaf, split};
//!
//! let tree = (0..100).fold(None, |t, i| concat(t, Some(leaf(i))));
//! let tree = tree.expect("non-empty");
//! let (front, back) = split(&tree, 37);
//! let rebuilt = concat(front, back).expect("non-empty");
//! assert_eq!(rebuilt.hash_code(), tree.hash_code());
//! ```

pub mod chunk;
pub mod fringe;
pub mod hash;
pub mod iter;
pub mod node;
pub mod ops;
pub mod round;

pub use chunk::{chunk, chunk_tree, unchunk, MAX_CHUNK_HEIGHT};
pub use fringe::{
    concat_fringes, transform_left, transform_right, LeftFringe, RightFringe, FRINGE_SCAN_WIDTH,
};
pub use hash::{bit_at, siphash24, MAGIC_P1, MAGIC_P2, MAGIC_P3};
pub use iter::{Direction, HeightIterator, LazyIndexable};
pub use node::{
    combine, combine2, deep_extension_count, is_multiple_of, leaf, rle_base, rle_multiplicity,
    BinaryNode, ChunkedNode, Element, HashStats, LeafNode, Node, NodeRef, RleNode, TempNode,
};
pub use ops::{concat, left_split, right_split, split};
pub use round::{compress, do_round};
