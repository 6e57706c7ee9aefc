//! Hashing primitives for the canonical sequence tree.
//! Contains the SipHash-2-4 oracle over two 32-bit inputs and the
//! bit-indexing helper driving merge rounds and fringe scans.

mod siphash;

pub use siphash::{bit_at, siphash24, MAGIC_P1, MAGIC_P2, MAGIC_P3};
