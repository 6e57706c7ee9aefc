use std::sync::atomic::{AtomicI32, AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::hash::{siphash24, MAGIC_P1, MAGIC_P2, MAGIC_P3};

use super::{Element, NodeRef};

/// Process-wide count of hash derivations that had to reach past the first
/// two 32-bit words. Merge rounds consume more than 64 hash bits for a node
/// only on astronomically unlikely collisions, so a growing value here is a
/// diagnostic signal, never part of normal operation.
static DEEP_EXTENSIONS: AtomicU64 = AtomicU64::new(0);

/// Returns how often the deep (`index >= 2`) hash derivation path was taken.
pub fn deep_extension_count() -> u64 {
    DEEP_EXTENSIONS.load(Ordering::Relaxed)
}

/// Snapshot of the process-wide hashing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashStats {
    /// Number of `hash_at` calls that reached index 2 or beyond.
    pub deep_extensions: u64,
}

impl HashStats {
    /// Captures the current counter values.
    pub fn capture() -> Self {
        Self {
            deep_extensions: deep_extension_count(),
        }
    }
}

/// Interior node of a canonical tree.
///
/// The stored size is signed: a negative value marks the node as a chunk
/// root. Height and chunk height share one 16-bit word (height in the upper
/// byte). The hash is computed on first request; 0 doubles as the
/// "not computed" sentinel, so a genuine zero hash is recomputed, which is
/// idempotent.
#[derive(Debug)]
pub struct BinaryNode<X> {
    left: NodeRef<X>,
    right: NodeRef<X>,
    csize: i32,
    height_ee: u16,
    hash: AtomicI32,
}

impl<X: Element> BinaryNode<X> {
    pub fn new(left: NodeRef<X>, right: NodeRef<X>, csize: i32) -> Self {
        let height = 1 + left.height().max(right.height());
        let chunk_height = 1 + left.chunk_height().max(right.chunk_height());
        Self {
            left,
            right,
            csize,
            height_ee: ((height << 8) | chunk_height) as u16,
            hash: AtomicI32::new(0),
        }
    }

    pub fn left(&self) -> NodeRef<X> {
        self.left.clone()
    }

    pub fn right(&self) -> NodeRef<X> {
        self.right.clone()
    }

    pub fn size(&self) -> u32 {
        self.csize.unsigned_abs()
    }

    pub fn height(&self) -> u32 {
        (self.height_ee >> 8) as u32
    }

    pub fn chunk_height(&self) -> u32 {
        (self.height_ee & 0xff) as u32
    }

    pub fn is_chunked(&self) -> bool {
        self.csize < 0
    }

    pub(crate) fn first(&self) -> &X {
        self.left.first()
    }

    pub(crate) fn last(&self) -> &X {
        self.right.last()
    }

    pub(crate) fn hash_code(&self) -> i32 {
        let cached = self.hash.load(Ordering::Relaxed);
        if cached != 0 {
            return cached;
        }
        let hash = siphash24(
            self.left.hash_code().wrapping_sub(MAGIC_P2),
            self.right.hash_code().wrapping_add(MAGIC_P3),
        );
        self.hash.store(hash, Ordering::Relaxed);
        hash
    }

    pub(crate) fn hash_at(&self, index: i32) -> i32 {
        if index == 0 {
            return self.hash_code();
        }
        if index == 1 {
            return self
                .left
                .hash_code()
                .wrapping_sub(self.right.hash_code())
                ^ self.hash_code();
        }

        // More than 64 hash bits requested for one node.
        DEEP_EXTENSIONS.fetch_add(1, Ordering::Relaxed);
        let half = index / 2;
        let hash = self.hash_code();
        if hash > 0 {
            siphash24(
                self.left.hash_at(half).wrapping_sub(MAGIC_P3),
                self.right
                    .hash_at(index - half)
                    .wrapping_add(MAGIC_P1.wrapping_mul(hash)),
            )
        } else {
            siphash24(
                self.right
                    .hash_at(half)
                    .wrapping_sub(MAGIC_P3.wrapping_mul(hash)),
                self.left.hash_at(index - half).wrapping_add(MAGIC_P1),
            )
        }
    }
}
