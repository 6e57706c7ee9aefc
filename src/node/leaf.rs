use crate::hash::{siphash24, MAGIC_P1, MAGIC_P2, MAGIC_P3};

use super::Element;

/// Leaf node holding a single element and its precomputed base hash.
#[derive(Debug)]
pub struct LeafNode<X> {
    value: X,
    hash: i32,
}

impl<X: Element> LeafNode<X> {
    pub fn new(value: X) -> Self {
        let seed = value.hash_seed();
        let hash = siphash24(seed.wrapping_add(MAGIC_P1), seed.wrapping_sub(MAGIC_P2));
        Self { value, hash }
    }

    pub fn value(&self) -> &X {
        &self.value
    }

    pub(crate) fn hash_code(&self) -> i32 {
        self.hash
    }

    pub(crate) fn hash_at(&self, index: i32) -> i32 {
        if index == 0 {
            return self.hash;
        }
        if index == 1 {
            let seed = self.value.hash_seed();
            return siphash24(
                seed.wrapping_add(MAGIC_P2),
                self.hash.wrapping_mul(MAGIC_P1),
            );
        }
        siphash24(
            self.hash.wrapping_mul(MAGIC_P3),
            self.hash_at(index - 1).wrapping_sub(MAGIC_P2),
        )
    }
}
