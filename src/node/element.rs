/// Leaf value stored in a sequence tree.
///
/// The only requirement beyond equality is a 32-bit seed that feeds the
/// SipHash-based leaf derivations. The derived `hash_at` family must keep
/// the property that two unequal nodes collide at index `i` with probability
/// decreasing exponentially in `i`; the built-in derivations guarantee this
/// for any seed, so implementors only supply the raw word.
pub trait Element: Clone + Eq {
    /// Returns the 32-bit seed mixed into the leaf hash derivations.
    fn hash_seed(&self) -> i32;
}

impl Element for i32 {
    fn hash_seed(&self) -> i32 {
        *self
    }
}

impl Element for u32 {
    fn hash_seed(&self) -> i32 {
        *self as i32
    }
}
