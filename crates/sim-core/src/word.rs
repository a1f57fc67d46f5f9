//! Compile-time choice of the target machine word used to pack sibs.
//!
//! `TARGET_WORD_SIZE` in spec terms is simply "which concrete type
//! implements [`StorageWord`]" — the generic parameter on [`crate::NetStore`],
//! resolved at compile time rather than dispatched at runtime, per the
//! redesign note in spec.md about pointer-packed macros over arrays of words.

/// A machine word that can hold `BITS_PER_SIB`-wide sibs packed contiguously.
///
/// Implemented for `u16`, `u32`, and `u64`, corresponding to the spec's
/// `TARGET_WORD_SIZE ∈ {16, 32, 64}`. All packing arithmetic is done in
/// `u64` (see [`crate::netstore::get_n`]/[`crate::netstore::set_n`]); this
/// trait just fixes the storage width and the conversions in and out of it.
pub trait StorageWord: Copy + Default + PartialEq {
    /// Width of this word in bits.
    const BITS: u32;
    /// Two bits per sib, so this is `Self::BITS / 2`.
    const SIBS_PER_WORD: u32 = Self::BITS / 2;

    fn from_u64(value: u64) -> Self;
    fn to_u64(self) -> u64;
}

macro_rules! impl_storage_word {
    ($t:ty) => {
        impl StorageWord for $t {
            const BITS: u32 = <$t>::BITS;

            #[inline]
            fn from_u64(value: u64) -> Self {
                value as $t
            }

            #[inline]
            fn to_u64(self) -> u64 {
                self as u64
            }
        }
    };
}

impl_storage_word!(u16);
impl_storage_word!(u32);
impl_storage_word!(u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibs_per_word_matches_bit_width() {
        assert_eq!(u16::SIBS_PER_WORD, 8);
        assert_eq!(u32::SIBS_PER_WORD, 16);
        assert_eq!(u64::SIBS_PER_WORD, 32);
    }
}
