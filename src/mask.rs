//! Bitmask sizing for alphabets.

/// Computes the smallest `2^k - 1` mask which covers every index of an alphabet of `len`
/// symbols.
///
/// An alphabet with a single symbol still yields the mask `1`, so that the bit length is
/// never computed for zero. `len` has to be within `1..=256`, which is enforced when an
/// [`Alphabet`](crate::alphabet::Alphabet) is created.
pub fn mask_for(len: usize) -> u8 {
    debug_assert!((1..=256).contains(&len), "alphabet length {len} out of range");

    let highest_index = (len.saturating_sub(1) as u32) | 1;
    ((2u32 << (31 - highest_index.leading_zeros())) - 1) as u8
}
