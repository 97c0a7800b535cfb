//! Single byte bit accessors.
//!
//! Bits are indexed MSB first: index `0` is the most significant bit and
//! index `7` the least significant. Every accessor looks at one byte in
//! isolation; out of range indices are programmer errors and panic.

/// Return the bit at `index` counted from the most significant end.
pub fn read_bit(index: u8, byte: u8) -> bool {
    assert!(index <= 7, "bit index {index} out of range");
    (byte >> (7 - index)) & 1 != 0
}

/// Integer value of the first `n` bits of `byte`, right justified.
pub fn read_first(n: u8, byte: u8) -> u8 {
    assert!(n <= 7, "bit count {n} out of range");
    ((byte as u16) >> (8 - n)) as u8
}

/// Integer value of the last `n` bits of `byte` with every higher bit unset.
pub fn read_last(n: u8, byte: u8) -> u8 {
    assert!(n <= 7, "bit count {n} out of range");
    byte & low_mask(n)
}

#[inline]
fn low_mask(n: u8) -> u8 {
    ((1u16 << n) - 1) as u8
}
