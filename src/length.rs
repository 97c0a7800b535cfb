//! Output size prediction.
//!
//! Both calculators are pure functions of the pattern and the input length.
//! The codec sizes its output with them before touching any buffer, and
//! callers that bring their own buffers should do the same.

use crate::WidthPattern;

/// Number of values a decode of `byte_len` bytes produces.
///
/// Whole cycles are counted first; the remaining tail bits are then filled
/// greedily with pattern slots in order. A slot wider than the bits left in
/// the tail ends the count, so a trailing partial value is never produced.
pub fn decoded_length(pattern: &WidthPattern, byte_len: usize) -> usize {
    let total_bits = byte_len * 8;
    let full_cycles = total_bits / pattern.cycle_bits();
    let mut bits_left = total_bits % pattern.cycle_bits();
    let mut tail_slots = 0usize;
    for &width in pattern.widths() {
        let width = width as usize;
        if width > bits_left {
            break;
        }
        bits_left -= width;
        tail_slots += 1;
    }
    full_cycles * pattern.len() + tail_slots
}

/// Number of bits occupied by `value_count` encoded values, before padding.
///
/// Returns `None` when the count does not fit in `usize` bits.
pub fn checked_encoded_bits(pattern: &WidthPattern, value_count: usize) -> Option<usize> {
    let full_cycles = value_count / pattern.len();
    let tail_elements = value_count % pattern.len();
    let tail_bits: usize = pattern.widths()[..tail_elements]
        .iter()
        .map(|&w| w as usize)
        .sum();
    full_cycles
        .checked_mul(pattern.cycle_bits())?
        .checked_add(tail_bits)
}

/// Like [`checked_encoded_bits`], saturating at `usize::MAX`.
pub fn encoded_bits(pattern: &WidthPattern, value_count: usize) -> usize {
    checked_encoded_bits(pattern, value_count).unwrap_or(usize::MAX)
}

/// Number of bytes an encode of `value_count` values occupies.
pub fn encoded_length(pattern: &WidthPattern, value_count: usize) -> usize {
    encoded_bits(pattern, value_count).div_ceil(8)
}
