//! Pattern driven bit packing.
//!
//! Values are laid out MSB first with no padding between slots. A slot may
//! start anywhere inside a byte and span up to three bytes (16-bit slots
//! that begin mid-byte). The final byte of an encoding is zero padded in its
//! unused low bits.
//!
//! ```text
//! pattern [3, 2, 9], values [7, 3, 483]
//! 111 11 111 | 100011 00
//! ```

use crate::bits::{read_first, read_last};
use crate::length::{checked_encoded_bits, decoded_length, encoded_length};
use crate::{TilepackError, WidthPattern};

/// Read position inside a packed byte buffer.
///
/// `leftover` counts the low bits of the byte at `read_head` that have not
/// been assigned to a value yet. Zero means the byte is untouched. The read
/// head only moves past a byte once all eight of its bits are consumed.
#[derive(Debug, Default)]
struct ReadCursor {
    read_head: usize,
    leftover: u8,
}

impl ReadCursor {
    fn bits_read(&self) -> usize {
        let partial = if self.leftover > 0 { 8 - self.leftover as usize } else { 0 };
        self.read_head * 8 + partial
    }

    fn next_value(&mut self, bytes: &[u8], width: u8) -> Result<u16, TilepackError> {
        let mut needed = width;
        let mut datum: u32 = 0;
        while needed > 0 {
            let byte = *bytes
                .get(self.read_head)
                .ok_or(TilepackError::InsufficientInput {
                    needed_bits: self.bits_read() + needed as usize,
                    available_bits: bytes.len() * 8,
                })?;
            let (available, bits) = match self.leftover {
                0 => (8, byte),
                n => (n, read_last(n, byte)),
            };
            if needed < available {
                let rest = available - needed;
                let chunk = if self.leftover == 0 {
                    read_first(needed, byte)
                } else {
                    bits >> rest
                };
                datum = (datum << needed) | chunk as u32;
                self.leftover = rest;
                needed = 0;
            } else {
                datum = (datum << available) | bits as u32;
                needed -= available;
                self.leftover = 0;
                self.read_head += 1;
            }
        }
        Ok(datum as u16)
    }
}

/// Write position inside an output buffer.
///
/// `datum` is the byte under construction and `surplus` the number of its
/// low bits still free. A full byte is flushed to `write_head` immediately.
#[derive(Debug)]
struct WriteCursor {
    write_head: usize,
    surplus: u8,
    datum: u8,
}

impl Default for WriteCursor {
    fn default() -> Self {
        Self {
            write_head: 0,
            surplus: 8,
            datum: 0,
        }
    }
}

impl WriteCursor {
    fn push(&mut self, out: &mut [u8], value: u16, width: u8) {
        let value = value as u32;
        let mut bits_left = width;
        while bits_left > 0 {
            let take = bits_left.min(self.surplus);
            let chunk = (value >> (bits_left - take)) & ((1u32 << take) - 1);
            self.datum |= (chunk << (self.surplus - take)) as u8;
            self.surplus -= take;
            bits_left -= take;
            if self.surplus == 0 {
                self.flush(out);
            }
        }
    }

    fn flush(&mut self, out: &mut [u8]) {
        out[self.write_head] = self.datum;
        self.write_head += 1;
        self.datum = 0;
        self.surplus = 8;
    }

    /// Flush a partially built byte and return the number of bytes written.
    fn finish(mut self, out: &mut [u8]) -> usize {
        if self.surplus < 8 {
            self.flush(out);
        }
        self.write_head
    }
}

/// Fail unless `bytes` holds `count` whole values.
fn check_input(pattern: &WidthPattern, bytes: &[u8], count: usize) -> Result<(), TilepackError> {
    let available_bits = bytes.len().saturating_mul(8);
    match checked_encoded_bits(pattern, count) {
        Some(needed_bits) if needed_bits <= available_bits => Ok(()),
        needed => Err(TilepackError::InsufficientInput {
            needed_bits: needed.unwrap_or(usize::MAX),
            available_bits,
        }),
    }
}

fn decode_slots(
    pattern: &WidthPattern,
    bytes: &[u8],
    out: &mut [u16],
) -> Result<(), TilepackError> {
    check_input(pattern, bytes, out.len())?;
    let mut cursor = ReadCursor::default();
    for (value, width) in out.iter_mut().zip(pattern.cycle()) {
        *value = cursor.next_value(bytes, width)?;
    }
    Ok(())
}

/// Decode every whole value `bytes` holds under `pattern`.
///
/// Produces exactly [`decoded_length`] values; trailing bits too few for the
/// next slot are ignored.
pub fn decode(pattern: &WidthPattern, bytes: &[u8]) -> Result<Vec<u16>, TilepackError> {
    decode_values(pattern, bytes, decoded_length(pattern, bytes.len()))
}

/// Decode exactly `count` values from the front of `bytes`.
pub fn decode_values(
    pattern: &WidthPattern,
    bytes: &[u8],
    count: usize,
) -> Result<Vec<u16>, TilepackError> {
    check_input(pattern, bytes, count)?;
    let mut out = vec![0u16; count];
    decode_slots(pattern, bytes, &mut out)?;
    Ok(out)
}

/// Decode into a caller sized buffer, returning the number of values written.
///
/// `out` must hold at least [`decoded_length`] values.
pub fn decode_into(
    pattern: &WidthPattern,
    bytes: &[u8],
    out: &mut [u16],
) -> Result<usize, TilepackError> {
    let count = decoded_length(pattern, bytes.len());
    if out.len() < count {
        return Err(TilepackError::BufferTooSmall {
            needed: count,
            got: out.len(),
        });
    }
    decode_slots(pattern, bytes, &mut out[..count])?;
    Ok(count)
}

/// Pack `values` under `pattern` into a new buffer of [`encoded_length`] bytes.
pub fn encode(pattern: &WidthPattern, values: &[u16]) -> Result<Vec<u8>, TilepackError> {
    let mut out = vec![0u8; encoded_length(pattern, values.len())];
    encode_into(pattern, values, &mut out)?;
    Ok(out)
}

/// Pack `values` into `out`, returning the number of bytes written.
///
/// `out` must hold at least [`encoded_length`] bytes. On a
/// [`TilepackError::ValueTooWide`] failure the bytes before the offending
/// slot have already been written.
pub fn encode_into(
    pattern: &WidthPattern,
    values: &[u16],
    out: &mut [u8],
) -> Result<usize, TilepackError> {
    let needed = encoded_length(pattern, values.len());
    if out.len() < needed {
        return Err(TilepackError::BufferTooSmall {
            needed,
            got: out.len(),
        });
    }
    let mut cursor = WriteCursor::default();
    for (slot, (&value, width)) in values.iter().zip(pattern.cycle()).enumerate() {
        if (value as u32) >> width != 0 {
            return Err(TilepackError::ValueTooWide { slot, value, width });
        }
        cursor.push(out, value, width);
    }
    Ok(cursor.finish(out))
}
