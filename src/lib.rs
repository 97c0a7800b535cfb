//! Pattern driven sub-byte integer packing.
//!
//! A [`WidthPattern`] such as `[3, 2, 9]` assigns a bit-width to each value
//! slot, repeating circularly. [`encode`] packs `u16` values MSB first into
//! a dense byte buffer with no padding between values; [`decode`] reverses
//! it. [`decoded_length`] and [`encoded_length`] predict output sizes
//! without running the transform.
//!
//! ```
//! use tilepack::{decode, encode, encoded_length, WidthPattern};
//!
//! let pattern: WidthPattern = "3,2,9".parse().unwrap();
//! let bytes = encode(&pattern, &[7, 3, 483]).unwrap();
//! assert_eq!(bytes.len(), encoded_length(&pattern, 3));
//! assert_eq!(decode(&pattern, &bytes).unwrap(), vec![7, 3, 483]);
//! ```

pub mod bits;
pub mod codec;
pub mod config;
pub mod error;
pub mod io_utils;
pub mod length;
pub mod pattern;
pub mod stream;

pub use codec::{decode, decode_into, decode_values, encode, encode_into};
pub use config::Config;
pub use error::TilepackError;
pub use length::{checked_encoded_bits, decoded_length, encoded_bits, encoded_length};
pub use pattern::{WidthPattern, MAX_WIDTH};
pub use stream::{ByteSink, ByteSource, TileReader, TileWriter};
