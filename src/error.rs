use thiserror::Error;

#[derive(Error, Debug)]
pub enum TilepackError {
    /// Pattern slot width of zero or above [`crate::MAX_WIDTH`].
    #[error("invalid width {width} at pattern slot {slot}")]
    InvalidWidth { slot: usize, width: u8 },

    /// Width pattern with no slots.
    #[error("width pattern is empty")]
    EmptyPattern,

    /// Decode asked for more bits than the byte buffer holds.
    #[error("insufficient input: need {needed_bits} bits, have {available_bits}")]
    InsufficientInput {
        needed_bits: usize,
        available_bits: usize,
    },

    /// Value does not fit the width of its slot.
    #[error("value {value} at slot {slot} does not fit in {width} bits")]
    ValueTooWide { slot: usize, value: u16, width: u8 },

    /// Caller supplied output buffer is shorter than the predicted length.
    #[error("output buffer too small: need {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },

    /// Malformed pattern text or configuration file.
    #[error("config error: {0}")]
    Config(String),

    /// Propagated I/O error, including short writes.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
