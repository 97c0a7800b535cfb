use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TilepackError;

/// Widest slot the codec supports; decoded values are `u16`.
pub const MAX_WIDTH: u8 = 16;

/// Repeating sequence of slot bit-widths.
///
/// Slot `i` of an arbitrarily long value sequence uses
/// `widths[i % widths.len()]`. Construction validates that the pattern is
/// non-empty and every width is in `1..=MAX_WIDTH`, so the length
/// calculators and codec never see an invalid pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct WidthPattern {
    widths: Vec<u8>,
    cycle_bits: usize,
}

impl WidthPattern {
    pub fn new(widths: Vec<u8>) -> Result<Self, TilepackError> {
        if widths.is_empty() {
            return Err(TilepackError::EmptyPattern);
        }
        if let Some((slot, &width)) = widths
            .iter()
            .enumerate()
            .find(|(_, &w)| w == 0 || w > MAX_WIDTH)
        {
            return Err(TilepackError::InvalidWidth { slot, width });
        }
        let cycle_bits = widths.iter().map(|&w| w as usize).sum();
        Ok(Self { widths, cycle_bits })
    }

    pub fn widths(&self) -> &[u8] {
        &self.widths
    }

    /// Number of slots in one cycle.
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Bits consumed by one full pass through the pattern.
    pub fn cycle_bits(&self) -> usize {
        self.cycle_bits
    }

    /// Width of slot `slot`, wrapping around the pattern.
    #[inline]
    pub fn width_at(&self, slot: usize) -> u8 {
        self.widths[slot % self.widths.len()]
    }

    /// Iterate the widths of an unbounded slot sequence.
    pub fn cycle(&self) -> impl Iterator<Item = u8> + '_ {
        self.widths.iter().copied().cycle()
    }
}

impl TryFrom<Vec<u8>> for WidthPattern {
    type Error = TilepackError;

    fn try_from(widths: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(widths)
    }
}

impl From<WidthPattern> for Vec<u8> {
    fn from(pattern: WidthPattern) -> Self {
        pattern.widths
    }
}

/// Parse a comma separated list such as `"3,2,9"`.
impl FromStr for WidthPattern {
    type Err = TilepackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let widths = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<u8>()
                    .map_err(|_| TilepackError::Config(format!("invalid width '{part}'")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(widths)
    }
}

impl fmt::Display for WidthPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, w) in self.widths.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{w}")?;
        }
        Ok(())
    }
}
