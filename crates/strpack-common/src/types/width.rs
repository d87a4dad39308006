//! Symbol bit widths.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::error::Error;

/// Number of bits each packed symbol occupies.
///
/// | Width | Symbols | Packed size |
/// |-------|---------|-------------|
/// | Four  | 16      | 50%         |
/// | Five  | 32      | 62.5%       |
/// | Six   | 64      | 75%         |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BitWidth {
    /// 4 bits per symbol, two symbols per byte.
    Four,
    /// 5 bits per symbol.
    Five,
    /// 6 bits per symbol.
    Six,
}

impl BitWidth {
    /// All supported widths, narrowest first.
    pub const ALL: [BitWidth; 3] = [BitWidth::Four, BitWidth::Five, BitWidth::Six];

    /// Returns the width for a bit count, if supported.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            4 => Some(Self::Four),
            5 => Some(Self::Five),
            6 => Some(Self::Six),
            _ => None,
        }
    }

    /// Returns the number of bits per symbol.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
        }
    }

    /// Returns the alphabet size, 2^bits.
    #[must_use]
    pub const fn symbol_count(self) -> usize {
        1 << self.bits()
    }

    /// Returns the mask selecting one code.
    #[must_use]
    pub const fn code_mask(self) -> u8 {
        (self.symbol_count() - 1) as u8
    }

    /// Largest residual bit count after which the trailing flag is set.
    ///
    /// A residual of `r` bits (0 < r <= 8 - bits) leaves room for one more
    /// code in the zero padding, so the byte count alone over-estimates the
    /// length by one.
    #[must_use]
    pub const fn flag_threshold(self) -> u32 {
        8 - self.bits()
    }

    /// Returns the packed size in bytes for `len` symbols, flag byte included.
    #[must_use]
    pub const fn packed_len(self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        match self {
            Self::Four => len / 2 + (len & 1) + 1,
            Self::Five | Self::Six => (len * self.bits() as usize).div_ceil(8) + 1,
        }
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

impl From<BitWidth> for u8 {
    fn from(width: BitWidth) -> Self {
        width.bits() as u8
    }
}

impl TryFrom<u8> for BitWidth {
    type Error = Error;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::from_bits(u32::from(bits)).ok_or(Error::UnsupportedWidth { bits })
    }
}
