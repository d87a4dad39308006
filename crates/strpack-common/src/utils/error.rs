//! Error types for strpack.

use thiserror::Error;

use crate::types::BitWidth;

/// Number of bytes kept on each side of a rejected character when building
/// the diagnostic context string.
const CONTEXT_RADIUS: usize = 32;

/// Result type alias using the strpack error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by alphabet construction, strict packing and bulk batches.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The alphabet does not hold exactly 2^W symbols.
    #[error("{width}-bit alphabet requires exactly {expected} symbols, got {actual}")]
    AlphabetSize {
        /// Width the alphabet was built for.
        width: BitWidth,
        /// Required symbol count.
        expected: usize,
        /// Supplied symbol count.
        actual: usize,
    },

    /// A symbol lies outside the 7-bit range.
    #[error("invalid symbol in alphabet at position {position}: code point {byte} is outside the ASCII range")]
    InvalidSymbol {
        /// Index of the symbol in the supplied list.
        position: usize,
        /// The offending byte value.
        byte: u8,
    },

    /// A symbol appears twice in the alphabet.
    #[error("duplicate symbol '{}' (code point {byte}) at positions {first} and {second}", as_char(.byte))]
    DuplicateSymbol {
        /// The repeated byte value.
        byte: u8,
        /// Position of the first occurrence.
        first: usize,
        /// Position of the repeated occurrence.
        second: usize,
    },

    /// A bit count other than 4, 5 or 6 was requested.
    #[error("unsupported bit width {bits}, expected 4, 5 or 6")]
    UnsupportedWidth {
        /// The requested bit count.
        bits: u8,
    },

    /// An alphabet was handed to a codec of a different width.
    #[error("codec expects a {expected}-bit alphabet, got a {actual}-bit one")]
    WidthMismatch {
        /// Width of the codec.
        expected: BitWidth,
        /// Width of the supplied alphabet.
        actual: BitWidth,
    },

    /// Strict mode rejected a byte with the high bit set.
    #[error("only ASCII characters are supported: invalid '{}' (code point {byte}) at position {position} in \"{context}\"", as_char(.byte))]
    NonAsciiCharacter {
        /// The offending byte value.
        byte: u8,
        /// Position of the byte in the input.
        position: usize,
        /// Input surrounding the byte.
        context: String,
    },

    /// Strict mode rejected a byte that is not part of the alphabet.
    #[error("character '{}' (code point {byte}) at position {position} is not in the alphabet: \"{context}\"", as_char(.byte))]
    UnsupportedCharacter {
        /// The offending byte value.
        byte: u8,
        /// Position of the byte in the input.
        position: usize,
        /// Input surrounding the byte.
        context: String,
    },

    /// A batch does not fit in the remaining destination slots.
    #[error("batch of {requested} items at offset {offset} exceeds destination capacity {capacity}")]
    Capacity {
        /// Number of items in the batch.
        requested: usize,
        /// Destination index the batch starts at.
        offset: usize,
        /// Total destination length.
        capacity: usize,
    },
}

impl Error {
    /// Builds the strict-mode error for `input[position]`.
    ///
    /// Bytes >= 128 yield [`Error::NonAsciiCharacter`], everything else
    /// [`Error::UnsupportedCharacter`].
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds for `input`.
    #[must_use]
    pub fn rejected_character(input: &[u8], position: usize) -> Self {
        let byte = input[position];
        let context = context_window(input, position);
        if byte.is_ascii() {
            Self::UnsupportedCharacter {
                byte,
                position,
                context,
            }
        } else {
            Self::NonAsciiCharacter {
                byte,
                position,
                context,
            }
        }
    }

    /// Returns true for errors raised while building an alphabet or codec.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::AlphabetSize { .. }
                | Self::InvalidSymbol { .. }
                | Self::DuplicateSymbol { .. }
                | Self::UnsupportedWidth { .. }
                | Self::WidthMismatch { .. }
        )
    }
}

fn as_char(byte: &u8) -> char {
    *byte as char
}

/// Renders the bytes around `position` as Latin-1 text, with `...` marking
/// truncated ends.
fn context_window(input: &[u8], position: usize) -> String {
    let start = position.saturating_sub(CONTEXT_RADIUS);
    let end = (position + CONTEXT_RADIUS + 1).min(input.len());

    let mut context = String::with_capacity(end - start + 6);
    if start > 0 {
        context.push_str("...");
    }
    context.extend(input[start..end].iter().map(|&b| b as char));
    if end < input.len() {
        context.push_str("...");
    }
    context
}
