//! Ordered symbol sets and their inverse lookup tables.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{BitWidth, charsets};
use crate::utils::error::{Error, Result};

/// Marker stored in the strict lookup table for bytes with no code.
pub const UNMAPPED: u8 = u8::MAX;

/// The ordered symbols of a codec.
///
/// Holds exactly 2^W distinct ASCII bytes. The index of a symbol is its
/// packed code. Two 128-entry tables map bytes back to codes: the strict one
/// marks unknown bytes with [`UNMAPPED`], the lossy one sends them to code 0.
///
/// Alphabets are validated on construction and immutable afterwards.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AlphabetRepr", into = "AlphabetRepr")]
pub struct Alphabet {
    width: BitWidth,
    symbols: Box<[u8]>,
    codes: [u8; 128],
    lossy_codes: [u8; 128],
}

impl Alphabet {
    /// Builds an alphabet, checking size, range and uniqueness.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `symbols` does not hold exactly
    /// 2^W entries, contains a byte >= 128, or repeats a byte.
    pub fn new(width: BitWidth, symbols: &[u8]) -> Result<Self> {
        let expected = width.symbol_count();
        if symbols.len() != expected {
            return Err(Error::AlphabetSize {
                width,
                expected,
                actual: symbols.len(),
            });
        }

        let mut codes = [UNMAPPED; 128];
        for (position, &byte) in symbols.iter().enumerate() {
            if !byte.is_ascii() {
                return Err(Error::InvalidSymbol { position, byte });
            }
            let slot = &mut codes[byte as usize];
            if *slot != UNMAPPED {
                return Err(Error::DuplicateSymbol {
                    byte,
                    first: *slot as usize,
                    second: position,
                });
            }
            *slot = position as u8;
        }

        let mut lossy_codes = codes;
        for code in &mut lossy_codes {
            if *code == UNMAPPED {
                *code = 0;
            }
        }

        Ok(Self {
            width,
            symbols: symbols.into(),
            codes,
            lossy_codes,
        })
    }

    /// Returns the default alphabet for a width.
    #[must_use]
    pub fn default_for(width: BitWidth) -> Self {
        // The built-in charsets are checked by the tests in `charsets`.
        Self::new(width, charsets::default_for(width))
            .unwrap_or_else(|e| unreachable!("default {width}-bit charset is invalid: {e}"))
    }

    /// Returns the width this alphabet was built for.
    #[must_use]
    pub fn width(&self) -> BitWidth {
        self.width
    }

    /// Returns the symbols in code order.
    #[must_use]
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Returns the symbol for a code.
    ///
    /// Codes are masked to the alphabet width, so any byte is accepted.
    #[inline]
    #[must_use]
    pub fn symbol(&self, code: u8) -> u8 {
        self.symbols[(code & self.width.code_mask()) as usize]
    }

    /// Returns the code of `byte`, or `None` if it is not in the alphabet.
    #[inline]
    #[must_use]
    pub fn code_of(&self, byte: u8) -> Option<u8> {
        match self.codes.get(byte as usize) {
            Some(&code) if code != UNMAPPED => Some(code),
            _ => None,
        }
    }

    /// Returns the code of `byte & 0x7F`, with unknown bytes mapped to 0.
    ///
    /// Never fails, but the mapping is not reversible for bytes outside the
    /// alphabet.
    #[inline]
    #[must_use]
    pub fn code_lossy(&self, byte: u8) -> u8 {
        self.lossy_codes[(byte & 0x7F) as usize]
    }

    /// Returns true if every byte of `input` is in the alphabet.
    #[must_use]
    pub fn contains_all(&self, input: &[u8]) -> bool {
        self.position_of_unsupported(input).is_none()
    }

    /// Returns the position of the first byte of `input` without a code.
    #[must_use]
    pub fn position_of_unsupported(&self, input: &[u8]) -> Option<usize> {
        input.iter().position(|&b| self.code_of(b).is_none())
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alphabet")
            .field("width", &self.width)
            .field("symbols", &String::from_utf8_lossy(&self.symbols))
            .finish()
    }
}

/// Wire form of an [`Alphabet`]: the width and the symbols as text.
#[derive(Serialize, Deserialize)]
struct AlphabetRepr {
    width: BitWidth,
    symbols: String,
}

impl TryFrom<AlphabetRepr> for Alphabet {
    type Error = Error;

    fn try_from(repr: AlphabetRepr) -> Result<Self> {
        let mut symbols = Vec::with_capacity(repr.symbols.len());
        for (position, ch) in repr.symbols.chars().enumerate() {
            if !ch.is_ascii() {
                // Report the first UTF-8 byte; the character cannot be a symbol.
                let mut buf = [0u8; 4];
                let byte = ch.encode_utf8(&mut buf).as_bytes()[0];
                return Err(Error::InvalidSymbol { position, byte });
            }
            symbols.push(ch as u8);
        }
        Self::new(repr.width, &symbols)
    }
}

impl From<Alphabet> for AlphabetRepr {
    fn from(alphabet: Alphabet) -> Self {
        Self {
            width: alphabet.width,
            symbols: alphabet.symbols.iter().map(|&b| b as char).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_alphabets() {
        for width in BitWidth::ALL {
            let alphabet = Alphabet::default_for(width);
            assert_eq!(alphabet.width(), width);
            for (code, &symbol) in alphabet.symbols().iter().enumerate() {
                assert_eq!(alphabet.code_of(symbol), Some(code as u8));
                assert_eq!(alphabet.symbol(code as u8), symbol);
            }
        }
    }

    #[test]
    fn test_wrong_size_is_rejected() {
        let err = Alphabet::new(BitWidth::Four, b"0123456789").unwrap_err();
        assert_eq!(
            err,
            Error::AlphabetSize {
                width: BitWidth::Four,
                expected: 16,
                actual: 10,
            }
        );

        let mut too_many = charsets::DEFAULT_5BIT.to_vec();
        too_many.push(b'!');
        assert!(Alphabet::new(BitWidth::Five, &too_many).is_err());
    }

    #[test]
    fn test_non_ascii_symbol_is_rejected() {
        let mut symbols = charsets::DEFAULT_4BIT.to_vec();
        symbols[3] = 0xC3;
        let err = Alphabet::new(BitWidth::Four, &symbols).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidSymbol {
                position: 3,
                byte: 0xC3,
            }
        );
    }

    #[test]
    fn test_duplicate_symbol_is_rejected() {
        let mut symbols = charsets::DEFAULT_4BIT.to_vec();
        symbols[15] = b'0';
        let err = Alphabet::new(BitWidth::Four, &symbols).unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateSymbol {
                byte: b'0',
                first: 0,
                second: 15,
            }
        );
    }

    #[test]
    fn test_code_lookups() {
        let alphabet = Alphabet::default_for(BitWidth::Four);
        assert_eq!(alphabet.code_of(b'0'), Some(0));
        assert_eq!(alphabet.code_of(b','), Some(15));
        assert_eq!(alphabet.code_of(b'A'), None);
        assert_eq!(alphabet.code_of(0xB0), None);

        // Unknown bytes fall back to code 0; high bytes are masked first.
        assert_eq!(alphabet.code_lossy(b'A'), 0);
        assert_eq!(alphabet.code_lossy(b'9' | 0x80), 9);
    }

    #[test]
    fn test_position_of_unsupported() {
        let alphabet = Alphabet::default_for(BitWidth::Five);
        assert!(alphabet.contains_all(b"HELLO WORLD"));
        assert_eq!(alphabet.position_of_unsupported(b"HELLO world"), Some(6));
        assert_eq!(alphabet.position_of_unsupported(b""), None);
    }

    #[test]
    fn test_symbol_masks_code() {
        let alphabet = Alphabet::default_for(BitWidth::Four);
        assert_eq!(alphabet.symbol(0x10), b'0');
        assert_eq!(alphabet.symbol(0xFF), b',');
    }

    #[test]
    fn test_serde_round_trip() {
        let alphabet = Alphabet::new(BitWidth::Four, charsets::SORTED_4BIT).unwrap();
        let json = serde_json::to_string(&alphabet).unwrap();
        assert_eq!(json, r##"{"width":4,"symbols":"#+,-.0123456789;"}"##);

        let back: Alphabet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, alphabet);
    }

    #[test]
    fn test_deserialize_validates() {
        let short = r#"{"width":4,"symbols":"0123"}"#;
        assert!(serde_json::from_str::<Alphabet>(short).is_err());

        let wrong_width = r#"{"width":7,"symbols":"0123456789;#-+.,"}"#;
        assert!(serde_json::from_str::<Alphabet>(wrong_width).is_err());

        let non_ascii = r#"{"width":4,"symbols":"0123456789;#-+.é"}"#;
        assert!(serde_json::from_str::<Alphabet>(non_ascii).is_err());
    }
}
