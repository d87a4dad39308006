//! Codec configuration.
//!
//! [`CodecOptions`] holds the two behaviour switches of a codec and
//! [`CodecConfig`] pairs them with an alphabet. Both serialize with serde, so
//! a configuration can be stored next to the data it was used to pack.
//!
//! ```
//! use strpack_common::{BitWidth, CodecConfig, CodecOptions};
//!
//! let config = CodecConfig::for_width(BitWidth::Five)
//!     .with_options(CodecOptions::default().with_strict(true));
//! assert!(config.options.strict);
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{Alphabet, BitWidth};
use crate::utils::error::Result;

/// Behaviour switches shared by every codec width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    /// Reject bytes outside the alphabet instead of mapping them lossily.
    ///
    /// Useful while debugging data pipelines; lenient mode is faster and
    /// never fails.
    pub strict: bool,

    /// Keep bulk sources intact instead of consuming them.
    ///
    /// When false, bulk compression takes each source slot and leaves it
    /// empty, reusing its allocation where possible.
    pub preserve_original: bool,
}

impl CodecOptions {
    /// Sets strict validation.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets source preservation for bulk compression.
    pub fn with_preserve_original(mut self, preserve_original: bool) -> Self {
        self.preserve_original = preserve_original;
        self
    }
}

/// Everything needed to rebuild a codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Symbols and their codes; also fixes the width.
    pub alphabet: Alphabet,
    /// Behaviour switches.
    #[serde(default)]
    pub options: CodecOptions,
}

impl CodecConfig {
    /// Creates a configuration with the default alphabet for `width`.
    #[must_use]
    pub fn for_width(width: BitWidth) -> Self {
        Self {
            alphabet: Alphabet::default_for(width),
            options: CodecOptions::default(),
        }
    }

    /// Creates a configuration with a custom alphabet.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `symbols` is not a valid alphabet
    /// for `width`.
    pub fn with_symbols(width: BitWidth, symbols: &[u8]) -> Result<Self> {
        Ok(Self {
            alphabet: Alphabet::new(width, symbols)?,
            options: CodecOptions::default(),
        })
    }

    /// Replaces the options.
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the width implied by the alphabet.
    #[must_use]
    pub fn width(&self) -> BitWidth {
        self.alphabet.width()
    }
}
