//! Fixed-width string codecs.
//!
//! Each codec maps the bytes of a string to alphabet codes and packs the
//! codes densely, followed by one trailing flag byte that lets the exact
//! length be recovered from the buffer size alone.
//!
//! | Codec | Layout | Symbols | Packed size |
//! |-------|--------|---------|-------------|
//! | [`FourBitCodec`] | [`Nibble`] | 16 | `ceil(n/2) + 1` |
//! | [`FiveBitCodec`] | [`BitStream<5>`] | 32 | `ceil(5n/8) + 1` |
//! | [`SixBitCodec`] | [`BitStream<6>`] | 64 | `ceil(6n/8) + 1` |
//!
//! Empty strings pack to an empty buffer.
//!
//! # Example
//!
//! ```
//! use strpack_core::codec::FiveBitCodec;
//!
//! let codec = FiveBitCodec::new();
//! let packed = codec.pack(b"HELLO WORLD")?;
//! assert_eq!(packed.len(), 8);
//! assert_eq!(codec.unpack(&packed), b"HELLO WORLD");
//! # Ok::<(), strpack_common::Error>(())
//! ```

mod nibble;
mod stream;

use std::fmt;
use std::marker::PhantomData;

use strpack_common::types::Alphabet;
use strpack_common::utils::error::{Error, Result};
use strpack_common::{BitWidth, CodecConfig, CodecOptions};

use crate::search::{self, PackedCollection, SearchMode};

pub use nibble::{Nibble, NibbleCodes};
pub use stream::{BitStream, StreamCodes};

/// Bit layout of one codec width.
///
/// Packing and the lazy decoder used by search live on the same type, so
/// the two can never drift apart.
pub trait Layout: Send + Sync + 'static {
    /// Bits per code.
    const WIDTH: BitWidth;

    /// Iterator over the codes stored in a packed buffer.
    type Codes<'a>: Iterator<Item = u8>;

    /// Returns the number of symbols stored in `packed`.
    fn decoded_len(packed: &[u8]) -> usize;

    /// Returns a lazy decoder over the codes of `packed`.
    fn codes(packed: &[u8]) -> Self::Codes<'_>;

    /// Packs the codes held in `buf` in place, appending the flag byte.
    ///
    /// Every entry of `buf` must be a code below 2^WIDTH.
    fn pack_codes(buf: &mut Vec<u8>);
}

/// 4-bit codec.
pub type FourBitCodec = AsciiCodec<Nibble>;

/// 5-bit codec.
pub type FiveBitCodec = AsciiCodec<BitStream<5>>;

/// 6-bit codec.
pub type SixBitCodec = AsciiCodec<BitStream<6>>;

/// A codec for one bit width.
///
/// Owns its alphabet and options; both are fixed at construction, so a
/// codec can be shared freely between threads.
pub struct AsciiCodec<L: Layout> {
    alphabet: Alphabet,
    options: CodecOptions,
    _layout: PhantomData<fn() -> L>,
}

impl<L: Layout> AsciiCodec<L> {
    /// Creates a codec with the default alphabet and default options.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(Alphabet::default_for(L::WIDTH), CodecOptions::default())
    }

    /// Creates a codec with the default alphabet and the given options.
    #[must_use]
    pub fn with_options(options: CodecOptions) -> Self {
        Self::from_parts(Alphabet::default_for(L::WIDTH), options)
    }

    /// Creates a codec with a custom symbol set and default options.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `symbols` is not a valid alphabet
    /// for this width.
    pub fn with_symbols(symbols: &[u8]) -> Result<Self> {
        let alphabet = Alphabet::new(L::WIDTH, symbols)?;
        Ok(Self::from_parts(alphabet, CodecOptions::default()))
    }

    /// Creates a codec from an alphabet and options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WidthMismatch`] if the alphabet was built for another
    /// width.
    pub fn with_alphabet(alphabet: Alphabet, options: CodecOptions) -> Result<Self> {
        if alphabet.width() != L::WIDTH {
            return Err(Error::WidthMismatch {
                expected: L::WIDTH,
                actual: alphabet.width(),
            });
        }
        Ok(Self::from_parts(alphabet, options))
    }

    /// Creates a codec from a stored configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WidthMismatch`] if the configuration is for another
    /// width.
    pub fn from_config(config: &CodecConfig) -> Result<Self> {
        Self::with_alphabet(config.alphabet.clone(), config.options)
    }

    fn from_parts(alphabet: Alphabet, options: CodecOptions) -> Self {
        tracing::debug!(
            width = L::WIDTH.bits(),
            strict = options.strict,
            preserve_original = options.preserve_original,
            "built codec"
        );
        Self {
            alphabet,
            options,
            _layout: PhantomData,
        }
    }

    /// Returns the bit width.
    #[must_use]
    pub fn width(&self) -> BitWidth {
        L::WIDTH
    }

    /// Returns the alphabet.
    #[must_use]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the options.
    #[must_use]
    pub fn options(&self) -> CodecOptions {
        self.options
    }

    /// Packs `input`, leaving it untouched.
    ///
    /// In strict mode every byte must belong to the alphabet. In lenient
    /// mode unknown bytes are mapped through `byte & 0x7F` and stored as
    /// code 0 when still unknown, so they do not survive a round trip.
    ///
    /// # Errors
    ///
    /// Strict mode only: [`Error::UnsupportedCharacter`] or
    /// [`Error::NonAsciiCharacter`] for the first rejected byte.
    pub fn pack(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.validate(input)?;

        let packed_len = L::WIDTH.packed_len(input.len());
        let mut buf = Vec::with_capacity(packed_len.max(input.len()));
        buf.extend(input.iter().map(|&b| self.alphabet.code_lossy(b)));
        L::pack_codes(&mut buf);
        Ok(buf)
    }

    /// Packs `input` inside its own allocation.
    ///
    /// The buffer is consumed: its bytes are overwritten with codes and then
    /// with the packed form, so no second buffer of the input's size is
    /// allocated. Validation runs before anything is overwritten.
    ///
    /// # Errors
    ///
    /// Same as [`pack`](Self::pack).
    pub fn pack_owned(&self, mut input: Vec<u8>) -> Result<Vec<u8>> {
        self.validate(&input)?;

        for byte in &mut input {
            *byte = self.alphabet.code_lossy(*byte);
        }
        L::pack_codes(&mut input);
        input.shrink_to_fit();
        Ok(input)
    }

    /// Restores the symbols stored in `packed`.
    ///
    /// Any buffer is accepted; buffers not produced by [`pack`](Self::pack)
    /// decode to unspecified symbols.
    #[must_use]
    pub fn unpack(&self, packed: &[u8]) -> Vec<u8> {
        L::codes(packed).map(|code| self.alphabet.symbol(code)).collect()
    }

    /// Restores the symbols stored in `packed` as a string.
    #[must_use]
    pub fn unpack_to_string(&self, packed: &[u8]) -> String {
        L::codes(packed)
            .map(|code| char::from(self.alphabet.symbol(code)))
            .collect()
    }

    /// Returns the number of symbols stored in `packed` without decoding it.
    #[must_use]
    pub fn decoded_len(&self, packed: &[u8]) -> usize {
        L::decoded_len(packed)
    }

    /// Finds `key` in a sorted packed collection.
    ///
    /// Returns `Ok(index)` on an exact match and `Err(insertion_point)`
    /// otherwise, like [`slice::binary_search`].
    pub fn search<C>(&self, collection: &C, key: impl AsRef<[u8]>) -> std::result::Result<usize, usize>
    where
        C: PackedCollection + ?Sized,
    {
        search::locate::<L, C>(&self.alphabet, collection, key.as_ref(), SearchMode::Exact)
    }

    /// Finds an element starting with `key` in a sorted packed collection.
    ///
    /// When several elements share the prefix, whichever one the binary
    /// search probes first is returned.
    pub fn prefix_search<C>(
        &self,
        collection: &C,
        key: impl AsRef<[u8]>,
    ) -> std::result::Result<usize, usize>
    where
        C: PackedCollection + ?Sized,
    {
        search::locate::<L, C>(&self.alphabet, collection, key.as_ref(), SearchMode::Prefix)
    }

    fn validate(&self, input: &[u8]) -> Result<()> {
        if !self.options.strict {
            return Ok(());
        }
        match self.alphabet.position_of_unsupported(input) {
            Some(position) => Err(Error::rejected_character(input, position)),
            None => Ok(()),
        }
    }
}

impl<L: Layout> Default for AsciiCodec<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Layout> Clone for AsciiCodec<L> {
    fn clone(&self) -> Self {
        Self {
            alphabet: self.alphabet.clone(),
            options: self.options,
            _layout: PhantomData,
        }
    }
}

impl<L: Layout> fmt::Debug for AsciiCodec<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsciiCodec")
            .field("width", &L::WIDTH)
            .field("alphabet", &self.alphabet)
            .field("options", &self.options)
            .finish()
    }
}

/// Width-erased codec interface.
///
/// Implemented by every [`AsciiCodec`]; used by the bulk helpers and by
/// callers that only learn the width at runtime (see [`codec_for`]).
pub trait Compressor: Send + Sync {
    /// Returns the bit width.
    fn width(&self) -> BitWidth;

    /// Returns the alphabet.
    fn alphabet(&self) -> &Alphabet;

    /// Returns the options.
    fn options(&self) -> CodecOptions;

    /// Packs `input` without modifying it.
    fn pack(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Packs `input` inside its own allocation.
    fn pack_owned(&self, input: Vec<u8>) -> Result<Vec<u8>>;

    /// Restores the symbols stored in `packed`.
    fn unpack(&self, packed: &[u8]) -> Vec<u8>;

    /// Returns the number of symbols stored in `packed`.
    fn decoded_len(&self, packed: &[u8]) -> usize;

    /// Binary search over a sorted packed collection.
    fn locate(
        &self,
        collection: &dyn PackedCollection,
        key: &[u8],
        mode: SearchMode,
    ) -> std::result::Result<usize, usize>;
}

impl<L: Layout> Compressor for AsciiCodec<L> {
    fn width(&self) -> BitWidth {
        L::WIDTH
    }

    fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn options(&self) -> CodecOptions {
        self.options
    }

    fn pack(&self, input: &[u8]) -> Result<Vec<u8>> {
        AsciiCodec::pack(self, input)
    }

    fn pack_owned(&self, input: Vec<u8>) -> Result<Vec<u8>> {
        AsciiCodec::pack_owned(self, input)
    }

    fn unpack(&self, packed: &[u8]) -> Vec<u8> {
        AsciiCodec::unpack(self, packed)
    }

    fn decoded_len(&self, packed: &[u8]) -> usize {
        L::decoded_len(packed)
    }

    fn locate(
        &self,
        collection: &dyn PackedCollection,
        key: &[u8],
        mode: SearchMode,
    ) -> std::result::Result<usize, usize> {
        search::locate::<L, dyn PackedCollection>(&self.alphabet, collection, key, mode)
    }
}

/// Builds the codec matching a configuration's width.
#[must_use]
pub fn codec_for(config: &CodecConfig) -> Box<dyn Compressor> {
    let alphabet = config.alphabet.clone();
    match config.width() {
        BitWidth::Four => Box::new(FourBitCodec::from_parts(alphabet, config.options)),
        BitWidth::Five => Box::new(FiveBitCodec::from_parts(alphabet, config.options)),
        BitWidth::Six => Box::new(SixBitCodec::from_parts(alphabet, config.options)),
    }
}
