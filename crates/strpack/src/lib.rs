//! # strpack
//!
//! Packs strings over small fixed alphabets into 4, 5 or 6 bits per
//! character and searches sorted collections of them without unpacking.
//!
//! Pick the codec matching your data: [`FourBitCodec`] for digits and a few
//! separators, [`FiveBitCodec`] for upper-case names, [`SixBitCodec`] for
//! mixed text. Every codec takes a custom alphabet of the right size if the
//! defaults do not fit.
//!
//! ## Widths
//!
//! | Codec | Symbols | Packed size | Default alphabet |
//! | ----- | ------- | ----------- | ---------------- |
//! | [`FourBitCodec`] | 16 | 50% | `0123456789;#-+.,` |
//! | [`FiveBitCodec`] | 32 | 62.5% | space, `',-.@` and `A`..`Z` |
//! | [`SixBitCodec`] | 64 | 75% | space through `_`, plus `{}` |
//!
//! ## Quick Start
//!
//! ```rust
//! use strpack::{FiveBitCodec, ManagedBulkCompressor};
//!
//! let codec = FiveBitCodec::new();
//!
//! // One string
//! let packed = codec.pack(b"ADA LOVELACE")?;
//! assert_eq!(codec.unpack_to_string(&packed), "ADA LOVELACE");
//!
//! // A sorted collection, packed in parallel
//! let names = ["ADA", "ALAN", "BARBARA", "GRACE"];
//! let mut packed_names = vec![None; 8];
//! ManagedBulkCompressor::new(&codec, &mut packed_names).add_all(&names)?;
//!
//! assert_eq!(codec.search(&packed_names, "BARBARA"), Ok(2));
//! assert_eq!(codec.prefix_search(&packed_names, "GR"), Ok(3));
//! assert_eq!(codec.search(&packed_names, "BOB"), Err(3));
//! # Ok::<(), strpack::Error>(())
//! ```
//!
//! ## Runtime width
//!
//! ```rust
//! use strpack::{BitWidth, CodecConfig, codec_for};
//!
//! let config = CodecConfig::for_width(BitWidth::Six);
//! let codec = codec_for(&config);
//! let packed = codec.pack(b"HELLO? WORLD!")?;
//! assert_eq!(packed.len(), 11);
//! # Ok::<(), strpack::Error>(())
//! ```

// Re-export the codec API
pub use strpack_core::codec::{
    AsciiCodec, BitStream, Compressor, FiveBitCodec, FourBitCodec, Layout, Nibble, SixBitCodec,
    codec_for,
};

// Re-export search and bulk helpers
pub use strpack_core::bulk::{BulkCompressor, ManagedBulkCompressor};
pub use strpack_core::search::{PackedCollection, PackedSlot, SearchMode, signed_index};

// Re-export configuration and error types
pub use strpack_common::types::{Alphabet, BitWidth, charsets};
pub use strpack_common::utils::error::{Error, Result};
pub use strpack_common::{CodecConfig, CodecOptions};
