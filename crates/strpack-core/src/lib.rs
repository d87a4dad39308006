//! # strpack-core
//!
//! Core layer for strpack: fixed-width codecs, search over packed strings
//! and parallel bulk packing.
//!
//! This crate depends only on `strpack-common`.
//!
//! ## Modules
//!
//! - [`codec`] - 4-, 5- and 6-bit codecs and the width-erased [`Compressor`]
//! - [`search`] - Binary and prefix search over sorted packed collections
//! - [`bulk`] - Parallel batch packing into pre-allocated destinations

pub mod bulk;
pub mod codec;
pub mod search;

// Re-export commonly used types
pub use bulk::{BulkCompressor, ManagedBulkCompressor};
pub use codec::{
    AsciiCodec, Compressor, FiveBitCodec, FourBitCodec, SixBitCodec, codec_for,
};
pub use search::{PackedCollection, PackedSlot, SearchMode, signed_index};
