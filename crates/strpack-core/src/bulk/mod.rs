//! Parallel batch packing into pre-allocated destinations.
//!
//! [`BulkCompressor`] packs a batch into a destination slice at a given
//! offset. [`ManagedBulkCompressor`] keeps a cursor so successive batches
//! are appended without the caller tracking offsets.
//!
//! Destinations are `[Option<Vec<u8>>]`: unused slots stay `None` and sort
//! after every key, so a partly filled destination can be searched as is.

mod compressor;
mod managed;

pub use compressor::BulkCompressor;
pub use managed::ManagedBulkCompressor;
