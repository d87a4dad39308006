//! # strpack-common
//!
//! Foundation layer for strpack: alphabets, codec configuration and errors.
//!
//! This crate provides the building blocks shared by the codec and search
//! layers. It has no internal dependencies and should be kept minimal.
//!
//! ## Modules
//!
//! - [`types`] - Core type definitions (BitWidth, Alphabet, default charsets)
//! - [`config`] - Codec configuration (CodecOptions, CodecConfig)
//! - [`utils`] - Utility functions and helpers (errors)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use config::{CodecConfig, CodecOptions};
pub use types::{Alphabet, BitWidth};
pub use utils::error::{Error, Result};
