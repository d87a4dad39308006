//! Core type definitions for strpack.
//!
//! - [`BitWidth`] - bits per packed symbol (4, 5 or 6)
//! - [`Alphabet`] - the ordered symbol set of a codec and its inverse table
//! - [`charsets`] - default symbol sets for each width

mod alphabet;
pub mod charsets;
mod width;

pub use alphabet::{Alphabet, UNMAPPED};
pub use width::BitWidth;
