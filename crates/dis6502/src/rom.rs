//! Packed ROM images.
//!
//! Some toolchains ship 6502 ROMs as arrays of signed 32-bit integers,
//! four image bytes per word in little-endian order. This module turns
//! those word lists back into the raw byte stream the decoder consumes.

pub mod error;
pub mod packed;

pub use error::RomError;
pub use packed::PackedRom;
