//! Assembly listing output.

pub mod formatter;
pub mod listing;

pub use formatter::{format_instruction, FormatOptions, FormattedInstruction};
pub use listing::{generate_listing, ListingLine, ListingOptions};
