use std::fmt;

use crate::rom::error::RomError;

/// Unified error type for the dis6502 library.
///
/// Decoding itself never fails; only the packed ROM reader can.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Rom(RomError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Rom(e) => write!(f, "packed ROM error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Rom(e) => Some(e),
        }
    }
}

impl From<RomError> for Error {
    fn from(e: RomError) -> Self {
        Error::Rom(e)
    }
}
