use std::fmt;

/// Errors that can occur while reading a packed ROM word list.
///
/// Variants carry the word index and the offending token only, so the
/// library never depends on where the text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RomError {
    /// A token is not a decimal or `0x` hexadecimal integer.
    InvalidWord { index: usize, token: String },
    /// A token is a valid integer but does not fit in 32 bits.
    WordOutOfRange { index: usize, token: String },
    /// A `/*` comment is never closed.
    UnterminatedComment,
}

impl fmt::Display for RomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RomError::InvalidWord { index, token } => {
                write!(f, "word {index}: '{token}' is not an integer")
            }
            RomError::WordOutOfRange { index, token } => {
                write!(f, "word {index}: '{token}' does not fit in 32 bits")
            }
            RomError::UnterminatedComment => f.write_str("unterminated /* comment"),
        }
    }
}

impl std::error::Error for RomError {}
