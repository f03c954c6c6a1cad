//! Error type shared by the codec and the command line tools.

use thiserror::Error;

/// Everything that can go wrong while encoding or decoding.
#[derive(Error, Debug)]
pub enum HuffmanError {
    /// The container is structurally invalid or inconsistent with its payload.
    #[error("malformed artifact: {reason}")]
    MalformedArtifact {
        /// What exactly was wrong
        reason: String,
    },

    /// The bitstream ended while the tree walk was still between the root and a leaf.
    #[error("truncated bitstream: ran out of bits after {decoded} symbols")]
    TruncatedBitstream {
        /// Symbols successfully decoded before the bits ran out
        decoded: u64,
    },

    /// A symbol of the input has no code. Only possible if the code table
    /// was not derived from the same text.
    #[error("no code for symbol {symbol:?}")]
    UnknownSymbol {
        /// The symbol that was missing
        symbol: char,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input is not valid UTF-8 text: {0}")]
    InvalidText(#[from] std::string::FromUtf8Error),
}

impl HuffmanError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        HuffmanError::MalformedArtifact {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
