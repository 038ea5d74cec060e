//! # Error Types

/// Errors from chunkpiece operations.
#[derive(Debug, thiserror::Error)]
pub enum ChunkpieceError {
    /// Tokenizer configuration is invalid: a required control token is
    /// missing, the vocabulary is inconsistent, or a window/span value
    /// is unusable.
    #[error("invalid tokenizer configuration: {0}")]
    Configuration(String),

    /// Vocab size exceeds the capacity of the target token type.
    #[error("vocab size ({size}) exceeds token type capacity")]
    VocabSizeOverflow {
        /// The vocab size that exceeded the capacity.
        size: usize,
    },

    /// A startup resource (vocabulary list, normalization table) could
    /// not be read or decoded.
    #[error("resource load failed: {0}")]
    ResourceLoad(String),

    /// A single input exceeds the token window under a truncation policy
    /// that forbids chunking.
    #[error("input of {length} tokens exceeds the {max} token window and chunking is disabled")]
    InputTooLong {
        /// The token count of the input, including reserved special token slots.
        length: usize,
        /// The window size that was exceeded.
        max: usize,
    },
}

/// Result type for chunkpiece operations.
pub type Result<T> = core::result::Result<T, ChunkpieceError>;
