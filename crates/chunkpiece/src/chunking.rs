//! # Chunk Window Planning
//!
//! Long tokenized sequences are split into overlapping fixed-size
//! windows rather than truncated away. The planner computes how many
//! content tokens fit per window once the reserved special token slots
//! are subtracted, and the default 50%-overlap span.

use core::ops::Range;

use crate::errors::{ChunkpieceError, Result};

/// Window math for one (window size, reserved slots) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlanner {
    window_size: usize,
    extra_tokens: usize,
}

impl ChunkPlanner {
    /// Create a planner.
    ///
    /// ## Arguments
    /// * `window_size` - the maximum window size, in tokens.
    /// * `extra_tokens` - slots consumed by injected special tokens.
    ///
    /// ## Returns
    /// The planner, or a [`ChunkpieceError::Configuration`] when the
    /// window cannot hold any content token.
    pub fn new(
        window_size: usize,
        extra_tokens: usize,
    ) -> Result<Self> {
        if window_size <= extra_tokens {
            return Err(ChunkpieceError::Configuration(format!(
                "window size ({window_size}) must exceed the {extra_tokens} reserved special token slot(s)"
            )));
        }
        Ok(Self {
            window_size,
            extra_tokens,
        })
    }

    /// The window size, in tokens.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Content tokens that fit in one window.
    pub fn content_capacity(&self) -> usize {
        self.window_size - self.extra_tokens
    }

    /// The default chunking span: `floor((window - extra) / 2)`.
    ///
    /// Each chunk after the first re-includes the previous chunk's last
    /// `span` tokens, yielding 50%-overlap windows.
    pub fn default_span(&self) -> usize {
        self.content_capacity() / 2
    }

    /// Plan the content token ranges for a sequence.
    ///
    /// ## Arguments
    /// * `token_count` - content tokens in the full sequence.
    /// * `span` - the overlap re-included by each following chunk; must
    ///   be smaller than the content capacity.
    ///
    /// ## Returns
    /// Ordered, possibly-overlapping ranges covering `0..token_count`;
    /// a single range when the sequence fits in one window.
    pub fn plan(
        &self,
        token_count: usize,
        span: usize,
    ) -> Result<Vec<Range<usize>>> {
        let capacity = self.content_capacity();
        if token_count <= capacity {
            return Ok(vec![0..token_count]);
        }
        if span >= capacity {
            return Err(ChunkpieceError::Configuration(format!(
                "chunking span ({span}) must be smaller than the window content capacity ({capacity})"
            )));
        }

        let mut ranges = Vec::new();
        let mut start = 0;
        loop {
            let end = (start + capacity).min(token_count);
            ranges.push(start..end);
            if end == token_count {
                break;
            }
            start = end - span;
        }
        Ok(ranges)
    }
}
