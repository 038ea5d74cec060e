//! # Tokenization Results
//!
//! Per-call result structures: the inner (special-token-free)
//! tokenization of one string, the per-chunk output rows, and the
//! padded batch view handed to an inference request builder.

use crate::analysis::Token;
use crate::errors::ChunkpieceError;
use crate::types::TokenType;

/// The inner tokenization of one input string: parallel token id and
/// position sequences, before any special token injection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InnerTokenization<T: TokenType> {
    /// The encoded token ids.
    pub token_ids: Vec<T>,

    /// The position index per token; non-decreasing, starting at 0.
    pub positions: Vec<usize>,
}

impl<T: TokenType> InnerTokenization<T> {
    /// Create an inner tokenization from parallel sequences.
    pub fn new(
        token_ids: Vec<T>,
        positions: Vec<usize>,
    ) -> Self {
        debug_assert_eq!(token_ids.len(), positions.len());
        Self {
            token_ids,
            positions,
        }
    }

    /// Project an analyzed token stream into parallel id/position
    /// sequences.
    pub fn from_tokens(tokens: &[Token<T>]) -> Self {
        Self {
            token_ids: tokens.iter().map(|t| t.id).collect(),
            positions: tokens.iter().map(|t| t.position).collect(),
        }
    }

    /// The number of tokens.
    pub fn len(&self) -> usize {
        self.token_ids.len()
    }

    /// Check if the tokenization is empty.
    pub fn is_empty(&self) -> bool {
        self.token_ids.is_empty()
    }
}

/// One output window of a tokenization result.
///
/// Carries the back-reference from the window to its originating input
/// and chunk, so predictions can be reassembled per input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultChunk<T: TokenType> {
    /// Index of the originating input in the request batch.
    pub input_index: usize,

    /// Chunk ordinal within the originating input, ascending.
    pub chunk_index: usize,

    /// Token ids, special tokens included; unpadded.
    pub token_ids: Vec<T>,

    /// Position per token; `None` for injected special tokens.
    pub positions: Vec<Option<usize>>,
}

impl<T: TokenType> ResultChunk<T> {
    /// The unpadded token count.
    pub fn len(&self) -> usize {
        self.token_ids.len()
    }

    /// Check if the chunk is empty.
    pub fn is_empty(&self) -> bool {
        self.token_ids.is_empty()
    }
}

/// Appends per-sequence tokens into one output chunk, injecting cls/sep
/// at the sequence boundaries when special-token mode is enabled.
#[derive(Debug, Clone)]
pub struct TokensBuilder<T: TokenType> {
    specials: Option<(T, T)>,
    token_ids: Vec<T>,
    positions: Vec<Option<usize>>,
}

impl<T: TokenType> TokensBuilder<T> {
    /// Create a builder.
    ///
    /// ## Arguments
    /// * `specials` - `(cls id, sep id)` when special-token mode is
    ///   enabled, else `None`.
    pub fn new(specials: Option<(T, T)>) -> Self {
        Self {
            specials,
            token_ids: Vec::new(),
            positions: Vec::new(),
        }
    }

    fn push_special(
        &mut self,
        id: T,
    ) {
        self.token_ids.push(id);
        self.positions.push(None);
    }

    fn push_content(
        &mut self,
        token_ids: &[T],
        positions: &[usize],
    ) {
        self.token_ids.extend_from_slice(token_ids);
        self.positions.extend(positions.iter().copied().map(Some));
    }

    /// Append a single sequence: `[cls] seq [sep]`.
    pub fn add_sequence(
        &mut self,
        token_ids: &[T],
        positions: &[usize],
    ) -> &mut Self {
        if let Some((cls, _)) = self.specials {
            self.push_special(cls);
        }
        self.push_content(token_ids, positions);
        if let Some((_, sep)) = self.specials {
            self.push_special(sep);
        }
        self
    }

    /// Append a sequence pair: `[cls] first [sep] second [sep]`.
    pub fn add_sequence_pair(
        &mut self,
        first_ids: &[T],
        first_positions: &[usize],
        second_ids: &[T],
        second_positions: &[usize],
    ) -> &mut Self {
        if let Some((cls, _)) = self.specials {
            self.push_special(cls);
        }
        self.push_content(first_ids, first_positions);
        if let Some((_, sep)) = self.specials {
            self.push_special(sep);
        }
        self.push_content(second_ids, second_positions);
        if let Some((_, sep)) = self.specials {
            self.push_special(sep);
        }
        self
    }

    /// Freeze into a tagged result chunk.
    pub fn build(
        self,
        input_index: usize,
        chunk_index: usize,
    ) -> ResultChunk<T> {
        ResultChunk {
            input_index,
            chunk_index,
            token_ids: self.token_ids,
            positions: self.positions,
        }
    }
}

/// A per-input failure recorded in a batch result.
#[derive(Debug)]
pub struct InputFailure {
    /// Index of the failed input in the request batch.
    pub input_index: usize,

    /// The failure.
    pub error: ChunkpieceError,
}

/// The assembled result of one batch request.
///
/// Output chunks appear in request order: input index ascending, chunk
/// index ascending within each input. Inputs that failed under the
/// partial-batch error policy are absent from `chunks` and recorded in
/// `failures`.
#[derive(Debug)]
pub struct TokenizationResult<T: TokenType> {
    chunks: Vec<ResultChunk<T>>,
    failures: Vec<InputFailure>,
    pad_id: T,
}

impl<T: TokenType> TokenizationResult<T> {
    /// Assemble a result.
    pub fn new(
        chunks: Vec<ResultChunk<T>>,
        failures: Vec<InputFailure>,
        pad_id: T,
    ) -> Self {
        Self {
            chunks,
            failures,
            pad_id,
        }
    }

    /// The output chunks, in request order.
    pub fn chunks(&self) -> &[ResultChunk<T>] {
        &self.chunks
    }

    /// The per-input failures.
    pub fn failures(&self) -> &[InputFailure] {
        &self.failures
    }

    /// The pad token id used by the padded views.
    pub fn pad_token_id(&self) -> T {
        self.pad_id
    }

    /// The padded (batch-uniform) chunk length.
    pub fn max_chunk_len(&self) -> usize {
        self.chunks.iter().map(ResultChunk::len).max().unwrap_or(0)
    }

    /// Token ids per chunk, right-padded with the pad id to the batch
    /// maximum.
    pub fn padded_token_ids(&self) -> Vec<Vec<T>> {
        let width = self.max_chunk_len();
        self.chunks
            .iter()
            .map(|chunk| {
                let mut ids = chunk.token_ids.clone();
                ids.resize(width, self.pad_id);
                ids
            })
            .collect()
    }

    /// Attention masks per chunk: 1 over content, 0 over padding.
    pub fn attention_masks(&self) -> Vec<Vec<u32>> {
        let width = self.max_chunk_len();
        self.chunks
            .iter()
            .map(|chunk| {
                let mut mask = vec![1; chunk.len()];
                mask.resize(width, 0);
                mask
            })
            .collect()
    }

    /// Check if the result holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
