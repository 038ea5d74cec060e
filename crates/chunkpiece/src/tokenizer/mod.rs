//! # Tokenizer Family
//!
//! [`EncoderTokenizer`] is the seam one model family implements to plug
//! into the request/result machinery; [`UnigramTokenizer`] is the stock
//! unigram implementation, constructed through its validating
//! [`UnigramTokenizerBuilder`].

pub mod builder;
pub mod unigram;

#[doc(inline)]
pub use builder::UnigramTokenizerBuilder;
#[doc(inline)]
pub use unigram::UnigramTokenizer;

use crate::chunking::ChunkPlanner;
use crate::errors::Result;
use crate::result::{InnerTokenization, InputFailure, ResultChunk, TokenizationResult, TokensBuilder};
use crate::types::TokenType;

/// The operations a model-family tokenizer exposes to the request and
/// result builders.
///
/// Implementations hold no per-call mutable state; a single instance is
/// shared by `&self` across concurrent callers.
pub trait EncoderTokenizer<T: TokenType>: Send + Sync {
    /// The class token id; `None` when special-token mode is off.
    fn cls_token_id(&self) -> Option<T>;

    /// The separator token id; `None` when special-token mode is off.
    fn sep_token_id(&self) -> Option<T>;

    /// The pad token id.
    fn pad_token_id(&self) -> T;

    /// The pad token literal.
    fn pad_token(&self) -> &str;

    /// The mask token id, if the vocabulary has one.
    fn mask_token_id(&self) -> Option<T>;

    /// The mask token literal.
    fn mask_token(&self) -> &str;

    /// The maximum sequence length this tokenizer was configured for.
    fn max_sequence_length(&self) -> usize;

    /// Whether cls/sep injection is enabled.
    fn is_with_special_tokens(&self) -> bool;

    /// The vocabulary term list in original (id) order, for decoding
    /// ids back to text.
    fn vocabulary(&self) -> &[String];

    /// Tokenize one string into parallel id/position sequences, before
    /// special token injection.
    fn inner_tokenize(
        &self,
        text: &str,
    ) -> InnerTokenization<T>;

    /// Window slots reserved by special tokens for a single sequence:
    /// cls + sep.
    fn num_extra_tokens_for_single_sequence(&self) -> usize {
        if self.is_with_special_tokens() { 2 } else { 0 }
    }

    /// Window slots reserved by special tokens for a sequence pair:
    /// cls + sep + sep.
    fn num_extra_tokens_for_seq_pair(&self) -> usize {
        if self.is_with_special_tokens() { 3 } else { 0 }
    }

    /// The default chunking span for a window: half the content
    /// capacity, for 50%-overlap windows.
    fn default_span_for_chunking(
        &self,
        window_size: usize,
    ) -> Result<usize> {
        Ok(
            ChunkPlanner::new(window_size, self.num_extra_tokens_for_single_sequence())?
                .default_span(),
        )
    }

    /// A chunk builder carrying this tokenizer's special token policy.
    fn tokens_builder(&self) -> TokensBuilder<T> {
        let specials = match (
            self.is_with_special_tokens(),
            self.cls_token_id(),
            self.sep_token_id(),
        ) {
            (true, Some(cls), Some(sep)) => Some((cls, sep)),
            _ => None,
        };
        TokensBuilder::new(specials)
    }

    /// Assemble per-sequence chunks into a batch result padded with
    /// this tokenizer's pad id.
    fn build_tokenization_result(
        &self,
        chunks: Vec<ResultChunk<T>>,
        failures: Vec<InputFailure>,
    ) -> TokenizationResult<T> {
        TokenizationResult::new(chunks, failures, self.pad_token_id())
    }
}
