//! # Batch Request Building
//!
//! [`RequestBuilder`] fans a batch of raw strings through a tokenizer,
//! applies the chunking/truncation policy per input, and assembles the
//! padded, position-tracked [`TokenizationResult`].
//!
//! Error policy is partial-batch-with-errors: a too-long input under
//! [`Truncate::None`] is recorded against its input index on the result
//! and does not abort sibling inputs. Configuration errors (an unusable
//! window or span) abort the whole call.

use core::ops::Range;

use crate::chunking::ChunkPlanner;
use crate::errors::{ChunkpieceError, Result};
use crate::result::{InnerTokenization, InputFailure, ResultChunk, TokenizationResult};
use crate::tokenizer::EncoderTokenizer;
use crate::types::TokenType;

/// Truncation policy for over-long inputs.
#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString,
)]
pub enum Truncate {
    /// Never drop tokens: overflow chunks into overlapping windows when
    /// a span is supplied, and fails the input otherwise.
    #[default]
    None,

    /// Keep the leading window of tokens and drop the rest. Takes
    /// precedence over chunking: any supplied span is ignored.
    First,
}

/// Fans a batch of inputs through one tokenizer into a tokenization
/// result.
pub struct RequestBuilder<'a, T: TokenType> {
    tokenizer: &'a dyn EncoderTokenizer<T>,
}

impl<'a, T: TokenType> RequestBuilder<'a, T> {
    /// Create a request builder over a tokenizer.
    pub fn new(tokenizer: &'a dyn EncoderTokenizer<T>) -> Self {
        Self { tokenizer }
    }

    /// Tokenize a batch into a padded result.
    ///
    /// Every input is tokenized in order; each input's chunks are
    /// appended chunk index ascending, tagged with the input index.
    ///
    /// ## Arguments
    /// * `inputs` - the raw input strings, in order.
    /// * `truncate` - the over-long input policy.
    /// * `span` - chunk overlap override; `None` disables chunking.
    ///   Ignored under [`Truncate::First`], which always truncates.
    /// * `window_size` - the window size, at most the tokenizer's max
    ///   sequence length.
    pub fn build_request(
        &self,
        inputs: &[&str],
        truncate: Truncate,
        span: Option<usize>,
        window_size: usize,
    ) -> Result<TokenizationResult<T>> {
        let max = self.tokenizer.max_sequence_length();
        if window_size == 0 || window_size > max {
            return Err(ChunkpieceError::Configuration(format!(
                "window size ({window_size}) must be in [1, {max}]"
            )));
        }

        let mut chunks = Vec::with_capacity(inputs.len());
        let mut failures = Vec::new();

        for (input_index, text) in inputs.iter().enumerate() {
            let inner = self.tokenizer.inner_tokenize(text);
            match self.chunk_input(&inner, input_index, truncate, span, window_size) {
                Ok(input_chunks) => chunks.extend(input_chunks),
                Err(error @ ChunkpieceError::InputTooLong { .. }) => {
                    failures.push(InputFailure { input_index, error });
                }
                Err(error) => return Err(error),
            }
        }

        log::debug!(
            "tokenized {} input(s) into {} chunk(s), {} failure(s)",
            inputs.len(),
            chunks.len(),
            failures.len(),
        );

        Ok(self.tokenizer.build_tokenization_result(chunks, failures))
    }

    /// Split one inner tokenization into windowed chunks per policy.
    fn chunk_input(
        &self,
        inner: &InnerTokenization<T>,
        input_index: usize,
        truncate: Truncate,
        span: Option<usize>,
        window_size: usize,
    ) -> Result<Vec<ResultChunk<T>>> {
        let extra = self.tokenizer.num_extra_tokens_for_single_sequence();
        let count = inner.len();

        if count + extra <= window_size {
            return Ok(vec![self.assemble(inner, 0..count, input_index, 0)]);
        }

        let planner = ChunkPlanner::new(window_size, extra)?;
        match truncate {
            Truncate::First => {
                let keep = planner.content_capacity();
                log::warn!(
                    "truncating input {input_index} from {count} to {keep} tokens"
                );
                Ok(vec![self.assemble(inner, 0..keep, input_index, 0)])
            }
            Truncate::None => {
                let span = span.ok_or(ChunkpieceError::InputTooLong {
                    length: count + extra,
                    max: window_size,
                })?;
                Ok(planner
                    .plan(count, span)?
                    .into_iter()
                    .enumerate()
                    .map(|(chunk_index, range)| {
                        self.assemble(inner, range, input_index, chunk_index)
                    })
                    .collect())
            }
        }
    }

    fn assemble(
        &self,
        inner: &InnerTokenization<T>,
        range: Range<usize>,
        input_index: usize,
        chunk_index: usize,
    ) -> ResultChunk<T> {
        let mut builder = self.tokenizer.tokens_builder();
        builder.add_sequence(
            &inner.token_ids[range.clone()],
            &inner.positions[range],
        );
        builder.build(input_index, chunk_index)
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use super::*;
    use crate::tokenizer::UnigramTokenizer;

    type T = u32;

    fn tokenizer(max_sequence_length: usize) -> UnigramTokenizer<T> {
        let terms = [
            "[UNK]", "[PAD]", "[CLS]", "[SEP]", "[MASK]", "he", "llo", "world",
        ];
        UnigramTokenizer::builder(
            terms.iter().map(|s| s.to_string()).collect(),
            vec![-1.0; terms.len()],
        )
        .set_max_sequence_length(max_sequence_length)
        .build()
        .unwrap()
    }

    #[test]
    fn test_truncate_from_str() {
        assert_eq!(Truncate::from_str("None").unwrap(), Truncate::None);
        assert_eq!(Truncate::from_str("First").unwrap(), Truncate::First);
        assert_eq!(Truncate::default(), Truncate::None);
    }

    #[test]
    fn test_single_input_single_chunk() {
        let tokenizer = tokenizer(512);
        let result = tokenizer
            .request_builder()
            .build_request(&["hello"], Truncate::None, None, 512)
            .unwrap();

        assert_eq!(result.chunks().len(), 1);
        assert_eq!(result.chunks()[0].token_ids, vec![2, 5, 6, 3]);
        assert!(result.failures().is_empty());
    }

    #[test]
    fn test_batch_order() {
        let tokenizer = tokenizer(512);
        let result = tokenizer
            .request_builder()
            .build_request(&["hello", "world", "hello world"], Truncate::None, None, 512)
            .unwrap();

        let input_indices: Vec<usize> =
            result.chunks().iter().map(|c| c.input_index).collect();
        assert_eq!(input_indices, vec![0, 1, 2]);
        assert_eq!(result.chunks()[1].token_ids, vec![2, 7, 3]);
    }

    #[test]
    fn test_window_size_validation() {
        let tokenizer = tokenizer(16);
        let builder = tokenizer.request_builder();

        assert!(builder
            .build_request(&["hello"], Truncate::None, None, 0)
            .is_err());
        assert!(builder
            .build_request(&["hello"], Truncate::None, None, 17)
            .is_err());
    }

    #[test]
    fn test_too_long_without_span_is_per_input() {
        let tokenizer = tokenizer(8);
        let result = tokenizer
            .request_builder()
            .build_request(
                &["hello hello hello hello", "hello"],
                Truncate::None,
                None,
                8,
            )
            .unwrap();

        // sibling input survives; the long input is recorded.
        assert_eq!(result.chunks().len(), 1);
        assert_eq!(result.chunks()[0].input_index, 1);
        assert_eq!(result.failures().len(), 1);
        assert_eq!(result.failures()[0].input_index, 0);
        assert!(matches!(
            result.failures()[0].error,
            ChunkpieceError::InputTooLong { length: 10, max: 8 }
        ));
    }

    #[test]
    fn test_truncate_first() {
        let tokenizer = tokenizer(6);
        let result = tokenizer
            .request_builder()
            .build_request(
                &["hello hello hello"],
                Truncate::First,
                None,
                6,
            )
            .unwrap();

        assert_eq!(result.chunks().len(), 1);
        assert_eq!(result.chunks()[0].token_ids, vec![2, 5, 6, 5, 6, 3]);
    }

    #[test]
    fn test_truncate_first_takes_precedence_over_span() {
        let tokenizer = tokenizer(6);
        let result = tokenizer
            .request_builder()
            .build_request(
                &["hello hello hello hello hello"],
                Truncate::First,
                Some(2),
                6,
            )
            .unwrap();

        assert_eq!(result.chunks().len(), 1);
        assert_eq!(result.chunks()[0].token_ids, vec![2, 5, 6, 5, 6, 3]);
    }

    #[test]
    fn test_chunked_windows() {
        let tokenizer = tokenizer(6);
        // 5 units -> 10 inner tokens; capacity 4, span 2.
        let result = tokenizer
            .request_builder()
            .build_request(
                &["hello hello hello hello hello"],
                Truncate::None,
                Some(2),
                6,
            )
            .unwrap();

        let chunks = result.chunks();
        assert_eq!(chunks.len(), 4);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.input_index, 0);
            assert_eq!(chunk.chunk_index, i);
            assert_eq!(chunk.token_ids.len(), 6);
            assert_eq!(chunk.token_ids.first(), Some(&2));
            assert_eq!(chunk.token_ids.last(), Some(&3));
        }

        // content windows overlap by the span.
        let content: Vec<Vec<T>> = chunks
            .iter()
            .map(|c| c.token_ids[1..c.token_ids.len() - 1].to_vec())
            .collect();
        assert_eq!(content[0][2..], content[1][..2]);
    }

    #[test]
    fn test_bad_span_aborts() {
        let tokenizer = tokenizer(6);
        let err = tokenizer
            .request_builder()
            .build_request(
                &["hello hello hello hello hello"],
                Truncate::None,
                Some(4),
                6,
            )
            .unwrap_err();
        assert!(matches!(err, ChunkpieceError::Configuration(_)));
    }
}
