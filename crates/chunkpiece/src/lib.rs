//! # `chunkpiece` Encoder Tokenization Suite
//!
//! `chunkpiece` converts raw input text into the padded integer
//! token-id batches a transformer-style encoder expects, including
//! special-token injection, multi-sequence batching, and splitting long
//! documents into overlapping windows ("chunking") for inference.
//!
//! See:
//! * [`vocab`] for the term vocabulary and special token policy.
//! * [`normalize`] and [`segment`] for the pluggable analysis steps.
//! * [`analysis`] for the composed normalize-then-segment pipeline.
//! * [`chunking`] for overlapping-window math.
//! * [`tokenizer`] for the [`UnigramTokenizer`] and its builder.
//! * [`request`] and [`result`] for batch assembly.
//!
//! ## Example
//!
//! ```rust
//! use chunkpiece::{Truncate, UnigramTokenizer};
//!
//! let terms = ["[UNK]", "[PAD]", "[CLS]", "[SEP]", "he", "llo"];
//! let tokenizer: UnigramTokenizer<u32> = UnigramTokenizer::builder(
//!     terms.iter().map(|s| s.to_string()).collect(),
//!     vec![0.0; terms.len()],
//! )
//! .build()?;
//!
//! let result = tokenizer.request_builder().build_request(
//!     &["hello"],
//!     Truncate::None,
//!     None,
//!     512,
//! )?;
//! assert_eq!(result.chunks()[0].token_ids, vec![2, 4, 5, 3]);
//! # Ok::<(), chunkpiece::ChunkpieceError>(())
//! ```
//!
//! ## Concurrency
//!
//! A tokenizer instance is immutable after construction and keeps all
//! per-call analysis state on the stack, so one instance may be shared
//! by reference across many concurrent callers.
#![warn(missing_docs, unused)]

pub mod analysis;
pub mod chunking;
pub mod errors;
pub mod normalize;
pub mod request;
pub mod result;
pub mod segment;
pub mod tokenizer;
pub mod types;
pub mod vocab;

mod support;

#[doc(inline)]
pub use analysis::{AnalysisPipeline, Token};
#[doc(inline)]
pub use chunking::ChunkPlanner;
#[doc(inline)]
pub use errors::{ChunkpieceError, Result};
#[doc(inline)]
pub use normalize::{NormalizedText, Normalizer, PrecompiledCharMap};
#[doc(inline)]
pub use request::{RequestBuilder, Truncate};
#[doc(inline)]
pub use result::{InnerTokenization, InputFailure, ResultChunk, TokenizationResult, TokensBuilder};
#[doc(inline)]
pub use segment::{GreedySegmenter, Piece, Segmenter};
#[doc(inline)]
pub use tokenizer::{EncoderTokenizer, UnigramTokenizer, UnigramTokenizerBuilder};
#[doc(inline)]
pub use types::TokenType;
#[doc(inline)]
pub use vocab::{SpecialTokenKind, SpecialTokens, TermVocab};
