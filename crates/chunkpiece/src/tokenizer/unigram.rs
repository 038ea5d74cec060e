//! # Unigram Tokenizer

use std::sync::Arc;

use crate::analysis::{AnalysisPipeline, Token};
use crate::request::RequestBuilder;
use crate::result::InnerTokenization;
use crate::tokenizer::{EncoderTokenizer, UnigramTokenizerBuilder};
use crate::types::TokenType;
use crate::vocab::{MASK_TOKEN, PAD_TOKEN, SpecialTokens, TermVocab};

/// Unigram tokenizer for encoder-style models.
///
/// Immutable after construction: the vocabulary, special token policy,
/// and analysis pipeline are built once by the validating builder and
/// shared read-only for the tokenizer's lifetime. Analysis keeps all
/// per-call state on the stack, so one instance serves many concurrent
/// callers.
#[derive(Clone, Debug)]
pub struct UnigramTokenizer<T: TokenType> {
    pub(crate) vocab: Arc<TermVocab<T>>,
    pub(crate) specials: SpecialTokens<T>,
    pub(crate) pipeline: AnalysisPipeline<T>,
    pub(crate) with_special_tokens: bool,
    pub(crate) max_sequence_length: usize,
}

impl<T: TokenType> UnigramTokenizer<T> {
    /// Start a validating builder over a vocabulary source.
    ///
    /// ## Arguments
    /// * `terms` - ordered term list; list index is the token id.
    /// * `scores` - per-term segmentation scores, same length.
    pub fn builder(
        terms: Vec<String>,
        scores: Vec<f64>,
    ) -> UnigramTokenizerBuilder<T> {
        UnigramTokenizerBuilder::new(terms, scores)
    }

    /// The underlying vocabulary.
    pub fn vocab(&self) -> &Arc<TermVocab<T>> {
        &self.vocab
    }

    /// The resolved special token policy.
    pub fn special_tokens(&self) -> &SpecialTokens<T> {
        &self.specials
    }

    /// Analyze one string into its full token stream, with text
    /// fragments, scores, and original-text spans.
    pub fn analyze(
        &self,
        text: &str,
    ) -> Vec<Token<T>> {
        self.pipeline.analyze(text)
    }

    /// A request builder over this tokenizer.
    pub fn request_builder(&self) -> RequestBuilder<'_, T> {
        RequestBuilder::new(self)
    }
}

impl<T: TokenType> EncoderTokenizer<T> for UnigramTokenizer<T> {
    fn cls_token_id(&self) -> Option<T> {
        self.specials.cls_id
    }

    fn sep_token_id(&self) -> Option<T> {
        self.specials.sep_id
    }

    fn pad_token_id(&self) -> T {
        self.specials.pad_id
    }

    fn pad_token(&self) -> &str {
        PAD_TOKEN
    }

    fn mask_token_id(&self) -> Option<T> {
        self.specials.mask_id
    }

    fn mask_token(&self) -> &str {
        MASK_TOKEN
    }

    fn max_sequence_length(&self) -> usize {
        self.max_sequence_length
    }

    fn is_with_special_tokens(&self) -> bool {
        self.with_special_tokens
    }

    fn vocabulary(&self) -> &[String] {
        self.vocab.terms()
    }

    fn inner_tokenize(
        &self,
        text: &str,
    ) -> InnerTokenization<T> {
        InnerTokenization::from_tokens(&self.analyze(text))
    }
}
