//! # Tokenizer Builder

use std::sync::Arc;

use crate::analysis::AnalysisPipeline;
use crate::errors::{ChunkpieceError, Result};
use crate::normalize::PrecompiledCharMap;
use crate::segment::GreedySegmenter;
use crate::tokenizer::UnigramTokenizer;
use crate::types::{CpHashSet, TokenType};
use crate::vocab::{NEVER_SPLIT, SpecialTokens, TermVocab, UNKNOWN_TOKEN};

/// The default maximum sequence length, in tokens.
pub const DEFAULT_MAX_SEQUENCE_LENGTH: usize = 512;

/// Validating builder for [`UnigramTokenizer`].
///
/// Setters are independent; all validation happens eagerly inside
/// [`UnigramTokenizerBuilder::build`], which either returns a fully
/// valid tokenizer or a descriptive error. The control token literals
/// are always in the never-split set; `set_never_split` adds extras.
pub struct UnigramTokenizerBuilder<T: TokenType> {
    terms: Vec<String>,
    scores: Vec<f64>,
    with_special_tokens: bool,
    max_sequence_length: usize,
    never_split: Vec<String>,
    char_map: PrecompiledCharMap,
    _marker: core::marker::PhantomData<T>,
}

impl<T: TokenType> UnigramTokenizerBuilder<T> {
    /// Start a builder over a vocabulary source.
    pub fn new(
        terms: Vec<String>,
        scores: Vec<f64>,
    ) -> Self {
        Self {
            terms,
            scores,
            with_special_tokens: true,
            max_sequence_length: DEFAULT_MAX_SEQUENCE_LENGTH,
            never_split: Vec::new(),
            char_map: PrecompiledCharMap::identity(),
            _marker: core::marker::PhantomData,
        }
    }

    /// Add caller-supplied literals that segmentation must never
    /// subdivide.
    pub fn set_never_split<I, S>(
        mut self,
        never_split: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.never_split = never_split.into_iter().map(Into::into).collect();
        self
    }

    /// Set the maximum sequence length, in tokens.
    pub fn set_max_sequence_length(
        mut self,
        max_sequence_length: usize,
    ) -> Self {
        self.max_sequence_length = max_sequence_length;
        self
    }

    /// Include cls and sep tokens around every sequence.
    pub fn set_with_special_tokens(
        mut self,
        with_special_tokens: bool,
    ) -> Self {
        self.with_special_tokens = with_special_tokens;
        self
    }

    /// Set the precompiled normalization table; the default is the
    /// identity table.
    pub fn set_char_map(
        mut self,
        char_map: PrecompiledCharMap,
    ) -> Self {
        self.char_map = char_map;
        self
    }

    /// Validate and freeze the tokenizer.
    ///
    /// ## Returns
    /// The tokenizer, or a [`ChunkpieceError::Configuration`] naming
    /// every missing required control token, a zero sequence length, or
    /// an inconsistent vocabulary.
    pub fn build(self) -> Result<UnigramTokenizer<T>> {
        if self.max_sequence_length == 0 {
            return Err(ChunkpieceError::Configuration(
                "max sequence length must be positive".to_string(),
            ));
        }

        let vocab = Arc::new(TermVocab::new(self.terms, self.scores)?);
        let specials = SpecialTokens::resolve(&vocab, self.with_special_tokens)?;

        let mut never_split: CpHashSet<String> =
            NEVER_SPLIT.iter().map(|s| s.to_string()).collect();
        never_split.extend(self.never_split);
        let never_split: Vec<String> = never_split.into_iter().collect();

        let segmenter = GreedySegmenter::new(vocab.clone(), never_split.as_slice(), UNKNOWN_TOKEN)?;
        let pipeline = AnalysisPipeline::new(Arc::new(self.char_map), Arc::new(segmenter));

        log::debug!(
            "built unigram tokenizer: {} terms, {} never-split literals, max_sequence_length={}",
            vocab.len(),
            never_split.len(),
            self.max_sequence_length,
        );

        Ok(UnigramTokenizer {
            vocab,
            specials,
            pipeline,
            with_special_tokens: self.with_special_tokens,
            max_sequence_length: self.max_sequence_length,
        })
    }
}
