//! # Term Vocabulary

use crate::errors::{ChunkpieceError, Result};
use crate::types::{CpHashMap, TokenType};

/// Immutable bidirectional mapping between term text and token id.
///
/// Ids are assigned in the order terms appear in the source list, so
/// index `i` of [`TermVocab::terms`] is the text of token id `i`. Every
/// id in `[0, len)` is used exactly once. Lookup by text goes through a
/// hash index; the original order is kept for id-to-text decoding and
/// vocabulary export.
#[derive(Debug, Clone)]
pub struct TermVocab<T: TokenType> {
    terms: Vec<String>,
    scores: Vec<f64>,
    index: CpHashMap<String, T>,
}

impl<T: TokenType> TermVocab<T> {
    /// Build a vocabulary from an ordered term list and parallel scores.
    ///
    /// ## Arguments
    /// * `terms` - the term list; list index is the token id.
    /// * `scores` - per-term segmentation scores, same length as `terms`.
    ///
    /// ## Returns
    /// The vocabulary, or a [`ChunkpieceError::Configuration`] if the
    /// lists disagree in length or a term repeats, or a
    /// [`ChunkpieceError::VocabSizeOverflow`] if `T` cannot hold every id.
    pub fn new(
        terms: Vec<String>,
        scores: Vec<f64>,
    ) -> Result<Self> {
        if terms.len() != scores.len() {
            return Err(ChunkpieceError::Configuration(format!(
                "vocabulary has {} terms but {} scores",
                terms.len(),
                scores.len()
            )));
        }

        let mut index = CpHashMap::with_capacity(terms.len());
        for (i, term) in terms.iter().enumerate() {
            let id = T::from_usize(i)
                .ok_or(ChunkpieceError::VocabSizeOverflow { size: terms.len() })?;
            if index.insert(term.clone(), id).is_some() {
                return Err(ChunkpieceError::Configuration(format!(
                    "duplicate vocabulary term [{term}]"
                )));
            }
        }

        Ok(Self {
            terms,
            scores,
            index,
        })
    }

    /// Look up the id of a term.
    pub fn id_of(
        &self,
        term: &str,
    ) -> Option<T> {
        self.index.get(term).copied()
    }

    /// Look up the text of a token id.
    pub fn term_of(
        &self,
        id: T,
    ) -> Option<&str> {
        id.to_usize()
            .and_then(|i| self.terms.get(i))
            .map(String::as_str)
    }

    /// Look up the segmentation score of a token id.
    pub fn score_of(
        &self,
        id: T,
    ) -> Option<f64> {
        id.to_usize().and_then(|i| self.scores.get(i)).copied()
    }

    /// Check whether a term is present.
    pub fn contains(
        &self,
        term: &str,
    ) -> bool {
        self.index.contains_key(term)
    }

    /// The term list in original (id) order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// The longest term, in bytes.
    pub fn max_term_len(&self) -> usize {
        self.terms.iter().map(String::len).max().unwrap_or(0)
    }

    /// The number of terms in the vocabulary.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
