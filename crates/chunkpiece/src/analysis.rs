//! # Analysis Pipeline
//!
//! The fixed normalize-then-segment pipeline that turns one raw string
//! into position-tracked [`Token`]s.
//!
//! A pipeline instance holds no per-call state: every call works on
//! stack-local values, so one instance is safely shared by `&self`
//! across concurrent callers.

use std::ops::Range;
use std::sync::Arc;

use crate::normalize::Normalizer;
use crate::segment::Segmenter;
use crate::types::TokenType;

/// One produced token: text fragment, resolved id, score, and the
/// position index of the unit it covers in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<T: TokenType> {
    /// The produced text fragment.
    pub text: String,

    /// The resolved vocabulary id, or the unknown-token id.
    pub id: T,

    /// The segmentation score, if any.
    pub score: Option<f64>,

    /// The position index; non-decreasing, starting at 0.
    pub position: usize,

    /// Byte span of the fragment in the original (pre-normalization)
    /// text.
    pub span: Range<usize>,
}

/// Normalization composed with segmentation and position accumulation.
#[derive(Clone)]
pub struct AnalysisPipeline<T: TokenType> {
    normalizer: Arc<dyn Normalizer>,
    segmenter: Arc<dyn Segmenter<T>>,
}

impl<T: TokenType> std::fmt::Debug for AnalysisPipeline<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisPipeline").finish_non_exhaustive()
    }
}

impl<T: TokenType> AnalysisPipeline<T> {
    /// Compose a pipeline.
    pub fn new(
        normalizer: Arc<dyn Normalizer>,
        segmenter: Arc<dyn Segmenter<T>>,
    ) -> Self {
        Self {
            normalizer,
            segmenter,
        }
    }

    /// Turn one raw string into its token stream.
    ///
    /// Steps, in fixed order: normalize (identity tables pass text
    /// through unchanged), segment (never-split literals stay atomic),
    /// then accumulate a position per piece from its increment.
    pub fn analyze(
        &self,
        text: &str,
    ) -> Vec<Token<T>> {
        let normalized = self.normalizer.normalize(text);
        let pieces = self.segmenter.segment(&normalized.text);

        let mut position: i64 = -1;
        pieces
            .into_iter()
            .map(|piece| {
                position += piece.pos_increment as i64;
                Token {
                    text: normalized.text[piece.span.clone()].to_string(),
                    id: piece.id,
                    score: piece.score,
                    position: position.max(0) as usize,
                    span: normalized.original_offset(piece.span.start)
                        ..normalized.original_offset(piece.span.end),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::PrecompiledCharMap;
    use crate::segment::GreedySegmenter;
    use crate::vocab::TermVocab;

    type T = u32;

    fn pipeline(
        terms: &[&str],
        map: PrecompiledCharMap,
    ) -> AnalysisPipeline<T> {
        let vocab = Arc::new(
            TermVocab::new(
                terms.iter().map(|s| s.to_string()).collect(),
                vec![-1.0; terms.len()],
            )
            .unwrap(),
        );
        let segmenter = GreedySegmenter::new(vocab, &["[UNK]"], "[UNK]").unwrap();
        AnalysisPipeline::new(Arc::new(map), Arc::new(segmenter))
    }

    #[test]
    fn test_positions_index_units() {
        let p = pipeline(&["[UNK]", "he", "llo", "world"], PrecompiledCharMap::identity());
        let tokens = p.analyze("hello world hello");

        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 0, 1, 2, 2]);

        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["he", "llo", "world", "he", "llo"]);
    }

    #[test]
    fn test_normalization_feeds_segmentation() {
        let map = PrecompiledCharMap::from_rules([("\u{FF48}", "h")]);
        let p = pipeline(&["[UNK]", "he", "llo"], map);

        let tokens = p.analyze("\u{FF48}ello");
        assert_eq!(
            tokens.iter().map(|t| t.id).collect::<Vec<T>>(),
            vec![1, 2]
        );
        // spans map back to the original text: the fullwidth char is 3
        // bytes wide.
        assert_eq!(tokens[0].span, 0..4);
        assert_eq!(tokens[1].span, 4..7);
    }

    #[test]
    fn test_empty_input() {
        let p = pipeline(&["[UNK]", "he"], PrecompiledCharMap::identity());
        assert!(p.analyze("").is_empty());
    }
}
