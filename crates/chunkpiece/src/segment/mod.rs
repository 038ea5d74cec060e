//! # Subword Segmentation
//!
//! Segmentation turns normalized text into an ordered stream of
//! [`Piece`]s: vocabulary-resolvable fragments with scores, byte spans,
//! and position increments. The algorithm sits behind the
//! [`Segmenter`] seam; [`GreedySegmenter`] is the stock
//! leftmost-longest unigram implementation.

pub mod greedy;

use core::ops::Range;

#[doc(inline)]
pub use greedy::GreedySegmenter;

use crate::types::TokenType;

/// One produced subword piece.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece<T: TokenType> {
    /// Byte span of the piece in the segmented text.
    pub span: Range<usize>,

    /// Resolved vocabulary id, or the unknown-token id.
    pub id: T,

    /// Segmentation score, passed through from the vocabulary
    /// unmodified; `None` for unknown pieces.
    pub score: Option<f64>,

    /// Position increment relative to the previous piece.
    ///
    /// A zero increment marks a continuation piece sharing the
    /// previous piece's position unit.
    pub pos_increment: usize,
}

/// Seam for the pluggable subword segmentation algorithm.
pub trait Segmenter<T: TokenType>: Send + Sync {
    /// Segment normalized text into an ordered piece stream.
    fn segment(
        &self,
        text: &str,
    ) -> Vec<Piece<T>>;
}
