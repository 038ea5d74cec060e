//! # Text Normalization
//!
//! Normalization runs before segmentation, rewriting raw text through a
//! precompiled remapping table. An empty table is a valid identity
//! state: text passes through unchanged with no offset map.

pub mod char_map;

use std::borrow::Cow;

#[doc(inline)]
pub use char_map::PrecompiledCharMap;

/// Normalized text plus a byte-offset map back to the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText<'a> {
    /// The normalized text.
    pub text: Cow<'a, str>,

    /// `offsets[i]` is the original byte offset producing normalized
    /// byte `i`; one trailing entry holds the original length.
    /// Empty for identity normalization.
    offsets: Vec<usize>,
}

impl<'a> NormalizedText<'a> {
    /// Identity normalization: the text, unchanged.
    pub fn passthrough(text: &'a str) -> Self {
        Self {
            text: Cow::Borrowed(text),
            offsets: Vec::new(),
        }
    }

    /// Build a rewritten normalization with its offset map.
    pub fn rewritten(
        text: String,
        offsets: Vec<usize>,
    ) -> Self {
        debug_assert_eq!(offsets.len(), text.len() + 1);
        Self {
            text: Cow::Owned(text),
            offsets,
        }
    }

    /// Whether this is an identity (passthrough) normalization.
    pub fn is_identity(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Map a normalized byte offset back to the original text.
    pub fn original_offset(
        &self,
        norm_offset: usize,
    ) -> usize {
        if self.offsets.is_empty() {
            norm_offset
        } else {
            self.offsets[norm_offset.min(self.offsets.len() - 1)]
        }
    }
}

/// Seam for the pluggable normalization step.
pub trait Normalizer: Send + Sync {
    /// Normalize one raw string.
    fn normalize<'a>(
        &self,
        text: &'a str,
    ) -> NormalizedText<'a>;

    /// Whether this normalizer always passes text through unchanged.
    fn is_identity(&self) -> bool;
}
