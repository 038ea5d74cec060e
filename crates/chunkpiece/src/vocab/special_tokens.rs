//! # Special Token Policy

use crate::errors::{ChunkpieceError, Result};
use crate::types::TokenType;
use crate::vocab::TermVocab;

/// The unknown (substitution) token literal.
pub const UNKNOWN_TOKEN: &str = "[UNK]";

/// The separator token literal.
pub const SEPARATOR_TOKEN: &str = "[SEP]";

/// The padding token literal.
pub const PAD_TOKEN: &str = "[PAD]";

/// The class token literal.
pub const CLASS_TOKEN: &str = "[CLS]";

/// The mask token literal.
pub const MASK_TOKEN: &str = "[MASK]";

/// Control token literals that segmentation must never subdivide.
pub const NEVER_SPLIT: [&str; 5] = [
    UNKNOWN_TOKEN,
    SEPARATOR_TOKEN,
    PAD_TOKEN,
    CLASS_TOKEN,
    MASK_TOKEN,
];

/// The kinds of control tokens a tokenizer resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString)]
pub enum SpecialTokenKind {
    /// The unknown-substitution token.
    Unknown,

    /// The padding token.
    Pad,

    /// The leading class token.
    Cls,

    /// The trailing separator token.
    Sep,

    /// The mask token.
    Mask,
}

/// Resolved control token ids for one vocabulary.
///
/// `unknown` and `pad` are always required; `cls` and `sep` are required
/// only when special-token mode is enabled; `mask` is optional and its
/// absence is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialTokens<T: TokenType> {
    /// Id of [`UNKNOWN_TOKEN`].
    pub unknown_id: T,

    /// Id of [`PAD_TOKEN`].
    pub pad_id: T,

    /// Id of [`CLASS_TOKEN`]; `None` when special-token mode is off.
    pub cls_id: Option<T>,

    /// Id of [`SEPARATOR_TOKEN`]; `None` when special-token mode is off.
    pub sep_id: Option<T>,

    /// Id of [`MASK_TOKEN`], if present in the vocabulary.
    pub mask_id: Option<T>,
}

impl<T: TokenType> SpecialTokens<T> {
    /// Resolve the control tokens against a vocabulary.
    ///
    /// Every missing required token is enumerated in a single
    /// [`ChunkpieceError::Configuration`], rather than failing on the
    /// first.
    ///
    /// ## Arguments
    /// * `vocab` - the vocabulary to resolve against.
    /// * `with_special_tokens` - whether cls/sep injection is enabled.
    pub fn resolve(
        vocab: &TermVocab<T>,
        with_special_tokens: bool,
    ) -> Result<Self> {
        let mut missing: Vec<&str> = Vec::new();

        let mut require = |token: &'static str| {
            let id = vocab.id_of(token);
            if id.is_none() {
                missing.push(token);
            }
            id
        };

        let unknown_id = require(UNKNOWN_TOKEN);
        let pad_id = require(PAD_TOKEN);

        let (cls_id, sep_id) = if with_special_tokens {
            (require(CLASS_TOKEN), require(SEPARATOR_TOKEN))
        } else {
            (None, None)
        };

        if !missing.is_empty() {
            return Err(ChunkpieceError::Configuration(format!(
                "vocabulary is missing required {} token(s)",
                missing.join(", ")
            )));
        }

        Ok(Self {
            // `missing` is empty, so the required lookups all resolved.
            unknown_id: unknown_id.unwrap_or_default(),
            pad_id: pad_id.unwrap_or_default(),
            cls_id,
            sep_id,
            mask_id: vocab.id_of(MASK_TOKEN),
        })
    }

    /// Look up a resolved control token id by kind.
    ///
    /// ## Returns
    /// The id, or `None` when that kind is not configured for this
    /// tokenizer (cls/sep with special-token mode off, or an absent
    /// mask token).
    pub fn required_id(
        &self,
        kind: SpecialTokenKind,
    ) -> Option<T> {
        match kind {
            SpecialTokenKind::Unknown => Some(self.unknown_id),
            SpecialTokenKind::Pad => Some(self.pad_id),
            SpecialTokenKind::Cls => self.cls_id,
            SpecialTokenKind::Sep => self.sep_id,
            SpecialTokenKind::Mask => self.mask_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab_of(terms: &[&str]) -> TermVocab<u32> {
        TermVocab::new(
            terms.iter().map(|s| s.to_string()).collect(),
            vec![0.0; terms.len()],
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_full() {
        let vocab = vocab_of(&["[UNK]", "[PAD]", "[CLS]", "[SEP]", "[MASK]", "he"]);
        let specials = SpecialTokens::resolve(&vocab, true).unwrap();

        assert_eq!(specials.unknown_id, 0);
        assert_eq!(specials.pad_id, 1);
        assert_eq!(specials.cls_id, Some(2));
        assert_eq!(specials.sep_id, Some(3));
        assert_eq!(specials.mask_id, Some(4));

        assert_eq!(specials.required_id(SpecialTokenKind::Unknown), Some(0));
        assert_eq!(specials.required_id(SpecialTokenKind::Pad), Some(1));
        assert_eq!(specials.required_id(SpecialTokenKind::Cls), Some(2));
        assert_eq!(specials.required_id(SpecialTokenKind::Sep), Some(3));
        assert_eq!(specials.required_id(SpecialTokenKind::Mask), Some(4));
    }

    #[test]
    fn test_mask_is_optional() {
        let vocab = vocab_of(&["[UNK]", "[PAD]", "[CLS]", "[SEP]"]);
        let specials = SpecialTokens::resolve(&vocab, true).unwrap();
        assert_eq!(specials.mask_id, None);
        assert_eq!(specials.required_id(SpecialTokenKind::Mask), None);
    }

    #[test]
    fn test_cls_sep_skipped_without_special_mode() {
        let vocab = vocab_of(&["[UNK]", "[PAD]", "he"]);
        let specials = SpecialTokens::resolve(&vocab, false).unwrap();
        assert_eq!(specials.cls_id, None);
        assert_eq!(specials.sep_id, None);
    }

    #[test]
    fn test_missing_pad() {
        let vocab = vocab_of(&["[UNK]", "[CLS]", "[SEP]"]);
        let err = SpecialTokens::resolve(&vocab, true).unwrap_err();
        assert!(err.to_string().contains("[PAD]"));
    }

    #[test]
    fn test_all_missing_enumerated() {
        let vocab = vocab_of(&["he", "llo"]);
        let err = SpecialTokens::resolve(&vocab, true).unwrap_err();
        let msg = err.to_string();
        for token in ["[UNK]", "[PAD]", "[CLS]", "[SEP]"] {
            assert!(msg.contains(token), "missing {token} in: {msg}");
        }
    }
}
