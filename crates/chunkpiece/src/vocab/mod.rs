//! # Vocabulary
//!
//! This module provides the term vocabulary, the special (control) token
//! policy, and the line-oriented io mechanisms for both.
//!
//! ## Term Vocabulary
//!
//! [`TermVocab`] is the immutable bidirectional mapping between token
//! text and token id, with a parallel segmentation score per term. Ids
//! are assigned in the input list's original order; lookup is hash
//! based, and the original order is retained for decoding and export.
//!
//! ## Special Tokens
//!
//! [`SpecialTokens`] resolves and validates the control tokens
//! (`[UNK]`, `[PAD]`, `[CLS]`, `[SEP]`, `[MASK]`) against a
//! [`TermVocab`].
pub mod io;
pub mod special_tokens;
pub mod term_vocab;

#[doc(inline)]
pub use special_tokens::{
    CLASS_TOKEN, MASK_TOKEN, NEVER_SPLIT, PAD_TOKEN, SEPARATOR_TOKEN, SpecialTokenKind,
    SpecialTokens, UNKNOWN_TOKEN,
};
#[doc(inline)]
pub use term_vocab::TermVocab;
