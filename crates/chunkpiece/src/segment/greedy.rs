//! # Greedy Unigram Segmenter

use std::ops::Range;
use std::sync::Arc;

use regex::Regex;

use crate::errors::{ChunkpieceError, Result};
use crate::segment::{Piece, Segmenter};
use crate::support::prefix_ends;
use crate::types::TokenType;
use crate::vocab::TermVocab;

/// Greedy longest-match unigram segmenter.
///
/// Never-split literals are matched first through a compiled exact-match
/// union regex and always emitted as single atomic pieces. The remaining
/// text is split on whitespace into position units; within a unit, the
/// leftmost-longest vocabulary term wins at every offset, and unmatched
/// runs collapse into one unknown piece.
///
/// Per-term scores are passed through unmodified for downstream
/// tie-breaking; this segmenter itself resolves ties leftmost-longest.
///
/// Continuation pieces inside one whitespace unit carry a zero position
/// increment, so piece positions index whitespace units of the input.
#[derive(Debug, Clone)]
pub struct GreedySegmenter<T: TokenType> {
    vocab: Arc<TermVocab<T>>,
    unknown_id: T,
    never_split_re: Option<Regex>,
    max_piece_len: usize,
}

impl<T: TokenType> GreedySegmenter<T> {
    /// Build a segmenter over a vocabulary.
    ///
    /// ## Arguments
    /// * `vocab` - the term vocabulary.
    /// * `never_split` - literals segmentation must never subdivide.
    ///   Empty literals are dropped; they can never match, and an empty
    ///   alternation branch would match at every offset.
    /// * `unknown_token` - the unknown-token literal; must resolve in
    ///   `vocab`.
    pub fn new<S: AsRef<str>>(
        vocab: Arc<TermVocab<T>>,
        never_split: &[S],
        unknown_token: &str,
    ) -> Result<Self> {
        let unknown_id = vocab.id_of(unknown_token).ok_or_else(|| {
            ChunkpieceError::Configuration(format!(
                "vocabulary is missing required {unknown_token} token(s)"
            ))
        })?;

        let literals: Vec<&str> = never_split
            .iter()
            .map(AsRef::as_ref)
            .filter(|s| !s.is_empty())
            .collect();
        let never_split_re = if literals.is_empty() {
            None
        } else {
            let pattern = exact_match_union_pattern(&literals);
            Some(Regex::new(&pattern).map_err(|e| {
                ChunkpieceError::Configuration(format!("bad never-split literal set: {e}"))
            })?)
        };

        let max_piece_len = vocab.max_term_len();

        Ok(Self {
            vocab,
            unknown_id,
            never_split_re,
            max_piece_len,
        })
    }

    fn next_never_split(
        &self,
        text: &str,
    ) -> Option<Range<usize>> {
        self.never_split_re
            .as_ref()
            .and_then(|re| re.find(text).map(|m| m.range()))
    }

    /// The longest vocabulary term prefixing `text`, as
    /// `(byte length, id)`.
    fn longest_match(
        &self,
        text: &str,
    ) -> Option<(usize, T)> {
        for end in prefix_ends(text, self.max_piece_len) {
            if let Some(id) = self.vocab.id_of(&text[..end]) {
                return Some((end, id));
            }
        }
        None
    }

    /// Segment one whitespace unit starting at byte `offset`.
    fn segment_unit(
        &self,
        unit: &str,
        offset: usize,
        pieces: &mut Vec<Piece<T>>,
    ) {
        let mut at = 0;
        let mut unknown_from: Option<usize> = None;
        let mut head = true;

        let increment = |head: &mut bool| {
            if *head {
                *head = false;
                1
            } else {
                0
            }
        };

        while at < unit.len() {
            if let Some((len, id)) = self.longest_match(&unit[at..]) {
                if let Some(from) = unknown_from.take() {
                    pieces.push(Piece {
                        span: offset + from..offset + at,
                        id: self.unknown_id,
                        score: None,
                        pos_increment: increment(&mut head),
                    });
                }
                pieces.push(Piece {
                    span: offset + at..offset + at + len,
                    id,
                    score: self.vocab.score_of(id),
                    pos_increment: increment(&mut head),
                });
                at += len;
            } else {
                // unmatched runs collapse into one unknown piece.
                if unknown_from.is_none() {
                    unknown_from = Some(at);
                }
                at += unit[at..].chars().next().map_or(1, char::len_utf8);
            }
        }

        if let Some(from) = unknown_from {
            pieces.push(Piece {
                span: offset + from..offset + unit.len(),
                id: self.unknown_id,
                score: None,
                pos_increment: increment(&mut head),
            });
        }
    }

    /// Split a never-split-free region on whitespace and segment each
    /// unit.
    fn segment_units(
        &self,
        text: &str,
        offset: usize,
        pieces: &mut Vec<Piece<T>>,
    ) {
        let mut unit_start: Option<usize> = None;

        for (i, c) in text.char_indices() {
            if c.is_whitespace() {
                if let Some(from) = unit_start.take() {
                    self.segment_unit(&text[from..i], offset + from, pieces);
                }
            } else if unit_start.is_none() {
                unit_start = Some(i);
            }
        }
        if let Some(from) = unit_start {
            self.segment_unit(&text[from..], offset + from, pieces);
        }
    }
}

impl<T: TokenType> Segmenter<T> for GreedySegmenter<T> {
    fn segment(
        &self,
        text: &str,
    ) -> Vec<Piece<T>> {
        let mut pieces = Vec::new();
        let mut current = text;
        let mut offset = 0;

        while let Some(range) = self.next_never_split(current) {
            self.segment_units(&current[..range.start], offset, &mut pieces);

            let literal = &current[range.clone()];
            let id = self.vocab.id_of(literal);
            pieces.push(Piece {
                span: offset + range.start..offset + range.end,
                id: id.unwrap_or(self.unknown_id),
                score: id.and_then(|id| self.vocab.score_of(id)),
                pos_increment: 1,
            });

            current = &current[range.end..];
            offset += range.end;
        }
        self.segment_units(current, offset, &mut pieces);

        pieces
    }
}

/// Create a union pattern of exact (escaped) matches.
fn exact_match_union_pattern<S: AsRef<str>>(alts: &[S]) -> String {
    let parts = alts
        .iter()
        .map(|s| regex::escape(s.as_ref()))
        .collect::<Vec<_>>();
    format!("({})", parts.join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;

    type T = u32;

    fn vocab_of(terms: &[&str]) -> Arc<TermVocab<T>> {
        Arc::new(
            TermVocab::new(
                terms.iter().map(|s| s.to_string()).collect(),
                (0..terms.len()).map(|i| -(i as f64)).collect(),
            )
            .unwrap(),
        )
    }

    fn segmenter(terms: &[&str]) -> GreedySegmenter<T> {
        GreedySegmenter::new(vocab_of(terms), &["[UNK]", "[SEP]"], "[UNK]").unwrap()
    }

    #[test]
    fn test_union_pattern() {
        let pattern = exact_match_union_pattern(&["apple", "[x]", "boat"]);
        assert_eq!(pattern, r"(apple|\[x\]|boat)");
    }

    #[test]
    fn test_greedy_subwords() {
        let seg = segmenter(&["[UNK]", "he", "llo", "hell"]);
        let pieces = seg.segment("hello");

        // leftmost-longest: "hell" wins over "he", leaving "o" unknown.
        assert_eq!(
            pieces,
            vec![
                Piece {
                    span: 0..4,
                    id: 3,
                    score: Some(-3.0),
                    pos_increment: 1,
                },
                Piece {
                    span: 4..5,
                    id: 0,
                    score: None,
                    pos_increment: 0,
                },
            ]
        );
    }

    #[test]
    fn test_units_advance_position() {
        let seg = segmenter(&["[UNK]", "he", "llo"]);
        let pieces = seg.segment("hello hello");

        let increments: Vec<usize> = pieces.iter().map(|p| p.pos_increment).collect();
        assert_eq!(increments, vec![1, 0, 1, 0]);

        let ids: Vec<T> = pieces.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 1, 2]);
    }

    #[test]
    fn test_never_split_is_atomic() {
        // "[SEP]" decomposes into vocab terms, but must stay atomic.
        let seg = segmenter(&["[UNK]", "[SEP]", "[", "SEP", "]", "ab"]);
        let pieces = seg.segment("ab[SEP]ab");

        assert_eq!(
            pieces.iter().map(|p| p.id).collect::<Vec<T>>(),
            vec![5, 1, 5]
        );
        assert_eq!(
            pieces.iter().map(|p| p.span.clone()).collect::<Vec<_>>(),
            vec![0..2, 2..7, 7..9]
        );
        assert_eq!(
            pieces.iter().map(|p| p.pos_increment).collect::<Vec<_>>(),
            vec![1, 1, 1]
        );
    }

    #[test]
    fn test_unknown_run_collapses() {
        let seg = segmenter(&["[UNK]", "ab"]);
        let pieces = seg.segment("xyzab");

        assert_eq!(
            pieces,
            vec![
                Piece {
                    span: 0..3,
                    id: 0,
                    score: None,
                    pos_increment: 1,
                },
                Piece {
                    span: 3..5,
                    id: 1,
                    score: Some(-1.0),
                    pos_increment: 0,
                },
            ]
        );
    }

    #[test]
    fn test_empty_never_split_literals_are_dropped() {
        // an empty literal would otherwise match (width 0) at every
        // offset and the never-split walk could not advance.
        let seg = GreedySegmenter::new(vocab_of(&["[UNK]", "ab"]), &["", "[UNK]"], "[UNK]")
            .unwrap();
        let pieces = seg.segment("ab xy");
        assert_eq!(
            pieces.iter().map(|p| p.id).collect::<Vec<T>>(),
            vec![1, 0]
        );

        let seg = GreedySegmenter::new(vocab_of(&["[UNK]", "ab"]), &[""], "[UNK]").unwrap();
        assert_eq!(seg.segment("").len(), 0);
        assert_eq!(seg.segment("ab").len(), 1);
    }

    #[test]
    fn test_empty_and_whitespace() {
        let seg = segmenter(&["[UNK]", "ab"]);
        assert!(seg.segment("").is_empty());
        assert!(seg.segment("   \t\n").is_empty());
    }

    #[test]
    fn test_scores_pass_through() {
        let seg = segmenter(&["[UNK]", "he", "llo"]);
        let pieces = seg.segment("hello");
        assert_eq!(pieces[0].score, Some(-1.0));
        assert_eq!(pieces[1].score, Some(-2.0));
    }
}
