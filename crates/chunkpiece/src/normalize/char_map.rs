//! # Precompiled Character Map Normalizer

use std::io::BufRead;

use crate::errors::Result;
use crate::normalize::{NormalizedText, Normalizer};
use crate::support::prefix_ends;
use crate::types::CpHashMap;
use crate::vocab::io::read_char_map_rules;

/// A precompiled character/string remapping table.
///
/// Rules map a source string to its replacement; at every position the
/// longest matching rule wins, and unmatched text copies through. The
/// empty table is the identity normalizer.
///
/// Tables are decoded at startup from a line-oriented base64 resource
/// (`{BASE64 FROM} {BASE64 TO}` per line); see
/// [`crate::vocab::io::read_char_map_rules`].
#[derive(Debug, Clone, Default)]
pub struct PrecompiledCharMap {
    rules: CpHashMap<String, String>,
    max_from_len: usize,
}

impl PrecompiledCharMap {
    /// The identity (empty) table.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Build a table from `(from, to)` rule pairs.
    ///
    /// Rules with an empty source string are dropped; they can never
    /// match.
    pub fn from_rules<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let rules: CpHashMap<String, String> = rules
            .into_iter()
            .map(|(from, to)| (from.into(), to.into()))
            .filter(|(from, _)| !from.is_empty())
            .collect();
        let max_from_len = rules.keys().map(String::len).max().unwrap_or(0);

        Self {
            rules,
            max_from_len,
        }
    }

    /// Decode a table from its packaged base64 resource.
    ///
    /// ## Arguments
    /// * `reader` - the resource line reader.
    ///
    /// ## Returns
    /// The table; empty input yields the identity table. Unreadable or
    /// corrupt input is a [`crate::errors::ChunkpieceError::ResourceLoad`].
    pub fn from_base64_reader<R: BufRead>(reader: R) -> Result<Self> {
        Ok(Self::from_rules(read_char_map_rules(reader)?))
    }

    /// The number of rules in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the table is empty (identity).
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The longest rule source matching a prefix of `text`, as
    /// `(source byte length, replacement)`.
    fn longest_rule<'s>(
        &'s self,
        text: &str,
    ) -> Option<(usize, &'s str)> {
        for end in prefix_ends(text, self.max_from_len) {
            if let Some(to) = self.rules.get(&text[..end]) {
                return Some((end, to.as_str()));
            }
        }
        None
    }
}

impl Normalizer for PrecompiledCharMap {
    fn normalize<'a>(
        &self,
        text: &'a str,
    ) -> NormalizedText<'a> {
        if self.is_empty() {
            return NormalizedText::passthrough(text);
        }

        let mut out = String::with_capacity(text.len());
        let mut offsets = Vec::with_capacity(text.len() + 1);
        let mut at = 0;

        while at < text.len() {
            if let Some((from_len, to)) = self.longest_rule(&text[at..]) {
                for _ in 0..to.len() {
                    offsets.push(at);
                }
                out.push_str(to);
                at += from_len;
            } else if let Some(c) = text[at..].chars().next() {
                for _ in 0..c.len_utf8() {
                    offsets.push(at);
                }
                out.push(c);
                at += c.len_utf8();
            } else {
                break;
            }
        }
        offsets.push(text.len());

        NormalizedText::rewritten(out, offsets)
    }

    fn is_identity(&self) -> bool {
        self.is_empty()
    }
}
