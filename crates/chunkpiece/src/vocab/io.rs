//! # Vocabulary and Resource IO
//!
//! Line-oriented base64 readers for the two startup resources:
//!
//! Term/score lists:
//! ```terminaloutput
//! {BASE64 TERM} {SCORE}
//! ```
//!
//! Normalization rule tables:
//! ```terminaloutput
//! {BASE64 FROM} {BASE64 TO}
//! ```
//!
//! Blank lines are skipped. Any read, decode, or parse failure is a
//! [`ChunkpieceError::ResourceLoad`].

use std::io::BufRead;

use base64::{Engine, prelude::BASE64_STANDARD};

use crate::errors::{ChunkpieceError, Result};

/// Read an ordered term list and its parallel scores.
///
/// ## Arguments
/// * `reader` - the line reader.
///
/// ## Returns
/// `(terms, scores)`, same length, in file order.
pub fn read_term_scores<R: BufRead>(reader: R) -> Result<(Vec<String>, Vec<f64>)> {
    let mut terms = Vec::new();
    let mut scores = Vec::new();

    for line in reader.lines() {
        let line = line.map_err(|e| ChunkpieceError::ResourceLoad(e.to_string()))?;
        if line.is_empty() {
            continue;
        }

        let (term, score) = split_line(&line)?;
        terms.push(decode_text_field(term)?);
        scores.push(score.parse::<f64>().map_err(|e| {
            ChunkpieceError::ResourceLoad(format!("bad score in line {line:?}: {e}"))
        })?);
    }

    Ok((terms, scores))
}

/// Read the `(from, to)` rule pairs of a normalization table.
///
/// ## Arguments
/// * `reader` - the line reader.
///
/// ## Returns
/// The rule pairs in file order; empty input yields an empty table.
pub fn read_char_map_rules<R: BufRead>(reader: R) -> Result<Vec<(String, String)>> {
    let mut rules = Vec::new();

    for line in reader.lines() {
        let line = line.map_err(|e| ChunkpieceError::ResourceLoad(e.to_string()))?;
        if line.is_empty() {
            continue;
        }

        let (from, to) = split_line(&line)?;
        rules.push((decode_text_field(from)?, decode_text_field(to)?));
    }

    Ok(rules)
}

fn split_line(line: &str) -> Result<(&str, &str)> {
    let mut parts = line.splitn(2, ' ');
    match (parts.next(), parts.next()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(ChunkpieceError::ResourceLoad(format!(
            "malformed line {line:?}"
        ))),
    }
}

fn decode_text_field(field: &str) -> Result<String> {
    let bytes = BASE64_STANDARD
        .decode(field)
        .map_err(|e| ChunkpieceError::ResourceLoad(format!("bad base64 field {field:?}: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| ChunkpieceError::ResourceLoad(format!("non-utf8 field {field:?}: {e}")))
}
