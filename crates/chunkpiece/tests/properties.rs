#![allow(missing_docs)]

use chunkpiece::{EncoderTokenizer, Truncate, UnigramTokenizer};
use proptest::prelude::*;

type T = u32;

const VOCAB: &[&str] = &[
    "[UNK]", "[PAD]", "[CLS]", "[SEP]", "he", "llo", "ab", "ba", "a", "b", "q",
];

fn tokenizer() -> UnigramTokenizer<T> {
    UnigramTokenizer::builder(
        VOCAB.iter().map(|s| s.to_string()).collect(),
        vec![-1.0; VOCAB.len()],
    )
    .build()
    .unwrap()
}

proptest! {
    #[test]
    fn positions_non_decreasing_from_zero(text in "[a-z ]{0,64}") {
        let inner = tokenizer().inner_tokenize(&text);

        prop_assert_eq!(inner.token_ids.len(), inner.positions.len());
        if let Some(&first) = inner.positions.first() {
            prop_assert_eq!(first, 0);
        }
        prop_assert!(inner.positions.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn ids_stay_in_vocab_range(text in "[a-z ]{0,64}") {
        let inner = tokenizer().inner_tokenize(&text);
        prop_assert!(
            inner.token_ids.iter().all(|&id| (id as usize) < VOCAB.len())
        );
    }

    #[test]
    fn every_chunk_is_bracketed(words in prop::collection::vec("[ab]{1,5}", 1..32)) {
        let text = words.join(" ");
        let t = tokenizer();
        let span = t.default_span_for_chunking(8).unwrap();

        let result = t
            .request_builder()
            .build_request(&[text.as_str()], Truncate::None, Some(span), 8)
            .unwrap();

        prop_assert!(result.failures().is_empty());
        prop_assert!(!result.chunks().is_empty());

        let cls = t.cls_token_id().unwrap();
        let sep = t.sep_token_id().unwrap();
        for chunk in result.chunks() {
            prop_assert!(chunk.len() <= 8);
            prop_assert_eq!(chunk.token_ids.first(), Some(&cls));
            prop_assert_eq!(chunk.token_ids.last(), Some(&sep));
        }
    }

    #[test]
    fn chunk_overlap_reconstructs(words in prop::collection::vec("[ab]{1,5}", 1..32)) {
        let text = words.join(" ");
        let t = tokenizer();
        let span = t.default_span_for_chunking(8).unwrap();

        let inner = t.inner_tokenize(&text);
        let result = t
            .request_builder()
            .build_request(&[text.as_str()], Truncate::None, Some(span), 8)
            .unwrap();

        let mut reassembled: Vec<T> = Vec::new();
        for (i, chunk) in result.chunks().iter().enumerate() {
            let content = &chunk.token_ids[1..chunk.len() - 1];
            let skip = if i == 0 { 0 } else { span };
            reassembled.extend_from_slice(&content[skip..]);
        }
        prop_assert_eq!(reassembled, inner.token_ids);
    }
}
