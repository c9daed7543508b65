//! # Token Decoder Trait

use std::io::BufRead;

use crate::decoders::decode_results::BatchDecodeResult;
use crate::decoders::id_stream::parse_id_line;
use crate::errors::{WRError, WRResult};
use crate::types::TokenId;
use crate::vocab::BOS_TOKEN;

/// Rough decoded characters per token, for buffer sizing.
pub const EXPECTED_CHARS_PER_TOKEN: usize = 4;

/// Trait for decoders of token id sequences into text.
///
/// Implementors provide [`TokenDecoder::id_to_token`];
/// sentence, batch, and stream decoding are built on it.
pub trait TokenDecoder {
    /// Decode a single token id.
    ///
    /// ## Arguments
    /// * `id` - The token id.
    /// * `replace_space_marker` - Emit a leading word-start marker as `' '`.
    fn id_to_token(
        &self,
        id: TokenId,
        replace_space_marker: bool,
    ) -> WRResult<String>;

    /// Decode a token id sequence into a sentence.
    ///
    /// Word-start markers become spaces; then a single leading space is
    /// dropped, and a leading `"<BOS> "` collapses to `"<BOS>"`.
    ///
    /// ## Errors
    /// The first token error; the partial sentence is discarded.
    fn decode_sentence(
        &self,
        ids: &[TokenId],
    ) -> WRResult<String> {
        let mut sentence = String::with_capacity(ids.len() * EXPECTED_CHARS_PER_TOKEN);
        for &id in ids {
            sentence.push_str(&self.id_to_token(id, true)?);
        }
        Ok(finish_sentence(sentence))
    }

    /// Decode a batch of token id sequences, in order.
    ///
    /// Stops at the first failure, keeping the sentences decoded before it.
    fn decode_sentences<I>(
        &self,
        batch: I,
    ) -> BatchDecodeResult
    where
        Self: Sized,
        I: IntoIterator,
        I::Item: AsRef<[TokenId]>,
    {
        let mut result = BatchDecodeResult::new();
        for ids in batch {
            match self.decode_sentence(ids.as_ref()) {
                Ok(sentence) => result.sentences.push(sentence),
                Err(err) => return result.fail(err),
            }
        }
        result
    }

    /// Decode a line-oriented token id stream, one sentence per line.
    ///
    /// Stops at the first read fault, malformed field, or decode failure,
    /// keeping the sentences decoded before it.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, reader)))]
    fn decode_from_stream<R: BufRead>(
        &self,
        reader: R,
    ) -> BatchDecodeResult
    where
        Self: Sized,
    {
        let mut result = BatchDecodeResult::new();
        for (index, line) in reader.lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    log::error!("token id stream read failed: {err}");
                    return result.fail(WRError::StreamRead(err));
                }
            };

            let decoded = parse_id_line(&line, index + 1).and_then(|ids| self.decode_sentence(&ids));
            match decoded {
                Ok(sentence) => result.sentences.push(sentence),
                Err(err) => return result.fail(err),
            }
        }
        result
    }
}

/// Sentence boundary cleanup.
fn finish_sentence(mut sentence: String) -> String {
    if sentence.starts_with(' ') {
        sentence.remove(0);
    }
    if sentence
        .strip_prefix(BOS_TOKEN)
        .is_some_and(|rest| rest.starts_with(' '))
    {
        sentence.remove(BOS_TOKEN.len());
    }
    sentence
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_sentence() {
        assert_eq!(finish_sentence(String::new()), "");
        assert_eq!(finish_sentence(" ".to_string()), "");
        assert_eq!(finish_sentence("  ab".to_string()), " ab");
        assert_eq!(finish_sentence(" ab cd".to_string()), "ab cd");
        assert_eq!(finish_sentence("<BOS> ab".to_string()), "<BOS>ab");
        assert_eq!(finish_sentence("<BOS>  ab".to_string()), "<BOS> ab");
        assert_eq!(finish_sentence(" <BOS> ab".to_string()), "<BOS>ab");
        assert_eq!(finish_sentence("<BOS>".to_string()), "<BOS>");
        assert_eq!(finish_sentence("<BO".to_string()), "<BO");
        assert_eq!(finish_sentence("ab <BOS> c".to_string()), "ab <BOS> c");
    }
}
