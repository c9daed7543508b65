//! # Error Types

use crate::types::TokenId;

/// Result alias for `wordrecipe` operations.
pub type WRResult<T> = Result<T, WRError>;

/// Errors raised while loading, saving, or decoding a BPE model.
#[derive(Debug, thiserror::Error)]
pub enum WRError {
    /// The model byte source ended in the middle of a field.
    #[error("truncated model input: not enough bytes for {field}")]
    TruncatedInput {
        /// The field being read.
        field: &'static str,
    },

    /// A merge rule cites a token id with no prior recipe.
    #[error("merge rule #{rule} references token id {token} before it is defined")]
    UnresolvedReference {
        /// Index of the offending rule, in load order.
        rule: usize,
        /// The undefined operand.
        token: TokenId,
    },

    /// A merge result expands to a base id missing from the character vocabulary.
    ///
    /// Every recipe built through [`crate::vocab::BpeModelBuilder`] bottoms out
    /// in added characters, so a consistent table never yields this.
    #[error("merge result references base id {token} with no character")]
    UnresolvedCharacter {
        /// The base id without a character.
        token: TokenId,
    },

    /// A decoded recipe contains a base id missing from the character vocabulary.
    ///
    /// As with [`WRError::UnresolvedCharacter`], only an inconsistent recipe
    /// table yields this.
    #[error("token recipe references base id {token} with no character")]
    MissingCharacter {
        /// The base id without a character.
        token: TokenId,
    },

    /// The token id is neither a known recipe nor a special token.
    #[error("unknown token id: {0}")]
    UnknownTokenId(TokenId),

    /// A field of an id stream is not a valid token id.
    #[error("line {line}: malformed token id {field:?}")]
    MalformedIdentifier {
        /// 1-based line number.
        line: usize,
        /// The offending field text.
        field: String,
    },

    /// The id stream reported a read fault.
    #[error("failed to read token id stream: {0}")]
    StreamRead(#[source] std::io::Error),

    /// A special token id cannot be represented in the signed wire format.
    #[error("special token {role} id {value} does not fit the binary format")]
    InvalidSpecialToken {
        /// The special token role name.
        role: &'static str,
        /// The unrepresentable id.
        value: TokenId,
    },

    /// Model file io failure.
    #[error("model io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            WRError::UnresolvedReference { rule: 2, token: 7 }.to_string(),
            "merge rule #2 references token id 7 before it is defined"
        );
        assert_eq!(
            WRError::UnknownTokenId(9999).to_string(),
            "unknown token id: 9999"
        );
        assert_eq!(
            WRError::MalformedIdentifier {
                line: 3,
                field: "x1".to_string()
            }
            .to_string(),
            "line 3: malformed token id \"x1\""
        );
    }

    #[test]
    fn test_stream_read_source() {
        use std::error::Error;

        let err = WRError::StreamRead(std::io::Error::other("boom"));
        assert_eq!(err.source().unwrap().to_string(), "boom");
    }
}
