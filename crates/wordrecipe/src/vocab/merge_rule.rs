//! # Merge Rules

use crate::types::TokenId;

/// A merge rule: `left` followed by `right` forms `result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MergeRule {
    /// The left operand.
    pub left: TokenId,

    /// The right operand.
    pub right: TokenId,

    /// The merged token id.
    pub result: TokenId,
}

impl MergeRule {
    /// Create a new rule.
    pub const fn new(
        left: TokenId,
        right: TokenId,
        result: TokenId,
    ) -> Self {
        Self {
            left,
            right,
            result,
        }
    }
}

impl From<(TokenId, TokenId, TokenId)> for MergeRule {
    fn from((left, right, result): (TokenId, TokenId, TokenId)) -> Self {
        Self::new(left, right, result)
    }
}
