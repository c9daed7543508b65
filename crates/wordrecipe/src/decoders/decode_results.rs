//! # Batch Decode Results

use crate::errors::{WRError, WRResult};

/// The result of decoding a batch of sentences.
///
/// Batch decoding stops at the first failure but keeps every sentence
/// decoded before it.
#[derive(Debug, Default)]
pub struct BatchDecodeResult {
    /// The decoded sentences, in input order.
    pub sentences: Vec<String>,

    /// The error that stopped decoding, if any.
    pub error: Option<WRError>,
}

impl BatchDecodeResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Did every sentence decode?
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Record the error that stopped decoding.
    pub(crate) fn fail(
        mut self,
        error: WRError,
    ) -> Self {
        self.error = Some(error);
        self
    }

    /// Split into the decoded prefix and the stopping error.
    pub fn into_parts(self) -> (Vec<String>, Option<WRError>) {
        (self.sentences, self.error)
    }

    /// Convert to an all-or-nothing result, dropping any partial prefix.
    pub fn into_result(self) -> WRResult<Vec<String>> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.sentences),
        }
    }
}
