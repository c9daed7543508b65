//! # Token Id Streams
//!
//! One sentence per line, token ids as base-10 fields separated by whitespace.

use crate::errors::{WRError, WRResult};
use crate::types::TokenId;

/// Parse one line of a token id stream.
///
/// ## Arguments
/// * `line` - The line text.
/// * `line_number` - The 1-based line number, for error reporting.
///
/// ## Errors
/// * [`WRError::MalformedIdentifier`] for the first field that is not a `u32`.
pub fn parse_id_line(
    line: &str,
    line_number: usize,
) -> WRResult<Vec<TokenId>> {
    line.split_whitespace()
        .map(|field| {
            field.parse::<TokenId>().map_err(|err| {
                log::error!("line {line_number}: malformed token id {field:?}: {err}");
                WRError::MalformedIdentifier {
                    line: line_number,
                    field: field.to_string(),
                }
            })
        })
        .collect()
}
