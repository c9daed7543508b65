//! # Test Fixtures
//!
//! Shared model fixtures for unit tests and downstream users
//! (enable the `testing` feature).

use std::sync::Arc;

use crate::decoders::RecipeDecoder;
use crate::types::TokenId;
use crate::vocab::io::load_binary_model;
use crate::vocab::{BpeModel, ModelLoadOptions, SpaceMarkerPolicy, UNSET_SPECIAL};

/// The begin-of-sequence id of the example model.
pub const EXAMPLE_BOS: TokenId = 100;

/// A raw binary model image.
///
/// Writes fields verbatim, so it can describe models the loader rejects.
#[derive(Debug, Clone)]
pub struct ModelImage {
    /// `(scalar value, id)` records.
    pub chars: Vec<(u32, TokenId)>,

    /// `(left, right, result)` records.
    pub rules: Vec<(TokenId, TokenId, TokenId)>,

    /// `(unk, pad, bos, eos)` wire values.
    pub specials: [i32; 4],
}

impl Default for ModelImage {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelImage {
    /// An empty image with all special tokens unset.
    pub fn new() -> Self {
        Self {
            chars: Vec::new(),
            rules: Vec::new(),
            specials: [UNSET_SPECIAL; 4],
        }
    }

    /// Replace the character records.
    pub fn with_chars(
        self,
        chars: &[(char, TokenId)],
    ) -> Self {
        let raw: Vec<(u32, TokenId)> = chars.iter().map(|&(ch, id)| (ch as u32, id)).collect();
        self.with_raw_chars(&raw)
    }

    /// Replace the character records with raw scalar values.
    pub fn with_raw_chars(
        mut self,
        chars: &[(u32, TokenId)],
    ) -> Self {
        self.chars = chars.to_vec();
        self
    }

    /// Replace the rule records.
    pub fn with_rules(
        mut self,
        rules: &[(TokenId, TokenId, TokenId)],
    ) -> Self {
        self.rules = rules.to_vec();
        self
    }

    /// Replace the special token wire values.
    pub fn with_specials(
        mut self,
        specials: [i32; 4],
    ) -> Self {
        self.specials = specials;
        self
    }

    /// Serialize the image.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&(self.chars.len() as u32).to_be_bytes());
        buf.extend_from_slice(&(self.rules.len() as u32).to_be_bytes());
        for &(value, id) in &self.chars {
            buf.extend_from_slice(&value.to_be_bytes());
            buf.extend_from_slice(&id.to_be_bytes());
        }
        for &(left, right, result) in &self.rules {
            buf.extend_from_slice(&left.to_be_bytes());
            buf.extend_from_slice(&right.to_be_bytes());
            buf.extend_from_slice(&result.to_be_bytes());
        }
        for value in self.specials {
            buf.extend_from_slice(&value.to_be_bytes());
        }
        buf
    }
}

/// Load options for the example model: `'▁'` marks word starts.
pub fn example_options() -> ModelLoadOptions {
    ModelLoadOptions::new().with_space_marker(SpaceMarkerPolicy::Glyph('▁'))
}

/// The example model image.
///
/// * chars: `{'a': 1, 'b': 2, '▁': 3}`
/// * rules: `(3, 1) -> 4`, i.e. "word-start + a"
/// * specials: `bos = 100`, others unset
pub fn example_image() -> ModelImage {
    ModelImage::new()
        .with_chars(&[('a', 1), ('b', 2), ('▁', 3)])
        .with_rules(&[(3, 1, 4)])
        .with_specials([UNSET_SPECIAL, UNSET_SPECIAL, EXAMPLE_BOS as i32, UNSET_SPECIAL])
}

/// Load the example model.
pub fn example_model() -> Arc<BpeModel> {
    load_binary_model(example_image().to_bytes().as_slice(), example_options())
        .expect("example model loads")
        .into()
}

/// A decoder over the example model.
pub fn example_decoder() -> RecipeDecoder {
    RecipeDecoder::new(example_model())
}
