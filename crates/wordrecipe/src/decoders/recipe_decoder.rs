//! # Recipe ``{ TokenId -> [char] }`` Token Decoder

use std::sync::Arc;

use crate::decoders::token_decoder::TokenDecoder;
use crate::errors::{WRError, WRResult};
use crate::types::TokenId;
use crate::vocab::BpeModel;

/// A [`TokenDecoder`] that spells tokens out through a [`BpeModel`]'s recipes.
///
/// Holds the model by `Arc`; clones share it.
#[derive(Debug, Clone)]
pub struct RecipeDecoder {
    model: Arc<BpeModel>,
}

impl From<BpeModel> for RecipeDecoder {
    fn from(model: BpeModel) -> Self {
        Self::new(model.into())
    }
}

impl From<Arc<BpeModel>> for RecipeDecoder {
    fn from(model: Arc<BpeModel>) -> Self {
        Self::new(model)
    }
}

impl RecipeDecoder {
    /// Create a decoder over a shared model.
    pub fn new(model: Arc<BpeModel>) -> Self {
        Self { model }
    }

    /// The shared model.
    pub fn model(&self) -> &Arc<BpeModel> {
        &self.model
    }
}

impl TokenDecoder for RecipeDecoder {
    fn id_to_token(
        &self,
        id: TokenId,
        replace_space_marker: bool,
    ) -> WRResult<String> {
        let Some(recipe) = self.model.recipe(id) else {
            return match self.model.special_tokens().surface(id) {
                Some(surface) => Ok(surface.to_string()),
                None => {
                    log::error!("{id}: token id is impossible");
                    Err(WRError::UnknownTokenId(id))
                }
            };
        };

        let (prefix, body) = match recipe.split_first() {
            Some((&first, rest)) if replace_space_marker && Some(first) == self.model.space_id() => {
                (" ", rest)
            }
            _ => ("", recipe),
        };

        let word = self.model.char_vocab().spell(body).map_err(|token| {
            log::error!("decode failure: base id {token} has no corresponding char");
            WRError::MissingCharacter { token }
        })?;

        if prefix.is_empty() {
            Ok(word)
        } else {
            Ok(prefix.to_string() + &word)
        }
    }
}
