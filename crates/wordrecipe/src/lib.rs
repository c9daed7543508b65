#![warn(missing_docs, unused)]
//! # `wordrecipe` BPE Vocabulary Decoder
//!
//! Reads a trained Byte-Pair-Encoding vocabulary from its compact binary
//! form and decodes token identifiers back into text.
//!
//! A model is a character vocabulary (`char <-> id`) plus an ordered list of
//! merge rules `(left, right) -> result`. Each rule's result expands to the
//! concatenation of its operands' recipes, so every token id spells out to
//! a concrete sequence of characters.
//!
//! See:
//! * [`vocab`] for the model, its builder, and binary model io.
//! * [`decoders`] to decode tokens, sentences, and line streams into text.
//!
//! ## Crate Features
#![doc = document_features::document_features!()]
//!
//! ## Loading and Decoding
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use wordrecipe::{
//!     decoders::{RecipeDecoder, TokenDecoder},
//!     vocab::{BpeModel, io::load_binary_model_path},
//! };
//!
//! fn example() -> wordrecipe::WRResult<String> {
//!     let model: Arc<BpeModel> = load_binary_model_path("model.bpe", Default::default())?.into();
//!     let decoder = RecipeDecoder::new(model);
//!
//!     decoder.decode_sentence(&[4, 2])
//! }
//! ```

pub mod decoders;
pub mod errors;
pub mod types;
pub mod vocab;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[doc(inline)]
pub use decoders::{BatchDecodeResult, RecipeDecoder, TokenDecoder};
#[doc(inline)]
pub use errors::{WRError, WRResult};
#[doc(inline)]
pub use types::TokenId;
#[doc(inline)]
pub use vocab::{BpeModel, BpeModelBuilder, ModelLoadOptions, SpaceMarkerPolicy};
