//! # Vocabulary IO
//!
//! ## Binary Model Layout
//!
//! All integers are 4-byte big-endian; records are packed with no padding.
//!
//! | Field                       | Type  | Repeats  |
//! |-----------------------------|-------|----------|
//! | `n_chars`                   | `u32` | 1        |
//! | `n_rules`                   | `u32` | 1        |
//! | `(char, id)`                | `u32` | `n_chars`|
//! | `(left, right, result)`     | `u32` | `n_rules`|
//! | `(unk, pad, bos, eos)`      | `i32` | 1        |
//!
//! ## Loading A Model
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use wordrecipe::{
//!     decoders::RecipeDecoder,
//!     vocab::{BpeModel, ModelLoadOptions, SpaceMarkerPolicy, io::load_binary_model_path},
//! };
//!
//! fn example() -> wordrecipe::WRResult<RecipeDecoder> {
//!     let options = ModelLoadOptions::new().with_space_marker(SpaceMarkerPolicy::Glyph('▁'));
//!     let model: Arc<BpeModel> = load_binary_model_path("model.bpe", options)?.into();
//!
//!     Ok(RecipeDecoder::new(model))
//! }
//! ```

mod binary_model;

#[doc(inline)]
pub use binary_model::*;
