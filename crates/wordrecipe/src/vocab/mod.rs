//! # Vocabulary Model
//!
//! The in-memory BPE model and its parts.
//!
//! A [`BpeModel`] is built once, either by reading the binary format with
//! [`io::load_binary_model`], or directly through a [`BpeModelBuilder`]:
//!
//! ```rust
//! use wordrecipe::vocab::{BpeModel, ModelLoadOptions, SpaceMarkerPolicy};
//!
//! fn example() -> wordrecipe::WRResult<BpeModel> {
//!     let options = ModelLoadOptions::new().with_space_marker(SpaceMarkerPolicy::Glyph('▁'));
//!
//!     let mut builder = BpeModel::builder(options);
//!     builder.add_char('a', 1).add_char('b', 2).add_char('▁', 3);
//!     builder.add_rule((3, 1, 4))?;
//!
//!     Ok(builder.build())
//! }
//! # example().unwrap();
//! ```

pub mod io;

mod bpe_model;
mod char_vocab;
mod load_options;
mod merge_rule;
mod recipe_table;
mod special_tokens;

#[doc(inline)]
pub use bpe_model::{BpeModel, BpeModelBuilder};
#[doc(inline)]
pub use char_vocab::CharVocab;
#[doc(inline)]
pub use load_options::{ModelLoadOptions, SpaceMarkerPolicy};
#[doc(inline)]
pub use merge_rule::MergeRule;
#[doc(inline)]
pub use recipe_table::RecipeTable;
#[doc(inline)]
pub use special_tokens::{BOS_TOKEN, EOS_TOKEN, PAD_TOKEN, SpecialTokens, UNK_TOKEN, UNSET_SPECIAL};
