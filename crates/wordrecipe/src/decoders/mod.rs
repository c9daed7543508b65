//! # Token Decoders
//!
//! Decoding runs over a loaded, shared [`crate::vocab::BpeModel`]:
//! token id to word fragment, fragments to a sentence, sentences to a batch,
//! and line-oriented id streams to sentences.
//!
//! ```rust,no_run
//! use std::io::BufReader;
//!
//! use wordrecipe::decoders::{RecipeDecoder, TokenDecoder};
//!
//! fn example(decoder: &RecipeDecoder) -> wordrecipe::WRResult<Vec<String>> {
//!     let stdin = BufReader::new(std::io::stdin());
//!     decoder.decode_from_stream(stdin).into_result()
//! }
//! ```

mod decode_results;
mod id_stream;
mod recipe_decoder;
mod token_decoder;

#[doc(inline)]
pub use decode_results::BatchDecodeResult;
#[doc(inline)]
pub use id_stream::parse_id_line;
#[doc(inline)]
pub use recipe_decoder::RecipeDecoder;
#[doc(inline)]
pub use token_decoder::{EXPECTED_CHARS_PER_TOKEN, TokenDecoder};
