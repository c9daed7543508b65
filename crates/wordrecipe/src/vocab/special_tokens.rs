//! # Special Tokens
//!
//! Four optional reserved ids. They may sit outside the recipe table;
//! decoding consults them only when a recipe lookup misses.

use crate::errors::{WRError, WRResult};
use crate::types::TokenId;

/// Surface string of the unknown token.
pub const UNK_TOKEN: &str = "<UNK>";

/// Surface string of the padding token.
pub const PAD_TOKEN: &str = "<PAD>";

/// Surface string of the begin-of-sequence token.
pub const BOS_TOKEN: &str = "<BOS>";

/// Surface string of the end-of-sequence token.
pub const EOS_TOKEN: &str = "<EOS>";

/// Wire value of an unset special token.
pub const UNSET_SPECIAL: i32 = -1;

/// The special token ids of a model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecialTokens {
    /// Unknown token id.
    pub unk: Option<TokenId>,

    /// Padding token id.
    pub pad: Option<TokenId>,

    /// Begin-of-sequence token id.
    pub bos: Option<TokenId>,

    /// End-of-sequence token id.
    pub eos: Option<TokenId>,
}

fn decode_special(value: i32) -> Option<TokenId> {
    TokenId::try_from(value).ok()
}

fn encode_special(
    role: &'static str,
    id: Option<TokenId>,
) -> WRResult<i32> {
    match id {
        None => Ok(UNSET_SPECIAL),
        Some(value) => i32::try_from(value).map_err(|_| WRError::InvalidSpecialToken { role, value }),
    }
}

impl SpecialTokens {
    /// Build from the signed wire values, in `unk, pad, bos, eos` order.
    ///
    /// Any negative value means "unset".
    pub fn from_wire(values: [i32; 4]) -> Self {
        let [unk, pad, bos, eos] = values;
        Self {
            unk: decode_special(unk),
            pad: decode_special(pad),
            bos: decode_special(bos),
            eos: decode_special(eos),
        }
    }

    /// Convert to the signed wire values, in `unk, pad, bos, eos` order.
    pub fn to_wire(&self) -> WRResult<[i32; 4]> {
        Ok([
            encode_special("unk", self.unk)?,
            encode_special("pad", self.pad)?,
            encode_special("bos", self.bos)?,
            encode_special("eos", self.eos)?,
        ])
    }

    /// Find the surface string for `id`, checking `unk, pad, bos, eos` in order.
    pub fn surface(
        &self,
        id: TokenId,
    ) -> Option<&'static str> {
        [
            (self.unk, UNK_TOKEN),
            (self.pad, PAD_TOKEN),
            (self.bos, BOS_TOKEN),
            (self.eos, EOS_TOKEN),
        ]
        .into_iter()
        .find_map(|(special, surface)| (special == Some(id)).then_some(surface))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_conversion() {
        let specials = SpecialTokens::from_wire([0, -1, 2, 3]);
        assert_eq!(
            specials,
            SpecialTokens {
                unk: Some(0),
                pad: None,
                bos: Some(2),
                eos: Some(3),
            }
        );
        assert_eq!(specials.to_wire().unwrap(), [0, -1, 2, 3]);

        assert_eq!(SpecialTokens::from_wire([-7; 4]), SpecialTokens::default());
    }

    #[test]
    fn test_unrepresentable_special() {
        let specials = SpecialTokens {
            bos: Some(u32::MAX),
            ..Default::default()
        };
        assert!(matches!(
            specials.to_wire(),
            Err(WRError::InvalidSpecialToken { role: "bos", .. })
        ));
    }

    #[test]
    fn test_surface_order() {
        let specials = SpecialTokens {
            unk: Some(100),
            pad: Some(101),
            bos: Some(100),
            eos: Some(103),
        };
        assert_eq!(specials.surface(100), Some(UNK_TOKEN));
        assert_eq!(specials.surface(101), Some(PAD_TOKEN));
        assert_eq!(specials.surface(103), Some(EOS_TOKEN));
        assert_eq!(specials.surface(104), None);
    }
}
