//! # Character Vocabulary ``{ char <-> TokenId }``

use crate::types::{TokenId, WRHashMap};

/// Bidirectional mapping between base characters and their token ids.
///
/// Inserts are last-write-wins in each direction; the loader does not
/// reject duplicate characters or ids.
#[derive(Debug, Clone, Default)]
pub struct CharVocab {
    char_to_id: WRHashMap<char, TokenId>,
    id_to_char: WRHashMap<TokenId, char>,
}

impl CharVocab {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a `char <-> id` pair.
    pub fn insert(
        &mut self,
        ch: char,
        id: TokenId,
    ) {
        self.char_to_id.insert(ch, id);
        self.id_to_char.insert(id, ch);
    }

    /// The number of distinct base ids.
    pub fn len(&self) -> usize {
        self.id_to_char.len()
    }

    /// Is the vocabulary empty?
    pub fn is_empty(&self) -> bool {
        self.id_to_char.is_empty()
    }

    /// Look up the id of a character.
    pub fn lookup_id(
        &self,
        ch: char,
    ) -> Option<TokenId> {
        self.char_to_id.get(&ch).copied()
    }

    /// Look up the character of a base id.
    pub fn lookup_char(
        &self,
        id: TokenId,
    ) -> Option<char> {
        self.id_to_char.get(&id).copied()
    }

    /// Iterate `(id, char)` pairs in ascending id order.
    pub fn iter_sorted(&self) -> impl Iterator<Item = (TokenId, char)> + '_ {
        let mut pairs: Vec<(TokenId, char)> =
            self.id_to_char.iter().map(|(&id, &ch)| (id, ch)).collect();
        pairs.sort_unstable_by_key(|&(id, _)| id);
        pairs.into_iter()
    }

    /// Spell a sequence of base ids as a string.
    ///
    /// ## Returns
    /// * `Ok(String)` when every id has a character,
    /// * `Err(id)` with the first id that does not.
    pub fn spell(
        &self,
        ids: &[TokenId],
    ) -> Result<String, TokenId> {
        let mut word = String::with_capacity(ids.len());
        for &id in ids {
            match self.id_to_char.get(&id) {
                Some(&ch) => word.push(ch),
                None => return Err(id),
            }
        }
        Ok(word)
    }
}
