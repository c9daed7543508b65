//! # Recipe Table ``{ TokenId -> [TokenId] }``

use crate::types::{Recipe, TokenId, WRHashMap};

/// Maps every known token id to the base character ids it expands to.
///
/// Entries are only ever assigned whole; an existing recipe is never edited
/// in place. Reassigning an id replaces its recipe (last write wins).
#[derive(Debug, Clone, Default)]
pub struct RecipeTable {
    recipes: WRHashMap<TokenId, Recipe>,
}

impl RecipeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a base character id with its single-element recipe.
    pub fn insert_base(
        &mut self,
        id: TokenId,
    ) {
        self.recipes.insert(id, Box::new([id]));
    }

    /// Assign `result` the concatenation of the `left` and `right` recipes.
    ///
    /// ## Returns
    /// * `Ok(&Recipe)` - the new recipe for `result`,
    /// * `Err(id)` - the first operand with no recipe.
    pub fn insert_merge(
        &mut self,
        left: TokenId,
        right: TokenId,
        result: TokenId,
    ) -> Result<&Recipe, TokenId> {
        let lhs = self.recipes.get(&left).ok_or(left)?;
        let rhs = self.recipes.get(&right).ok_or(right)?;

        let mut buf = Vec::with_capacity(lhs.len() + rhs.len());
        buf.extend_from_slice(lhs);
        buf.extend_from_slice(rhs);

        self.recipes.insert(result, buf.into_boxed_slice());
        Ok(&self.recipes[&result])
    }

    /// Assign `id` an arbitrary recipe, bypassing the merge checks.
    #[cfg(test)]
    pub(crate) fn insert_recipe(
        &mut self,
        id: TokenId,
        recipe: &[TokenId],
    ) {
        self.recipes.insert(id, recipe.into());
    }

    /// Look up the recipe of `id`.
    pub fn get(
        &self,
        id: TokenId,
    ) -> Option<&[TokenId]> {
        self.recipes.get(&id).map(|r| r.as_ref())
    }

    /// Does `id` have a recipe?
    pub fn contains(
        &self,
        id: TokenId,
    ) -> bool {
        self.recipes.contains_key(&id)
    }

    /// The number of recipes.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
