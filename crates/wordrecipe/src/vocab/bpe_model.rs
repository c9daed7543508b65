//! # BPE Model
//!
//! The immutable vocabulary model: characters, merge rules, their expanded
//! recipes, special tokens, and the word-start marker.

use crate::errors::{WRError, WRResult};
use crate::types::{TokenId, WRHashMap};
use crate::vocab::char_vocab::CharVocab;
use crate::vocab::load_options::{ModelLoadOptions, SpaceMarkerTracker};
use crate::vocab::merge_rule::MergeRule;
use crate::vocab::recipe_table::RecipeTable;
use crate::vocab::special_tokens::SpecialTokens;

/// A loaded BPE vocabulary model.
///
/// Built once by [`BpeModelBuilder`] (or the binary loader), and read-only
/// afterward. Share it across readers as an `Arc<BpeModel>`.
#[derive(Debug, Clone)]
pub struct BpeModel {
    chars: CharVocab,
    char_records: Vec<(u32, TokenId)>,
    rules: Vec<MergeRule>,
    recipes: RecipeTable,
    spellings: WRHashMap<String, TokenId>,
    specials: SpecialTokens,
    space_id: Option<TokenId>,
}

impl BpeModel {
    /// Start building a model.
    pub fn builder(options: ModelLoadOptions) -> BpeModelBuilder {
        BpeModelBuilder::new(options)
    }

    /// The character vocabulary.
    pub fn char_vocab(&self) -> &CharVocab {
        &self.chars
    }

    /// The `(scalar value, id)` character records, in load order.
    ///
    /// Scalar values are kept as read, including invalid ones and
    /// duplicates; [`BpeModel::char_vocab`] holds the resolved view.
    pub fn char_records(&self) -> &[(u32, TokenId)] {
        &self.char_records
    }

    /// The merge rules, in load order.
    pub fn rules(&self) -> &[MergeRule] {
        &self.rules
    }

    /// The recipe table.
    pub fn recipe_table(&self) -> &RecipeTable {
        &self.recipes
    }

    /// The base character ids `id` expands to.
    pub fn recipe(
        &self,
        id: TokenId,
    ) -> Option<&[TokenId]> {
        self.recipes.get(id)
    }

    /// Look up a token id by its spelled-out text.
    ///
    /// Reverse of [`BpeModel::spell`]; not used by decoding.
    pub fn lookup_spelling(
        &self,
        text: &str,
    ) -> Option<TokenId> {
        self.spellings.get(text).copied()
    }

    /// The number of indexed spellings.
    pub fn spelling_count(&self) -> usize {
        self.spellings.len()
    }

    /// The special token ids.
    pub fn special_tokens(&self) -> &SpecialTokens {
        &self.specials
    }

    /// The word-start marker id, if the model has one.
    pub fn space_id(&self) -> Option<TokenId> {
        self.space_id
    }

    /// Spell out the full recipe of `id`, marker glyph included.
    ///
    /// ## Returns
    /// * `Ok(None)` if `id` has no recipe,
    /// * `Err(WRError::MissingCharacter)` if the recipe has an unknown base id.
    pub fn spell(
        &self,
        id: TokenId,
    ) -> WRResult<Option<String>> {
        match self.recipe(id) {
            None => Ok(None),
            Some(recipe) => self
                .chars
                .spell(recipe)
                .map(Some)
                .map_err(|token| WRError::MissingCharacter { token }),
        }
    }
}

/// Incremental builder for a [`BpeModel`].
///
/// Characters must be added before the rules that use them, and each rule
/// before any rule that cites its result.
#[derive(Debug, Clone)]
pub struct BpeModelBuilder {
    chars: CharVocab,
    char_records: Vec<(u32, TokenId)>,
    rules: Vec<MergeRule>,
    recipes: RecipeTable,
    spellings: WRHashMap<String, TokenId>,
    specials: SpecialTokens,
    space_marker: SpaceMarkerTracker,
}

impl BpeModelBuilder {
    /// Create an empty builder.
    pub fn new(options: ModelLoadOptions) -> Self {
        Self {
            chars: CharVocab::new(),
            char_records: Vec::new(),
            rules: Vec::new(),
            recipes: RecipeTable::new(),
            spellings: WRHashMap::default(),
            specials: SpecialTokens::default(),
            space_marker: SpaceMarkerTracker::new(options.space_marker),
        }
    }

    /// Reserve room for `chars` characters and `rules` rules.
    pub fn reserve(
        &mut self,
        chars: usize,
        rules: usize,
    ) {
        self.char_records.reserve(chars);
        self.rules.reserve(rules);
        self.spellings.reserve(chars + rules);
    }

    /// Add a base character.
    pub fn add_char(
        &mut self,
        ch: char,
        id: TokenId,
    ) -> &mut Self {
        self.char_records.push((u32::from(ch), id));
        self.insert_char(ch, id)
    }

    /// Add a base character from its raw scalar value.
    ///
    /// A value that is not a Unicode scalar value resolves to U+FFFD; the raw
    /// value is still kept in [`BpeModel::char_records`].
    pub fn add_char_value(
        &mut self,
        value: u32,
        id: TokenId,
    ) -> &mut Self {
        let ch = char::from_u32(value).unwrap_or_else(|| {
            log::warn!("invalid unicode scalar value {value:#x}; using U+FFFD");
            char::REPLACEMENT_CHARACTER
        });
        self.char_records.push((value, id));
        self.insert_char(ch, id)
    }

    fn insert_char(
        &mut self,
        ch: char,
        id: TokenId,
    ) -> &mut Self {
        self.chars.insert(ch, id);
        self.recipes.insert_base(id);
        self.spellings.insert(ch.to_string(), id);
        self.space_marker.observe(ch, id);
        self
    }

    /// Add a merge rule.
    ///
    /// ## Errors
    /// * [`WRError::UnresolvedReference`] if `left` or `right` has no recipe yet.
    /// * [`WRError::UnresolvedCharacter`] if the merged recipe cannot be spelled.
    pub fn add_rule<R: Into<MergeRule>>(
        &mut self,
        rule: R,
    ) -> WRResult<&mut Self> {
        let rule = rule.into();
        let index = self.rules.len();

        let recipe = self
            .recipes
            .insert_merge(rule.left, rule.right, rule.result)
            .map_err(|token| {
                log::error!("merge rule #{index}: token id {token} not described before");
                WRError::UnresolvedReference { rule: index, token }
            })?;

        let spelling = self.chars.spell(recipe).map_err(|token| {
            log::error!("merge rule #{index}: base id {token} has no character");
            WRError::UnresolvedCharacter { token }
        })?;

        self.spellings.insert(spelling, rule.result);
        self.rules.push(rule);
        Ok(self)
    }

    /// Assign `id` an arbitrary recipe, bypassing the rule checks.
    #[cfg(test)]
    pub(crate) fn insert_recipe(
        &mut self,
        id: TokenId,
        recipe: &[TokenId],
    ) -> &mut Self {
        self.recipes.insert_recipe(id, recipe);
        self
    }

    /// Set the special tokens.
    pub fn with_special_tokens(
        &mut self,
        specials: SpecialTokens,
    ) -> &mut Self {
        self.specials = specials;
        self
    }

    /// Finish the model.
    pub fn build(self) -> BpeModel {
        BpeModel {
            space_id: self.space_marker.finish(),
            chars: self.chars,
            char_records: self.char_records,
            rules: self.rules,
            recipes: self.recipes,
            spellings: self.spellings,
            specials: self.specials,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::load_options::SpaceMarkerPolicy;

    fn example_builder() -> BpeModelBuilder {
        let mut builder = BpeModel::builder(
            ModelLoadOptions::default().with_space_marker(SpaceMarkerPolicy::Glyph('▁')),
        );
        builder.add_char('a', 1).add_char('b', 2).add_char('▁', 3);
        builder
    }

    #[test]
    fn test_build_example() {
        let mut builder = example_builder();
        builder.add_rule((3, 1, 4)).unwrap();
        builder.add_rule((4, 2, 5)).unwrap();
        let model = builder.build();

        assert_eq!(model.space_id(), Some(3));
        assert_eq!(model.char_vocab().len(), 3);
        assert_eq!(model.rules(), &[MergeRule::new(3, 1, 4), MergeRule::new(4, 2, 5)]);
        assert_eq!(model.recipe(1), Some([1].as_slice()));
        assert_eq!(model.recipe(5), Some([3, 1, 2].as_slice()));
        assert_eq!(model.recipe_table().len(), 5);

        assert_eq!(model.spell(4).unwrap().as_deref(), Some("▁a"));
        assert_eq!(model.spell(9).unwrap(), None);

        assert_eq!(model.lookup_spelling("▁ab"), Some(5));
        assert_eq!(model.lookup_spelling("a"), Some(1));
        assert_eq!(model.lookup_spelling("ab"), None);
        assert_eq!(model.spelling_count(), 5);
    }

    #[test]
    fn test_forward_reference_rejected() {
        let mut builder = example_builder();
        let err = builder.add_rule((5, 2, 6)).unwrap_err();
        assert!(matches!(
            err,
            WRError::UnresolvedReference { rule: 0, token: 5 }
        ));

        builder.add_rule((3, 1, 4)).unwrap();
        let err = builder.add_rule((4, 7, 8)).unwrap_err();
        assert!(matches!(
            err,
            WRError::UnresolvedReference { rule: 1, token: 7 }
        ));
    }

    #[test]
    fn test_unspellable_recipes() {
        let mut builder = example_builder();
        builder.insert_recipe(7, &[3, 9]);

        let err = builder.add_rule((1, 7, 8)).unwrap_err();
        assert!(matches!(err, WRError::UnresolvedCharacter { token: 9 }));
        assert!(builder.rules.is_empty());
        assert_eq!(builder.spellings.get("a▁"), None);

        let model = builder.build();
        assert!(matches!(
            model.spell(7),
            Err(WRError::MissingCharacter { token: 9 })
        ));
    }

    #[test]
    fn test_char_records() {
        let mut builder = BpeModel::builder(ModelLoadOptions::default());
        builder
            .add_char('a', 1)
            .add_char_value(0xD800, 2)
            .add_char('a', 3);
        let model = builder.build();

        assert_eq!(model.char_records(), &[('a' as u32, 1), (0xD800, 2), ('a' as u32, 3)]);
        assert_eq!(model.char_vocab().lookup_char(2), Some(char::REPLACEMENT_CHARACTER));
        assert_eq!(model.char_vocab().lookup_id('a'), Some(3));
        assert_eq!(model.char_vocab().len(), 3);
    }

    #[test]
    fn test_default_space_marker_is_minimum() {
        let mut builder = BpeModel::builder(ModelLoadOptions::default());
        builder.add_char('a', 1).add_char('b', 2).add_char('▁', 3);
        assert_eq!(builder.build().space_id(), Some(1));

        assert_eq!(BpeModel::builder(ModelLoadOptions::default()).build().space_id(), None);
    }

    #[test]
    fn test_special_tokens() {
        let mut builder = example_builder();
        builder.with_special_tokens(SpecialTokens {
            bos: Some(100),
            ..Default::default()
        });
        let model = builder.build();
        assert_eq!(model.special_tokens().bos, Some(100));
        assert_eq!(model.special_tokens().unk, None);
    }
}
