//! # Model Load Options

use crate::types::TokenId;

/// How the word-start marker (`space_id`) is chosen while loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpaceMarkerPolicy {
    /// The smallest character id across the whole vocabulary.
    ///
    /// This only finds `'▁'` when it has the smallest id. With the characters
    /// `{'a': 1, 'b': 2, '▁': 3}` and the rule `(3, 1) -> 4`, the marker is
    /// `'a'`, so `[4, 2]` decodes to `"▁ab"` instead of `"ab"`; use
    /// [`SpaceMarkerPolicy::Glyph`] with `'▁'` for such vocabularies.
    #[default]
    MinimumId,

    /// The smallest character id, with `0` doubling as "not yet seen".
    ///
    /// Compatible with models written by older tooling. A zero id is never
    /// kept as the minimum: the character read after it always replaces it.
    LegacyZeroSentinel,

    /// The id of the given character, e.g. `'▁'`.
    ///
    /// The model has no marker if the character is not in the vocabulary.
    Glyph(char),
}

/// Options for loading a [`super::BpeModel`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelLoadOptions {
    /// Word-start marker selection.
    pub space_marker: SpaceMarkerPolicy,
}

impl ModelLoadOptions {
    /// Create the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the space marker policy.
    pub fn with_space_marker(
        mut self,
        space_marker: SpaceMarkerPolicy,
    ) -> Self {
        self.space_marker = space_marker;
        self
    }
}

/// Incremental `space_id` selection, fed one character at a time.
#[derive(Debug, Clone)]
pub(crate) struct SpaceMarkerTracker {
    policy: SpaceMarkerPolicy,
    current: Option<TokenId>,
    legacy_min: TokenId,
}

impl SpaceMarkerTracker {
    pub(crate) fn new(policy: SpaceMarkerPolicy) -> Self {
        Self {
            policy,
            current: None,
            legacy_min: 0,
        }
    }

    pub(crate) fn observe(
        &mut self,
        ch: char,
        id: TokenId,
    ) {
        match self.policy {
            SpaceMarkerPolicy::MinimumId => {
                if self.current.is_none_or(|min| id < min) {
                    self.current = Some(id);
                }
            }
            SpaceMarkerPolicy::LegacyZeroSentinel => {
                if id < self.legacy_min || self.legacy_min == 0 {
                    self.legacy_min = id;
                    self.current = Some(id);
                }
            }
            SpaceMarkerPolicy::Glyph(marker) => {
                if ch == marker {
                    self.current = Some(id);
                }
            }
        }
    }

    /// The selected marker, warning when a configured glyph never appeared.
    pub(crate) fn finish(&self) -> Option<TokenId> {
        if let (SpaceMarkerPolicy::Glyph(glyph), None) = (self.policy, self.current) {
            log::warn!("space marker glyph {glyph:?} is not in the vocabulary");
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(
        policy: SpaceMarkerPolicy,
        chars: &[(char, TokenId)],
    ) -> Option<TokenId> {
        let mut tracker = SpaceMarkerTracker::new(policy);
        for &(ch, id) in chars {
            tracker.observe(ch, id);
        }
        tracker.finish()
    }

    #[test]
    fn test_minimum_id() {
        let policy = SpaceMarkerPolicy::MinimumId;
        assert_eq!(track(policy, &[]), None);
        assert_eq!(track(policy, &[('a', 5), ('b', 2), ('c', 7)]), Some(2));
        assert_eq!(track(policy, &[('▁', 0), ('a', 5), ('b', 2)]), Some(0));
        assert_eq!(track(policy, &[('a', 5), ('▁', 0), ('b', 2)]), Some(0));
    }

    #[test]
    fn test_legacy_zero_sentinel() {
        let policy = SpaceMarkerPolicy::LegacyZeroSentinel;
        assert_eq!(track(policy, &[('a', 5), ('b', 2), ('c', 7)]), Some(2));

        // A zero id reads as "unset", so the next id replaces it.
        assert_eq!(track(policy, &[('▁', 0), ('a', 5), ('b', 2)]), Some(2));
        assert_eq!(track(policy, &[('▁', 0), ('a', 2), ('b', 5)]), Some(2));
        assert_eq!(track(policy, &[('▁', 0)]), Some(0));

        // A later zero is still a minimum, then gets overwritten.
        assert_eq!(track(policy, &[('a', 5), ('▁', 0), ('b', 9)]), Some(9));
    }

    #[test]
    fn test_glyph() {
        let policy = SpaceMarkerPolicy::Glyph('▁');
        assert_eq!(track(policy, &[('a', 1), ('b', 2), ('▁', 3)]), Some(3));
        assert_eq!(track(policy, &[('a', 1), ('b', 2)]), None);
    }

    #[test]
    fn test_options_builder() {
        let options = ModelLoadOptions::new().with_space_marker(SpaceMarkerPolicy::Glyph('▁'));
        assert_eq!(options.space_marker, SpaceMarkerPolicy::Glyph('▁'));
        assert_eq!(ModelLoadOptions::default().space_marker, SpaceMarkerPolicy::MinimumId);
    }
}
