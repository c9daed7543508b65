//! # Common Types

/// A subword token identifier.
///
/// Names either a base character or a merged subword unit.
pub type TokenId = u32;

/// The ordered base character ids a token expands to.
pub type Recipe = Box<[TokenId]>;

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Hash map used throughout the crate.
        pub type WRHashMap<K, V> = ahash::AHashMap<K, V>;
    } else {
        /// Hash map used throughout the crate.
        pub type WRHashMap<K, V> = std::collections::HashMap<K, V>;
    }
}
