//! Namespaced registry keys.
//!
//! Biomes, sounds and items are named by `namespace:path` keys (e.g.
//! `minecraft:ice_plains`). Keys are ordered so registries iterate
//! deterministically.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Namespace assumed when a key omits one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Error returned when parsing an invalid [`RegistryKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryKeyError {
    /// Input was empty or whitespace.
    #[error("registry key cannot be empty")]
    Empty,
    /// Namespace was empty, too long or contained invalid characters.
    #[error("invalid registry key namespace {0:?} (allowed: a-z0-9_.-, max 64)")]
    Namespace(String),
    /// Path was empty, too long or contained invalid characters.
    #[error("invalid registry key path {0:?} (allowed: a-z0-9_./-, max 128)")]
    Path(String),
}

/// A namespaced key of the form `namespace:path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegistryKey {
    namespace: String,
    path: String,
}

impl RegistryKey {
    /// Parse `namespace:path` or bare `path` (uses [`DEFAULT_NAMESPACE`]).
    pub fn parse(input: &str) -> Result<Self, RegistryKeyError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(RegistryKeyError::Empty);
        }

        let (namespace, path) = input
            .split_once(':')
            .unwrap_or((DEFAULT_NAMESPACE, input));

        if !is_valid_segment(namespace, 64, false) {
            return Err(RegistryKeyError::Namespace(namespace.to_string()));
        }
        if !is_valid_segment(path, 128, true) {
            return Err(RegistryKeyError::Path(path.to_string()));
        }

        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Build a key in the default namespace from a known-good static path.
    pub fn vanilla(path: &'static str) -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            path: path.to_string(),
        }
    }

    /// Registry key namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Registry key path.
    pub fn path(&self) -> &str {
        &self.path
    }
}

fn is_valid_segment(segment: &str, max_len: usize, allow_slash: bool) -> bool {
    !segment.is_empty()
        && segment.len() <= max_len
        && segment.chars().all(|c| {
            matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.') || (allow_slash && c == '/')
        })
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for RegistryKey {
    type Err = RegistryKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RegistryKey {
    type Error = RegistryKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RegistryKey> for String {
    fn from(key: RegistryKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_namespaced_key() {
        let key = RegistryKey::parse("dsurround:wind").unwrap();
        assert_eq!(key.namespace(), "dsurround");
        assert_eq!(key.path(), "wind");
        assert_eq!(key.to_string(), "dsurround:wind");
    }

    #[test]
    fn bare_path_uses_default_namespace() {
        let key = RegistryKey::parse("ice_plains").unwrap();
        assert_eq!(key, RegistryKey::vanilla("ice_plains"));
        assert_eq!(key.to_string(), "minecraft:ice_plains");
    }

    #[test]
    fn rejects_empty_and_invalid() {
        assert_eq!(RegistryKey::parse("   "), Err(RegistryKeyError::Empty));
        assert!(RegistryKey::parse("minecraft:Stone").is_err());
        assert!(RegistryKey::parse("MC:stone").is_err());
        assert!(RegistryKey::parse("minecraft:").is_err());
        assert!(RegistryKey::parse(":stone").is_err());
        assert!(RegistryKey::parse("ambient/cave.drip").is_ok());
    }
}
