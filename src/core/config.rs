use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassifierConfig {
    /// Memoize per-descriptor resolutions keyed by descriptor identity.
    pub enable_cache: bool,
    /// Allow composites without a profile base marker to be matched by shape.
    pub enable_structural_fallback: bool,
    pub ambiguity_policy: AmbiguityPolicy,
}

/// What to do when a descriptor's profile base markers name more than one
/// distinct base type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum AmbiguityPolicy {
    /// Keep the first marker in declaration order and log a warning.
    #[default]
    FirstWins,
    /// Fail the classification call.
    Reject,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            enable_cache: true,
            enable_structural_fallback: true,
            ambiguity_policy: AmbiguityPolicy::FirstWins,
        }
    }
}

impl ClassifierConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.enable_cache = enabled;
        self
    }

    pub fn with_structural_fallback(mut self, enabled: bool) -> Self {
        self.enable_structural_fallback = enabled;
        self
    }

    pub fn with_ambiguity_policy(mut self, policy: AmbiguityPolicy) -> Self {
        self.ambiguity_policy = policy;
        self
    }
}
