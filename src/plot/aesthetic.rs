//! Aesthetic registry
//!
//! Aesthetics are the visual channels of a chart (position, color, size, ...)
//! that scales must cover. The set of recognized aesthetics is owned by the
//! host charting system; domain merging iterates over it in a fixed order so
//! that plot-wide results are deterministic.
//!
//! The registry is injected rather than read from a global: hosts with custom
//! channels can extend it without touching this crate.

use serde::{Deserialize, Serialize};

/// Default recognized aesthetics, in canonical merge order
pub const DEFAULT_AESTHETICS: &[&str] = &[
    "x", "y", "color", "size", "opacity", "shape", "id", "text",
];

/// Ordered set of recognized aesthetic names
///
/// Order matters only for determinism of iteration during plot-wide merging;
/// the domains themselves are independent per aesthetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AestheticRegistry {
    names: Vec<String>,
}

impl AestheticRegistry {
    /// Create a registry from an explicit ordered name list
    ///
    /// Duplicate names are dropped, keeping the first occurrence.
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut seen = Vec::new();
        for name in names {
            let name = name.into();
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
        Self { names: seen }
    }

    /// Check whether a name is a recognized aesthetic
    pub fn contains(&self, aesthetic: &str) -> bool {
        self.names.iter().any(|n| n == aesthetic)
    }

    /// Iterate over the registered names in canonical order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|s| s.as_str())
    }

    /// Number of registered aesthetics
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for AestheticRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_AESTHETICS.iter().copied())
    }
}
