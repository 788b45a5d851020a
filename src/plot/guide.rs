//! Guide specification types
//!
//! A guide specification carries user-supplied overrides for one or more
//! aesthetics' domains. Every field of an override is optional: a present
//! field takes precedence over the value inferred from data, an absent field
//! falls back to inference. In strict mode the overrides are the only source
//! of domain information.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::domain::DomainKind;

/// Days from CE to Unix epoch (1970-01-01)
const UNIX_EPOCH_CE_DAYS: i32 = 719163;

/// Convert days-since-epoch to ISO date string
pub(crate) fn date_to_iso_string(days: i32) -> String {
    NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_CE_DAYS)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| days.to_string())
}

// =============================================================================
// Override Bound Values
// =============================================================================

/// A domain bound supplied by a guide specification
///
/// Either a plain number or a date (days since Unix epoch 1970-01-01). Dates
/// are never inferred from data, so this is the only way they enter a domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DomainValue {
    Number(f64),
    /// Date value (days since Unix epoch 1970-01-01)
    Date(i32),
}

impl DomainValue {
    /// Parse ISO date string "YYYY-MM-DD" to a Date value
    pub fn from_date_string(s: &str) -> Option<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .map(|d| Self::Date(d.num_days_from_ce() - UNIX_EPOCH_CE_DAYS))
    }

    /// Try to extract as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to extract as days-since-epoch
    pub fn as_date(&self) -> Option<i32> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl std::fmt::Display for DomainValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Date(d) => write!(f, "{}", date_to_iso_string(*d)),
        }
    }
}

// =============================================================================
// Per-Aesthetic Overrides
// =============================================================================

/// Domain overrides for one aesthetic
///
/// Absent fields are distinct from explicit values: `bw: None` means "infer",
/// while `bw: Some(...)` pins the bin width. In strict mode the override must
/// fully describe the domain, including `domain_type`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DomainOverride {
    /// Domain type, required in strict mode
    pub domain_type: Option<DomainKind>,
    /// Lower bound override for numeric/date domains
    pub min: Option<DomainValue>,
    /// Upper bound override for numeric/date domains
    pub max: Option<DomainValue>,
    /// Bin width override for numeric/date domains
    pub bw: Option<f64>,
    /// Level list override for categorical domains; supplying this marks the
    /// resulting domain's ordering as authoritative
    pub levels: Option<Vec<String>>,
}

impl DomainOverride {
    /// Create a new empty override (everything falls back to inference)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the domain type, builder-style
    pub fn with_type(mut self, kind: DomainKind) -> Self {
        self.domain_type = Some(kind);
        self
    }

    /// Set the lower bound, builder-style
    pub fn with_min(mut self, min: DomainValue) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the upper bound, builder-style
    pub fn with_max(mut self, max: DomainValue) -> Self {
        self.max = Some(max);
        self
    }

    /// Set the bin width, builder-style
    pub fn with_bw(mut self, bw: f64) -> Self {
        self.bw = Some(bw);
        self
    }

    /// Set the level list, builder-style
    pub fn with_levels(mut self, levels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.levels = Some(levels.into_iter().map(Into::into).collect());
        self
    }
}

// =============================================================================
// Guide Specification
// =============================================================================

/// Guide specification: per-aesthetic domain overrides
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GuideSpec {
    /// Aesthetic name → override record
    pub overrides: HashMap<String, DomainOverride>,
}

impl GuideSpec {
    /// Create a new empty guide specification
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the override for an aesthetic, builder-style
    pub fn with_override(mut self, aesthetic: impl Into<String>, over: DomainOverride) -> Self {
        self.overrides.insert(aesthetic.into(), over);
        self
    }

    /// Get the override for an aesthetic, if present
    pub fn get(&self, aesthetic: &str) -> Option<&DomainOverride> {
        self.overrides.get(aesthetic)
    }

    /// Check if an aesthetic has an override
    pub fn contains_key(&self, aesthetic: &str) -> bool {
        self.overrides.contains_key(aesthetic)
    }
}
