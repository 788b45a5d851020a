//! Domain types
//!
//! A domain describes the coverage a scale needs for one aesthetic: a numeric
//! range, a date range, or an ordered set of categorical levels. Domains are
//! constructed fresh per render pass and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::plot::guide::date_to_iso_string;

/// Discriminant for the three domain types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomainKind {
    #[serde(rename = "num")]
    Numeric,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "cat")]
    Categorical,
}

impl DomainKind {
    /// Short tag name, as used in the serialized form
    pub fn name(&self) -> &'static str {
        match self {
            DomainKind::Numeric => "num",
            DomainKind::Date => "date",
            DomainKind::Categorical => "cat",
        }
    }
}

impl std::fmt::Display for DomainKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The value domain of one aesthetic
///
/// Invariants: `min <= max` for the range variants; `levels` is free of
/// duplicates. The constructors used by inference and merging uphold both.
///
/// The `sorted` flag on a categorical domain records whether its level order
/// is authoritative (explicit configuration) or incidental (first-seen data
/// order); merging treats the two very differently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Domain {
    #[serde(rename = "num")]
    Numeric {
        min: f64,
        max: f64,
        bw: Option<f64>,
    },
    /// Date range, bounds in days since Unix epoch 1970-01-01
    #[serde(rename = "date")]
    Date {
        min: i32,
        max: i32,
        bw: Option<f64>,
    },
    #[serde(rename = "cat")]
    Categorical { levels: Vec<String>, sorted: bool },
}

impl Domain {
    /// The type tag of this domain
    pub fn kind(&self) -> DomainKind {
        match self {
            Domain::Numeric { .. } => DomainKind::Numeric,
            Domain::Date { .. } => DomainKind::Date,
            Domain::Categorical { .. } => DomainKind::Categorical,
        }
    }

    /// Bin width, if this is a range domain with one set
    pub fn bw(&self) -> Option<f64> {
        match self {
            Domain::Numeric { bw, .. } | Domain::Date { bw, .. } => *bw,
            Domain::Categorical { .. } => None,
        }
    }

    /// Categorical levels, if this is a categorical domain
    pub fn levels(&self) -> Option<&[String]> {
        match self {
            Domain::Categorical { levels, .. } => Some(levels),
            _ => None,
        }
    }

    /// Whether a categorical domain carries an authoritative ordering
    pub fn is_sorted(&self) -> bool {
        matches!(self, Domain::Categorical { sorted: true, .. })
    }

    /// Serialize to the JSON object form consumed by the rendering collaborator
    ///
    /// Range bounds come out as numbers for numeric domains and ISO date
    /// strings for date domains.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Domain::Numeric { min, max, bw } => serde_json::json!({
                "type": "num",
                "min": min,
                "max": max,
                "bw": bw,
            }),
            Domain::Date { min, max, bw } => serde_json::json!({
                "type": "date",
                "min": date_to_iso_string(*min),
                "max": date_to_iso_string(*max),
                "bw": bw,
            }),
            Domain::Categorical { levels, sorted } => serde_json::json!({
                "type": "cat",
                "levels": levels,
                "sorted": sorted,
            }),
        }
    }
}

/// Mapping from aesthetic name to its domain
///
/// One entry per aesthetic that contributed data or configuration; aesthetics
/// nothing contributed to are simply absent.
pub type DomainSet = HashMap<String, Domain>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(DomainKind::Numeric.name(), "num");
        assert_eq!(DomainKind::Date.name(), "date");
        assert_eq!(DomainKind::Categorical.name(), "cat");
    }

    #[test]
    fn test_numeric_to_json() {
        let domain = Domain::Numeric {
            min: 1.0,
            max: 9.0,
            bw: Some(2.0),
        };
        assert_eq!(
            domain.to_json(),
            serde_json::json!({"type": "num", "min": 1.0, "max": 9.0, "bw": 2.0})
        );
    }

    #[test]
    fn test_numeric_to_json_null_bw() {
        let domain = Domain::Numeric {
            min: 0.0,
            max: 1.0,
            bw: None,
        };
        assert_eq!(domain.to_json()["bw"], serde_json::Value::Null);
    }

    #[test]
    fn test_date_to_json_iso_bounds() {
        let domain = Domain::Date {
            min: 0,
            max: 1,
            bw: None,
        };
        let json = domain.to_json();
        assert_eq!(json["type"], "date");
        assert_eq!(json["min"], "1970-01-01");
        assert_eq!(json["max"], "1970-01-02");
    }

    #[test]
    fn test_categorical_to_json() {
        let domain = Domain::Categorical {
            levels: vec!["a".to_string(), "b".to_string()],
            sorted: true,
        };
        assert_eq!(
            domain.to_json(),
            serde_json::json!({"type": "cat", "levels": ["a", "b"], "sorted": true})
        );
    }

    #[test]
    fn test_serde_tagged_form() {
        let domain = Domain::Numeric {
            min: 0.0,
            max: 5.0,
            bw: None,
        };
        let json = serde_json::to_value(&domain).unwrap();
        assert_eq!(json["type"], "num");
        let back: Domain = serde_json::from_value(json).unwrap();
        assert_eq!(back, domain);
    }

    #[test]
    fn test_accessors() {
        let cat = Domain::Categorical {
            levels: vec!["a".to_string()],
            sorted: false,
        };
        assert_eq!(cat.kind(), DomainKind::Categorical);
        assert_eq!(cat.levels(), Some(&["a".to_string()][..]));
        assert!(!cat.is_sorted());
        assert_eq!(cat.bw(), None);

        let num = Domain::Numeric {
            min: 0.0,
            max: 1.0,
            bw: Some(0.5),
        };
        assert_eq!(num.bw(), Some(0.5));
        assert_eq!(num.levels(), None);
    }
}
