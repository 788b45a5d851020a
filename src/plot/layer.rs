//! Input types for plot layers
//!
//! This module defines the read-only data model that domain inference consumes:
//! raw values, marks, geometries, and the layers that group them. A layer pairs
//! an aesthetic mapping (which visual channels it uses) with the geometry/mark
//! tree that carries the actual values assigned to those channels.
//!
//! Domain inference never mutates these types; it only walks them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Raw Values
// =============================================================================

/// A single raw data value assigned to an aesthetic on a mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    Number(f64),
    String(String),
    Boolean(bool),
    /// Null placeholder for missing observations
    Null,
}

/// Format number for display (remove trailing zeros for integers)
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

impl RawValue {
    /// Try to extract as a number value
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Check if this is a numeric value
    pub fn is_number(&self) -> bool {
        matches!(self, RawValue::Number(_))
    }

    /// Convert to the label string used for categorical levels
    pub fn to_label(&self) -> String {
        match self {
            RawValue::String(s) => s.clone(),
            RawValue::Number(n) => format_number(*n),
            RawValue::Boolean(b) => b.to_string(),
            RawValue::Null => "null".to_string(),
        }
    }
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_label())
    }
}

// =============================================================================
// Mark Values
// =============================================================================

/// Value assigned to one aesthetic of a mark
///
/// Marks produced by statistical transforms (e.g. stacked areas, paths) can
/// carry a nested sequence of values for a single aesthetic rather than one
/// scalar. Sequences may nest arbitrarily; domain extraction flattens them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkValue {
    Scalar(RawValue),
    Sequence(Vec<MarkValue>),
}

impl MarkValue {
    /// Create a scalar mark value from a number
    pub fn number(n: f64) -> Self {
        MarkValue::Scalar(RawValue::Number(n))
    }

    /// Create a scalar mark value from a string
    pub fn string(s: impl Into<String>) -> Self {
        MarkValue::Scalar(RawValue::String(s.into()))
    }

    /// Create a nested sequence from scalar raw values
    pub fn sequence(values: impl IntoIterator<Item = RawValue>) -> Self {
        MarkValue::Sequence(values.into_iter().map(MarkValue::Scalar).collect())
    }

    /// Append every scalar reachable from this value, depth-first
    pub fn flatten_into(&self, out: &mut Vec<RawValue>) {
        match self {
            MarkValue::Scalar(v) => out.push(v.clone()),
            MarkValue::Sequence(vs) => {
                for v in vs {
                    v.flatten_into(out);
                }
            }
        }
    }
}

// =============================================================================
// Marks and Geometries
// =============================================================================

/// One rendered mark: per-aesthetic values for a single graphical element
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mark {
    /// Aesthetic name → value carried by this mark
    pub aesthetics: HashMap<String, MarkValue>,
}

impl Mark {
    /// Create a new empty Mark
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an aesthetic value, builder-style
    pub fn with_aesthetic(mut self, aesthetic: impl Into<String>, value: MarkValue) -> Self {
        self.aesthetics.insert(aesthetic.into(), value);
        self
    }

    /// Get the value for an aesthetic, if assigned
    pub fn get(&self, aesthetic: &str) -> Option<&MarkValue> {
        self.aesthetics.get(aesthetic)
    }
}

/// One geometry: a group of marks sharing a rendering strategy
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Geom {
    pub marks: Vec<Mark>,
}

impl Geom {
    /// Create a new empty Geom
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a Geom from a collection of marks
    pub fn with_marks(marks: impl IntoIterator<Item = Mark>) -> Self {
        Self {
            marks: marks.into_iter().collect(),
        }
    }
}

// =============================================================================
// Mappings and Layers
// =============================================================================

/// Aesthetic mapping for a layer (aesthetic name → source column)
///
/// The key set is what domain inference iterates over: every mapped aesthetic
/// gets exactly one domain per layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mappings {
    /// Explicit aesthetic mappings (aesthetic → column name)
    pub aesthetics: HashMap<String, String>,
}

impl Mappings {
    /// Create a new empty Mappings
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an aesthetic mapping
    pub fn insert(&mut self, aesthetic: impl Into<String>, column: impl Into<String>) {
        self.aesthetics.insert(aesthetic.into(), column.into());
    }

    /// Get the mapped column for an aesthetic
    pub fn get(&self, aesthetic: &str) -> Option<&str> {
        self.aesthetics.get(aesthetic).map(|s| s.as_str())
    }

    /// Check if an aesthetic is mapped
    pub fn contains_key(&self, aesthetic: &str) -> bool {
        self.aesthetics.contains_key(aesthetic)
    }

    /// Iterate over the mapped aesthetic names
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.aesthetics.keys().map(|s| s.as_str())
    }

    /// Check if the mappings are empty
    pub fn is_empty(&self) -> bool {
        self.aesthetics.is_empty()
    }

    /// Get the number of mapped aesthetics
    pub fn len(&self) -> usize {
        self.aesthetics.len()
    }
}

/// One data layer of a plot: an aesthetic mapping plus its geometry tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layer {
    /// Which aesthetics this layer uses, and from which columns
    pub mapping: Mappings,
    /// The geometries carrying this layer's mark data
    pub geoms: Vec<Geom>,
}

impl Layer {
    /// Create a new empty Layer
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an aesthetic mapping, builder-style
    pub fn with_mapping(mut self, aesthetic: impl Into<String>, column: impl Into<String>) -> Self {
        self.mapping.insert(aesthetic, column);
        self
    }

    /// Add a geometry, builder-style
    pub fn with_geom(mut self, geom: Geom) -> Self {
        self.geoms.push(geom);
        self
    }
}
