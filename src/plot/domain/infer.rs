//! Per-layer domain inference
//!
//! For one layer, build a domain for every aesthetic the layer maps: pull the
//! raw values out of the geometry/mark tree, classify them as numeric or
//! categorical, and fold in any guide-spec overrides. In strict mode the data
//! is never consulted and the guide specification must fully describe every
//! mapped aesthetic.

use crate::plot::guide::{DomainOverride, DomainValue, GuideSpec};
use crate::plot::layer::{Geom, Layer, RawValue};
use crate::{PolyplotError, Result};

use super::types::{Domain, DomainKind, DomainSet};

/// Extract the flat sequence of raw values assigned to one aesthetic across
/// every mark of every geometry in a layer.
///
/// Nested sequences on a mark are flattened recursively. Pure; an empty
/// geometry list yields an empty result.
pub fn flatten_geoms(geoms: &[Geom], aesthetic: &str) -> Vec<RawValue> {
    let mut values = Vec::new();
    for geom in geoms {
        for mark in &geom.marks {
            if let Some(value) = mark.get(aesthetic) {
                value.flatten_into(&mut values);
            }
        }
    }
    values
}

/// Classify a flat value sequence as numeric or categorical.
///
/// Numeric iff the sequence is non-empty and every value is a number. An
/// empty sequence means "no data observed" and degenerates to categorical;
/// callers treat that as an empty level set, never as a failure. Dates are
/// never produced here: date domains only enter via explicit guide overrides.
pub fn classify(values: &[RawValue]) -> DomainKind {
    if !values.is_empty() && values.iter().all(RawValue::is_number) {
        DomainKind::Numeric
    } else {
        DomainKind::Categorical
    }
}

/// Build the domain set for one layer.
///
/// Covers exactly the aesthetics in the layer's mapping. With `strict` set,
/// domains come exclusively from the guide specification; otherwise they are
/// inferred from the layer's data with per-field guide overrides applied.
pub fn layer_domains(layer: &Layer, guide: Option<&GuideSpec>, strict: bool) -> Result<DomainSet> {
    let mut domains = DomainSet::new();
    for aesthetic in layer.mapping.keys() {
        let over = guide.and_then(|g| g.get(aesthetic));
        let domain = if strict {
            strict_domain(aesthetic, over)?
        } else {
            inferred_domain(layer, aesthetic, over)?
        };
        domains.insert(aesthetic.to_string(), domain);
    }
    Ok(domains)
}

fn missing_field(aesthetic: &str, field: &str) -> PolyplotError {
    PolyplotError::MissingOverride(format!(
        "guide entry for aesthetic '{}' lacks required field '{}'",
        aesthetic, field
    ))
}

/// Build a domain from the guide specification alone (strict mode).
fn strict_domain(aesthetic: &str, over: Option<&DomainOverride>) -> Result<Domain> {
    let over = over.ok_or_else(|| {
        PolyplotError::MissingOverride(format!(
            "strict mode requires a guide entry for aesthetic '{}'",
            aesthetic
        ))
    })?;
    let kind = over
        .domain_type
        .ok_or_else(|| missing_field(aesthetic, "type"))?;

    match kind {
        DomainKind::Numeric => {
            let min = over
                .min
                .and_then(|v| v.as_number())
                .ok_or_else(|| missing_field(aesthetic, "min"))?;
            let max = over
                .max
                .and_then(|v| v.as_number())
                .ok_or_else(|| missing_field(aesthetic, "max"))?;
            Ok(Domain::Numeric {
                min,
                max,
                bw: over.bw,
            })
        }
        DomainKind::Date => {
            let min = over
                .min
                .and_then(|v| v.as_date())
                .ok_or_else(|| missing_field(aesthetic, "min"))?;
            let max = over
                .max
                .and_then(|v| v.as_date())
                .ok_or_else(|| missing_field(aesthetic, "max"))?;
            Ok(Domain::Date {
                min,
                max,
                bw: over.bw,
            })
        }
        DomainKind::Categorical => {
            let levels = over
                .levels
                .clone()
                .ok_or_else(|| missing_field(aesthetic, "levels"))?;
            // Explicit configuration is an authoritative ordering
            Ok(Domain::Categorical {
                levels,
                sorted: true,
            })
        }
    }
}

/// Build a domain from layer data, with per-field guide overrides applied.
fn inferred_domain(
    layer: &Layer,
    aesthetic: &str,
    over: Option<&DomainOverride>,
) -> Result<Domain> {
    // A declared date override is the only non-strict path to a date domain;
    // classification never produces one.
    if let Some(over) = over {
        if over.domain_type == Some(DomainKind::Date) {
            let min = over
                .min
                .and_then(|v| v.as_date())
                .ok_or_else(|| missing_field(aesthetic, "min"))?;
            let max = over
                .max
                .and_then(|v| v.as_date())
                .ok_or_else(|| missing_field(aesthetic, "max"))?;
            return Ok(Domain::Date {
                min,
                max,
                bw: over.bw,
            });
        }
    }

    let values = flatten_geoms(&layer.geoms, aesthetic);
    if classify(&values) == DomainKind::Numeric {
        let min = match over.and_then(|o| o.min) {
            Some(v) => numeric_bound(aesthetic, "min", v)?,
            None => data_min(&values),
        };
        let max = match over.and_then(|o| o.max) {
            Some(v) => numeric_bound(aesthetic, "max", v)?,
            None => data_max(&values),
        };
        Ok(Domain::Numeric {
            min,
            max,
            bw: over.and_then(|o| o.bw),
        })
    } else {
        let override_levels = over.and_then(|o| o.levels.clone());
        let sorted = override_levels.is_some();
        let levels = override_levels.unwrap_or_else(|| distinct_labels(&values));
        Ok(Domain::Categorical { levels, sorted })
    }
}

fn numeric_bound(aesthetic: &str, field: &str, value: DomainValue) -> Result<f64> {
    value.as_number().ok_or_else(|| {
        PolyplotError::TypeMismatch(format!(
            "guide entry for aesthetic '{}' supplies a date '{}' for numeric data",
            aesthetic, field
        ))
    })
}

fn data_min(values: &[RawValue]) -> f64 {
    values
        .iter()
        .filter_map(RawValue::as_number)
        .fold(f64::INFINITY, f64::min)
}

fn data_max(values: &[RawValue]) -> f64 {
    values
        .iter()
        .filter_map(RawValue::as_number)
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Distinct labels in first-seen order
fn distinct_labels(values: &[RawValue]) -> Vec<String> {
    let mut levels: Vec<String> = Vec::new();
    for value in values {
        let label = value.to_label();
        if !levels.contains(&label) {
            levels.push(label);
        }
    }
    levels
}
