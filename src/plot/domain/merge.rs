//! Cross-layer domain merging
//!
//! Layers drawn on the same plot must agree on what each aesthetic's scale
//! covers. Merging reconciles the per-layer domains under type-specific rules:
//! range domains must share a bin width and take the enclosing min/max;
//! categorical domains combine their level sets, with authoritative (sorted)
//! orderings taking precedence over incidental data order.
//!
//! All merge failures abort the whole plot: a half-merged domain set would
//! silently render wrong scales.

use crate::plot::aesthetic::AestheticRegistry;
use crate::{PolyplotError, Result};

use super::types::{Domain, DomainKind, DomainSet};

/// Merge a non-empty sequence of domains belonging to one aesthetic.
///
/// Fails with `TypeMismatch` when the domains disagree on their type tag,
/// `BinwidthMismatch` when range domains disagree on bin width, and
/// `OrderingConflict` when authoritative categorical orderings overlap.
pub fn merge_domains(domains: &[Domain]) -> Result<Domain> {
    let mut kinds: Vec<DomainKind> = Vec::new();
    for domain in domains {
        if !kinds.contains(&domain.kind()) {
            kinds.push(domain.kind());
        }
    }
    match kinds.as_slice() {
        [] => Err(PolyplotError::TypeMismatch(
            "cannot merge an empty sequence of domains".to_string(),
        )),
        [DomainKind::Numeric] => merge_numeric(domains),
        [DomainKind::Date] => merge_date(domains),
        [DomainKind::Categorical] => merge_categorical(domains),
        _ => Err(PolyplotError::TypeMismatch(format!(
            "not all domains are of the same type: {}",
            kinds
                .iter()
                .map(DomainKind::name)
                .collect::<Vec<_>>()
                .join(", ")
        ))),
    }
}

/// Merge per-layer domain sets into the plot-wide domain set.
///
/// Iterates the registry in canonical order; every aesthetic at least one
/// layer contributed to gets one merged domain, the rest stay absent.
pub fn merge_domain_sets(sets: &[DomainSet], registry: &AestheticRegistry) -> Result<DomainSet> {
    let mut merged = DomainSet::new();
    for aesthetic in registry.iter() {
        let domains: Vec<Domain> = sets
            .iter()
            .filter_map(|set| set.get(aesthetic).cloned())
            .collect();
        if !domains.is_empty() {
            merged.insert(aesthetic.to_string(), merge_domains(&domains)?);
        }
    }
    Ok(merged)
}

/// The single bin width shared by all range domains, or an error
fn shared_binwidth(domains: &[Domain]) -> Result<Option<f64>> {
    let mut distinct: Vec<Option<f64>> = Vec::new();
    for domain in domains {
        let bw = domain.bw();
        if !distinct.contains(&bw) {
            distinct.push(bw);
        }
    }
    if distinct.len() > 1 {
        return Err(PolyplotError::BinwidthMismatch(format!(
            "domains disagree on bin width: {:?}",
            distinct
        )));
    }
    Ok(distinct.into_iter().next().flatten())
}

fn merge_numeric(domains: &[Domain]) -> Result<Domain> {
    let bw = shared_binwidth(domains)?;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for domain in domains {
        if let Domain::Numeric { min: lo, max: hi, .. } = domain {
            min = min.min(*lo);
            max = max.max(*hi);
        }
    }
    Ok(Domain::Numeric { min, max, bw })
}

fn merge_date(domains: &[Domain]) -> Result<Domain> {
    let bw = shared_binwidth(domains)?;
    let mut min = i32::MAX;
    let mut max = i32::MIN;
    for domain in domains {
        if let Domain::Date { min: lo, max: hi, .. } = domain {
            min = min.min(*lo);
            max = max.max(*hi);
        }
    }
    Ok(Domain::Date { min, max, bw })
}

/// Levels common to every one of the given level sets
///
/// This is deliberately a single global intersection, not a pairwise check:
/// three authoritative orderings where only two overlap slip through when the
/// third breaks the intersection. Known limitation, kept for compatibility
/// and pinned by tests.
fn global_intersection<'a>(level_sets: &[&'a [String]]) -> Vec<&'a String> {
    match level_sets.split_first() {
        None => Vec::new(),
        Some((first, rest)) => first
            .iter()
            .filter(|level| rest.iter().all(|set| set.contains(*level)))
            .collect(),
    }
}

fn merge_categorical(domains: &[Domain]) -> Result<Domain> {
    let mut sorted_sets: Vec<&[String]> = Vec::new();
    let mut unsorted_sets: Vec<&[String]> = Vec::new();
    for domain in domains {
        if let Domain::Categorical { levels, sorted } = domain {
            if *sorted {
                sorted_sets.push(levels);
            } else {
                unsorted_sets.push(levels);
            }
        }
    }

    if sorted_sets.len() >= 2 {
        let overlap = global_intersection(&sorted_sets);
        if !overlap.is_empty() {
            return Err(PolyplotError::OrderingConflict(format!(
                "conflicting explicit level orderings share levels: {:?}",
                overlap
            )));
        }
    }

    // Sorted level lists first, keeping their relative order, then union in
    // the unsorted sets in first-seen order
    let mut levels: Vec<String> = Vec::new();
    for set in sorted_sets.iter().chain(unsorted_sets.iter()) {
        for level in *set {
            if !levels.contains(level) {
                levels.push(level.clone());
            }
        }
    }

    // Without any authoritative ordering, fall back to ascending order
    if sorted_sets.is_empty() {
        levels.sort();
    }

    Ok(Domain::Categorical {
        levels,
        sorted: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn numeric(min: f64, max: f64, bw: Option<f64>) -> Domain {
        Domain::Numeric { min, max, bw }
    }

    fn categorical(levels: &[&str], sorted: bool) -> Domain {
        Domain::Categorical {
            levels: levels.iter().map(|s| s.to_string()).collect(),
            sorted,
        }
    }

    #[test]
    fn test_numeric_merge_takes_enclosing_range() {
        let merged = merge_domains(&[numeric(1.0, 5.0, None), numeric(-2.0, 3.0, None)]).unwrap();
        assert_eq!(merged, numeric(-2.0, 5.0, None));
    }

    #[test]
    fn test_numeric_merge_keeps_shared_binwidth() {
        let merged =
            merge_domains(&[numeric(0.0, 10.0, Some(5.0)), numeric(5.0, 20.0, Some(5.0))]).unwrap();
        assert_eq!(merged.bw(), Some(5.0));
    }

    #[test]
    fn test_numeric_merge_binwidth_mismatch() {
        let err = merge_domains(&[numeric(0.0, 10.0, Some(5.0)), numeric(0.0, 10.0, Some(10.0))])
            .unwrap_err();
        assert!(matches!(err, PolyplotError::BinwidthMismatch(_)));
    }

    #[test]
    fn test_numeric_merge_set_vs_unset_binwidth_mismatch() {
        let err =
            merge_domains(&[numeric(0.0, 10.0, Some(5.0)), numeric(0.0, 10.0, None)]).unwrap_err();
        assert!(matches!(err, PolyplotError::BinwidthMismatch(_)));
    }

    #[test]
    fn test_type_mismatch() {
        let err =
            merge_domains(&[numeric(0.0, 1.0, None), categorical(&["a"], false)]).unwrap_err();
        assert!(matches!(err, PolyplotError::TypeMismatch(_)));
    }

    #[test]
    fn test_empty_merge_is_an_error() {
        assert!(merge_domains(&[]).is_err());
    }

    #[test]
    fn test_merge_idempotent() {
        let domain = numeric(2.0, 7.0, Some(1.0));
        let merged = merge_domains(&[domain.clone(), domain.clone(), domain.clone()]).unwrap();
        assert_eq!(merged, domain);
    }

    #[test]
    fn test_date_merge() {
        let a = Domain::Date {
            min: 100,
            max: 200,
            bw: None,
        };
        let b = Domain::Date {
            min: 50,
            max: 150,
            bw: None,
        };
        let merged = merge_domains(&[a, b]).unwrap();
        assert_eq!(
            merged,
            Domain::Date {
                min: 50,
                max: 200,
                bw: None
            }
        );
    }

    #[test]
    fn test_date_merge_binwidth_mismatch() {
        let a = Domain::Date {
            min: 0,
            max: 10,
            bw: Some(1.0),
        };
        let b = Domain::Date {
            min: 0,
            max: 10,
            bw: Some(7.0),
        };
        assert!(matches!(
            merge_domains(&[a, b]).unwrap_err(),
            PolyplotError::BinwidthMismatch(_)
        ));
    }

    #[test]
    fn test_categorical_no_sorted_inputs_sorts_ascending() {
        let merged = merge_domains(&[
            categorical(&["c", "a"], false),
            categorical(&["b", "a"], false),
        ])
        .unwrap();
        assert_eq!(merged, categorical(&["a", "b", "c"], true));
    }

    #[test]
    fn test_categorical_sorted_prefix_preserved() {
        // Data order [b, a, c] plus explicit ordering [a, b]: the explicit
        // ordering wins the prefix and c is appended
        let merged = merge_domains(&[
            categorical(&["b", "a", "c"], false),
            categorical(&["a", "b"], true),
        ])
        .unwrap();
        assert_eq!(merged, categorical(&["a", "b", "c"], true));
    }

    #[test]
    fn test_categorical_two_disjoint_sorted_concatenate_in_order() {
        let merged = merge_domains(&[
            categorical(&["a", "b"], true),
            categorical(&["c", "d"], true),
            categorical(&["e", "a"], false),
        ])
        .unwrap();
        assert_eq!(merged, categorical(&["a", "b", "c", "d", "e"], true));
    }

    #[test]
    fn test_categorical_overlapping_sorted_conflict() {
        let err = merge_domains(&[
            categorical(&["a", "b"], true),
            categorical(&["b", "c"], true),
        ])
        .unwrap_err();
        assert!(matches!(err, PolyplotError::OrderingConflict(_)));
    }

    #[test]
    fn test_categorical_single_sorted_never_conflicts() {
        let merged = merge_domains(&[categorical(&["b", "a"], true)]).unwrap();
        assert_eq!(merged, categorical(&["b", "a"], true));
    }

    #[test]
    fn test_categorical_coarse_conflict_check_misses_pairwise_overlap() {
        // Known limitation: the conflict check intersects across ALL sorted
        // inputs at once. Here a/b overlap pairwise, but the third set empties
        // the global intersection, so the merge goes through.
        let merged = merge_domains(&[
            categorical(&["a", "b"], true),
            categorical(&["b", "c"], true),
            categorical(&["d"], true),
        ])
        .unwrap();
        // Overlapping level kept at its first position
        assert_eq!(merged, categorical(&["a", "b", "c", "d"], true));
    }

    #[test]
    fn test_categorical_result_always_sorted() {
        let merged = merge_domains(&[categorical(&["x", "y"], false)]).unwrap();
        assert!(merged.is_sorted());
    }

    #[test]
    fn test_merge_domain_sets_collects_per_aesthetic() {
        let registry = AestheticRegistry::default();
        let mut set_a = DomainSet::new();
        set_a.insert("x".to_string(), numeric(0.0, 5.0, None));
        set_a.insert("color".to_string(), categorical(&["r"], false));
        let mut set_b = DomainSet::new();
        set_b.insert("x".to_string(), numeric(3.0, 9.0, None));

        let merged = merge_domain_sets(&[set_a, set_b], &registry).unwrap();
        assert_eq!(merged["x"], numeric(0.0, 9.0, None));
        assert_eq!(merged["color"], categorical(&["r"], true));
        // No layer contributed y; absence is not an error
        assert!(!merged.contains_key("y"));
    }

    #[test]
    fn test_merge_domain_sets_ignores_unregistered_aesthetics() {
        let registry = AestheticRegistry::new(["x"]);
        let mut set = DomainSet::new();
        set.insert("x".to_string(), numeric(0.0, 1.0, None));
        set.insert("glow".to_string(), numeric(0.0, 1.0, None));

        let merged = merge_domain_sets(&[set], &registry).unwrap();
        assert!(merged.contains_key("x"));
        assert!(!merged.contains_key("glow"));
    }

    #[test]
    fn test_merge_domain_sets_propagates_failure() {
        let registry = AestheticRegistry::default();
        let mut set_a = DomainSet::new();
        set_a.insert("x".to_string(), numeric(0.0, 1.0, None));
        let mut set_b = DomainSet::new();
        set_b.insert("x".to_string(), categorical(&["a"], false));

        assert!(merge_domain_sets(&[set_a, set_b], &registry).is_err());
    }

    proptest! {
        #[test]
        fn prop_numeric_merge_permutation_invariant(
            ranges in proptest::collection::vec((-1e6..1e6f64, 0.0..1e6f64), 1..8),
            rotate in 0usize..8,
        ) {
            let domains: Vec<Domain> = ranges
                .iter()
                .map(|(lo, span)| numeric(*lo, lo + span, None))
                .collect();
            let mut rotated = domains.clone();
            rotated.rotate_left(rotate % domains.len().max(1));

            prop_assert_eq!(
                merge_domains(&domains).unwrap(),
                merge_domains(&rotated).unwrap()
            );
        }

        #[test]
        fn prop_numeric_merge_idempotent(
            lo in -1e6..1e6f64,
            span in 0.0..1e6f64,
            copies in 1usize..6,
        ) {
            let domain = numeric(lo, lo + span, None);
            let merged = merge_domains(&vec![domain.clone(); copies]).unwrap();
            prop_assert_eq!(merged, domain);
        }

        #[test]
        fn prop_unsorted_categorical_merge_is_sorted_and_distinct(
            sets in proptest::collection::vec(
                proptest::collection::vec("[a-e]", 0..6),
                1..5,
            ),
        ) {
            let domains: Vec<Domain> = sets
                .iter()
                .map(|levels| {
                    // Incidental orderings may carry duplicates in the raw
                    // data; level sets themselves are distinct
                    let mut distinct: Vec<String> = Vec::new();
                    for level in levels {
                        if !distinct.contains(level) {
                            distinct.push(level.clone());
                        }
                    }
                    Domain::Categorical { levels: distinct, sorted: false }
                })
                .collect();

            let merged = merge_domains(&domains).unwrap();
            let levels = merged.levels().unwrap();
            let mut expected = levels.to_vec();
            expected.sort();
            expected.dedup();
            prop_assert_eq!(levels, &expected[..]);
            prop_assert!(merged.is_sorted());
        }
    }
}
