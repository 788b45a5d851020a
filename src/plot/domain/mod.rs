//! Scale domain computation
//!
//! Produce a domain set for each layer from the layer's own data and the
//! guide specification, then merge them into the single plot-wide domain set
//! the rendering collaborator builds axis and legend scales from.
//!
//! The whole computation is synchronous and side-effect-free: domains are
//! plain values owned by the caller, rebuilt per render pass.

pub mod infer;
pub mod merge;
pub mod types;

pub use infer::{classify, flatten_geoms, layer_domains};
pub use merge::{merge_domain_sets, merge_domains};
pub use types::{Domain, DomainKind, DomainSet};

use crate::plot::aesthetic::AestheticRegistry;
use crate::plot::guide::GuideSpec;
use crate::plot::layer::Layer;
use crate::Result;

/// Compute the plot-wide domain set for a list of layers.
///
/// Builds one domain set per layer (inferred from data, or in strict mode
/// taken verbatim from `guide`), then merges them per aesthetic across the
/// injected registry. Any type, bin-width, ordering, or missing-override
/// failure aborts the whole call; there is no partial result.
pub fn make(
    layers: &[Layer],
    guide: Option<&GuideSpec>,
    strict: bool,
    registry: &AestheticRegistry,
) -> Result<DomainSet> {
    let mut sets = Vec::with_capacity(layers.len());
    for layer in layers {
        sets.push(layer_domains(layer, guide, strict)?);
    }
    merge_domain_sets(&sets, registry)
}
