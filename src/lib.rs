/*!
# polyplot - Scale Domain Inference

The domain-computation core of a layered plotting grammar: for every visual
aesthetic used in a plot it determines the numeric range, date range, or
categorical level set the scale must cover, then reconciles that determination
across all data layers drawn on the same plot.

## Example

```
use polyplot::plot::{make, AestheticRegistry, Domain, Geom, Layer, Mark, MarkValue};

let layer = Layer::new()
    .with_mapping("x", "height")
    .with_geom(Geom::with_marks(vec![
        Mark::new().with_aesthetic("x", MarkValue::number(3.0)),
        Mark::new().with_aesthetic("x", MarkValue::number(1.0)),
    ]));

let registry = AestheticRegistry::default();
let domains = make(&[layer], None, false, &registry).unwrap();
assert_eq!(domains["x"], Domain::Numeric { min: 1.0, max: 3.0, bw: None });
```

## Architecture

Domain computation runs in two passes:

- **Per-layer inference** → every aesthetic a layer maps gets a domain, either
  inferred from the layer's mark data or taken from guide-spec overrides
- **Cross-layer merging** → domains for the same aesthetic are reconciled
  under type-specific consistency rules into one plot-wide domain set

The result feeds the rendering collaborator, which builds axis and legend
scales from it. Nothing here renders, picks palettes, or mutates layer data.

## Core Components

- [`plot::layer`] - Read-only input model (layers, geoms, marks)
- [`plot::aesthetic`] - Recognized-aesthetic registry
- [`plot::guide`] - Guide specification overrides
- [`plot::domain`] - Domain types, inference, and merging
*/

pub mod plot;

// Re-export key types for convenience
pub use plot::{
    make, AestheticRegistry, Domain, DomainKind, DomainOverride, DomainSet, DomainValue, Geom,
    GuideSpec, Layer, Mark, MarkValue, Mappings, RawValue,
};

/// Main library error type
#[derive(thiserror::Error, Debug)]
pub enum PolyplotError {
    /// Domains merged for one aesthetic disagree on num/date/cat type
    #[error("Domain type mismatch: {0}")]
    TypeMismatch(String),

    /// Range domains merged for one aesthetic disagree on bin width
    #[error("Bin width mismatch: {0}")]
    BinwidthMismatch(String),

    /// Explicitly ordered categorical domains share overlapping levels
    #[error("Level ordering conflict: {0}")]
    OrderingConflict(String),

    /// Strict mode found no usable guide entry for a mapped aesthetic
    #[error("Missing guide override: {0}")]
    MissingOverride(String),
}

pub type Result<T> = std::result::Result<T, PolyplotError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
