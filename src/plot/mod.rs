//! Plot types for polyplot domain computation
//!
//! This module contains the types and operations behind scale domain
//! inference: the read-only layer/mark input model, the aesthetic registry,
//! guide-spec overrides, and the domain subsystem itself.
//!
//! # Architecture
//!
//! The module is organized into submodules:
//!
//! - `aesthetic` - Recognized-aesthetic registry
//! - `layer` - Input model: raw values, marks, geoms, layers
//! - `guide` - Guide specification and per-aesthetic overrides
//! - `domain` - Domain types, per-layer inference, cross-layer merging

pub mod aesthetic;
pub mod domain;
pub mod guide;
pub mod layer;

// Re-export all types for convenience
pub use aesthetic::*;
pub use domain::*;
pub use guide::*;
pub use layer::*;
