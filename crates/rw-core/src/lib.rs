//! Core types for Roomwalker: things, the relation graph, and the world registry.
//!
//! This crate holds the data model a text adventure runs on. It knows nothing
//! about commands or narration. You can build a [`World`] programmatically or
//! load one from JSON content with [`loader`].

/// Error types used throughout the crate.
pub mod error;
/// The typed relation graph with inverse symmetry.
pub mod graph;
pub mod infer;
pub mod loader;
/// Open/closed/locked state and its transitions.
pub mod openness;
/// Relation kinds, their inverses, and inference neighborhoods.
pub mod relation;
/// Things: identity, names, descriptions, qualities, and state.
pub mod thing;
/// The world registry that owns things and relations.
pub mod world;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the relation graph.
pub use graph::RelationGraph;
/// Re-export inference types.
pub use infer::Inference;
/// Re-export loading entry points.
pub use loader::{WorldContent, load_world};
/// Re-export openness types.
pub use openness::{Openness, TransitionError};
/// Re-export relation types.
pub use relation::{Relation, RelationQuery};
/// Re-export thing types.
pub use thing::{Aspect, Coords, Descriptions, Qualities, Thing, ThingId, ThingKind, Variant};
/// Re-export world model types.
pub use world::{World, WorldMeta};
