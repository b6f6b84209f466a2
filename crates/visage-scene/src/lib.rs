//! Visage Scene - the loaded avatar as seen by the animation core
//!
//! Asset loading is someone else's job. This crate models what the loader
//! hands over: a flat arena of named nodes, some of them skinned meshes
//! with a morph dictionary, some of them bones. Animation code never owns
//! nodes; it resolves lightweight index handles once per avatar load and
//! mutates through them every frame.

pub mod bones;
pub mod graph;
pub mod head;

pub use bones::*;
pub use graph::*;
pub use head::*;
