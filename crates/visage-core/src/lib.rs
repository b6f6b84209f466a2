//! Visage Core - Fundamental types and primitives
//!
//! This crate defines the core types shared by the animation crates:
//! - Math primitives (lerp, Vec3, Rotation3)
//! - Playback time
//! - Avatar identity and presentation mode
//! - Morph channel storage and the `MorphTarget` seam
//! - Error types

pub mod avatar;
pub mod error;
pub mod math;
pub mod morph;
pub mod time;

pub use avatar::*;
pub use error::*;
pub use math::*;
pub use morph::*;
pub use time::*;
