//! Visage Camera - auto-framing controller
//!
//! Two operating modes selected by the presentation flag:
//! - FullBody: continuous approach toward a configured distance
//! - FaceOnly: one-shot, edge-triggered "walk up" from the full-body pose
//!   to a face close-up, or an instant jump on cold start

pub mod framing;

pub use framing::*;
