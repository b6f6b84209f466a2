//! Visage Face - Text-driven lip-sync
//!
//! Mouth shapes are derived from the text being spoken, not from audio:
//!
//! PlaybackClock → PhonemeEstimator → VisemeTable → MorphBlender → head mesh
//!
//! The estimator is a deliberately crude character scan at a fixed
//! speaking rate. The blender's two-stage smoothing hides the artificial
//! per-character cadence so the mouth reads as continuous motion.

pub mod blender;
pub mod phoneme;
pub mod table;
pub mod viseme;

pub use blender::*;
pub use phoneme::*;
pub use table::*;
pub use viseme::*;
