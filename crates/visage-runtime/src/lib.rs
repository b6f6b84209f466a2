//! Visage Runtime - per-frame orchestration
//!
//! The host calls [`AnimationDriver::tick`] once per rendered frame. Each
//! tick runs these stages in order:
//! 1. Read the playback signal (speaking flag, elapsed time, text)
//! 2. Estimate the current viseme from text position
//! 3. Blend morph weights onto the resolved head mesh
//! 4. Animate arm bones (idle or talking sway)
//! 5. Advance the camera framing state machine
//!
//! All state lives in the driver value the host owns; there are no globals.

pub mod clock;
pub mod config;
pub mod driver;
pub mod gesture;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use driver::*;
pub use gesture::*;
