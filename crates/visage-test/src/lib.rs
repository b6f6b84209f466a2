//! Visage Test Harness - frame simulation and scripted scenarios
//!
//! This crate provides:
//! - Avatar rigs shaped like common exporter output
//! - Frame-time jitter and random presentation-mode flips
//! - A frame simulator that records every tick
//! - A builder for scripted speech and mode scenarios

pub mod chaos;
pub mod rig;
pub mod simulator;

pub use chaos::*;
pub use rig::*;
pub use simulator::*;
