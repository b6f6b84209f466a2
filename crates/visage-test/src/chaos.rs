//! Frame chaos for the simulator
//!
//! Real hosts do not tick at a steady rate and users toggle full screen at
//! arbitrary moments. This module models:
//! - Frame-time jitter
//! - Occasional long stalls (tab in background, GC pause)
//! - Random presentation-mode flips

use std::time::Duration;

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use visage_core::PresentationMode;

/// Frame chaos configuration
#[derive(Clone, Debug, PartialEq)]
pub struct ChaosConfig {
    /// Nominal frame time
    pub frame_time: Duration,
    /// Extra time added to each frame, uniform in `[0, jitter_ms]`
    pub jitter_ms: u32,
    /// Probability that a frame stalls
    pub stall_prob: f64,
    /// Length of a stalled frame
    pub stall: Duration,
    /// Probability per chaotic frame that the presentation mode flips
    pub flip_prob: f64,
}

impl Default for ChaosConfig {
    fn default() -> Self {
        ChaosConfig {
            frame_time: Duration::from_micros(16_667),
            jitter_ms: 4,
            stall_prob: 0.01,
            stall: Duration::from_millis(250),
            flip_prob: 0.02,
        }
    }
}

impl ChaosConfig {
    /// Fixed 60 Hz, no flips
    pub fn steady() -> Self {
        ChaosConfig {
            jitter_ms: 0,
            stall_prob: 0.0,
            flip_prob: 0.0,
            ..Self::default()
        }
    }

    /// Slow device with a restless user
    pub fn hostile() -> Self {
        ChaosConfig {
            frame_time: Duration::from_micros(33_333),
            jitter_ms: 30,
            stall_prob: 0.05,
            stall: Duration::from_secs(1),
            flip_prob: 0.2,
        }
    }
}

/// Seeded source of frame times and mode flips
#[derive(Debug)]
pub struct FrameChaos {
    config: ChaosConfig,
    rng: StdRng,
    stats: ChaosStats,
}

/// What the chaos source has injected so far
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChaosStats {
    pub frames: u64,
    pub stalls: u64,
    pub flips: u64,
    pub total_time: Duration,
}

impl FrameChaos {
    pub fn new(config: ChaosConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            stats: ChaosStats::default(),
        }
    }

    /// Time elapsed for the next frame
    pub fn next_dt(&mut self) -> Duration {
        let cfg = &self.config;
        let dt = if cfg.stall_prob > 0.0 && self.rng.gen_bool(cfg.stall_prob.min(1.0)) {
            self.stats.stalls += 1;
            cfg.stall
        } else if cfg.jitter_ms > 0 {
            let jitter = Uniform::new_inclusive(0, cfg.jitter_ms).sample(&mut self.rng);
            cfg.frame_time + Duration::from_millis(u64::from(jitter))
        } else {
            cfg.frame_time
        };

        self.stats.frames += 1;
        self.stats.total_time += dt;
        dt
    }

    /// Mode for the next chaotic frame, given the current one
    pub fn next_mode(&mut self, current: PresentationMode) -> PresentationMode {
        let p = self.config.flip_prob;
        if p > 0.0 && self.rng.gen_bool(p.min(1.0)) {
            self.stats.flips += 1;
            match current {
                PresentationMode::FullBody => PresentationMode::FaceOnly,
                PresentationMode::FaceOnly => PresentationMode::FullBody,
            }
        } else {
            current
        }
    }

    /// Random speech position inside `text`, for estimator sampling
    pub fn elapsed_within(&mut self, duration_secs: f32) -> f32 {
        if duration_secs <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(0.0..duration_secs)
    }

    pub fn config(&self) -> &ChaosConfig {
        &self.config
    }

    pub fn stats(&self) -> &ChaosStats {
        &self.stats
    }
}
