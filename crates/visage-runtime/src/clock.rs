//! Playback clock - the text-to-speech side of the frame loop
//!
//! The speech engine owns audio; this clock only mirrors what it reports:
//! start, progress, end. The driver reads a snapshot every frame with
//! last-write-wins semantics. Stopping speech for any reason zeroes the
//! signal; the face then relaxes through the blender's decay path.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use visage_core::{PlaybackTime, VisageError, VisageResult};
use visage_face::PhonemeEstimator;

/// Clock configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// End the utterance once the estimator has scanned all text, for
    /// engines that never deliver an end callback
    pub auto_end: bool,
    /// Extra time past the estimated duration before auto-ending
    pub auto_end_grace_secs: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        ClockConfig {
            auto_end: true,
            auto_end_grace_secs: 0.5,
        }
    }
}

impl ClockConfig {
    /// Rely entirely on engine callbacks
    pub fn callbacks_only() -> Self {
        ClockConfig {
            auto_end: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> VisageResult<()> {
        if !self.auto_end_grace_secs.is_finite() || self.auto_end_grace_secs < 0.0 {
            return Err(VisageError::InvalidConfig(format!(
                "clock.auto_end_grace_secs must be >= 0, got {}",
                self.auto_end_grace_secs
            )));
        }
        Ok(())
    }
}

/// What the driver reads each frame
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub speaking: bool,
    pub elapsed: PlaybackTime,
    pub text: Arc<str>,
}

impl PlaybackSnapshot {
    pub fn silent() -> Self {
        Self {
            speaking: false,
            elapsed: PlaybackTime::ZERO,
            text: Arc::from(""),
        }
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}

/// Source of the per-frame playback signal
pub trait PlaybackSignal {
    fn snapshot(&self) -> PlaybackSnapshot;
}

impl PlaybackSignal for PlaybackSnapshot {
    fn snapshot(&self) -> PlaybackSnapshot {
        self.clone()
    }
}

/// Mirror of the speech engine's playback state
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    config: ClockConfig,
    text: Arc<str>,
    elapsed: PlaybackTime,
    speaking: bool,
    /// Auto-end deadline for the current utterance
    expected: Option<PlaybackTime>,
    utterances: u64,
}

impl PlaybackClock {
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            text: Arc::from(""),
            elapsed: PlaybackTime::ZERO,
            speaking: false,
            expected: None,
            utterances: 0,
        }
    }

    /// Speech started for `text`; replaces any utterance in flight
    pub fn on_speak_start(&mut self, text: &str) {
        if self.speaking {
            tracing::debug!("new utterance replaces one in flight");
        }
        self.text = Arc::from(text);
        self.elapsed = PlaybackTime::ZERO;
        self.speaking = true;
        self.utterances += 1;
        self.expected = self.config.auto_end.then(|| {
            PlaybackTime::from_secs_f32(
                PhonemeEstimator::estimate_duration(text) + self.config.auto_end_grace_secs,
            )
        });
        tracing::debug!(
            utterance = self.utterances,
            chars = text.chars().count(),
            "speech started"
        );
    }

    /// Engine reported progress; never moves time backwards
    pub fn on_progress(&mut self, elapsed_secs: f32) {
        if !self.speaking {
            return;
        }
        let reported = PlaybackTime::from_secs_f32(elapsed_secs);
        if reported < self.elapsed {
            tracing::warn!(
                reported = ?reported,
                current = ?self.elapsed,
                "discarding non-monotonic playback progress"
            );
            return;
        }
        self.elapsed = reported;
    }

    /// Advance by frame time, for engines without progress callbacks
    pub fn advance(&mut self, dt: Duration) {
        if !self.speaking {
            return;
        }
        self.elapsed = self.elapsed + dt;

        if let Some(deadline) = self.expected {
            if self.elapsed >= deadline {
                tracing::debug!(utterance = self.utterances, "speech auto-ended");
                self.stop();
            }
        }
    }

    /// Speech finished normally
    pub fn on_speak_end(&mut self) {
        if self.speaking {
            tracing::debug!(utterance = self.utterances, "speech ended");
        }
        self.stop();
    }

    /// Speech interrupted (user interrupt, new text, unmount)
    pub fn cancel(&mut self) {
        if self.speaking {
            tracing::debug!(utterance = self.utterances, "speech cancelled");
        }
        self.stop();
    }

    fn stop(&mut self) {
        self.speaking = false;
        self.elapsed = PlaybackTime::ZERO;
        self.expected = None;
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    pub fn elapsed(&self) -> PlaybackTime {
        self.elapsed
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Utterances started since creation
    pub fn utterances(&self) -> u64 {
        self.utterances
    }

    /// Wrap for hosts whose speech engine calls back on another thread
    pub fn shared(self) -> SharedPlaybackClock {
        Arc::new(Mutex::new(self))
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new(ClockConfig::default())
    }
}

impl PlaybackSignal for PlaybackClock {
    fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            speaking: self.speaking,
            elapsed: self.elapsed,
            text: Arc::clone(&self.text),
        }
    }
}

/// Clock shared between a speech engine callback thread and the frame loop
pub type SharedPlaybackClock = Arc<Mutex<PlaybackClock>>;

impl PlaybackSignal for Mutex<PlaybackClock> {
    fn snapshot(&self) -> PlaybackSnapshot {
        self.lock().snapshot()
    }
}

impl<T: PlaybackSignal + ?Sized> PlaybackSignal for Arc<T> {
    fn snapshot(&self) -> PlaybackSnapshot {
        (**self).snapshot()
    }
}
