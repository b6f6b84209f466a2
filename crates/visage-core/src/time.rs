//! Time primitives for speech playback
//!
//! Playback time is the elapsed time since the start of the current
//! utterance, as reported by the text-to-speech collaborator. It is
//! monotonic within an utterance and returns to zero when speech stops.

use std::ops::Add;
use std::time::Duration;

/// Elapsed playback time, in microseconds since start-of-utterance
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PlaybackTime(pub u64);

impl PlaybackTime {
    pub const ZERO: PlaybackTime = PlaybackTime(0);

    #[inline]
    pub fn from_micros(micros: u64) -> Self {
        PlaybackTime(micros)
    }

    #[inline]
    pub fn from_millis(millis: u64) -> Self {
        PlaybackTime(millis * 1000)
    }

    /// Negative and non-finite values clamp to zero
    #[inline]
    pub fn from_secs_f32(secs: f32) -> Self {
        if secs.is_finite() && secs > 0.0 {
            PlaybackTime((secs as f64 * 1_000_000.0) as u64)
        } else {
            PlaybackTime::ZERO
        }
    }

    #[inline]
    pub fn as_micros(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_millis(self) -> u64 {
        self.0 / 1000
    }

    #[inline]
    pub fn as_secs_f32(self) -> f32 {
        (self.0 as f64 / 1_000_000.0) as f32
    }

    #[inline]
    pub fn saturating_add(self, duration: Duration) -> Self {
        PlaybackTime(self.0.saturating_add(duration.as_micros() as u64))
    }
}

impl Add<Duration> for PlaybackTime {
    type Output = PlaybackTime;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl std::fmt::Debug for PlaybackTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "playback({:.3}s)", self.as_secs_f32())
    }
}
