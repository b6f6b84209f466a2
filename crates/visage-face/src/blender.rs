//! Morph Blender - per-frame smoothing of mouth weights
//!
//! Two-stage blend while speaking:
//! 1. per-channel target history steps toward the capped viseme target
//! 2. every mesh channel steps toward its history value
//!
//! When speech stops, every mesh weight decays geometrically toward rest
//! and the history is kept, so the next utterance resumes from it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use visage_core::{lerp, MorphTarget, VisageError, VisageResult};

use crate::{capped, Viseme, VisemeTable};

/// Blend factors, applied once per frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendConfig {
    /// History step toward the viseme target
    pub history_factor: f32,
    /// Mesh step toward the history value
    pub mesh_factor: f32,
    /// Mesh step toward rest when not speaking
    pub decay_factor: f32,
}

impl Default for BlendConfig {
    fn default() -> Self {
        BlendConfig {
            history_factor: 0.45,
            mesh_factor: 0.15,
            decay_factor: 0.55,
        }
    }
}

impl BlendConfig {
    pub fn validate(&self) -> VisageResult<()> {
        for (name, value) in [
            ("history_factor", self.history_factor),
            ("mesh_factor", self.mesh_factor),
            ("decay_factor", self.decay_factor),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(VisageError::InvalidConfig(format!(
                    "blend.{name} must be in (0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Per-avatar morph smoother
///
/// The history map is the blender's only persistent state. It is bound to
/// one head mesh and must be reset when the mesh changes, since channel
/// names differ between rigs.
#[derive(Debug, Default)]
pub struct MorphBlender {
    config: BlendConfig,
    history: HashMap<&'static str, f32>,
}

impl MorphBlender {
    pub fn new(config: BlendConfig) -> Self {
        Self {
            config,
            history: HashMap::new(),
        }
    }

    pub fn config(&self) -> &BlendConfig {
        &self.config
    }

    /// Advance one frame, writing new influences into `mesh`
    ///
    /// A mesh without morph channels is left untouched.
    pub fn update<T>(&mut self, viseme: Viseme, speaking: bool, mesh: &mut T)
    where
        T: MorphTarget + ?Sized,
    {
        if mesh.channel_count() == 0 {
            return;
        }

        if !speaking {
            self.relax(mesh);
            return;
        }

        let targets = VisemeTable::lookup(viseme);
        for (channel, raw) in targets.iter() {
            let previous = self.history.get(channel).copied().unwrap_or(0.0);
            let next = lerp(previous, capped(raw), self.config.history_factor);
            self.history.insert(channel, next);
        }

        for index in 0..mesh.channel_count() {
            let goal = mesh
                .channel_name(index)
                .and_then(|name| self.history.get(name))
                .copied()
                .unwrap_or(0.0);
            let current = mesh.weight(index);
            mesh.set_weight(index, lerp(current, goal, self.config.mesh_factor));
        }
    }

    /// Decay every influence toward rest, leaving history untouched
    fn relax<T>(&self, mesh: &mut T)
    where
        T: MorphTarget + ?Sized,
    {
        for index in 0..mesh.channel_count() {
            let current = mesh.weight(index);
            mesh.set_weight(index, lerp(current, 0.0, self.config.decay_factor));
        }
    }

    /// Target history for a channel, if it has ever been driven
    pub fn history(&self, channel: &str) -> Option<f32> {
        self.history.get(channel).copied()
    }

    /// Largest history value; never above the intensity cap
    pub fn peak_history(&self) -> f32 {
        self.history.values().copied().fold(0.0, f32::max)
    }

    /// Forget all history (head mesh changed)
    pub fn reset(&mut self) {
        if !self.history.is_empty() {
            tracing::trace!(channels = self.history.len(), "morph history cleared");
        }
        self.history.clear();
    }

    pub fn is_fresh(&self) -> bool {
        self.history.is_empty()
    }
}
