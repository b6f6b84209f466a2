//! Arm gestures - idle breathing and talking sway
//!
//! Arms hang at a rest angle with a slow sway; while speaking a faster
//! sway is layered on top, left and right in antiphase. Bones are eased
//! toward the target every frame. Rigs without arm bones are skipped.

use std::f32::consts::{PI, TAU};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use visage_core::{finite_or, Rotation3, VisageError, VisageResult};
use visage_scene::{ArmBoneRefs, ArmSide, Scene};

/// Gesture configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Roll that brings the arms down from the bind (T) pose, radians
    pub rest_roll: f32,
    pub idle_amplitude: f32,
    pub idle_hz: f32,
    pub talk_amplitude: f32,
    pub talk_hz: f32,
    /// Per-frame slerp step toward the target rotation
    pub blend_factor: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        GestureConfig {
            rest_roll: 1.2,
            idle_amplitude: 0.03,
            idle_hz: 0.8,
            talk_amplitude: 0.08,
            talk_hz: 1.6,
            blend_factor: 0.1,
        }
    }
}

impl GestureConfig {
    /// Arms held at rest, no sway
    pub fn still() -> Self {
        GestureConfig {
            idle_amplitude: 0.0,
            talk_amplitude: 0.0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> VisageResult<()> {
        let values = [
            self.rest_roll,
            self.idle_amplitude,
            self.idle_hz,
            self.talk_amplitude,
            self.talk_hz,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(VisageError::InvalidConfig(
                "gesture values must be finite".into(),
            ));
        }
        if !(self.blend_factor > 0.0 && self.blend_factor <= 1.0) {
            return Err(VisageError::InvalidConfig(format!(
                "gesture.blend_factor must be in (0, 1], got {}",
                self.blend_factor
            )));
        }
        Ok(())
    }
}

/// Per-avatar arm animator
#[derive(Debug, Clone, Default)]
pub struct ArmGestureAnimator {
    config: GestureConfig,
    bones: ArmBoneRefs,
    /// Seconds since the avatar was bound
    time: f32,
}

impl ArmGestureAnimator {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            bones: ArmBoneRefs::default(),
            time: 0.0,
        }
    }

    /// Attach to a freshly resolved rig
    pub fn bind(&mut self, bones: ArmBoneRefs) {
        self.bones = bones;
        self.time = 0.0;
    }

    /// Detach from the rig
    pub fn reset(&mut self) {
        self.bind(ArmBoneRefs::default());
    }

    pub fn bones(&self) -> ArmBoneRefs {
        self.bones
    }

    /// Target rotation for one arm at time `t`
    pub fn target(&self, side: ArmSide, speaking: bool, t: f32) -> Rotation3 {
        let cfg = &self.config;
        let antiphase = match side {
            ArmSide::Left => 0.0,
            ArmSide::Right => PI,
        };

        let mut sway = cfg.idle_amplitude * (TAU * cfg.idle_hz * t).sin();
        let mut swing = 0.0;
        if speaking {
            let talk = (TAU * cfg.talk_hz * t + antiphase).sin();
            sway += cfg.talk_amplitude * talk;
            swing = 0.5 * cfg.talk_amplitude * talk;
        }

        Rotation3::from_euler(0.0, swing, side.sign() * (cfg.rest_roll + sway))
    }

    /// Advance one frame
    pub fn update(&mut self, scene: &mut Scene, speaking: bool, dt: Duration) {
        if self.bones.is_empty() {
            return;
        }
        self.time += finite_or(dt.as_secs_f32(), 0.0);

        for side in [ArmSide::Left, ArmSide::Right] {
            let Some(bone_ref) = self.bones.get(side) else {
                continue;
            };
            let target = self.target(side, speaking, self.time);
            if let Some(bone) = scene.bone_mut(bone_ref.0) {
                bone.rotation = bone.rotation.slerp(&target, self.config.blend_factor);
            }
        }
    }
}
