//! Camera Framing Controller - full-body to face transition state machine
//!
//! All motion is per-frame lerp with fixed factors. While transitioning to
//! the face the camera first descends/ascends to face height with distance
//! pinned at the full-body distance, then dollies in. The stepped
//! height/distance values are themselves chased by the camera position
//! with a second lerp, which softens the hand-off between the two phases.

use serde::{Deserialize, Serialize};
use visage_core::{finite_or, lerp, PresentationMode, Vec3, VisageError, VisageResult};

/// Framing configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramingConfig {
    /// Distance snapped to when a face transition starts
    pub full_body_distance: f32,
    /// Camera height in full-body mode
    pub full_body_height: f32,
    /// Distance the full-body camera continuously approaches
    pub full_body_target_distance: f32,
    /// Close-up distance
    pub face_distance: f32,
    /// Face height (camera and look-at)
    pub face_height: f32,
    /// Horizontal center of the avatar
    pub center_x: f32,
    /// Depth of the avatar; camera distance is measured from here
    pub center_z: f32,
    /// Full-body approach step
    pub approach_factor: f32,
    /// Height step while transitioning
    pub height_factor: f32,
    /// Distance step while transitioning
    pub distance_factor: f32,
    /// Camera position smoothing step while transitioning
    pub position_factor: f32,
    /// Height is "reached" below this gap
    pub height_tolerance: f32,
    /// Distance is "reached" below this gap
    pub distance_tolerance: f32,
}

impl Default for FramingConfig {
    fn default() -> Self {
        FramingConfig {
            full_body_distance: 3.2,
            full_body_height: 1.0,
            full_body_target_distance: 2.8,
            face_distance: 0.9,
            face_height: 1.55,
            center_x: 0.0,
            center_z: 0.0,
            approach_factor: 0.03,
            height_factor: 0.15,
            distance_factor: 0.06,
            position_factor: 0.15,
            height_tolerance: 0.1,
            distance_tolerance: 0.05,
        }
    }
}

impl FramingConfig {
    /// Tighter close-up for small embedded avatar widgets
    pub fn compact() -> Self {
        FramingConfig {
            face_distance: 0.7,
            full_body_target_distance: 2.6,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> VisageResult<()> {
        let values = [
            self.full_body_distance,
            self.full_body_height,
            self.full_body_target_distance,
            self.face_distance,
            self.face_height,
            self.center_x,
            self.center_z,
            self.height_tolerance,
            self.distance_tolerance,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(VisageError::InvalidConfig(
                "framing values must be finite".into(),
            ));
        }

        for (name, value) in [
            ("full_body_distance", self.full_body_distance),
            ("full_body_target_distance", self.full_body_target_distance),
            ("face_distance", self.face_distance),
            ("height_tolerance", self.height_tolerance),
            ("distance_tolerance", self.distance_tolerance),
        ] {
            if value <= 0.0 {
                return Err(VisageError::InvalidConfig(format!(
                    "framing.{name} must be positive, got {value}"
                )));
            }
        }

        for (name, value) in [
            ("approach_factor", self.approach_factor),
            ("height_factor", self.height_factor),
            ("distance_factor", self.distance_factor),
            ("position_factor", self.position_factor),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(VisageError::InvalidConfig(format!(
                    "framing.{name} must be in (0, 1], got {value}"
                )));
            }
        }

        Ok(())
    }

    fn camera_point(&self, height: f32, distance: f32) -> Vec3 {
        Vec3::new(self.center_x, height, self.center_z + distance)
    }

    /// Look-at point at face level
    pub fn face_point(&self) -> Vec3 {
        Vec3::new(self.center_x, self.face_height, self.center_z)
    }

    /// Final close-up pose
    pub fn face_pose(&self) -> CameraPose {
        CameraPose {
            position: self.camera_point(self.face_height, self.face_distance),
            look_at: self.face_point(),
        }
    }
}

/// Transition phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FramingPhase {
    /// Full-body mode, no transition in progress
    Idle,
    /// Walking from the full-body pose to the face pose
    TransitioningFullToFace,
    /// Holding the face pose
    AtTarget,
}

/// Camera transform for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// Camera framing state machine
///
/// One instance per mount. Remounting (avatar identity change) must start
/// from a fresh controller, see [`CameraFramingController::remount`].
#[derive(Debug, Clone)]
pub struct CameraFramingController {
    config: FramingConfig,
    /// Stepped distance
    distance: f32,
    /// Stepped height
    height: f32,
    pose: CameraPose,
    phase: FramingPhase,
    /// Mode seen on the previous frame; `None` before the first frame
    last_mode: Option<PresentationMode>,
    transitions_started: u32,
}

impl CameraFramingController {
    pub fn new(config: FramingConfig) -> Self {
        let pose = CameraPose {
            position: config.camera_point(config.full_body_height, config.full_body_distance),
            look_at: config.face_point(),
        };
        Self {
            distance: config.full_body_distance,
            height: config.full_body_height,
            pose,
            phase: FramingPhase::Idle,
            last_mode: None,
            transitions_started: 0,
            config,
        }
    }

    /// Advance one frame
    ///
    /// `target` is the look-at point used in full-body mode; face-only mode
    /// always looks at the face point.
    pub fn tick(&mut self, mode: PresentationMode, target: Vec3) -> CameraPose {
        let previous = self.last_mode.replace(mode);

        match mode {
            PresentationMode::FullBody => self.tick_full_body(previous, target),
            PresentationMode::FaceOnly => match previous {
                Some(PresentationMode::FullBody) => self.begin_transition(),
                None => self.cold_start(),
                Some(PresentationMode::FaceOnly) => match self.phase {
                    FramingPhase::TransitioningFullToFace => self.step_transition(),
                    FramingPhase::AtTarget | FramingPhase::Idle => self.hold_target(),
                },
            },
        }

        self.pose
    }

    fn tick_full_body(&mut self, previous: Option<PresentationMode>, target: Vec3) {
        if previous == Some(PresentationMode::FaceOnly) {
            if self.phase == FramingPhase::TransitioningFullToFace {
                tracing::debug!("face transition interrupted by full-body mode");
            }
            self.phase = FramingPhase::Idle;
        }

        let cfg = &self.config;
        self.height = cfg.full_body_height;
        self.distance = lerp(self.distance, cfg.full_body_target_distance, cfg.approach_factor);
        self.pose.position = cfg.camera_point(self.height, self.distance);

        let look_at = Vec3::new(
            finite_or(target.x, self.pose.look_at.x),
            finite_or(target.y, self.pose.look_at.y),
            finite_or(target.z, self.pose.look_at.z),
        );
        self.pose.look_at = look_at;
    }

    fn begin_transition(&mut self) {
        let cfg = &self.config;
        self.distance = cfg.full_body_distance;
        self.height = cfg.full_body_height;
        self.pose = CameraPose {
            position: cfg.camera_point(self.height, self.distance),
            look_at: cfg.face_point(),
        };
        self.phase = FramingPhase::TransitioningFullToFace;
        self.transitions_started += 1;

        tracing::debug!(
            transition = self.transitions_started,
            "camera transition full-body -> face started"
        );
    }

    fn cold_start(&mut self) {
        tracing::debug!("face-only cold start, skipping transition");
        self.hold_target();
    }

    fn step_transition(&mut self) {
        let cfg = &self.config;

        if (cfg.face_height - self.height).abs() >= cfg.height_tolerance {
            // Phase A: vertical only, distance pinned so the torso stays out of frame
            self.height = lerp(self.height, cfg.face_height, cfg.height_factor);
            self.distance = cfg.full_body_distance;
        } else {
            // Phase B: dolly in
            self.height = cfg.face_height;
            self.distance = lerp(self.distance, cfg.face_distance, cfg.distance_factor);
        }

        let stepped = cfg.camera_point(self.height, self.distance);
        self.pose.position = self.pose.position.lerp(&stepped, cfg.position_factor);
        self.pose.look_at = cfg.face_point();

        let distance_gap = (self.pose.position.z - cfg.center_z - cfg.face_distance).abs();
        let height_gap = (self.pose.position.y - cfg.face_height).abs();
        if distance_gap < cfg.distance_tolerance && height_gap < cfg.height_tolerance {
            tracing::debug!(
                transition = self.transitions_started,
                "camera transition reached face pose"
            );
            self.hold_target();
        }
    }

    fn hold_target(&mut self) {
        self.distance = self.config.face_distance;
        self.height = self.config.face_height;
        self.pose = self.config.face_pose();
        self.phase = FramingPhase::AtTarget;
    }

    /// Discard all state, as if freshly mounted
    pub fn remount(&mut self) {
        *self = Self::new(self.config);
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn phase(&self) -> FramingPhase {
        self.phase
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn config(&self) -> &FramingConfig {
        &self.config
    }

    /// Number of full-body -> face transitions started since mount
    pub fn transitions_started(&self) -> u32 {
        self.transitions_started
    }

    pub fn is_at_target(&self) -> bool {
        self.phase == FramingPhase::AtTarget
    }
}

impl Default for CameraFramingController {
    fn default() -> Self {
        Self::new(FramingConfig::default())
    }
}
