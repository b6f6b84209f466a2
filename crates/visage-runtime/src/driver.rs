//! Animation Driver - one owned context per mounted avatar
//!
//! The driver holds every piece of avatar-bound state: the resolved head
//! mesh, blend history, arm animator and camera. Swapping avatars tears all
//! of it down before the new rig is resolved.

use std::time::Duration;

use visage_camera::{CameraFramingController, CameraPose, FramingPhase};
use visage_core::{AvatarIdentity, PresentationMode, Vec3, VisageResult};
use visage_face::{MorphBlender, PhonemeEstimator, Viseme};
use visage_scene::{ArmBoneRefs, HeadMeshRef, Scene};

use crate::{ArmGestureAnimator, DriverConfig, PlaybackSignal};

/// Outcome of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Viseme shown this frame; `Silence` while not speaking
    pub viseme: Viseme,
    pub speaking: bool,
    pub camera: CameraPose,
    pub phase: FramingPhase,
    /// False when the avatar has no usable head mesh
    pub head_resolved: bool,
}

/// Per-frame orchestrator
#[derive(Debug)]
pub struct AnimationDriver {
    config: DriverConfig,
    identity: Option<AvatarIdentity>,
    head: Option<HeadMeshRef>,
    blender: MorphBlender,
    camera: CameraFramingController,
    gestures: ArmGestureAnimator,
    look_at: Vec3,
    frames: u64,
}

impl AnimationDriver {
    pub fn new(config: DriverConfig) -> VisageResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: DriverConfig) -> Self {
        Self {
            config,
            identity: None,
            head: None,
            blender: MorphBlender::new(config.blend),
            camera: CameraFramingController::new(config.framing),
            gestures: ArmGestureAnimator::new(config.gesture),
            look_at: config.look_at,
            frames: 0,
        }
    }

    /// Bind to an avatar rig
    ///
    /// Returns true when the identity changed and state was rebuilt. Loading
    /// the same identity again keeps all state.
    pub fn load_avatar(&mut self, identity: AvatarIdentity, scene: &Scene) -> bool {
        if self.identity.as_ref() == Some(&identity) {
            return false;
        }

        if let Some(previous) = &self.identity {
            tracing::debug!(
                from = %previous.asset,
                to = %identity.asset,
                "avatar swap, discarding animation state"
            );
        }
        self.teardown();

        self.head = HeadMeshRef::resolve(scene);
        if self.head.is_none() {
            tracing::debug!(asset = %identity.asset, "no head mesh, facial animation disabled");
        }
        self.gestures.bind(ArmBoneRefs::resolve(scene));
        self.identity = Some(identity);
        true
    }

    /// Drop the current avatar
    pub fn unload(&mut self) {
        if let Some(identity) = self.identity.take() {
            tracing::debug!(asset = %identity.asset, "avatar unloaded");
        }
        self.teardown();
    }

    fn teardown(&mut self) {
        self.head = None;
        self.blender.reset();
        self.camera.remount();
        self.gestures.reset();
    }

    /// Advance one rendered frame
    pub fn tick<S>(
        &mut self,
        signal: &S,
        mode: PresentationMode,
        scene: &mut Scene,
        dt: Duration,
    ) -> FrameReport
    where
        S: PlaybackSignal + ?Sized,
    {
        let playback = signal.snapshot();
        let viseme = if playback.speaking {
            PhonemeEstimator::estimate(&playback.text, playback.elapsed_secs())
        } else {
            Viseme::Silence
        };

        let morphs = match self.head {
            Some(head) => head.morphs_mut(scene),
            None => None,
        };
        let head_resolved = morphs.is_some();
        if let Some(morphs) = morphs {
            self.blender.update(viseme, playback.speaking, morphs);
        }

        self.gestures.update(scene, playback.speaking, dt);
        let camera = self.camera.tick(mode, self.look_at);
        self.frames += 1;

        tracing::trace!(
            frame = self.frames,
            viseme = %viseme,
            speaking = playback.speaking,
            "frame"
        );

        FrameReport {
            viseme,
            speaking: playback.speaking,
            camera,
            phase: self.camera.phase(),
            head_resolved,
        }
    }

    /// Move the full-body look-at point
    pub fn set_look_at(&mut self, look_at: Vec3) {
        self.look_at = look_at;
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn identity(&self) -> Option<&AvatarIdentity> {
        self.identity.as_ref()
    }

    pub fn head(&self) -> Option<HeadMeshRef> {
        self.head
    }

    pub fn blender(&self) -> &MorphBlender {
        &self.blender
    }

    pub fn camera(&self) -> &CameraFramingController {
        &self.camera
    }

    pub fn gestures(&self) -> &ArmGestureAnimator {
        &self.gestures
    }

    /// Frames ticked since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::build(DriverConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClockConfig, PlaybackClock, PlaybackSnapshot};
    use visage_core::{MorphChannels, PlaybackTime, VoiceType};
    use visage_face::DRIVEN_CHANNELS;
    use visage_scene::SkinnedMesh;

    const FRAME: Duration = Duration::from_millis(16);

    fn rig() -> Scene {
        let mut scene = Scene::new();
        let root = scene.add_group("Armature", None).unwrap();
        scene
            .add_mesh(
                "Wolf3D_Head",
                Some(root),
                SkinnedMesh::with_morphs(MorphChannels::new(DRIVEN_CHANNELS.iter().copied()).unwrap()),
            )
            .unwrap();
        scene.add_bone("LeftArm", Some(root)).unwrap();
        scene.add_bone("RightArm", Some(root)).unwrap();
        scene
    }

    fn jaw(driver: &AnimationDriver, scene: &Scene) -> f32 {
        driver
            .head()
            .and_then(|h| h.morphs(scene))
            .and_then(|m| m.get("jawOpen"))
            .unwrap()
    }

    fn female() -> AvatarIdentity {
        AvatarIdentity::new(VoiceType::Female, "female.glb")
    }

    #[test]
    fn test_speaking_opens_mouth() {
        let mut scene = rig();
        let mut driver = AnimationDriver::default();
        assert!(driver.load_avatar(female(), &scene));

        let mut clock = PlaybackClock::new(ClockConfig::callbacks_only());
        clock.on_speak_start("aaaa");

        let report = driver.tick(&clock, PresentationMode::FaceOnly, &mut scene, FRAME);
        assert_eq!(report.viseme, Viseme::A);
        assert!(report.head_resolved);
        assert!(jaw(&driver, &scene) > 0.0);
    }

    #[test]
    fn test_silence_reports_silence() {
        let mut scene = rig();
        let mut driver = AnimationDriver::default();
        driver.load_avatar(female(), &scene);

        let report = driver.tick(
            &PlaybackSnapshot::silent(),
            PresentationMode::FullBody,
            &mut scene,
            FRAME,
        );
        assert_eq!(report.viseme, Viseme::Silence);
        assert!(!report.speaking);
    }

    #[test]
    fn test_mouth_relaxes_after_cancel() {
        let mut scene = rig();
        let mut driver = AnimationDriver::default();
        driver.load_avatar(female(), &scene);

        let mut clock = PlaybackClock::new(ClockConfig::callbacks_only());
        clock.on_speak_start("aaaaaaaaaaaaaaaa");
        for _ in 0..30 {
            driver.tick(&clock, PresentationMode::FaceOnly, &mut scene, FRAME);
        }
        let open = jaw(&driver, &scene);

        clock.cancel();
        for _ in 0..30 {
            driver.tick(&clock, PresentationMode::FaceOnly, &mut scene, FRAME);
        }
        assert!(jaw(&driver, &scene) < open * 0.01);
    }

    #[test]
    fn test_same_identity_keeps_state() {
        let mut scene = rig();
        let mut driver = AnimationDriver::default();
        driver.load_avatar(female(), &scene);

        let speaking = PlaybackSnapshot {
            speaking: true,
            elapsed: PlaybackTime::ZERO,
            text: "aaa".into(),
        };
        driver.tick(&speaking, PresentationMode::FaceOnly, &mut scene, FRAME);
        assert!(!driver.blender().is_fresh());

        assert!(!driver.load_avatar(female(), &scene));
        assert!(!driver.blender().is_fresh());
    }

    #[test]
    fn test_swap_resets_state() {
        let mut scene = rig();
        let mut driver = AnimationDriver::default();
        driver.load_avatar(female(), &scene);

        let speaking = PlaybackSnapshot {
            speaking: true,
            elapsed: PlaybackTime::ZERO,
            text: "ooo".into(),
        };
        driver.tick(&speaking, PresentationMode::FullBody, &mut scene, FRAME);
        driver.tick(&speaking, PresentationMode::FaceOnly, &mut scene, FRAME);
        assert_eq!(driver.camera().transitions_started(), 1);

        let male = AvatarIdentity::new(VoiceType::Male, "male.glb");
        assert!(driver.load_avatar(male, &rig()));
        assert!(driver.blender().is_fresh());
        assert_eq!(driver.camera().transitions_started(), 0);
        assert_eq!(driver.camera().phase(), FramingPhase::Idle);
    }

    #[test]
    fn test_static_avatar_without_head() {
        let mut scene = Scene::new();
        scene.add_mesh("Body", None, SkinnedMesh::rigid()).unwrap();

        let mut driver = AnimationDriver::default();
        driver.load_avatar(female(), &scene);
        assert!(driver.head().is_none());

        let mut clock = PlaybackClock::default();
        clock.on_speak_start("hello");
        let report = driver.tick(&clock, PresentationMode::FaceOnly, &mut scene, FRAME);
        assert!(!report.head_resolved);
        assert_eq!(report.viseme, Viseme::Default);
        assert!(driver.blender().is_fresh());
    }

    #[test]
    fn test_tick_without_avatar() {
        let mut scene = Scene::new();
        let mut driver = AnimationDriver::default();
        let report = driver.tick(
            &PlaybackSnapshot::silent(),
            PresentationMode::FaceOnly,
            &mut scene,
            FRAME,
        );
        // cold start lands on the face pose
        assert_eq!(report.phase, FramingPhase::AtTarget);
        assert_eq!(report.camera, driver.config().framing.face_pose());
        assert_eq!(driver.frames(), 1);
    }

    #[test]
    fn test_unload() {
        let scene = rig();
        let mut driver = AnimationDriver::default();
        driver.load_avatar(female(), &scene);
        assert!(driver.gestures().bones().left.is_some());

        driver.unload();
        assert!(driver.identity().is_none());
        assert!(driver.head().is_none());
        assert!(driver.gestures().bones().is_empty());

        // same identity after unload is a fresh load
        assert!(driver.load_avatar(female(), &scene));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = DriverConfig::default();
        config.blend.decay_factor = -0.5;
        assert!(AnimationDriver::new(config).is_err());
    }

    #[test]
    fn test_full_body_looks_at_configured_point() {
        let mut scene = rig();
        let mut driver = AnimationDriver::default();
        driver.set_look_at(Vec3::new(0.2, 1.1, 0.0));

        let report = driver.tick(
            &PlaybackSnapshot::silent(),
            PresentationMode::FullBody,
            &mut scene,
            FRAME,
        );
        assert_eq!(report.camera.look_at, Vec3::new(0.2, 1.1, 0.0));
    }
}
