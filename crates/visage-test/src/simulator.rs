//! Frame simulator for end-to-end animation testing

use std::time::Duration;

use visage_camera::FramingPhase;
use visage_core::{AvatarIdentity, PresentationMode, VisageResult, VoiceType};
use visage_face::Viseme;
use visage_runtime::{AnimationDriver, DriverConfig, FrameReport, PlaybackClock, PlaybackSignal};
use visage_scene::Scene;

use crate::chaos::{ChaosConfig, FrameChaos};
use crate::rig;

/// One scripted action
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// Speech engine starts an utterance
    SpeakStart(String),
    /// Speech engine reports progress in seconds
    Progress(f32),
    /// Speech engine finishes
    SpeakEnd,
    /// User interrupt
    Cancel,
    /// Tick frames in a fixed mode
    Frames { count: u32, mode: PresentationMode },
    /// Tick frames while the chaos source flips the mode
    ChaoticFrames { count: u32 },
    /// Unmount the current avatar and mount another rig
    SwapAvatar(VoiceType),
    /// Mount an avatar with no head morphs or arm bones
    SwapToStatic,
}

/// What one frame produced
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameRecord {
    pub frame: u64,
    pub mode: PresentationMode,
    pub dt: Duration,
    pub report: FrameReport,
    /// Head `jawOpen` weight after the frame, 0 without a head
    pub jaw_open: f32,
    /// Largest head morph weight after the frame
    pub peak_weight: f32,
}

impl FrameRecord {
    pub fn viseme(&self) -> Viseme {
        self.report.viseme
    }

    pub fn phase(&self) -> FramingPhase {
        self.report.phase
    }
}

/// Owns a scene, a driver and a playback clock, and runs scripts against them
#[derive(Debug)]
pub struct FrameSimulator {
    scene: Scene,
    driver: AnimationDriver,
    clock: PlaybackClock,
    chaos: FrameChaos,
    mode: PresentationMode,
    records: Vec<FrameRecord>,
}

impl FrameSimulator {
    pub fn new(config: DriverConfig, chaos: ChaosConfig, seed: u64) -> VisageResult<Self> {
        Ok(Self {
            scene: Scene::new(),
            driver: AnimationDriver::new(config)?,
            clock: PlaybackClock::new(config.clock),
            chaos: FrameChaos::new(chaos, seed),
            mode: PresentationMode::FullBody,
            records: Vec::new(),
        })
    }

    /// Mount the rig for a voice
    pub fn load(&mut self, voice: VoiceType) -> VisageResult<()> {
        self.clock.cancel();
        self.scene = rig::avatar_scene(voice)?;
        self.driver.load_avatar(rig::identity(voice), &self.scene);
        Ok(())
    }

    fn load_static(&mut self) -> VisageResult<()> {
        self.clock.cancel();
        self.scene = rig::static_scene()?;
        let identity = AvatarIdentity::new(VoiceType::Female, "avatars/static.glb");
        self.driver.load_avatar(identity, &self.scene);
        Ok(())
    }

    /// Tick one frame
    pub fn frame(&mut self, mode: PresentationMode) -> FrameRecord {
        let dt = self.chaos.next_dt();
        self.clock.advance(dt);
        self.mode = mode;

        let report = self.driver.tick(&self.clock, mode, &mut self.scene, dt);

        let morphs = self.driver.head().and_then(|head| head.morphs(&self.scene));
        let record = FrameRecord {
            frame: self.records.len() as u64,
            mode,
            dt,
            report,
            jaw_open: morphs.and_then(|m| m.get("jawOpen")).unwrap_or(0.0),
            peak_weight: morphs.map(|m| m.max_weight()).unwrap_or(0.0),
        };
        self.records.push(record);
        record
    }

    /// Apply one step
    pub fn apply(&mut self, step: &Step) -> VisageResult<()> {
        match step {
            Step::SpeakStart(text) => self.clock.on_speak_start(text),
            Step::Progress(secs) => self.clock.on_progress(*secs),
            Step::SpeakEnd => self.clock.on_speak_end(),
            Step::Cancel => self.clock.cancel(),
            Step::Frames { count, mode } => {
                for _ in 0..*count {
                    self.frame(*mode);
                }
            }
            Step::ChaoticFrames { count } => {
                for _ in 0..*count {
                    let mode = self.chaos.next_mode(self.mode);
                    self.frame(mode);
                }
            }
            Step::SwapAvatar(voice) => self.load(*voice)?,
            Step::SwapToStatic => self.load_static()?,
        }
        Ok(())
    }

    pub fn run(&mut self, steps: &[Step]) -> VisageResult<()> {
        for step in steps {
            self.apply(step)?;
        }
        Ok(())
    }

    pub fn records(&self) -> &[FrameRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&FrameRecord> {
        self.records.last()
    }

    /// First frame at which the camera reached the face pose
    pub fn first_at_target(&self) -> Option<&FrameRecord> {
        self.records
            .iter()
            .find(|r| r.phase() == FramingPhase::AtTarget)
    }

    pub fn transitions(&self) -> u32 {
        self.driver.camera().transitions_started()
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn chaos(&self) -> &FrameChaos {
        &self.chaos
    }

    /// True while the clock reports speech
    pub fn speaking(&self) -> bool {
        self.clock.snapshot().speaking
    }
}

/// Scripted scenario builder
pub struct ScenarioBuilder {
    config: DriverConfig,
    chaos: ChaosConfig,
    seed: u64,
    avatar: Option<VoiceType>,
    steps: Vec<Step>,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        ScenarioBuilder {
            config: DriverConfig::default(),
            chaos: ChaosConfig::steady(),
            seed: 0,
            avatar: Some(VoiceType::Female),
            steps: Vec::new(),
        }
    }

    /// Set driver configuration
    pub fn with_config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    /// Set frame chaos
    pub fn with_chaos(mut self, chaos: ChaosConfig) -> Self {
        self.chaos = chaos;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Start with this avatar mounted
    pub fn with_avatar(mut self, voice: VoiceType) -> Self {
        self.avatar = Some(voice);
        self
    }

    /// Start with nothing mounted
    pub fn without_avatar(mut self) -> Self {
        self.avatar = None;
        self
    }

    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn speak(self, text: impl Into<String>) -> Self {
        self.step(Step::SpeakStart(text.into()))
    }

    pub fn progress(self, secs: f32) -> Self {
        self.step(Step::Progress(secs))
    }

    pub fn end_speech(self) -> Self {
        self.step(Step::SpeakEnd)
    }

    pub fn cancel(self) -> Self {
        self.step(Step::Cancel)
    }

    pub fn full_body(self, count: u32) -> Self {
        self.step(Step::Frames {
            count,
            mode: PresentationMode::FullBody,
        })
    }

    pub fn face_only(self, count: u32) -> Self {
        self.step(Step::Frames {
            count,
            mode: PresentationMode::FaceOnly,
        })
    }

    pub fn chaotic(self, count: u32) -> Self {
        self.step(Step::ChaoticFrames { count })
    }

    pub fn swap_avatar(self, voice: VoiceType) -> Self {
        self.step(Step::SwapAvatar(voice))
    }

    pub fn swap_to_static(self) -> Self {
        self.step(Step::SwapToStatic)
    }

    /// Build the simulator and the script without running it
    pub fn build(self) -> VisageResult<(FrameSimulator, Vec<Step>)> {
        let mut sim = FrameSimulator::new(self.config, self.chaos, self.seed)?;
        if let Some(voice) = self.avatar {
            sim.load(voice)?;
        }
        Ok((sim, self.steps))
    }

    /// Build and run the whole script
    pub fn run(self) -> VisageResult<FrameSimulator> {
        let (mut sim, steps) = self.build()?;
        sim.run(&steps)?;
        Ok(sim)
    }

    /// Nominal duration of the scripted frames
    pub fn scripted_time(&self) -> Duration {
        let frames: u32 = self
            .steps
            .iter()
            .map(|s| match s {
                Step::Frames { count, .. } | Step::ChaoticFrames { count } => *count,
                _ => 0,
            })
            .sum();
        self.chaos.frame_time * frames
    }
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}
