//! Drive an avatar through a short coaching session
//!
//! Run with `RUST_LOG=visage_runtime=debug,visage_camera=debug cargo run -p visage-runtime --example frame_loop`.

use std::time::Duration;

use visage_core::{AvatarIdentity, MorphChannels, PresentationMode, VisageResult, VoiceType};
use visage_face::DRIVEN_CHANNELS;
use visage_runtime::{logging, AnimationDriver, DriverConfig, PlaybackClock};
use visage_scene::{Scene, SkinnedMesh};

const FRAME: Duration = Duration::from_micros(16_667);

fn coach_rig() -> VisageResult<Scene> {
    let mut scene = Scene::new();
    let root = scene.add_group("Armature", None)?;
    scene.add_mesh("Wolf3D_Body", Some(root), SkinnedMesh::rigid())?;
    scene.add_mesh(
        "Wolf3D_Head",
        Some(root),
        SkinnedMesh::with_morphs(MorphChannels::new(DRIVEN_CHANNELS.iter().copied())?),
    )?;
    scene.add_bone("LeftArm", Some(root))?;
    scene.add_bone("RightArm", Some(root))?;
    Ok(scene)
}

fn main() -> VisageResult<()> {
    logging::init("info");

    let config = DriverConfig::default();
    let mut scene = coach_rig()?;
    let mut driver = AnimationDriver::new(config)?;
    let mut clock = PlaybackClock::new(config.clock);

    driver.load_avatar(AvatarIdentity::new(VoiceType::Female, "coach_female.glb"), &scene);
    clock.on_speak_start("Welcome back! Let's warm up with ten squats.");

    // Intro in full screen, then collapse to the face-only chrome
    for frame in 0..240u32 {
        let mode = PresentationMode::from_full_screen(frame < 60);
        clock.advance(FRAME);
        let report = driver.tick(&clock, mode, &mut scene, FRAME);

        if frame % 20 == 0 {
            let jaw = driver
                .head()
                .and_then(|head| head.morphs(&scene))
                .and_then(|morphs| morphs.get("jawOpen"))
                .unwrap_or(0.0);
            println!(
                "frame {frame:3} {mode:?} viseme={:<7} jaw={jaw:.3} phase={:?} camera=({:.2}, {:.2}, {:.2})",
                report.viseme.as_str(),
                report.phase,
                report.camera.position.x,
                report.camera.position.y,
                report.camera.position.z,
            );
        }
    }

    println!(
        "transitions: {}, utterances: {}, still speaking: {}",
        driver.camera().transitions_started(),
        clock.utterances(),
        clock.is_speaking()
    );
    Ok(())
}
