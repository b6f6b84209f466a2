#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use visage_core::{AvatarIdentity, MorphChannels, PresentationMode, VoiceType};
use visage_face::{DRIVEN_CHANNELS, INTENSITY_CAP};
use visage_runtime::{AnimationDriver, PlaybackClock};
use visage_scene::{Scene, SkinnedMesh};

#[derive(Arbitrary, Debug)]
enum Event {
    Speak(String),
    Progress(f32),
    End,
    Cancel,
    Frame { face_only: bool, dt_ms: u16 },
}

fuzz_target!(|events: Vec<Event>| {
    let mut scene = Scene::new();
    let Ok(morphs) = MorphChannels::new(DRIVEN_CHANNELS.iter().copied()) else {
        return;
    };
    if scene
        .add_mesh("Wolf3D_Head", None, SkinnedMesh::with_morphs(morphs))
        .is_err()
    {
        return;
    }

    let mut driver = AnimationDriver::default();
    driver.load_avatar(AvatarIdentity::new(VoiceType::Female, "fuzz.glb"), &scene);
    let mut clock = PlaybackClock::default();

    for event in events {
        match event {
            Event::Speak(text) => clock.on_speak_start(&text),
            Event::Progress(secs) => clock.on_progress(secs),
            Event::End => clock.on_speak_end(),
            Event::Cancel => clock.cancel(),
            Event::Frame { face_only, dt_ms } => {
                let dt = Duration::from_millis(u64::from(dt_ms));
                let mode = if face_only {
                    PresentationMode::FaceOnly
                } else {
                    PresentationMode::FullBody
                };
                clock.advance(dt);
                let report = driver.tick(&clock, mode, &mut scene, dt);

                assert!(report.camera.position.is_finite());
                assert!(report.camera.look_at.is_finite());
                assert!(driver.blender().peak_history() <= INTENSITY_CAP);
            }
        }
    }
});
