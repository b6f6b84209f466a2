//! Avatar rigs for tests and benches
//!
//! The female rig follows the Ready Player Me layout (`Wolf3D_*` meshes,
//! plain arm bone names); the male rig uses `Head_Mesh` and Mixamo bones.

use visage_core::{AvatarIdentity, MorphChannels, VisageResult, VoiceType};
use visage_face::DRIVEN_CHANNELS;
use visage_scene::{Scene, SkinnedMesh};

/// Morph channels present on the head but never driven by lip sync
pub const EXPRESSION_CHANNELS: &[&str] = &["eyeBlinkLeft", "eyeBlinkRight", "browInnerUp"];

/// Asset locator for a voice's avatar
pub fn asset_for(voice: VoiceType) -> &'static str {
    match voice {
        VoiceType::Female => "avatars/coach_female.glb",
        VoiceType::Male => "avatars/coach_male.glb",
    }
}

pub fn identity(voice: VoiceType) -> AvatarIdentity {
    AvatarIdentity::new(voice, asset_for(voice))
}

/// Full head dictionary: driven channels plus expression channels
pub fn head_morphs() -> VisageResult<MorphChannels> {
    MorphChannels::new(
        DRIVEN_CHANNELS
            .iter()
            .chain(EXPRESSION_CHANNELS)
            .copied(),
    )
}

/// Rigged avatar for a voice
pub fn avatar_scene(voice: VoiceType) -> VisageResult<Scene> {
    let mut scene = Scene::new();
    let root = scene.add_group("Armature", None)?;

    match voice {
        VoiceType::Female => {
            scene.add_mesh("Wolf3D_Body", Some(root), SkinnedMesh::rigid())?;
            scene.add_mesh("Wolf3D_Head", Some(root), SkinnedMesh::with_morphs(head_morphs()?))?;
            // teeth carry morphs too but must never win the head search
            scene.add_mesh(
                "Wolf3D_Teeth",
                Some(root),
                SkinnedMesh::with_morphs(MorphChannels::new(["jawOpen"])?),
            )?;
            scene.add_bone("LeftArm", Some(root))?;
            scene.add_bone("RightArm", Some(root))?;
        }
        VoiceType::Male => {
            let hips = scene.add_bone("mixamorigHips", Some(root))?;
            scene.add_mesh("Body_Mesh", Some(root), SkinnedMesh::rigid())?;
            scene.add_mesh("Head_Mesh", Some(root), SkinnedMesh::with_morphs(head_morphs()?))?;
            scene.add_bone("mixamorigLeftArm", Some(hips))?;
            scene.add_bone("mixamorigRightArm", Some(hips))?;
        }
    }

    Ok(scene)
}

/// Static avatar: no morph dictionary, no arm bones
pub fn static_scene() -> VisageResult<Scene> {
    let mut scene = Scene::new();
    let root = scene.add_group("Scene", None)?;
    scene.add_mesh("Avatar", Some(root), SkinnedMesh::rigid())?;
    scene.add_mesh("HeadMesh", Some(root), SkinnedMesh::rigid())?;
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use visage_scene::{ArmBoneRefs, HeadMeshRef};

    #[test]
    fn test_rigs_resolve() {
        for voice in [VoiceType::Female, VoiceType::Male] {
            let scene = avatar_scene(voice).unwrap();
            let head = HeadMeshRef::resolve(&scene).unwrap();
            let name = &scene.node(head.0).unwrap().name;
            assert!(name == "Wolf3D_Head" || name == "Head_Mesh");

            let arms = ArmBoneRefs::resolve(&scene);
            assert!(arms.left.is_some() && arms.right.is_some());
        }
    }

    #[test]
    fn test_static_rig_has_nothing_to_drive() {
        let scene = static_scene().unwrap();
        assert!(HeadMeshRef::resolve(&scene).is_none());
        assert!(ArmBoneRefs::resolve(&scene).is_empty());
    }
}
