//! Arm bone resolution
//!
//! Same pattern as the head: resolve by name candidates once per avatar
//! load, keep index handles, mutate per frame.

use crate::{NodeIndex, NodeKind, Scene};

/// Which arm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArmSide {
    Left,
    Right,
}

impl ArmSide {
    /// Exact names in priority order
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            ArmSide::Left => &["LeftArm", "mixamorigLeftArm", "LeftUpperArm", "upperarm_l"],
            ArmSide::Right => &["RightArm", "mixamorigRightArm", "RightUpperArm", "upperarm_r"],
        }
    }

    /// Lowercase fallback substring
    pub fn fallback(self) -> &'static str {
        match self {
            ArmSide::Left => "leftarm",
            ArmSide::Right => "rightarm",
        }
    }

    /// +1 for left, -1 for right; mirrors rotations across the body
    pub fn sign(self) -> f32 {
        match self {
            ArmSide::Left => 1.0,
            ArmSide::Right => -1.0,
        }
    }
}

/// Non-owning handle to a bone node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoneRef(pub NodeIndex);

impl BoneRef {
    /// Resolve one arm bone, `None` when the rig has no match
    pub fn resolve(scene: &Scene, side: ArmSide) -> Option<BoneRef> {
        let bones = || {
            scene
                .nodes()
                .filter(|(_, n)| matches!(n.kind, NodeKind::Bone(_)))
        };

        for candidate in side.candidates() {
            if let Some((index, _)) = bones().find(|(_, n)| n.name == *candidate) {
                return Some(BoneRef(index));
            }
        }

        bones()
            .find(|(_, n)| n.name.to_lowercase().contains(side.fallback()))
            .map(|(index, _)| BoneRef(index))
    }
}

/// Both arm handles; either may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArmBoneRefs {
    pub left: Option<BoneRef>,
    pub right: Option<BoneRef>,
}

impl ArmBoneRefs {
    pub fn resolve(scene: &Scene) -> Self {
        let refs = ArmBoneRefs {
            left: BoneRef::resolve(scene, ArmSide::Left),
            right: BoneRef::resolve(scene, ArmSide::Right),
        };
        tracing::debug!(
            left = refs.left.is_some(),
            right = refs.right.is_some(),
            "arm bones resolved"
        );
        refs
    }

    pub fn get(&self, side: ArmSide) -> Option<BoneRef> {
        match side {
            ArmSide::Left => self.left,
            ArmSide::Right => self.right,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}
