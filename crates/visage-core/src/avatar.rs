//! Avatar identity and presentation mode

use serde::{Deserialize, Serialize};

/// Voice selection, which also selects the avatar body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceType {
    Male,
    Female,
}

/// Which avatar is mounted
///
/// Any change in identity is an avatar swap: all animation state bound to
/// the previous rig is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AvatarIdentity {
    pub voice: VoiceType,
    /// Asset locator of the loaded model
    pub asset: String,
}

impl AvatarIdentity {
    pub fn new(voice: VoiceType, asset: impl Into<String>) -> Self {
        Self {
            voice,
            asset: asset.into(),
        }
    }
}

/// How the avatar is framed on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresentationMode {
    /// Full-screen intro experience, whole body visible
    FullBody,
    /// Compact in-app chrome, face only
    FaceOnly,
}

impl PresentationMode {
    /// Map the page-level `isFullScreen` flag
    pub fn from_full_screen(full_screen: bool) -> Self {
        if full_screen {
            PresentationMode::FullBody
        } else {
            PresentationMode::FaceOnly
        }
    }

    pub fn is_face_only(self) -> bool {
        self == PresentationMode::FaceOnly
    }
}
