//! Driver configuration
//!
//! Defaults carry the tuned frame constants. Hosts may override any subset
//! from JSON; omitted fields keep their defaults.

use serde::{Deserialize, Serialize};
use visage_camera::FramingConfig;
use visage_core::{Vec3, VisageError, VisageResult};
use visage_face::BlendConfig;

use crate::{ClockConfig, GestureConfig};

/// Complete animation configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub framing: FramingConfig,
    pub blend: BlendConfig,
    pub gesture: GestureConfig,
    pub clock: ClockConfig,
    /// Full-body look-at point
    pub look_at: Vec3,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            framing: FramingConfig::default(),
            blend: BlendConfig::default(),
            gesture: GestureConfig::default(),
            clock: ClockConfig::default(),
            look_at: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

impl DriverConfig {
    /// Embedded widget: tighter face framing
    pub fn compact() -> Self {
        DriverConfig {
            framing: FramingConfig::compact(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> VisageResult<()> {
        self.framing.validate()?;
        self.blend.validate()?;
        self.gesture.validate()?;
        self.clock.validate()?;
        if !self.look_at.is_finite() {
            return Err(VisageError::InvalidConfig(
                "look_at must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> VisageResult<Self> {
        let config: DriverConfig =
            serde_json::from_str(json).map_err(|e| VisageError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> VisageResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| VisageError::ConfigParse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(DriverConfig::default().validate().is_ok());
        assert!(DriverConfig::compact().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DriverConfig::from_json_str(
            r#"{ "framing": { "face_distance": 0.8 }, "clock": { "auto_end": false } }"#,
        )
        .unwrap();

        assert_eq!(config.framing.face_distance, 0.8);
        assert_eq!(config.framing.face_height, FramingConfig::default().face_height);
        assert_eq!(config.blend, BlendConfig::default());
        assert!(!config.clock.auto_end);
    }

    #[test]
    fn test_json_round_trip() {
        let config = DriverConfig::compact();
        let json = config.to_json_string().unwrap();
        assert_eq!(DriverConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_malformed_json() {
        let err = DriverConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, VisageError::ConfigParse(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = DriverConfig::from_json_str(r#"{ "blend": { "decay_factor": 2.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, VisageError::InvalidConfig(_)));
    }
}
