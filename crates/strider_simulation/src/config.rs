//! ControllerConfig - все параметры персонажа одним ресурсом
//!
//! Загружается из JSON (отсутствующие поля = defaults), валидируется
//! до спавна. `CharacterControllerPlugin` вставляет defaults как ресурс,
//! `spawn_configured_character` спавнит персонажа с конфигом из ресурса.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::aim::AimConfig;
use crate::behaviour::ArbiterConfig;
use crate::error::ControllerResult;
use crate::locomotion::LocomotionConfig;

#[derive(Resource, Debug, Clone, Default, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Resource)]
#[serde(default)]
pub struct ControllerConfig {
    pub arbiter: ArbiterConfig,
    pub locomotion: LocomotionConfig,
    pub aim: AimConfig,
}

impl ControllerConfig {
    /// Parse + validate
    pub fn from_json_str(json: &str) -> ControllerResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> ControllerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ControllerResult<()> {
        self.arbiter.validate()?;
        self.locomotion.validate()?;
        self.aim.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ControllerError;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = ControllerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ControllerConfig::default());
    }

    #[test]
    fn test_nested_override() {
        let config = ControllerConfig::from_json_str(
            r#"{
                "locomotion": { "sprint_speed": 3.0 },
                "arbiter": { "sprint_fov": 90.0 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.locomotion.sprint_speed, 3.0);
        assert_eq!(config.locomotion.walk_speed, 0.15);
        assert_eq!(config.arbiter.sprint_fov, 90.0);
        assert_eq!(config.aim, AimConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = ControllerConfig::from_json_str(r#"{ "locomotion": { "jump_height": 0.0 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ControllerError::InvalidConfig {
                field: "locomotion.jump_height",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = ControllerConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ControllerError::ConfigParse(_)));
    }

    #[test]
    fn test_json_roundtrip_preserves_values() {
        let mut config = ControllerConfig::default();
        config.aim.pivot_offset = Vec3::new(-0.4, 1.1, 0.0);

        let json = config.to_json_string().unwrap();
        assert_eq!(ControllerConfig::from_json_str(&json).unwrap(), config);
    }
}
