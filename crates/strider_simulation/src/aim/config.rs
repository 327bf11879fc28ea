//! Параметры aim behaviour

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ControllerError, ControllerResult};

#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct AimConfig {
    /// Скорость поворота к камере (× оставшийся угол в градусах)
    pub turn_smoothing: f32,
    /// Offset pivot'а камеры во время прицеливания (x = плечо)
    pub pivot_offset: Vec3,
    /// Offset камеры относительно pivot'а во время прицеливания
    pub camera_offset: Vec3,
    /// Задержка до захвата override (s)
    pub engage_delay: f32,
    /// После отпускания: задержка до сброса offsets камеры (s)
    pub release_delay: f32,
    /// После сброса offsets: задержка до revoke override (s)
    pub revoke_delay: f32,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            turn_smoothing: 0.15,
            pivot_offset: Vec3::new(0.5, 1.2, 0.0),
            camera_offset: Vec3::new(0.0, 0.4, -0.7),
            engage_delay: 0.05,
            release_delay: 0.3,
            revoke_delay: 0.05,
        }
    }
}

impl AimConfig {
    pub fn validate(&self) -> ControllerResult<()> {
        if self.turn_smoothing <= 0.0 {
            return Err(ControllerError::invalid("aim.turn_smoothing", "must be > 0"));
        }
        for (field, delay) in [
            ("aim.engage_delay", self.engage_delay),
            ("aim.release_delay", self.release_delay),
            ("aim.revoke_delay", self.revoke_delay),
        ] {
            if delay < 0.0 {
                return Err(ControllerError::invalid(field, format!("must be >= 0, got {}", delay)));
            }
        }
        if !self.pivot_offset.is_finite() || !self.camera_offset.is_finite() {
            return Err(ControllerError::invalid("aim.pivot_offset", "offsets must be finite"));
        }
        Ok(())
    }
}
