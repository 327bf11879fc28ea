//! Параметры locomotion

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ControllerError, ControllerResult};

#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Нижняя граница speed dial
    pub walk_speed: f32,
    /// Верхняя граница speed dial (и стартовое значение)
    pub run_speed: f32,
    pub sprint_speed: f32,
    /// Damp time для animator Speed
    pub speed_damp_time: f32,
    /// Высота прыжка (m)
    pub jump_height: f32,
    /// Множитель air control
    pub jump_inertial_force: f32,
    /// Speed выше порога = run-jump (импульс), ниже = прыжок на месте
    pub run_jump_speed_threshold: f32,
    /// Трение коллайдера вне прыжка / контакта со стеной
    pub default_friction: f32,
    /// normal.y <= порога = стена (трение сбрасывается в 0)
    pub wall_normal_threshold: f32,
    /// Обе оси по модулю выше порога → reposition к last direction
    pub idle_axis_threshold: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 0.15,
            run_speed: 1.0,
            sprint_speed: 2.0,
            speed_damp_time: 0.1,
            jump_height: 1.5,
            jump_inertial_force: 10.0,
            run_jump_speed_threshold: 0.1,
            default_friction: 0.6,
            wall_normal_threshold: 0.1,
            idle_axis_threshold: 0.9,
        }
    }
}

impl LocomotionConfig {
    pub fn validate(&self) -> ControllerResult<()> {
        if self.walk_speed <= 0.0 {
            return Err(ControllerError::invalid("locomotion.walk_speed", "must be > 0"));
        }
        if self.walk_speed > self.run_speed {
            return Err(ControllerError::invalid(
                "locomotion.run_speed",
                format!(
                    "must be >= walk_speed ({} < {})",
                    self.run_speed, self.walk_speed
                ),
            ));
        }
        if self.sprint_speed <= 0.0 {
            return Err(ControllerError::invalid("locomotion.sprint_speed", "must be > 0"));
        }
        if self.jump_height <= 0.0 {
            return Err(ControllerError::invalid("locomotion.jump_height", "must be > 0"));
        }
        if self.speed_damp_time < 0.0 {
            return Err(ControllerError::invalid("locomotion.speed_damp_time", "must be >= 0"));
        }
        if self.jump_inertial_force < 0.0 {
            return Err(ControllerError::invalid("locomotion.jump_inertial_force", "must be >= 0"));
        }
        if self.default_friction < 0.0 {
            return Err(ControllerError::invalid("locomotion.default_friction", "must be >= 0"));
        }
        if !(0.0..=1.0).contains(&self.wall_normal_threshold) {
            return Err(ControllerError::invalid(
                "locomotion.wall_normal_threshold",
                format!("must be in [0, 1], got {}", self.wall_normal_threshold),
            ));
        }
        if !(0.0..=1.0).contains(&self.idle_axis_threshold) {
            return Err(ControllerError::invalid(
                "locomotion.idle_axis_threshold",
                format!("must be in [0, 1], got {}", self.idle_axis_threshold),
            ));
        }
        Ok(())
    }
}
