//! Состояние locomotion между шагами

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Jump state machine (независима от arbiter'а)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum JumpPhase {
    #[default]
    Grounded,
    Airborne,
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct MotionState {
    /// Speed dial в [walk_speed, run_speed], крутится scroll'ом
    pub speed_seeker: f32,
    /// Целевая скорость последнего шага (до damping'а в animator)
    pub current_speed: f32,
    /// Jump latch: ставится на rising edge, снимается только при приземлении
    pub jump_pending: bool,
    pub phase: JumpPhase,
    /// Контакт с чем-либо (enter/stay → true, exit → false)
    pub is_colliding: bool,
}

impl MotionState {
    pub fn new(run_speed: f32) -> Self {
        Self {
            speed_seeker: run_speed,
            current_speed: 0.0,
            jump_pending: false,
            phase: JumpPhase::Grounded,
            is_colliding: false,
        }
    }

    pub fn is_airborne(&self) -> bool {
        self.phase == JumpPhase::Airborne
    }
}
