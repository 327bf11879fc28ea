//! GroundProbe - результат ground check

use bevy::prelude::*;

use crate::character::GroundOracle;

/// Ground check персонажа
///
/// Headless: плоскость `ground_height` (см. `detect_ground`).
/// С Rapier: `grounded` пишет KinematicCharacterController output.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct GroundProbe {
    pub grounded: bool,
    /// Высота пола под персонажем (m)
    pub ground_height: f32,
    /// Допуск над полом, в пределах которого считаем grounded (m)
    pub tolerance: f32,
}

impl Default for GroundProbe {
    fn default() -> Self {
        Self {
            grounded: false,
            ground_height: 0.0,
            tolerance: 0.02,
        }
    }
}

impl GroundProbe {
    pub fn check(&self, feet_height: f32) -> bool {
        feet_height <= self.ground_height + self.tolerance
    }
}

impl GroundOracle for GroundProbe {
    fn is_grounded(&self) -> bool {
        self.grounded
    }
}
