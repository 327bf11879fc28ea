//! SurfaceFriction - physics material коллайдера персонажа

use bevy::prelude::*;

use crate::character::{FrictionCoefficients, SurfaceMaterial};

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SurfaceFriction(pub FrictionCoefficients);

impl Default for SurfaceFriction {
    fn default() -> Self {
        Self(FrictionCoefficients::uniform(0.6))
    }
}

impl SurfaceMaterial for SurfaceFriction {
    fn friction(&self) -> FrictionCoefficients {
        self.0
    }

    fn set_friction(&mut self, friction: FrictionCoefficients) {
        self.0 = friction;
    }
}
