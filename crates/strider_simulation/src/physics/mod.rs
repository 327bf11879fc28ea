//! Physics персонажа
//!
//! Kinematic интеграция (velocity считаем сами), ground check, collision
//! groups и опциональный мост в Rapier (`RapierBridgePlugin`).
//! Headless режим работает без Rapier: пол = плоскость `GroundProbe::ground_height`.

use bevy::prelude::*;

pub mod collision_layers;
pub mod movement;
pub mod rapier_bridge;

pub use collision_layers::*;
pub use movement::*;
pub use rapier_bridge::*;

/// Гравитация мира (m/s²), одна на симуляцию
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct WorldGravity(pub Vec3);

impl Default for WorldGravity {
    fn default() -> Self {
        Self(Vec3::new(0.0, -9.81, 0.0))
    }
}
