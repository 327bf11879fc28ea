//! CharacterBody - kinematic rigid body персонажа

use bevy::prelude::*;

use crate::character::{ForceMode, RigidBodyPort};

/// Rigid body персонажа (velocity интегрируем сами, Rapier только коллизии)
///
/// `add_force(Acceleration)` копится в `pending_acceleration` и
/// интегрируется в `integrate_character_bodies` с fixed dt.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CharacterBody {
    /// Линейная скорость (m/s)
    pub velocity: Vec3,
    /// Yaw персонажа (источник истины для Transform.rotation)
    pub rotation: Quat,
    pub use_gravity: bool,
    /// Сумма ускорений за текущий fixed step (m/s²)
    pub pending_acceleration: Vec3,
    /// Смещение, рассчитанное в этом шаге (velocity * dt)
    pub frame_translation: Vec3,
}

impl Default for CharacterBody {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            use_gravity: true,
            pending_acceleration: Vec3::ZERO,
            frame_translation: Vec3::ZERO,
        }
    }
}

impl CharacterBody {
    pub fn facing(rotation: Quat) -> Self {
        Self {
            rotation,
            ..default()
        }
    }

    /// v += a·dt, сброс накопленных ускорений, frame_translation = v·dt
    pub fn integrate(&mut self, delta: f32) {
        self.velocity += self.pending_acceleration * delta;
        self.pending_acceleration = Vec3::ZERO;
        self.frame_translation = self.velocity * delta;
    }
}

impl RigidBodyPort for CharacterBody {
    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn move_rotation(&mut self, rotation: Quat) {
        // Kinematic тело: интерполяцию делает Transform sync
        self.rotation = rotation;
    }

    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        match mode {
            ForceMode::VelocityChange => self.velocity += force,
            ForceMode::Acceleration => self.pending_acceleration += force,
        }
    }

    fn use_gravity(&self) -> bool {
        self.use_gravity
    }

    fn set_use_gravity(&mut self, enabled: bool) {
        self.use_gravity = enabled;
    }
}
