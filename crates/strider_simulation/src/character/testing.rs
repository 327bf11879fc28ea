//! Mock коллабораторы для unit тестов ядра

use std::collections::HashMap;

use bevy::prelude::*;

use super::*;

#[derive(Debug, Clone)]
pub struct MockBody {
    pub velocity: Vec3,
    pub rotation: Quat,
    pub use_gravity: bool,
    pub impulses: Vec<Vec3>,
    pub accelerations: Vec<Vec3>,
    pub rotation_writes: usize,
}

impl Default for MockBody {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            use_gravity: true,
            impulses: Vec::new(),
            accelerations: Vec::new(),
            rotation_writes: 0,
        }
    }
}

impl RigidBodyPort for MockBody {
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
        self.rotation_writes += 1;
    }

    fn move_rotation(&mut self, rotation: Quat) {
        self.set_rotation(rotation);
    }

    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        match mode {
            ForceMode::VelocityChange => {
                self.velocity += force;
                self.impulses.push(force);
            }
            ForceMode::Acceleration => self.accelerations.push(force),
        }
    }

    fn use_gravity(&self) -> bool {
        self.use_gravity
    }

    fn set_use_gravity(&mut self, enabled: bool) {
        self.use_gravity = enabled;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MockGround {
    pub grounded: bool,
}

impl GroundOracle for MockGround {
    fn is_grounded(&self) -> bool {
        self.grounded
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockAnimator {
    pub bools: HashMap<AnimParam, bool>,
    pub floats: HashMap<AnimParam, f32>,
}

impl AnimatorSink for MockAnimator {
    fn set_bool(&mut self, param: AnimParam, value: bool) {
        self.bools.insert(param, value);
    }

    fn get_bool(&self, param: AnimParam) -> bool {
        self.bools.get(&param).copied().unwrap_or(false)
    }

    fn set_float(&mut self, param: AnimParam, value: f32) {
        self.floats.insert(param, value);
    }

    fn set_float_damped(&mut self, param: AnimParam, value: f32, damp_time: f32, delta_time: f32) {
        let current = self.get_float(param);
        self.floats
            .insert(param, damp_towards(current, value, damp_time, delta_time));
    }

    fn get_float(&self, param: AnimParam) -> f32 {
        self.floats.get(&param).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone)]
pub struct MockCamera {
    pub rotation: Quat,
    pub fov: f32,
    pub default_fov: f32,
    pub fov_resets: usize,
    pub offsets: Option<(Vec3, Vec3)>,
}

impl Default for MockCamera {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            fov: 60.0,
            default_fov: 60.0,
            fov_resets: 0,
            offsets: None,
        }
    }
}

impl CameraPort for MockCamera {
    fn transform_direction(&self, local: Vec3) -> Vec3 {
        self.rotation * local
    }

    fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
    }

    fn reset_fov(&mut self) {
        self.fov = self.default_fov;
        self.fov_resets += 1;
    }

    fn set_target_offsets(&mut self, pivot_offset: Vec3, camera_offset: Vec3) {
        self.offsets = Some((pivot_offset, camera_offset));
    }

    fn reset_target_offsets(&mut self) {
        self.offsets = None;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MockSurface {
    pub friction: FrictionCoefficients,
}

impl Default for MockSurface {
    fn default() -> Self {
        Self {
            friction: FrictionCoefficients::uniform(0.6),
        }
    }
}

impl SurfaceMaterial for MockSurface {
    fn friction(&self) -> FrictionCoefficients {
        self.friction
    }

    fn set_friction(&mut self, friction: FrictionCoefficients) {
        self.friction = friction;
    }
}

/// Все коллабораторы одного персонажа (owner для `CharacterRig`)
#[derive(Debug, Clone, Default)]
pub struct MockWorld {
    pub body: MockBody,
    pub ground: MockGround,
    pub animator: MockAnimator,
    pub camera: MockCamera,
    pub surface: MockSurface,
}

impl MockWorld {
    pub fn grounded() -> Self {
        Self {
            ground: MockGround { grounded: true },
            ..default()
        }
    }

    pub fn rig(&mut self) -> CharacterRig<'_> {
        CharacterRig {
            body: &mut self.body,
            ground: &self.ground,
            animator: &mut self.animator,
            camera: &mut self.camera,
            surface: &mut self.surface,
            gravity: Vec3::new(0.0, -9.81, 0.0),
        }
    }
}
