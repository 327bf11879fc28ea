//! Порты внешних коллабораторов (physics, animator, camera, surface)
//!
//! Ядро (arbiter + behaviours) видит мир только через эти трейты.
//! ECS-реализации - в `crate::components`, mock'и для unit тестов - в
//! `character::testing`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// "На земле ли тело" (raycast / spherecast / height check - решает реализация)
pub trait GroundOracle {
    fn is_grounded(&self) -> bool;
}

/// Режим `add_force`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceMode {
    /// Мгновенное изменение скорости (масса игнорируется)
    VelocityChange,
    /// Ускорение, интегрируется physics step'ом (масса игнорируется)
    Acceleration,
}

/// Rigid body персонажа: velocity, rotation, gravity toggle
pub trait RigidBodyPort {
    fn velocity(&self) -> Vec3;
    fn set_velocity(&mut self, velocity: Vec3);

    fn rotation(&self) -> Quat;
    fn set_rotation(&mut self, rotation: Quat);

    /// Поворот через physics (для kinematic тела - interpolated)
    fn move_rotation(&mut self, rotation: Quat);

    fn add_force(&mut self, force: Vec3, mode: ForceMode);

    fn use_gravity(&self) -> bool;
    fn set_use_gravity(&mut self, enabled: bool);

    fn forward(&self) -> Vec3 {
        self.rotation() * super::FORWARD
    }
}

/// Параметры animator'а (стабильные символьные имена)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum AnimParam {
    Grounded,
    Jump,
    Aim,
    Speed,
    H,
    V,
}

impl AnimParam {
    pub const fn name(&self) -> &'static str {
        match self {
            AnimParam::Grounded => "Grounded",
            AnimParam::Jump => "Jump",
            AnimParam::Aim => "Aim",
            AnimParam::Speed => "Speed",
            AnimParam::H => "H",
            AnimParam::V => "V",
        }
    }
}

/// Animation-facing sink
pub trait AnimatorSink {
    fn set_bool(&mut self, param: AnimParam, value: bool);
    fn get_bool(&self, param: AnimParam) -> bool;

    /// Мгновенная запись (без damping)
    fn set_float(&mut self, param: AnimParam, value: f32);

    /// Сглаженная запись: значение догоняет `value` с постоянной `damp_time`
    fn set_float_damped(&mut self, param: AnimParam, value: f32, damp_time: f32, delta_time: f32);

    fn get_float(&self, param: AnimParam) -> f32;
}

/// Exponential smoothing к target (damp_time <= 0 → мгновенно)
pub fn damp_towards(current: f32, target: f32, damp_time: f32, delta_time: f32) -> f32 {
    if damp_time <= 0.0 || delta_time <= 0.0 {
        return if damp_time <= 0.0 { target } else { current };
    }

    let blend = 1.0 - (-delta_time / damp_time).exp();
    current + (target - current) * blend
}

/// Камера (rig - чёрный ящик, ядро только отдаёт команды)
pub trait CameraPort {
    /// Local → world direction (forward камеры = `transform_direction(FORWARD)`)
    fn transform_direction(&self, local: Vec3) -> Vec3;

    fn set_fov(&mut self, fov: f32);
    fn reset_fov(&mut self);

    /// Aim offsets (pivot + camera). Rig без поддержки offsets игнорирует.
    fn set_target_offsets(&mut self, _pivot_offset: Vec3, _camera_offset: Vec3) {}
    fn reset_target_offsets(&mut self) {}
}

/// Коэффициенты трения поверхности персонажа
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct FrictionCoefficients {
    pub dynamic_friction: f32,
    pub static_friction: f32,
}

impl FrictionCoefficients {
    pub const ZERO: Self = Self::uniform(0.0);

    pub const fn uniform(value: f32) -> Self {
        Self {
            dynamic_friction: value,
            static_friction: value,
        }
    }
}

/// Physics material коллайдера персонажа
pub trait SurfaceMaterial {
    fn friction(&self) -> FrictionCoefficients;
    fn set_friction(&mut self, friction: FrictionCoefficients);
}

/// Набор коллабораторов одного персонажа на время одной фазы
///
/// Собирается driver'ом (ECS система или ручной loop) при каждом вызове,
/// никто не хранит ссылки дольше фазы.
pub struct CharacterRig<'a> {
    pub body: &'a mut dyn RigidBodyPort,
    pub ground: &'a dyn GroundOracle,
    pub animator: &'a mut dyn AnimatorSink,
    pub camera: &'a mut dyn CameraPort,
    pub surface: &'a mut dyn SurfaceMaterial,
    /// Гравитация мира (m/s²)
    pub gravity: Vec3,
}

impl CharacterRig<'_> {
    pub fn is_grounded(&self) -> bool {
        self.ground.is_grounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anim_param_names_are_stable() {
        assert_eq!(AnimParam::Grounded.name(), "Grounded");
        assert_eq!(AnimParam::Jump.name(), "Jump");
        assert_eq!(AnimParam::Speed.name(), "Speed");
        assert_eq!(AnimParam::H.name(), "H");
        assert_eq!(AnimParam::V.name(), "V");
    }

    #[test]
    fn test_damp_towards_is_gradual() {
        let first = damp_towards(0.0, 1.0, 0.1, 1.0 / 60.0);
        assert!(first > 0.0 && first < 1.0, "first = {}", first);

        let second = damp_towards(first, 1.0, 0.1, 1.0 / 60.0);
        assert!(second > first);

        // damp_time = 0 → мгновенная запись
        assert_eq!(damp_towards(0.3, 1.0, 0.0, 1.0 / 60.0), 1.0);
    }
}
