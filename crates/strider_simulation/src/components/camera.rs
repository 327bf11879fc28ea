//! FollowCamera - third-person камера персонажа
//!
//! Orbit-параметры (yaw/pitch) + FOV + aim offsets.
//! Ядро видит её через `CameraPort`: forward камеры задаёт camera-relative
//! движение, sprint меняет FOV, aim двигает pivot/camera offsets.

use bevy::prelude::*;

use crate::character::CameraPort;

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct FollowCamera {
    /// Horizontal rotation (radians), 0 = смотрит вдоль -Z
    pub yaw: f32,
    /// Vertical rotation (radians), < 0 = смотрит вниз
    pub pitch: f32,

    pub fov: f32,
    pub default_fov: f32,

    /// Текущие offsets (aim сдвигает, reset возвращает default)
    pub pivot_offset: Vec3,
    pub camera_offset: Vec3,
    pub default_pivot_offset: Vec3,
    pub default_camera_offset: Vec3,
}

impl Default for FollowCamera {
    fn default() -> Self {
        let pivot = Vec3::new(0.0, 1.7, 0.0);
        let camera = Vec3::new(0.0, 0.4, -3.0);
        Self {
            yaw: 0.0,
            pitch: -std::f32::consts::FRAC_PI_8,
            fov: 60.0,
            default_fov: 60.0,
            pivot_offset: pivot,
            camera_offset: camera,
            default_pivot_offset: pivot,
            default_camera_offset: camera,
        }
    }
}

impl FollowCamera {
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Повернуть orbit (pitch clamp против gimbal lock)
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(
            -std::f32::consts::FRAC_PI_2 + 0.1,
            std::f32::consts::FRAC_PI_2 - 0.1,
        );
    }

    /// World transform камеры при фокусе на `focus` (позиция персонажа)
    ///
    /// Offsets в конвенции "z < 0 = за pivot'ом", forward камеры = -Z.
    pub fn eye_transform(&self, focus: Vec3) -> Transform {
        let rotation = self.rotation();
        let pivot = focus + Quat::from_rotation_y(self.yaw) * self.pivot_offset;
        let offset = Vec3::new(self.camera_offset.x, self.camera_offset.y, -self.camera_offset.z);
        Transform::from_translation(pivot + rotation * offset).with_rotation(rotation)
    }
}

impl CameraPort for FollowCamera {
    fn transform_direction(&self, local: Vec3) -> Vec3 {
        self.rotation() * local
    }

    fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
    }

    fn reset_fov(&mut self) {
        self.fov = self.default_fov;
    }

    fn set_target_offsets(&mut self, pivot_offset: Vec3, camera_offset: Vec3) {
        self.pivot_offset = pivot_offset;
        self.camera_offset = camera_offset;
    }

    fn reset_target_offsets(&mut self) {
        self.pivot_offset = self.default_pivot_offset;
        self.camera_offset = self.default_camera_offset;
    }
}
