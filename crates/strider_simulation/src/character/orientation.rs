//! Ориентация персонажа относительно камеры
//!
//! Конвенция Bevy: forward = -Z, right = +X, up = +Y.

use bevy::prelude::*;

/// Local forward (камера и тело)
pub const FORWARD: Vec3 = Vec3::NEG_Z;

/// Проекция на горизонтальную плоскость + normalize (ноль остаётся нулём)
pub fn flatten(direction: Vec3) -> Vec3 {
    Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero()
}

/// Right-вектор, перпендикулярный горизонтальному forward
pub fn right_of(forward: Vec3) -> Vec3 {
    forward.cross(Vec3::Y)
}

/// Целевое направление движения: forward * v + right * h
pub fn camera_relative_direction(camera_forward: Vec3, horizontal: f32, vertical: f32) -> Vec3 {
    let forward = flatten(camera_forward);
    let right = right_of(forward);
    forward * vertical + right * horizontal
}

/// Yaw-only rotation, смотрящая в `direction` (аналог LookRotation с up = Y)
///
/// Через atan2, а не `from_rotation_arc`: для direction = +Z arc-вариант
/// выбирает произвольную ось и может перевернуть персонажа.
pub fn look_rotation(direction: Vec3) -> Quat {
    Quat::from_rotation_y((-direction.x).atan2(-direction.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!(a.abs_diff_eq(b, 1e-5), "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_flatten_drops_vertical() {
        assert_vec_eq(flatten(Vec3::new(0.0, -0.7, -0.7)), Vec3::NEG_Z);
        assert_eq!(flatten(Vec3::Y), Vec3::ZERO);
    }

    #[test]
    fn test_right_of_forward() {
        assert_vec_eq(right_of(Vec3::NEG_Z), Vec3::X);
        assert_vec_eq(right_of(Vec3::X), Vec3::Z);
    }

    #[test]
    fn test_camera_relative_direction() {
        // Камера смотрит вдоль -Z: вперёд = -Z, вправо = +X
        assert_vec_eq(camera_relative_direction(Vec3::NEG_Z, 0.0, 1.0), Vec3::NEG_Z);
        assert_vec_eq(camera_relative_direction(Vec3::NEG_Z, 1.0, 0.0), Vec3::X);
        assert_vec_eq(
            camera_relative_direction(Vec3::NEG_Z, 0.5, 0.5),
            Vec3::new(0.5, 0.0, -0.5),
        );
    }

    #[test]
    fn test_look_rotation_maps_forward() {
        for direction in [Vec3::NEG_Z, Vec3::Z, Vec3::X, Vec3::NEG_X, Vec3::new(1.0, 0.0, 1.0).normalize()] {
            let rotation = look_rotation(direction);
            assert_vec_eq(rotation * FORWARD, direction);
            // Без roll: up остаётся up
            assert_vec_eq(rotation * Vec3::Y, Vec3::Y);
        }
    }
}
