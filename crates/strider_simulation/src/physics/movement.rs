//! Kinematic движение персонажа
//!
//! Архитектура:
//! - Velocity интегрируем сами (CharacterBody), Rapier только для коллизий
//! - Forces: gravity + root motion stand-in (до behaviour'ов)
//! - Sensing: ground check (headless = плоскость)
//! - Integration: pending accelerations → velocity → frame_translation → Transform
//!
//! Origin персонажа = ступни (Transform.translation.y = высота ног).
//! Детерминизм: fixed timestep (60Hz), порядок систем задан chain'ом.

use bevy::prelude::*;
use bevy_rapier3d::prelude::KinematicCharacterController;

use super::WorldGravity;
use crate::character::RigidBodyPort;
use crate::components::{AnimatorParams, CharacterBody, CharacterController, GroundProbe, RootMotion};

/// Система применения gravity к velocity (только если use_gravity)
pub fn apply_gravity(
    mut query: Query<&mut CharacterBody, With<CharacterController>>,
    gravity: Res<WorldGravity>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for mut body in query.iter_mut() {
        if body.use_gravity {
            body.velocity += gravity.0 * delta;
        }
    }
}

/// Root motion stand-in: планарная velocity = forward * Speed * meters_per_unit
///
/// Вертикальная компонента не трогается (gravity / прыжок).
pub fn apply_root_motion(
    mut query: Query<(&RootMotion, &AnimatorParams, &mut CharacterBody), With<CharacterController>>,
) {
    for (root_motion, animator, mut body) in query.iter_mut() {
        if !root_motion.enabled {
            continue;
        }

        let planar = body.forward() * animator.speed * root_motion.meters_per_unit;
        body.velocity.x = planar.x;
        body.velocity.z = planar.z;
    }
}

/// Ground detection через Y-проверку (headless, без Rapier)
///
/// С Rapier grounded приходит из KinematicCharacterControllerOutput.
pub fn detect_ground(
    mut query: Query<
        (&Transform, &mut GroundProbe),
        (With<CharacterController>, Without<KinematicCharacterController>),
    >,
) {
    for (transform, mut probe) in query.iter_mut() {
        probe.grounded = probe.check(transform.translation.y);
    }
}

/// v += pending_acceleration * dt, frame_translation = v * dt
pub fn integrate_character_bodies(
    mut query: Query<&mut CharacterBody, With<CharacterController>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for mut body in query.iter_mut() {
        body.integrate(delta);
    }
}

/// Headless: frame_translation → Transform, clamp к полу
///
/// На clamp'е гасим отрицательную vertical velocity (пол не проваливается).
pub fn apply_body_translation(
    mut query: Query<
        (&mut CharacterBody, &GroundProbe, &mut Transform),
        (With<CharacterController>, Without<KinematicCharacterController>),
    >,
) {
    for (mut body, probe, mut transform) in query.iter_mut() {
        transform.translation += body.frame_translation;

        if transform.translation.y < probe.ground_height {
            transform.translation.y = probe.ground_height;
            if body.velocity.y < 0.0 {
                body.velocity.y = 0.0;
            }
        }
    }
}

/// CharacterBody.rotation → Transform.rotation (оба режима)
pub fn sync_body_rotation(
    mut query: Query<(&CharacterBody, &mut Transform), With<CharacterController>>,
) {
    for (body, mut transform) in query.iter_mut() {
        transform.rotation = body.rotation;
    }
}
