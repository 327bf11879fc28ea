//! CharacterControllerPlugin - расписание фаз персонажа

use bevy::prelude::*;

use super::{
    drive_autopilot, Autopilot, dispatch_character_contacts, report_invalid_characters, run_fixed_behaviours,
    run_late_behaviours, sample_character_input, CharacterContact,
};
use crate::components::{
    AnimatorParams, CharacterBody, CharacterController, ControllerInput, FollowCamera, GroundProbe,
    RootMotion, SurfaceFriction,
};
use crate::config::ControllerConfig;
use crate::physics::{
    apply_body_translation, apply_gravity, apply_root_motion, detect_ground,
    integrate_character_bodies, sync_body_rotation, WorldGravity,
};

/// Фазы fixed step (выполняются строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterSystems {
    /// PreUpdate: autopilot + input phase
    Input,
    /// FixedUpdate: gravity, root motion
    Forces,
    /// FixedUpdate: ground check, контакты
    Sensing,
    /// FixedUpdate: активный набор behaviour'ов
    Behaviours,
    /// FixedUpdate: velocity → перемещение
    Integration,
    /// PostUpdate: late phase
    Late,
}

/// Character controller plugin
///
/// Bevy порядок PreUpdate → FixedUpdate → PostUpdate даёт
/// input → fixed → late разделение фаз за кадр.
///
/// Порядок FixedUpdate:
/// 1. Forces - apply_gravity, apply_root_motion
/// 2. Sensing - detect_ground, dispatch_character_contacts
/// 3. Behaviours - run_fixed_behaviours
/// 4. Integration - integrate_character_bodies, apply_body_translation, sync_body_rotation
pub struct CharacterControllerPlugin;

impl Plugin for CharacterControllerPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CharacterController>()
            .register_type::<CharacterBody>()
            .register_type::<GroundProbe>()
            .register_type::<AnimatorParams>()
            .register_type::<FollowCamera>()
            .register_type::<ControllerInput>()
            .register_type::<SurfaceFriction>()
            .register_type::<RootMotion>()
            .register_type::<Autopilot>()
            .register_type::<ControllerConfig>();

        app.add_event::<CharacterContact>()
            .init_resource::<WorldGravity>()
            .init_resource::<ControllerConfig>();

        app.configure_sets(
            FixedUpdate,
            (
                CharacterSystems::Forces,
                CharacterSystems::Sensing,
                CharacterSystems::Behaviours,
                CharacterSystems::Integration,
            )
                .chain(),
        );

        app.add_systems(
            PreUpdate,
            (report_invalid_characters, drive_autopilot, sample_character_input)
                .chain()
                .in_set(CharacterSystems::Input),
        );

        app.add_systems(
            FixedUpdate,
            (
                (apply_gravity, apply_root_motion)
                    .chain()
                    .in_set(CharacterSystems::Forces),
                (detect_ground, dispatch_character_contacts)
                    .chain()
                    .in_set(CharacterSystems::Sensing),
                run_fixed_behaviours.in_set(CharacterSystems::Behaviours),
                (integrate_character_bodies, apply_body_translation, sync_body_rotation)
                    .chain()
                    .in_set(CharacterSystems::Integration),
            ),
        );

        app.add_systems(PostUpdate, run_late_behaviours.in_set(CharacterSystems::Late));
    }
}
