//! Спавн персонажа: BehaviourManager + port-компоненты

use bevy::prelude::*;

use crate::aim::AimBehaviour;
use crate::behaviour::BehaviourManager;
use crate::character::FrictionCoefficients;
use crate::components::{CharacterBody, CharacterController, SurfaceFriction};
use crate::config::ControllerConfig;
use crate::locomotion::LocomotionBehaviour;
use crate::physics::rapier_character_bundle;

/// Стандартный набор: Locomotion (default) + Aim (override)
pub fn character_manager(config: &ControllerConfig) -> BehaviourManager {
    BehaviourManager::new(config.arbiter.clone())
        .with_behaviour(LocomotionBehaviour::new(config.locomotion.clone()))
        .with_behaviour(AimBehaviour::new(config.aim.clone()))
}

/// Bundle персонажа (остальное добавят Required Components)
pub fn character_bundle(position: Vec3, config: &ControllerConfig) -> impl Bundle {
    (
        CharacterController,
        character_manager(config),
        Transform::from_translation(position),
        CharacterBody::default(),
        SurfaceFriction(FrictionCoefficients::uniform(
            config.locomotion.default_friction,
        )),
    )
}

/// Headless персонаж (пол = плоскость y=0)
pub fn spawn_character(commands: &mut Commands, position: Vec3, config: &ControllerConfig) -> Entity {
    commands.spawn(character_bundle(position, config)).id()
}

/// Headless персонаж с конфигом из ресурса `ControllerConfig`
///
/// Нет ресурса → defaults.
pub fn spawn_configured_character(world: &mut World, position: Vec3) -> Entity {
    let config = world
        .get_resource::<ControllerConfig>()
        .cloned()
        .unwrap_or_default();
    world.spawn(character_bundle(position, &config)).id()
}

/// Персонаж с Rapier коллайдером (нужен `RapierBridgePlugin`)
pub fn spawn_rapier_character(
    commands: &mut Commands,
    position: Vec3,
    config: &ControllerConfig,
) -> Entity {
    commands
        .spawn((
            character_bundle(position, config),
            rapier_character_bundle(config.locomotion.default_friction),
        ))
        .id()
}
