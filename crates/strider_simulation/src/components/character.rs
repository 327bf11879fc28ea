//! CharacterController - маркер управляемого персонажа

use bevy::prelude::*;

use super::{AnimatorParams, CharacterBody, ControllerInput, FollowCamera, GroundProbe, RootMotion, SurfaceFriction};

/// Персонаж под управлением `BehaviourManager`
///
/// Автоматически добавляет все port-компоненты через Required Components.
/// Сам `BehaviourManager` вставляется при спавне (`spawn_character`),
/// т.к. набор behaviour'ов зависит от конфига.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(
    Transform,
    CharacterBody,
    GroundProbe,
    AnimatorParams,
    FollowCamera,
    ControllerInput,
    SurfaceFriction,
    RootMotion
)]
pub struct CharacterController;
