//! Collision groups персонажей и окружения

use bevy_rapier3d::prelude::*;

/// Капсулы персонажей
pub const CHARACTERS: Group = Group::GROUP_2;
/// Статическая геометрия уровня
pub const ENVIRONMENT: Group = Group::GROUP_3;

/// Персонаж сталкивается с окружением и другими персонажами
pub fn character_groups() -> CollisionGroups {
    CollisionGroups::new(CHARACTERS, ENVIRONMENT | CHARACTERS)
}

pub fn environment_groups() -> CollisionGroups {
    CollisionGroups::new(ENVIRONMENT, Group::ALL)
}
