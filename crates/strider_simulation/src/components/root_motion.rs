//! RootMotion - stand-in для animation root motion

use bevy::prelude::*;

/// Root motion stand-in: animator Speed → планарная скорость
///
/// Animation root motion - чёрный ящик; headless симуляция приближает его
/// как `forward * Speed * meters_per_unit`.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct RootMotion {
    pub meters_per_unit: f32,
    pub enabled: bool,
}

impl Default for RootMotion {
    fn default() -> Self {
        Self {
            meters_per_unit: 4.0,
            enabled: true,
        }
    }
}
