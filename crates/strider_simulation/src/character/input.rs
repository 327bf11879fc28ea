//! Input source + snapshot одного кадра
//!
//! Input-device абстракция - чёрный ящик. Ядро читает оси/кнопки по
//! символьным именам один раз за кадр (input phase), дальше fixed/late
//! фазы работают со снимком `InputFrame`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum InputAxis {
    /// [-1, 1], +1 = вправо
    Horizontal,
    /// [-1, 1], +1 = вперёд (от камеры)
    Vertical,
    /// Колесо мыши / zoom (дельта за кадр)
    Scroll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum InputButton {
    Jump,
    Sprint,
    Aim,
    AimShoulder,
}

impl InputButton {
    pub const ALL: [InputButton; 4] = [
        InputButton::Jump,
        InputButton::Sprint,
        InputButton::Aim,
        InputButton::AimShoulder,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            InputButton::Jump => "Jump",
            InputButton::Sprint => "Sprint",
            InputButton::Aim => "Aim",
            InputButton::AimShoulder => "Aim Shoulder",
        }
    }
}

pub trait InputSource {
    fn axis(&self, axis: InputAxis) -> f32;
    /// Rising edge в этом кадре
    fn button_down(&self, button: InputButton) -> bool;
    fn button_held(&self, button: InputButton) -> bool;
}

/// Снимок input'а за кадр
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct InputFrame {
    pub horizontal: f32,
    pub vertical: f32,
    pub scroll: f32,
    pub jump_down: bool,
    pub sprint_held: bool,
    pub aim_held: bool,
    pub shoulder_down: bool,
}

impl InputFrame {
    pub fn sample(source: &dyn InputSource) -> Self {
        Self {
            horizontal: source.axis(InputAxis::Horizontal),
            vertical: source.axis(InputAxis::Vertical),
            scroll: source.axis(InputAxis::Scroll),
            jump_down: source.button_down(InputButton::Jump),
            sprint_held: source.button_held(InputButton::Sprint),
            aim_held: source.button_held(InputButton::Aim),
            shoulder_down: source.button_down(InputButton::AimShoulder),
        }
    }

    /// Хелпер для тестов/скриптов: только оси движения
    pub fn axes(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
            ..default()
        }
    }
}
