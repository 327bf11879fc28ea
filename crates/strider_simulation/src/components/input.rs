//! ControllerInput - input device персонажа
//!
//! Пишут: autopilot (headless), тесты, клиентский input layer.
//! Читает: `sample_character_input` раз за кадр, после чего edges
//! (`just_pressed`) и scroll сбрасываются через `end_frame`.

use bevy::prelude::*;

use crate::character::{InputAxis, InputButton, InputSource};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub struct ButtonState {
    pub held: bool,
    /// Rising edge в текущем кадре
    pub just_pressed: bool,
}

#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct ControllerInput {
    pub horizontal: f32,
    pub vertical: f32,
    /// Накопленный scroll за кадр
    ///
    /// Снимок кадра прибавляется к speed dial на каждом fixed step этого
    /// кадра (при двух шагах за кадр scroll срабатывает дважды).
    pub scroll: f32,
    /// Индексация по `InputButton::ALL`
    buttons: [ButtonState; 4],
}

impl ControllerInput {
    fn index(button: InputButton) -> usize {
        match button {
            InputButton::Jump => 0,
            InputButton::Sprint => 1,
            InputButton::Aim => 2,
            InputButton::AimShoulder => 3,
        }
    }

    pub fn set_axes(&mut self, horizontal: f32, vertical: f32) {
        self.horizontal = horizontal.clamp(-1.0, 1.0);
        self.vertical = vertical.clamp(-1.0, 1.0);
    }

    pub fn add_scroll(&mut self, delta: f32) {
        self.scroll += delta;
    }

    pub fn press(&mut self, button: InputButton) {
        let state = &mut self.buttons[Self::index(button)];
        if !state.held {
            state.just_pressed = true;
        }
        state.held = true;
    }

    pub fn release(&mut self, button: InputButton) {
        self.buttons[Self::index(button)].held = false;
    }

    /// press/release по флагу (для скриптов, где кнопка задана состоянием)
    pub fn set_held(&mut self, button: InputButton, held: bool) {
        if held {
            self.press(button);
        } else {
            self.release(button);
        }
    }

    pub fn button(&self, button: InputButton) -> ButtonState {
        self.buttons[Self::index(button)]
    }

    /// Конец кадра: edges и scroll потреблены
    pub fn end_frame(&mut self) {
        for state in self.buttons.iter_mut() {
            state.just_pressed = false;
        }
        self.scroll = 0.0;
    }
}

impl InputSource for ControllerInput {
    fn axis(&self, axis: InputAxis) -> f32 {
        match axis {
            InputAxis::Horizontal => self.horizontal,
            InputAxis::Vertical => self.vertical,
            InputAxis::Scroll => self.scroll,
        }
    }

    fn button_down(&self, button: InputButton) -> bool {
        self.button(button).just_pressed
    }

    fn button_held(&self, button: InputButton) -> bool {
        self.button(button).held
    }
}
