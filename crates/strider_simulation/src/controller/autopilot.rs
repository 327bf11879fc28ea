//! Autopilot - scripted input для headless прогонов
//!
//! Каждые 0.5..2с выбирает новый сегмент (оси, sprint, aim, прыжок,
//! вращение камеры) из `DeterministicRng`. Одинаковый seed → одинаковый
//! input → одинаковая траектория.

use bevy::prelude::*;
use rand::Rng;

use crate::character::InputButton;
use crate::components::{ControllerInput, FollowCamera};
use crate::DeterministicRng;

#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct AutopilotSegment {
    pub horizontal: f32,
    pub vertical: f32,
    pub sprint: bool,
    pub aim: bool,
    /// Прыжок в начале сегмента
    pub jump: bool,
    /// rad/s
    pub yaw_rate: f32,
}

#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct Autopilot {
    pub segment: AutopilotSegment,
    /// Секунд до следующего сегмента
    pub remaining: f32,
}

impl Autopilot {
    fn next_segment(&mut self, rng: &mut impl Rng) {
        let aim = rng.gen_bool(0.2);

        self.segment = AutopilotSegment {
            horizontal: rng.gen_range(-1.0..=1.0),
            vertical: rng.gen_range(-0.2..=1.0),
            sprint: !aim && rng.gen_bool(0.3),
            aim,
            jump: !aim && rng.gen_bool(0.25),
            yaw_rate: rng.gen_range(-1.0..1.0),
        };
        self.remaining = rng.gen_range(0.5..2.0);
    }
}

/// Система: Autopilot → ControllerInput + FollowCamera (до input phase)
pub fn drive_autopilot(
    mut query: Query<(&mut Autopilot, &mut ControllerInput, &mut FollowCamera)>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (mut autopilot, mut input, mut camera) in query.iter_mut() {
        autopilot.remaining -= delta;

        let started = autopilot.remaining <= 0.0;
        if started {
            autopilot.next_segment(&mut rng.rng);
        }

        let segment = autopilot.segment;
        input.set_axes(segment.horizontal, segment.vertical);
        input.set_held(InputButton::Sprint, segment.sprint);
        input.set_held(InputButton::Aim, segment.aim);
        input.set_held(InputButton::Jump, started && segment.jump);
        camera.orbit(segment.yaw_rate * delta, 0.0);
    }
}
