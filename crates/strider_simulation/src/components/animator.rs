//! AnimatorParams - animation-facing параметры персонажа
//!
//! Animation graph - чёрный ящик; здесь только значения параметров,
//! которые он бы читал (и которые читает root motion stand-in).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::character::{damp_towards, AnimParam, AnimatorSink};

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct AnimatorParams {
    pub grounded: bool,
    pub jump: bool,
    pub aim: bool,
    pub speed: f32,
    pub h: f32,
    pub v: f32,
}

impl AnimatorParams {
    fn float_slot(&mut self, param: AnimParam) -> Option<&mut f32> {
        match param {
            AnimParam::Speed => Some(&mut self.speed),
            AnimParam::H => Some(&mut self.h),
            AnimParam::V => Some(&mut self.v),
            AnimParam::Grounded | AnimParam::Jump | AnimParam::Aim => None,
        }
    }

    fn bool_slot(&mut self, param: AnimParam) -> Option<&mut bool> {
        match param {
            AnimParam::Grounded => Some(&mut self.grounded),
            AnimParam::Jump => Some(&mut self.jump),
            AnimParam::Aim => Some(&mut self.aim),
            AnimParam::Speed | AnimParam::H | AnimParam::V => None,
        }
    }
}

// Несовпадение типа параметра (bool ↔ float) игнорируется, как в animation graph
impl AnimatorSink for AnimatorParams {
    fn set_bool(&mut self, param: AnimParam, value: bool) {
        if let Some(slot) = self.bool_slot(param) {
            *slot = value;
        }
    }

    fn get_bool(&self, param: AnimParam) -> bool {
        match param {
            AnimParam::Grounded => self.grounded,
            AnimParam::Jump => self.jump,
            AnimParam::Aim => self.aim,
            AnimParam::Speed | AnimParam::H | AnimParam::V => false,
        }
    }

    fn set_float(&mut self, param: AnimParam, value: f32) {
        if let Some(slot) = self.float_slot(param) {
            *slot = value;
        }
    }

    fn set_float_damped(&mut self, param: AnimParam, value: f32, damp_time: f32, delta_time: f32) {
        if let Some(slot) = self.float_slot(param) {
            *slot = damp_towards(*slot, value, damp_time, delta_time);
        }
    }

    fn get_float(&self, param: AnimParam) -> f32 {
        match param {
            AnimParam::Speed => self.speed,
            AnimParam::H => self.h,
            AnimParam::V => self.v,
            AnimParam::Grounded | AnimParam::Jump | AnimParam::Aim => 0.0,
        }
    }
}
