//! Arbiter: кто сейчас ведёт персонажа
//!
//! Состояние выбора без самих behaviour'ов (они живут в `BehaviourManager`),
//! поэтому behaviour может получить `&mut Arbiter` во время своего вызова:
//! - current / default behaviour (первый зарегистрировавшийся выигрывает)
//! - temporary lock (single-holder, advisory)
//! - override queue (порядок = порядок активации)
//! - per-frame флаги: input, sprint consent, last facing direction

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::BehaviourCode;
use crate::character::{flatten, look_rotation, InputFrame, RigidBodyPort};
use crate::error::{ControllerError, ControllerResult};
use crate::logger::{log, log_info, log_warning};

/// Параметры arbiter'а
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct ArbiterConfig {
    /// Slerp factor поворота к last direction (за fixed step)
    pub turn_smoothing: f32,
    /// FOV камеры во время sprint'а
    pub sprint_fov: f32,
    /// Damp time для animator H/V
    pub axis_damp_time: f32,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            turn_smoothing: 0.06,
            sprint_fov: 100.0,
            axis_damp_time: 0.1,
        }
    }
}

impl ArbiterConfig {
    pub fn validate(&self) -> ControllerResult<()> {
        if !(self.turn_smoothing > 0.0 && self.turn_smoothing <= 1.0) {
            return Err(ControllerError::invalid(
                "arbiter.turn_smoothing",
                format!("must be in (0, 1], got {}", self.turn_smoothing),
            ));
        }
        if !(self.sprint_fov > 0.0 && self.sprint_fov < 180.0) {
            return Err(ControllerError::invalid(
                "arbiter.sprint_fov",
                format!("must be in (0, 180), got {}", self.sprint_fov),
            ));
        }
        if self.axis_damp_time < 0.0 {
            return Err(ControllerError::invalid("arbiter.axis_damp_time", "must be >= 0"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Arbiter {
    config: ArbiterConfig,

    current: Option<BehaviourCode>,
    default: Option<BehaviourCode>,
    locked: Option<BehaviourCode>,

    /// Зеркало порядка подписки (manager владеет самими behaviour'ами)
    subscribed: Vec<BehaviourCode>,
    overriding: Vec<BehaviourCode>,
    /// Очередь стала непустой, on_overridden ещё не доставлен
    override_notice_pending: bool,

    input: InputFrame,
    sprint_consent: bool,
    last_direction: Vec3,
    pub(crate) changed_fov: bool,
}

impl Arbiter {
    pub fn new(config: ArbiterConfig) -> Self {
        Self {
            config,
            sprint_consent: true,
            ..default()
        }
    }

    pub fn config(&self) -> &ArbiterConfig {
        &self.config
    }

    // --- Registration ---

    /// Default behaviour (locomotion). Ровно один раз на персонажа.
    pub fn register_default(&mut self, code: BehaviourCode) -> ControllerResult<()> {
        if let Some(existing) = self.default {
            return Err(ControllerError::DefaultAlreadyRegistered {
                existing,
                requested: code,
            });
        }

        self.default = Some(code);
        self.current = Some(code);
        log_info(&format!("Arbiter: default behaviour = {}", code));
        Ok(())
    }

    /// Переключиться на `code`, только если сейчас активен default
    ///
    /// Non-default behaviour нельзя вытеснить другой регистрацией.
    pub fn register_behaviour(&mut self, code: BehaviourCode) -> bool {
        if self.current.is_none() || self.current != self.default {
            return false;
        }

        self.current = Some(code);
        log(&format!("Arbiter: current behaviour = {}", code));
        true
    }

    /// Вернуться к default, только если `code` сейчас текущий
    pub fn unregister_behaviour(&mut self, code: BehaviourCode) -> bool {
        if self.current != Some(code) {
            return false;
        }

        self.current = self.default;
        log(&format!("Arbiter: {} unregistered, back to default", code));
        true
    }

    pub fn current_behaviour(&self) -> Option<BehaviourCode> {
        self.current
    }

    pub fn default_behaviour(&self) -> Option<BehaviourCode> {
        self.default
    }

    pub fn is_current_behaviour(&self, code: BehaviourCode) -> bool {
        self.current == Some(code)
    }

    pub fn is_subscribed(&self, code: BehaviourCode) -> bool {
        self.subscribed.contains(&code)
    }

    pub(crate) fn note_subscribed(&mut self, code: BehaviourCode) {
        self.subscribed.push(code);
    }

    // --- Override queue ---

    /// Поставить `code` в очередь override (false - уже в очереди / не подписан)
    pub fn override_with(&mut self, code: BehaviourCode) -> bool {
        if self.overriding.contains(&code) {
            return false;
        }
        if !self.is_subscribed(code) {
            log_warning(&format!("Arbiter: override by unsubscribed behaviour {} refused", code));
            return false;
        }

        if self.overriding.is_empty() {
            self.override_notice_pending = true;
        }
        self.overriding.push(code);
        log(&format!("Arbiter: override by {} (queue: {})", code, self.overriding.len()));
        true
    }

    pub fn revoke_override(&mut self, code: BehaviourCode) -> bool {
        let Some(index) = self.overriding.iter().position(|c| *c == code) else {
            return false;
        };

        self.overriding.remove(index);
        // Очередь опустела до доставки notice - уведомлять некого
        if self.overriding.is_empty() {
            self.override_notice_pending = false;
        }
        log(&format!("Arbiter: override by {} revoked", code));
        true
    }

    pub fn is_overriding(&self) -> bool {
        !self.overriding.is_empty()
    }

    pub fn is_overriding_with(&self, code: BehaviourCode) -> bool {
        self.overriding.contains(&code)
    }

    pub fn override_queue(&self) -> &[BehaviourCode] {
        &self.overriding
    }

    pub(crate) fn take_override_notice(&mut self) -> bool {
        std::mem::take(&mut self.override_notice_pending)
    }

    // --- Temporary lock ---

    /// Захватить lock (только из unlocked). true - lock у `code` после вызова.
    pub fn lock_temp(&mut self, code: BehaviourCode) -> bool {
        match self.locked {
            None => {
                self.locked = Some(code);
                log(&format!("Arbiter: temp lock acquired by {}", code));
                true
            }
            Some(holder) => {
                if holder != code {
                    log(&format!("Arbiter: temp lock held by {}, {} ignored", holder, code));
                }
                holder == code
            }
        }
    }

    /// Освободить lock (только держатель)
    pub fn unlock_temp(&mut self, code: BehaviourCode) -> bool {
        if self.locked != Some(code) {
            return false;
        }

        self.locked = None;
        log(&format!("Arbiter: temp lock released by {}", code));
        true
    }

    pub fn locked_behaviour(&self) -> Option<BehaviourCode> {
        self.locked
    }

    /// Lock держит кто-то кроме `ignore` (None = кто угодно)
    pub fn temp_lock_status(&self, ignore: Option<BehaviourCode>) -> bool {
        self.locked.is_some() && self.locked != ignore
    }

    pub fn is_temp_locked(&self) -> bool {
        self.temp_lock_status(None)
    }

    /// Selection rule: lock или пустая очередь → current, иначе очередь
    pub fn overrides_in_effect(&self) -> bool {
        self.locked.is_none() && !self.overriding.is_empty()
    }

    // --- Per-frame state ---

    pub(crate) fn set_input(&mut self, input: InputFrame) {
        self.input = input;
    }

    pub(crate) fn set_sprint_consent(&mut self, consent: bool) {
        self.sprint_consent = consent;
    }

    pub fn input(&self) -> InputFrame {
        self.input
    }

    pub fn h(&self) -> f32 {
        self.input.horizontal
    }

    pub fn v(&self) -> f32 {
        self.input.vertical
    }

    pub fn is_moving(&self) -> bool {
        self.input.horizontal != 0.0 || self.input.vertical != 0.0
    }

    pub fn is_horizontal_moving(&self) -> bool {
        self.input.horizontal != 0.0
    }

    /// Sprint input + движение + единогласное согласие behaviour'ов
    pub fn is_sprinting(&self) -> bool {
        self.input.sprint_held && self.is_moving() && self.sprint_consent
    }

    pub fn last_direction(&self) -> Vec3 {
        self.last_direction
    }

    pub fn set_last_direction(&mut self, direction: Vec3) {
        self.last_direction = direction;
    }

    /// Плавный поворот к last facing direction (no-op если её нет)
    pub fn reposition(&self, body: &mut dyn RigidBodyPort) {
        let direction = flatten(self.last_direction);
        if direction == Vec3::ZERO {
            return;
        }

        let target = look_rotation(direction);
        let rotation = body.rotation().slerp(target, self.config.turn_smoothing);
        body.move_rotation(rotation);
    }
}
