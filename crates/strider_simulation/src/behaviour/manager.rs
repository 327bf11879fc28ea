//! BehaviourManager - владелец behaviour'ов персонажа + driver фаз
//!
//! Порядок за кадр (см. `CharacterControllerPlugin`):
//! 1. `update` - input phase (флаги, animator H/V/Grounded, sprint FOV, хуки)
//! 2. `fixed_update` - активный набор, fallback в idle если никого нет
//! 3. `late_update` - активный набор (то же selection rule)
//!
//! Behaviour'ы вызываются в порядке подписки, override'ы - в порядке активации.

use bevy::prelude::*;

use super::{Arbiter, ArbiterConfig, Behaviour, BehaviourCode, BehaviourCtx, Contact};
use crate::character::{AnimParam, CharacterRig, InputFrame};
use crate::error::{ControllerError, ControllerResult};
use crate::logger::log_error;

struct BehaviourSlot {
    code: BehaviourCode,
    enabled: bool,
    behaviour: Box<dyn Behaviour>,
}

#[derive(Clone, Copy)]
enum Phase {
    Update,
    Fixed,
    Late,
    Contact(Contact),
}

#[derive(Component)]
pub struct BehaviourManager {
    arbiter: Arbiter,
    slots: Vec<BehaviourSlot>,
    missing_default_reported: bool,
}

impl Default for BehaviourManager {
    fn default() -> Self {
        Self::new(ArbiterConfig::default())
    }
}

impl BehaviourManager {
    pub fn new(config: ArbiterConfig) -> Self {
        Self {
            arbiter: Arbiter::new(config),
            slots: Vec::new(),
            missing_default_reported: false,
        }
    }

    /// Builder-вариант `subscribe`
    pub fn with_behaviour(mut self, behaviour: impl Behaviour) -> Self {
        self.subscribe(Box::new(behaviour));
        self
    }

    /// Добавить behaviour в watch list (дубликаты не проверяются)
    pub fn subscribe(&mut self, mut behaviour: Box<dyn Behaviour>) {
        let code = behaviour.code();
        self.arbiter.note_subscribed(code);
        behaviour.on_subscribe(&mut self.arbiter);
        self.slots.push(BehaviourSlot {
            code,
            enabled: true,
            behaviour,
        });
    }

    /// Assembly check: default зарегистрирован и подписан
    pub fn validate(&self) -> ControllerResult<()> {
        let default = self
            .arbiter
            .default_behaviour()
            .ok_or(ControllerError::MissingDefaultBehaviour)?;

        if !self.slots.iter().any(|slot| slot.code == default) {
            return Err(ControllerError::UnknownBehaviour(default));
        }
        Ok(())
    }

    pub fn arbiter(&self) -> &Arbiter {
        &self.arbiter
    }

    pub fn arbiter_mut(&mut self) -> &mut Arbiter {
        &mut self.arbiter
    }

    pub fn behaviour_codes(&self) -> Vec<BehaviourCode> {
        self.slots.iter().map(|slot| slot.code).collect()
    }

    pub fn behaviour<T: Behaviour>(&self) -> Option<&T> {
        self.slots.iter().find_map(|slot| {
            let behaviour: &dyn Behaviour = slot.behaviour.as_ref();
            behaviour.as_any().downcast_ref::<T>()
        })
    }

    pub fn behaviour_mut<T: Behaviour>(&mut self) -> Option<&mut T> {
        self.slots.iter_mut().find_map(|slot| {
            let behaviour: &mut dyn Behaviour = slot.behaviour.as_mut();
            behaviour.as_any_mut().downcast_mut::<T>()
        })
    }

    pub fn set_enabled(&mut self, code: BehaviourCode, enabled: bool) -> bool {
        let mut found = false;
        for slot in self.slots.iter_mut().filter(|slot| slot.code == code) {
            slot.enabled = enabled;
            found = true;
        }
        found
    }

    pub fn is_enabled(&self, code: BehaviourCode) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.code == code && slot.enabled)
    }

    // --- Arbiter API (делегирование + доставка on_overridden) ---

    pub fn register_default(&mut self, code: BehaviourCode) -> ControllerResult<()> {
        self.arbiter.register_default(code)
    }

    pub fn register_behaviour(&mut self, code: BehaviourCode) -> bool {
        self.arbiter.register_behaviour(code)
    }

    pub fn unregister_behaviour(&mut self, code: BehaviourCode) -> bool {
        self.arbiter.unregister_behaviour(code)
    }

    pub fn lock_temp(&mut self, code: BehaviourCode) -> bool {
        self.arbiter.lock_temp(code)
    }

    pub fn unlock_temp(&mut self, code: BehaviourCode) -> bool {
        self.arbiter.unlock_temp(code)
    }

    /// Override; если очередь была пустой - текущий behaviour получает
    /// `on_overridden` до возврата из этого вызова
    pub fn override_with(&mut self, code: BehaviourCode) -> bool {
        let queued = self.arbiter.override_with(code);
        self.deliver_override_notice();
        queued
    }

    pub fn revoke_override(&mut self, code: BehaviourCode) -> bool {
        self.arbiter.revoke_override(code)
    }

    pub fn is_overriding(&self) -> bool {
        self.arbiter.is_overriding()
    }

    pub fn is_overriding_with(&self, code: BehaviourCode) -> bool {
        self.arbiter.is_overriding_with(code)
    }

    /// Unanimous consent: все subscribed и все overriding разрешают sprint
    pub fn can_sprint(&self) -> bool {
        let subscribed = self.slots.iter().all(|slot| slot.behaviour.allows_sprint());
        let overriding = self.arbiter.override_queue().iter().all(|code| {
            self.slots
                .iter()
                .filter(|slot| slot.code == *code)
                .all(|slot| slot.behaviour.allows_sprint())
        });
        subscribed && overriding
    }

    pub fn is_sprinting(&self) -> bool {
        let input = self.arbiter.input();
        input.sprint_held && self.arbiter.is_moving() && self.can_sprint()
    }

    // --- Phases ---

    /// Input phase: сохранить input, обновить animator/camera флаги, вызвать хуки
    pub fn update(&mut self, input: InputFrame, rig: &mut CharacterRig<'_>, dt: f32) {
        self.arbiter.set_input(input);
        self.refresh_sprint_consent();

        let damp = self.arbiter.config().axis_damp_time;
        rig.animator
            .set_float_damped(AnimParam::H, input.horizontal, damp, dt);
        rig.animator
            .set_float_damped(AnimParam::V, input.vertical, damp, dt);

        if self.arbiter.is_sprinting() {
            self.arbiter.changed_fov = true;
            rig.camera.set_fov(self.arbiter.config().sprint_fov);
        } else if self.arbiter.changed_fov {
            rig.camera.reset_fov();
            self.arbiter.changed_fov = false;
        }

        rig.animator.set_bool(AnimParam::Grounded, rig.is_grounded());

        let enabled = self.enabled_slots();
        self.run_phase(&enabled, rig, dt, Phase::Update);
    }

    /// Physics step: активный набор; никого нет → gravity + reposition
    pub fn fixed_update(&mut self, rig: &mut CharacterRig<'_>, dt: f32) {
        self.report_missing_default();
        self.refresh_sprint_consent();

        let active = self.active_slots();
        self.run_phase(&active, rig, dt, Phase::Fixed);

        if active.is_empty() && !self.arbiter.is_overriding() {
            rig.body.set_use_gravity(true);
            self.arbiter.reposition(&mut *rig.body);
        }
    }

    pub fn late_update(&mut self, rig: &mut CharacterRig<'_>, dt: f32) {
        let active = self.active_slots();
        self.run_phase(&active, rig, dt, Phase::Late);
    }

    /// Collision enter/stay/exit → все subscribed + enabled
    pub fn notify_contact(&mut self, contact: Contact, rig: &mut CharacterRig<'_>, dt: f32) {
        let enabled = self.enabled_slots();
        self.run_phase(&enabled, rig, dt, Phase::Contact(contact));
    }

    /// Индексы слотов, которые ведут персонажа в этом шаге
    fn active_slots(&self) -> Vec<usize> {
        if self.arbiter.overrides_in_effect() {
            return self
                .arbiter
                .override_queue()
                .iter()
                .filter_map(|code| self.slots.iter().position(|slot| slot.code == *code))
                .collect();
        }

        let Some(current) = self.arbiter.current_behaviour() else {
            return Vec::new();
        };

        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.enabled && slot.code == current)
            .map(|(index, _)| index)
            .collect()
    }

    fn enabled_slots(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.enabled)
            .map(|(index, _)| index)
            .collect()
    }

    fn run_phase(&mut self, indices: &[usize], rig: &mut CharacterRig<'_>, dt: f32, phase: Phase) {
        for &index in indices {
            let input = self.arbiter.input();
            let slot = &mut self.slots[index];
            let mut ctx = BehaviourCtx {
                arbiter: &mut self.arbiter,
                rig: &mut *rig,
                input,
                dt,
            };

            match phase {
                Phase::Update => slot.behaviour.update(&mut ctx),
                Phase::Fixed => slot.behaviour.fixed_update(&mut ctx),
                Phase::Late => slot.behaviour.late_update(&mut ctx),
                Phase::Contact(contact) => slot.behaviour.on_contact(contact, &mut ctx),
            }

            // Override, запрошенный изнутри вызова, доставляем до следующего behaviour
            self.deliver_override_notice();
            self.refresh_sprint_consent();
        }
    }

    fn deliver_override_notice(&mut self) {
        if !self.arbiter.take_override_notice() {
            return;
        }

        let Some(current) = self.arbiter.current_behaviour() else {
            return;
        };

        if let Some(slot) = self
            .slots
            .iter_mut()
            .find(|slot| slot.enabled && slot.code == current)
        {
            slot.behaviour.on_overridden();
        }
    }

    fn refresh_sprint_consent(&mut self) {
        let consent = self.can_sprint();
        self.arbiter.set_sprint_consent(consent);
    }

    fn report_missing_default(&mut self) {
        if self.arbiter.default_behaviour().is_none() && !self.missing_default_reported {
            log_error("BehaviourManager: fixed step without default behaviour, idle fallback only");
            self.missing_default_reported = true;
        }
    }
}
