//! Общий контракт behaviour'ов (locomotion, aim, climb, ...)

use std::any::Any;

use bevy::prelude::*;

use super::{Arbiter, BehaviourCode};
use crate::character::{CharacterRig, InputFrame};

/// Фаза контакта с поверхностью
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ContactPhase {
    Enter,
    Stay,
    Exit,
}

/// Контакт коллайдера персонажа с поверхностью
///
/// `normal` - нормаль поверхности, направленная к персонажу
/// (пол = +Y, стена ≈ горизонтальная). Для `Exit` не используется.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Contact {
    pub phase: ContactPhase,
    pub normal: Vec3,
}

/// Всё, что behaviour видит во время одного вызова
pub struct BehaviourCtx<'a, 'r> {
    pub arbiter: &'a mut Arbiter,
    pub rig: &'a mut CharacterRig<'r>,
    /// Снимок input'а текущего кадра
    pub input: InputFrame,
    pub dt: f32,
}

/// Downcast helper (manager хранит `Box<dyn Behaviour>`)
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Behaviour персонажа
///
/// Фазы вызываются `BehaviourManager`:
/// - `update` - input phase, все subscribed + enabled (в порядке подписки)
/// - `fixed_update` / `late_update` - только активный набор (см. selection rule)
/// - `on_overridden` - текущий активный behaviour, когда очередь override
///   переходит из пустой в непустую
/// - `on_contact` - все subscribed + enabled
pub trait Behaviour: AsAny + Send + Sync {
    fn code(&self) -> BehaviourCode;

    /// Вызывается один раз из `BehaviourManager::subscribe` (self-registration)
    fn on_subscribe(&mut self, _arbiter: &mut Arbiter) {}

    fn update(&mut self, _ctx: &mut BehaviourCtx<'_, '_>) {}

    fn fixed_update(&mut self, ctx: &mut BehaviourCtx<'_, '_>);

    fn late_update(&mut self, _ctx: &mut BehaviourCtx<'_, '_>) {}

    fn on_overridden(&mut self) {}

    fn on_contact(&mut self, _contact: Contact, _ctx: &mut BehaviourCtx<'_, '_>) {}

    /// Голос в sprint gate (любой behaviour может наложить veto)
    fn allows_sprint(&self) -> bool {
        true
    }
}
