//! События персонажа

use bevy::prelude::*;

use crate::behaviour::Contact;

/// Контакт коллайдера персонажа (enter/stay/exit)
///
/// Пишет: Rapier bridge (или тесты / внешняя физика).
/// Читает: `dispatch_character_contacts` → `BehaviourManager::notify_contact`.
#[derive(Event, Debug, Clone, Copy)]
pub struct CharacterContact {
    pub character: Entity,
    /// С кем контакт
    pub other: Entity,
    pub contact: Contact,
}
