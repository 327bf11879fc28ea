//! Controller - ECS driver персонажа
//!
//! Содержит:
//! - CharacterControllerPlugin + CharacterSystems (порядок фаз)
//! - systems (input / fixed / late фазы, доставка контактов)
//! - CharacterContact event
//! - spawn helpers
//! - Autopilot (scripted input для headless runner'а)

pub mod autopilot;
pub mod events;
pub mod plugin;
pub mod spawn;
pub mod systems;

pub use autopilot::*;
pub use events::*;
pub use plugin::*;
pub use spawn::*;
pub use systems::*;
