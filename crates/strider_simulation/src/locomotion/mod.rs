//! Locomotion - default behaviour персонажа
//!
//! Содержит:
//! - LocomotionConfig (скорости, прыжок, трение)
//! - MotionState + JumpPhase (jump state machine, speed dial)
//! - LocomotionBehaviour (walk/run/sprint, camera-relative поворот, прыжок)

pub mod behaviour;
pub mod config;
pub mod state;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod locomotion_tests;

pub use behaviour::*;
pub use config::*;
pub use state::*;
