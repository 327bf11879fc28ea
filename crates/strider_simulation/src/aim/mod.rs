//! Aim - override поверх locomotion
//!
//! Содержит:
//! - AimConfig (задержки, offsets камеры, turn smoothing)
//! - AimPhase (таймерная state machine: Idle → Engaging → Aiming → Releasing → Revoking)
//! - AimBehaviour

pub mod behaviour;
pub mod config;


pub use behaviour::*;
pub use config::*;
