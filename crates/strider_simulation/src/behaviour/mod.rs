//! Behaviour arbitration - какой behaviour ведёт персонажа
//!
//! Содержит:
//! - BehaviourCode (стабильные идентификаторы)
//! - Behaviour trait + BehaviourCtx (контракт)
//! - Arbiter (registration, temp lock, override queue)
//! - BehaviourManager (владелец behaviour'ов, driver фаз, sprint gate)

pub mod arbiter;
pub mod code;
pub mod contract;
pub mod manager;


pub use arbiter::*;
pub use code::*;
pub use contract::*;
pub use manager::*;
