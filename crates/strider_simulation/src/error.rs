//! Ошибки сборки персонажа и конфигов
//!
//! Runtime-арбитраж ошибок не возвращает (mismatched code = no-op + bool).
//! Этот тип появляется только на этапе assembly: регистрация default,
//! валидация конфигов, парсинг JSON.

use thiserror::Error;

use crate::behaviour::BehaviourCode;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("no default behaviour registered")]
    MissingDefaultBehaviour,

    #[error("default behaviour already registered as {existing:?}, refused {requested:?}")]
    DefaultAlreadyRegistered {
        existing: BehaviourCode,
        requested: BehaviourCode,
    },

    #[error("behaviour {0:?} is not subscribed")]
    UnknownBehaviour(BehaviourCode),

    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("config read error: {0}")]
    ConfigRead(#[from] std::io::Error),
}

pub type ControllerResult<T> = Result<T, ControllerError>;

impl ControllerError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
