//! Стабильные идентификаторы behaviour'ов

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Идентификатор варианта behaviour
///
/// Явное перечисление: код назначается при компиляции, не выводится из типа
/// (никаких hash-of-TypeId - значения одинаковы между билдами и платформами).
///
/// Инвариант: два разных варианта никогда не совпадают. `Custom(n)` живёт
/// в отдельном namespace и не пересекается со встроенными вариантами.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum BehaviourCode {
    /// Locomotion (walk/run/sprint/jump) - default behaviour персонажа
    Locomotion,
    /// Aim (override поверх locomotion)
    Aim,
    /// Пользовательские behaviours (climb, cover, ...)
    Custom(u16),
}

impl BehaviourCode {
    pub fn name(&self) -> String {
        match self {
            BehaviourCode::Locomotion => "Locomotion".to_string(),
            BehaviourCode::Aim => "Aim".to_string(),
            BehaviourCode::Custom(id) => format!("Custom#{}", id),
        }
    }
}

impl std::fmt::Display for BehaviourCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_never_collide() {
        let codes: HashSet<_> = [
            BehaviourCode::Locomotion,
            BehaviourCode::Aim,
            BehaviourCode::Custom(0),
            BehaviourCode::Custom(1),
        ]
        .into_iter()
        .collect();

        assert_eq!(codes.len(), 4);
        assert_ne!(BehaviourCode::Custom(7), BehaviourCode::Aim);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(BehaviourCode::Locomotion.to_string(), "Locomotion");
        assert_eq!(BehaviourCode::Custom(3).to_string(), "Custom#3");
    }
}
