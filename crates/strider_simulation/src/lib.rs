//! STRIDER Simulation Core
//!
//! Third-person character controller на Bevy 0.16 (headless, ECS).
//!
//! Архитектура:
//! - behaviour = арбитраж (Arbiter + BehaviourManager): кто сейчас ведёт персонажа
//! - locomotion / aim = конкретные behaviour'ы
//! - character = порты к коллабораторам (тело, земля, animator, камера, material)
//! - components + physics + controller = ECS реализация портов и расписание фаз
//!
//! Headless режим: пол = плоскость y=0, Rapier подключается через `RapierBridgePlugin`.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::time::Duration;

// Публичные модули
pub mod aim;
pub mod behaviour;
pub mod character;
pub mod components;
pub mod config;
pub mod controller;
pub mod error;
pub mod locomotion;
pub mod logger;
pub mod physics;

// Re-export для удобства
pub use aim::{AimBehaviour, AimConfig, AimPhase};
pub use behaviour::{
    Arbiter, ArbiterConfig, Behaviour, BehaviourCode, BehaviourCtx, BehaviourManager, Contact,
    ContactPhase,
};
pub use components::*;
pub use config::ControllerConfig;
pub use controller::{
    character_bundle, character_manager, spawn_character, spawn_configured_character,
    spawn_rapier_character, Autopilot,
    CharacterContact, CharacterControllerPlugin, CharacterSystems,
};
pub use error::{ControllerError, ControllerResult};
pub use locomotion::{JumpPhase, LocomotionBehaviour, LocomotionConfig};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel, LogPrinter};
pub use physics::{RapierBridgePlugin, WorldGravity};

/// Fixed tick симуляции
pub const SIMULATION_HZ: f64 = 60.0;

/// Главный plugin симуляции
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Fixed timestep 60Hz (physics phase персонажа)
        app.insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ));

        // Детерминистичный RNG (seed по умолчанию, если headless app не задал свой)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.add_plugins(CharacterControllerPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время продвигается ровно на 1/60с за `app.update()` (не wall clock):
/// после первого кадра каждый update = один fixed step.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / SIMULATION_HZ,
        )))
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Состояние одного персонажа в snapshot'е
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterSnapshot {
    pub entity: u32,
    pub translation: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub grounded: bool,
    pub speed: f32,
    pub current_behaviour: Option<BehaviourCode>,
    pub overriding: bool,
}

/// Snapshot всех персонажей (отсортирован по Entity index)
pub fn character_snapshots(world: &mut World) -> Vec<CharacterSnapshot> {
    let mut query = world.query_filtered::<
        (Entity, &Transform, &CharacterBody, &GroundProbe, &AnimatorParams, &BehaviourManager),
        With<CharacterController>,
    >();

    let mut snapshots: Vec<_> = query
        .iter(world)
        .map(
            |(entity, transform, body, probe, animator, manager)| CharacterSnapshot {
                entity: entity.index(),
                translation: transform.translation,
                rotation: transform.rotation,
                velocity: body.velocity,
                grounded: probe.grounded,
                speed: animator.speed,
                current_behaviour: manager.arbiter().current_behaviour(),
                overriding: manager.is_overriding(),
            },
        )
        .collect();

    // Сортируем по Entity ID для детерминизма
    snapshots.sort_by_key(|snapshot| snapshot.entity);
    snapshots
}

/// Snapshot мира для сравнения детерминизма (JSON байты)
pub fn world_snapshot(world: &mut World) -> ControllerResult<Vec<u8>> {
    Ok(serde_json::to_vec(&character_snapshots(world))?)
}
