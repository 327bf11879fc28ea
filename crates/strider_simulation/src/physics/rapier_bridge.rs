//! Мост в Rapier через KinematicCharacterController
//!
//! Поток за fixed step:
//! 1. `feed_rapier_controller` - frame_translation персонажа → controller.translation
//! 2. Rapier step (character controller двигает коллайдер, пишет output)
//! 3. `read_rapier_controller_output` - grounded → GroundProbe, diff коллизий
//!    против прошлого шага → `CharacterContact` enter/stay/exit
//!
//! Контакты доходят до behaviour'ов в Sensing фазе следующего шага.
//! Rapier работает в том же FixedUpdate, что и фазы персонажа
//! (`RapierPhysicsPlugin::in_schedule(FixedUpdate)`), иначе порядок не задать.

use bevy::prelude::*;
use bevy_rapier3d::plugin::PhysicsSet;
use bevy_rapier3d::control::CharacterCollision;
use bevy_rapier3d::prelude::*;

use crate::behaviour::{Contact, ContactPhase};
use crate::components::{CharacterBody, CharacterController, GroundProbe, SurfaceFriction};
use crate::controller::{CharacterContact, CharacterSystems};
use crate::logger::log_info;

/// Контакты персонажа на прошлом шаге
#[derive(Component, Debug, Clone, Default)]
pub struct ActiveContacts {
    pub entities: Vec<Entity>,
}

/// Plugin моста (CharacterControllerPlugin должен быть уже добавлен)
pub struct RapierBridgePlugin;

impl Plugin for RapierBridgePlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<RapierPhysicsPlugin<NoUserData>>() {
            app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_schedule(FixedUpdate));
        }

        app.add_systems(
            FixedUpdate,
            (feed_rapier_controller, sync_friction_to_rapier)
                .after(CharacterSystems::Integration)
                .before(PhysicsSet::SyncBackend),
        )
        .add_systems(
            FixedUpdate,
            read_rapier_controller_output.after(PhysicsSet::Writeback),
        );

        log_info("RapierBridgePlugin: character controller bridged to Rapier");
    }
}

/// Rapier-компоненты персонажа (вставляются поверх `spawn_character`)
///
/// Capsule 1.8m, origin в ступнях (collider смещён вверх на половину высоты).
pub fn rapier_character_bundle(friction: f32) -> impl Bundle {
    (
        RigidBody::KinematicPositionBased,
        Collider::compound(vec![(
            Vec3::Y * 0.9,
            Quat::IDENTITY,
            Collider::capsule_y(0.5, 0.4),
        )]),
        KinematicCharacterController {
            offset: CharacterLength::Absolute(0.01),
            // Прилипание к полу делает ground clamp, не controller
            snap_to_ground: None,
            filter_groups: Some(super::character_groups()),
            ..default()
        },
        super::character_groups(),
        Friction::coefficient(friction),
        ActiveContacts::default(),
    )
}

/// Система: frame_translation → KinematicCharacterController.translation
pub fn feed_rapier_controller(
    mut query: Query<(&CharacterBody, &mut KinematicCharacterController), With<CharacterController>>,
) {
    for (body, mut controller) in query.iter_mut() {
        controller.translation = Some(body.frame_translation);
    }
}

/// Система: SurfaceFriction → Rapier Friction (только при изменении)
pub fn sync_friction_to_rapier(
    mut query: Query<(&SurfaceFriction, &mut Friction), Changed<SurfaceFriction>>,
) {
    for (surface, mut friction) in query.iter_mut() {
        friction.coefficient = surface.0.dynamic_friction;
    }
}

/// Система: controller output → GroundProbe + CharacterContact события
pub fn read_rapier_controller_output(
    mut query: Query<
        (
            Entity,
            &KinematicCharacterControllerOutput,
            &mut GroundProbe,
            &mut CharacterBody,
            &mut ActiveContacts,
        ),
        With<CharacterController>,
    >,
    mut contacts: EventWriter<CharacterContact>,
) {
    for (entity, output, mut probe, mut body, mut active) in query.iter_mut() {
        probe.grounded = output.grounded;
        if output.grounded && body.velocity.y < 0.0 {
            body.velocity.y = 0.0;
        }

        let mut current: Vec<(Entity, Vec3)> = Vec::with_capacity(output.collisions.len());
        for collision in output.collisions.iter() {
            if current.iter().any(|(other, _)| *other == collision.entity) {
                continue;
            }
            current.push((collision.entity, collision_normal(collision)));
        }

        for (other, contact) in diff_contacts(&active.entities, &current) {
            contacts.write(CharacterContact {
                character: entity,
                other,
                contact,
            });
        }

        active.entities = current.iter().map(|(other, _)| *other).collect();
    }
}

/// Нормаль препятствия в сторону персонажа (нет деталей → считаем полом)
fn collision_normal(collision: &CharacterCollision) -> Vec3 {
    collision
        .hit
        .details
        .as_ref()
        .map(|details| -details.normal1)
        .unwrap_or(Vec3::Y)
}

/// Enter/Stay для текущих контактов, Exit для пропавших
pub fn diff_contacts(previous: &[Entity], current: &[(Entity, Vec3)]) -> Vec<(Entity, Contact)> {
    let mut events = Vec::with_capacity(previous.len() + current.len());

    for (other, normal) in current {
        let phase = if previous.contains(other) {
            ContactPhase::Stay
        } else {
            ContactPhase::Enter
        };
        events.push((
            *other,
            Contact {
                phase,
                normal: *normal,
            },
        ));
    }

    for other in previous {
        if !current.iter().any(|(entity, _)| entity == other) {
            events.push((
                *other,
                Contact {
                    phase: ContactPhase::Exit,
                    normal: Vec3::ZERO,
                },
            ));
        }
    }

    events
}
