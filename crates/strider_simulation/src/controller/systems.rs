//! Системы фаз BehaviourManager
//!
//! Input phase (PreUpdate) → fixed phase (FixedUpdate, Behaviours set) →
//! late phase (PostUpdate). Каждая система собирает `CharacterRig` из
//! компонентов персонажа и отдаёт его менеджеру.

use bevy::prelude::*;

use super::CharacterContact;
use crate::behaviour::BehaviourManager;
use crate::character::{CharacterRig, InputFrame};
use crate::components::{
    AnimatorParams, CharacterBody, CharacterController, ControllerInput, FollowCamera, GroundProbe,
    SurfaceFriction,
};
use crate::logger::log_error;
use crate::physics::WorldGravity;

/// Компоненты, из которых собирается `CharacterRig`
pub type CharacterParts = (
    &'static mut BehaviourManager,
    &'static mut CharacterBody,
    &'static GroundProbe,
    &'static mut AnimatorParams,
    &'static mut FollowCamera,
    &'static mut SurfaceFriction,
);

fn character_rig<'a>(
    body: &'a mut CharacterBody,
    ground: &'a GroundProbe,
    animator: &'a mut AnimatorParams,
    camera: &'a mut FollowCamera,
    surface: &'a mut SurfaceFriction,
    gravity: Vec3,
) -> CharacterRig<'a> {
    CharacterRig {
        body,
        ground,
        animator,
        camera,
        surface,
        gravity,
    }
}

/// Персонаж без default behaviour → error (один раз, при спавне)
pub fn report_invalid_characters(query: Query<(Entity, &BehaviourManager), Added<BehaviourManager>>) {
    for (entity, manager) in query.iter() {
        if let Err(err) = manager.validate() {
            log_error(&format!("{:?}: {}", entity, err));
        }
    }
}

/// Input phase: снимок ControllerInput → manager.update, затем edges сброшены
pub fn sample_character_input(
    mut query: Query<(CharacterParts, &mut ControllerInput), With<CharacterController>>,
    gravity: Res<WorldGravity>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for ((mut manager, mut body, ground, mut animator, mut camera, mut surface), mut input) in
        query.iter_mut()
    {
        let frame = InputFrame::sample(&*input);
        let mut rig = character_rig(
            &mut body,
            ground,
            &mut animator,
            &mut camera,
            &mut surface,
            gravity.0,
        );

        manager.update(frame, &mut rig, delta);
        input.end_frame();
    }
}

/// CharacterContact events → notify_contact нужного персонажа
pub fn dispatch_character_contacts(
    mut events: EventReader<CharacterContact>,
    mut query: Query<CharacterParts, With<CharacterController>>,
    gravity: Res<WorldGravity>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for event in events.read() {
        let Ok((mut manager, mut body, ground, mut animator, mut camera, mut surface)) =
            query.get_mut(event.character)
        else {
            continue;
        };

        let mut rig = character_rig(
            &mut body,
            ground,
            &mut animator,
            &mut camera,
            &mut surface,
            gravity.0,
        );
        manager.notify_contact(event.contact, &mut rig, delta);
    }
}

/// Fixed phase: активный набор behaviour'ов (или fallback)
pub fn run_fixed_behaviours(
    mut query: Query<CharacterParts, With<CharacterController>>,
    gravity: Res<WorldGravity>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut manager, mut body, ground, mut animator, mut camera, mut surface) in query.iter_mut() {
        let mut rig = character_rig(
            &mut body,
            ground,
            &mut animator,
            &mut camera,
            &mut surface,
            gravity.0,
        );
        manager.fixed_update(&mut rig, delta);
    }
}

/// Late phase: после физики и анимации (поворот к камере в aim)
pub fn run_late_behaviours(
    mut query: Query<CharacterParts, With<CharacterController>>,
    gravity: Res<WorldGravity>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (mut manager, mut body, ground, mut animator, mut camera, mut surface) in query.iter_mut() {
        let mut rig = character_rig(
            &mut body,
            ground,
            &mut animator,
            &mut camera,
            &mut surface,
            gravity.0,
        );
        manager.late_update(&mut rig, delta);
    }
}
