//! Tests for LocomotionBehaviour (jump state machine, speed dial, orientation)

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::*;
    use crate::behaviour::{Behaviour, BehaviourCode, BehaviourCtx, BehaviourManager, Contact, ContactPhase};
    use crate::character::testing::MockWorld;
    use crate::character::{look_rotation, AnimParam, AnimatorSink, FrictionCoefficients, InputFrame, RigidBodyPort};

    const DT: f32 = 1.0 / 60.0;
    const OTHER: BehaviourCode = BehaviourCode::Custom(1);

    /// Behaviour без логики (для override / register сценариев)
    struct Passive;

    impl Behaviour for Passive {
        fn code(&self) -> BehaviourCode {
            OTHER
        }

        fn fixed_update(&mut self, _ctx: &mut BehaviourCtx<'_, '_>) {}
    }

    struct Harness {
        manager: BehaviourManager,
        world: MockWorld,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                manager: BehaviourManager::default()
                    .with_behaviour(LocomotionBehaviour::default())
                    .with_behaviour(Passive),
                world: MockWorld::grounded(),
            }
        }

        fn step(&mut self, input: InputFrame) {
            self.manager.update(input, &mut self.world.rig(), DT);
            self.manager.fixed_update(&mut self.world.rig(), DT);
            self.manager.late_update(&mut self.world.rig(), DT);
        }

        fn contact(&mut self, phase: ContactPhase, normal: Vec3) {
            self.manager
                .notify_contact(Contact { phase, normal }, &mut self.world.rig(), DT);
        }

        fn locomotion(&self) -> &LocomotionBehaviour {
            self.manager.behaviour::<LocomotionBehaviour>().unwrap()
        }

        /// Разгон, чтобы animator Speed ушёл выше run-jump порога
        fn run_up(&mut self) {
            for _ in 0..10 {
                self.step(InputFrame::axes(0.0, 1.0));
            }
            assert!(self.world.animator.get_float(AnimParam::Speed) > 0.1);
        }
    }

    fn jump_press(vertical: f32) -> InputFrame {
        InputFrame {
            vertical,
            jump_down: true,
            ..default()
        }
    }

    #[test]
    fn test_subscribe_registers_default() {
        let harness = Harness::new();
        let arbiter = harness.manager.arbiter();

        assert_eq!(arbiter.default_behaviour(), Some(BehaviourCode::Locomotion));
        assert!(arbiter.is_current_behaviour(BehaviourCode::Locomotion));
        assert!(harness.manager.validate().is_ok());
    }

    #[test]
    fn test_run_jump_single_impulse_and_landing() {
        let mut harness = Harness::new();
        harness.run_up();

        harness.step(jump_press(1.0));

        let expected = (2.0 * 9.81_f32 * 1.5).sqrt();
        assert_eq!(harness.world.body.impulses.len(), 1);
        assert!((harness.world.body.impulses[0].y - expected).abs() < 1e-4);
        assert_eq!(harness.locomotion().jump_phase(), JumpPhase::Airborne);
        assert_eq!(
            harness.manager.arbiter().locked_behaviour(),
            Some(BehaviourCode::Locomotion)
        );
        assert_eq!(harness.world.surface.friction, FrictionCoefficients::ZERO);
        assert!(harness.world.animator.get_bool(AnimParam::Jump));

        // В воздухе: повторное нажатие ничего не даёт, air control работает
        harness.world.ground.grounded = false;
        harness.step(jump_press(1.0));
        harness.step(jump_press(1.0));
        assert_eq!(harness.world.body.impulses.len(), 1);
        assert_eq!(harness.world.body.accelerations.len(), 2);
        let push = harness.world.body.accelerations[0];
        assert!((push.length() - 10.0 * 9.81 * 2.0).abs() < 1e-2, "push = {:?}", push);

        // Ground есть, но ещё летим вверх - не приземление
        harness.world.ground.grounded = true;
        harness.world.body.velocity.y = 2.0;
        harness.step(InputFrame::axes(0.0, 1.0));
        assert_eq!(harness.locomotion().jump_phase(), JumpPhase::Airborne);
        assert!(harness.locomotion().is_jump_pending());

        harness.world.body.velocity.y = -1.0;
        harness.step(InputFrame::axes(0.0, 1.0));
        let locomotion = harness.locomotion();
        assert_eq!(locomotion.jump_phase(), JumpPhase::Grounded);
        assert!(!locomotion.is_jump_pending());
        assert_eq!(harness.manager.arbiter().locked_behaviour(), None);
        assert_eq!(harness.world.surface.friction, FrictionCoefficients::uniform(0.6));
        assert!(!harness.world.animator.get_bool(AnimParam::Jump));

        // Без нового нажатия второго прыжка нет
        harness.step(InputFrame::axes(0.0, 1.0));
        assert_eq!(harness.world.body.impulses.len(), 1);
    }

    #[test]
    fn test_press_before_grounded_jumps_on_touchdown() {
        let mut harness = Harness::new();
        harness.run_up();

        harness.world.ground.grounded = false;
        harness.step(jump_press(1.0));
        assert!(harness.locomotion().is_jump_pending());
        assert_eq!(harness.locomotion().jump_phase(), JumpPhase::Grounded);
        assert!(harness.world.body.impulses.is_empty());

        harness.world.ground.grounded = true;
        harness.step(InputFrame::axes(0.0, 1.0));
        assert_eq!(harness.world.body.impulses.len(), 1);
        assert_eq!(harness.locomotion().jump_phase(), JumpPhase::Airborne);
    }

    #[test]
    fn test_latch_ignored_while_overridden() {
        let mut harness = Harness::new();
        assert!(harness.manager.override_with(OTHER));

        harness.step(jump_press(0.0));
        assert!(!harness.locomotion().is_jump_pending());
    }

    #[test]
    fn test_latch_ignored_when_not_current() {
        let mut harness = Harness::new();
        assert!(harness.manager.register_behaviour(OTHER));

        harness.step(jump_press(0.0));
        assert!(!harness.locomotion().is_jump_pending());
    }

    #[test]
    fn test_standing_hop_has_no_impulse() {
        let mut harness = Harness::new();

        harness.step(jump_press(0.0));
        assert!(harness.world.body.impulses.is_empty());
        assert_eq!(harness.locomotion().jump_phase(), JumpPhase::Airborne);
        assert_eq!(
            harness.manager.arbiter().locked_behaviour(),
            Some(BehaviourCode::Locomotion)
        );
        // Трение не трогаем
        assert_eq!(harness.world.surface.friction, FrictionCoefficients::uniform(0.6));

        // grounded + velocity.y == 0 → ещё не приземлились
        harness.step(InputFrame::default());
        assert_eq!(harness.locomotion().jump_phase(), JumpPhase::Airborne);

        harness.world.body.velocity.y = -0.2;
        harness.step(InputFrame::default());
        assert_eq!(harness.locomotion().jump_phase(), JumpPhase::Grounded);
        assert_eq!(harness.manager.arbiter().locked_behaviour(), None);
    }

    #[test]
    fn test_speed_dial_clamped_to_walk_and_run() {
        let mut harness = Harness::new();
        assert_eq!(harness.locomotion().speed_seeker(), 1.0);

        let scroll_down = InputFrame {
            vertical: 1.0,
            scroll: -0.1,
            ..default()
        };
        for _ in 0..30 {
            harness.step(scroll_down);
            assert!(harness.locomotion().speed_seeker() >= 0.15);
        }
        assert!((harness.locomotion().speed_seeker() - 0.15).abs() < 1e-6);
        assert!((harness.locomotion().state().current_speed - 0.15).abs() < 1e-6);

        let scroll_up = InputFrame {
            scroll: 0.1,
            ..scroll_down
        };
        for _ in 0..30 {
            harness.step(scroll_up);
            assert!(harness.locomotion().speed_seeker() <= 1.0);
        }
        assert!((harness.locomotion().speed_seeker() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_frame_scroll_applied_on_every_fixed_step() {
        let mut harness = Harness::new();
        let frame = InputFrame {
            vertical: 1.0,
            scroll: -0.1,
            ..default()
        };

        // Один кадр input'а, два fixed step'а в нём
        harness.manager.update(frame, &mut harness.world.rig(), DT);
        harness.manager.fixed_update(&mut harness.world.rig(), DT);
        harness.manager.fixed_update(&mut harness.world.rig(), DT);

        assert!((harness.locomotion().speed_seeker() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_speed_input_clamped_and_sprint_overrides() {
        let mut harness = Harness::new();

        harness.step(InputFrame::axes(0.6, 0.8));
        assert!((harness.locomotion().state().current_speed - 1.0).abs() < 1e-5);

        harness.step(InputFrame {
            vertical: 1.0,
            sprint_held: true,
            ..default()
        });
        assert!(harness.manager.is_sprinting());
        assert_eq!(harness.locomotion().state().current_speed, 2.0);

        // Speed в animator сглажен, не мгновенный
        let animated = harness.world.animator.get_float(AnimParam::Speed);
        assert!(animated < 2.0, "animated = {}", animated);
    }

    #[test]
    fn test_pinned_axes_reposition_to_last_direction() {
        let mut harness = Harness::new();
        harness.manager.arbiter_mut().set_last_direction(Vec3::X);

        harness.step(InputFrame::axes(0.95, 0.95));

        let expected = Quat::IDENTITY.slerp(look_rotation(Vec3::X), 0.06);
        assert!(harness.world.body.rotation.abs_diff_eq(expected, 1e-5));
        assert_eq!(harness.manager.arbiter().last_direction(), Vec3::X);
    }

    #[test]
    fn test_moderate_axes_rotate_toward_camera() {
        let mut harness = Harness::new();
        harness.manager.arbiter_mut().set_last_direction(Vec3::X);

        harness.step(InputFrame::axes(0.5, 0.5));

        // Камера смотрит вдоль -Z: target = forward * 0.5 + right * 0.5
        let target = Vec3::new(0.5, 0.0, -0.5);
        let expected = Quat::IDENTITY.slerp(look_rotation(target), 0.06);
        assert!(harness.world.body.rotation.abs_diff_eq(expected, 1e-5));
        assert!(harness.manager.arbiter().last_direction().abs_diff_eq(target, 1e-5));
    }

    #[test]
    fn test_turns_relative_to_camera_yaw() {
        let mut harness = Harness::new();
        // Камера повёрнута: forward = +X
        harness.world.camera.rotation = look_rotation(Vec3::X);

        for _ in 0..200 {
            harness.step(InputFrame::axes(0.0, 1.0));
        }

        let facing = harness.world.body.forward();
        assert!(facing.abs_diff_eq(Vec3::X, 1e-3), "facing = {:?}", facing);
    }

    #[test]
    fn test_wall_contact_drops_friction() {
        let mut harness = Harness::new();

        harness.contact(ContactPhase::Stay, Vec3::Y);
        assert_eq!(harness.world.surface.friction, FrictionCoefficients::uniform(0.6));
        assert!(harness.locomotion().state().is_colliding);

        harness.contact(ContactPhase::Stay, Vec3::new(1.0, 0.05, 0.0).normalize());
        assert_eq!(harness.world.surface.friction, FrictionCoefficients::ZERO);

        harness.contact(ContactPhase::Exit, Vec3::ZERO);
        assert_eq!(harness.world.surface.friction, FrictionCoefficients::uniform(0.6));
        assert!(!harness.locomotion().state().is_colliding);
    }

    #[test]
    fn test_wall_contact_ignored_when_not_current() {
        let mut harness = Harness::new();
        harness.manager.register_behaviour(OTHER);

        harness.contact(ContactPhase::Enter, Vec3::X);
        assert_eq!(harness.world.surface.friction, FrictionCoefficients::uniform(0.6));
        assert!(harness.locomotion().state().is_colliding);
    }

    #[test]
    fn test_ramp_crest_kills_upward_velocity() {
        let mut harness = Harness::new();
        harness.world.ground.grounded = false;
        harness.world.body.velocity = Vec3::new(1.0, 3.0, 0.0);

        harness.step(InputFrame::default());
        assert_eq!(harness.world.body.velocity, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_grounded_enables_gravity() {
        let mut harness = Harness::new();
        harness.world.body.use_gravity = false;

        harness.step(InputFrame::default());
        assert!(harness.world.body.use_gravity());
    }

    #[test]
    fn test_idle_step_leaves_body_untouched() {
        let mut harness = Harness::new();
        let rotation = Quat::from_rotation_y(0.3);
        harness.world.body.velocity = Vec3::new(1.0, 0.0, 2.0);
        harness.world.body.rotation = rotation;

        harness.step(InputFrame::default());

        assert_eq!(harness.world.body.velocity, Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(harness.world.body.rotation, rotation);
        assert_eq!(harness.world.body.rotation_writes, 0);
        assert!(harness.world.body.use_gravity());
    }

    #[test]
    fn test_override_resets_tracked_speed() {
        let mut harness = Harness::new();
        harness.run_up();
        assert!(harness.locomotion().state().current_speed > 0.0);

        harness.manager.override_with(OTHER);
        assert_eq!(harness.locomotion().state().current_speed, 0.0);
    }
}
