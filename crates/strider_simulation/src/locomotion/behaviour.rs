//! LocomotionBehaviour - walk/run/sprint + прыжок
//!
//! Fixed step:
//! 1. movement_management: gravity toggle, поворот от камеры, speed shaping
//! 2. jump_management: старт прыжка (temp lock), air control, приземление
//!
//! Jump latch ставится в input phase (`update`), потребляется только при
//! приземлении: одно нажатие = ровно один прыжок.

use bevy::prelude::*;

use super::{JumpPhase, LocomotionConfig, MotionState};
use crate::behaviour::{Arbiter, Behaviour, BehaviourCode, BehaviourCtx, Contact, ContactPhase};
use crate::character::{
    camera_relative_direction, look_rotation, AnimParam, ForceMode, FrictionCoefficients, FORWARD,
};
use crate::logger::{log, log_error, log_info};

#[derive(Debug, Clone)]
pub struct LocomotionBehaviour {
    config: LocomotionConfig,
    state: MotionState,
}

impl Default for LocomotionBehaviour {
    fn default() -> Self {
        Self::new(LocomotionConfig::default())
    }
}

impl LocomotionBehaviour {
    pub const CODE: BehaviourCode = BehaviourCode::Locomotion;

    pub fn new(config: LocomotionConfig) -> Self {
        let state = MotionState::new(config.run_speed);
        Self { config, state }
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn speed_seeker(&self) -> f32 {
        self.state.speed_seeker
    }

    pub fn is_jump_pending(&self) -> bool {
        self.state.jump_pending
    }

    pub fn jump_phase(&self) -> JumpPhase {
        self.state.phase
    }

    fn movement_management(&mut self, ctx: &mut BehaviourCtx<'_, '_>) {
        let grounded = ctx.rig.is_grounded();

        if grounded {
            ctx.rig.body.set_use_gravity(true);
        } else if !ctx.rig.animator.get_bool(AnimParam::Jump) && ctx.rig.body.velocity().y > 0.0 {
            // Вылет с гребня рампы без прыжка: гасим вертикальную скорость
            let mut velocity = ctx.rig.body.velocity();
            velocity.y = 0.0;
            ctx.rig.body.set_velocity(velocity);
        }

        let h = ctx.arbiter.h();
        let v = ctx.arbiter.v();
        self.rotating(ctx, h, v);

        let input = Vec2::new(h, v).clamp_length_max(1.0);
        // scroll - снимок кадра, прибавляется на каждом fixed step
        self.state.speed_seeker = (self.state.speed_seeker + ctx.input.scroll)
            .clamp(self.config.walk_speed, self.config.run_speed);

        let mut speed = input.length() * self.state.speed_seeker;
        if ctx.arbiter.is_sprinting() {
            speed = self.config.sprint_speed;
        }

        self.state.current_speed = speed;
        ctx.rig
            .animator
            .set_float_damped(AnimParam::Speed, speed, self.config.speed_damp_time, ctx.dt);
    }

    /// Поворот к camera-relative направлению (или reposition к last direction)
    fn rotating(&self, ctx: &mut BehaviourCtx<'_, '_>, h: f32, v: f32) {
        let camera_forward = ctx.rig.camera.transform_direction(FORWARD);
        let target = camera_relative_direction(camera_forward, h, v);

        let threshold = self.config.idle_axis_threshold;
        let pinned = h.abs() > threshold && v.abs() > threshold;

        if !ctx.arbiter.is_moving() || pinned {
            ctx.arbiter.reposition(&mut *ctx.rig.body);
            return;
        }

        if target != Vec3::ZERO {
            let rotation = ctx
                .rig
                .body
                .rotation()
                .slerp(look_rotation(target), ctx.arbiter.config().turn_smoothing);
            ctx.rig.body.move_rotation(rotation);
            ctx.arbiter.set_last_direction(target);
        }
    }

    fn jump_management(&mut self, ctx: &mut BehaviourCtx<'_, '_>) {
        let grounded = ctx.rig.is_grounded();

        if self.state.jump_pending && !ctx.rig.animator.get_bool(AnimParam::Jump) && grounded {
            self.start_jump(ctx);
        } else if self.state.is_airborne() {
            if !grounded && !self.state.is_colliding && ctx.arbiter.is_temp_locked() {
                // Air control: держим горизонтальный momentum
                let force = ctx.rig.body.forward()
                    * self.config.jump_inertial_force
                    * ctx.rig.gravity.length()
                    * self.config.sprint_speed;
                ctx.rig.body.add_force(force, ForceMode::Acceleration);
            }

            if ctx.rig.body.velocity().y < 0.0 && grounded {
                self.land(ctx);
            }
        }
    }

    fn start_jump(&mut self, ctx: &mut BehaviourCtx<'_, '_>) {
        ctx.arbiter.lock_temp(Self::CODE);
        ctx.rig.animator.set_bool(AnimParam::Jump, true);
        self.state.phase = JumpPhase::Airborne;

        // Run-jump определяется по animator Speed, не по физической скорости
        let speed = ctx.rig.animator.get_float(AnimParam::Speed);
        if speed > self.config.run_jump_speed_threshold {
            ctx.rig.surface.set_friction(FrictionCoefficients::ZERO);

            let mut velocity = ctx.rig.body.velocity();
            velocity.y = 0.0;
            ctx.rig.body.set_velocity(velocity);

            let impulse = (2.0 * ctx.rig.gravity.y.abs() * self.config.jump_height).sqrt();
            ctx.rig.body.add_force(Vec3::Y * impulse, ForceMode::VelocityChange);
            log_info(&format!("Locomotion: run-jump (speed {:.2}, impulse {:.2})", speed, impulse));
        } else {
            log_info("Locomotion: standing jump");
        }
    }

    fn land(&mut self, ctx: &mut BehaviourCtx<'_, '_>) {
        ctx.rig.animator.set_bool(AnimParam::Grounded, true);
        ctx.rig
            .surface
            .set_friction(FrictionCoefficients::uniform(self.config.default_friction));

        self.state.jump_pending = false;
        ctx.rig.animator.set_bool(AnimParam::Jump, false);
        self.state.phase = JumpPhase::Grounded;
        ctx.arbiter.unlock_temp(Self::CODE);
        log_info("Locomotion: landed");
    }
}

impl Behaviour for LocomotionBehaviour {
    fn code(&self) -> BehaviourCode {
        Self::CODE
    }

    fn on_subscribe(&mut self, arbiter: &mut Arbiter) {
        if let Err(err) = arbiter.register_default(Self::CODE) {
            log_error(&format!("LocomotionBehaviour: {}", err));
        }
    }

    fn update(&mut self, ctx: &mut BehaviourCtx<'_, '_>) {
        if !self.state.jump_pending
            && ctx.input.jump_down
            && ctx.arbiter.is_current_behaviour(Self::CODE)
            && !ctx.arbiter.is_overriding()
        {
            self.state.jump_pending = true;
            log("Locomotion: jump requested");
        }
    }

    fn fixed_update(&mut self, ctx: &mut BehaviourCtx<'_, '_>) {
        self.movement_management(ctx);
        self.jump_management(ctx);
    }

    fn on_overridden(&mut self) {
        self.state.current_speed = 0.0;
    }

    fn on_contact(&mut self, contact: Contact, ctx: &mut BehaviourCtx<'_, '_>) {
        match contact.phase {
            ContactPhase::Enter | ContactPhase::Stay => {
                self.state.is_colliding = true;
                if ctx.arbiter.is_current_behaviour(Self::CODE)
                    && contact.normal.y <= self.config.wall_normal_threshold
                {
                    // Стена: скользим, а не липнем
                    ctx.rig.surface.set_friction(FrictionCoefficients::ZERO);
                }
            }
            ContactPhase::Exit => {
                self.state.is_colliding = false;
                ctx.rig
                    .surface
                    .set_friction(FrictionCoefficients::uniform(self.config.default_friction));
            }
        }
    }
}
