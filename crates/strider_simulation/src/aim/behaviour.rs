//! AimBehaviour - прицеливание через override queue
//!
//! Фазы (таймеры вместо coroutines, тикают в input phase):
//! ```text
//! Idle --hold--> Engaging(engage_delay) --ok--> Aiming --release--> Releasing(release_delay)
//!   ^               | locked / sprint / released                            |
//!   |<--------------+                                                       v
//!   +<----------------------------- revoke_override ------------ Revoking(revoke_delay)
//! ```
//! Пока Aiming: sprint запрещён, offsets камеры выставляются каждый fixed
//! step, тело доворачивается к камере в late step.

use bevy::prelude::*;

use super::AimConfig;
use crate::behaviour::{Behaviour, BehaviourCode, BehaviourCtx};
use crate::character::{flatten, look_rotation, AnimParam, FORWARD};
use crate::logger::{log, log_info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub enum AimPhase {
    #[default]
    Idle,
    Engaging {
        remaining: f32,
    },
    Aiming,
    Releasing {
        remaining: f32,
    },
    Revoking {
        remaining: f32,
    },
}

#[derive(Debug, Clone)]
pub struct AimBehaviour {
    config: AimConfig,
    phase: AimPhase,
    /// Текущие offsets (x зеркалится кнопкой плеча)
    pivot_offset: Vec3,
    camera_offset: Vec3,
}

impl Default for AimBehaviour {
    fn default() -> Self {
        Self::new(AimConfig::default())
    }
}

impl AimBehaviour {
    pub const CODE: BehaviourCode = BehaviourCode::Aim;

    pub fn new(config: AimConfig) -> Self {
        Self {
            pivot_offset: config.pivot_offset,
            camera_offset: config.camera_offset,
            config,
            phase: AimPhase::Idle,
        }
    }

    pub fn config(&self) -> &AimConfig {
        &self.config
    }

    pub fn phase(&self) -> AimPhase {
        self.phase
    }

    pub fn is_aiming(&self) -> bool {
        self.phase == AimPhase::Aiming
    }

    pub fn pivot_offset(&self) -> Vec3 {
        self.pivot_offset
    }

    pub fn camera_offset(&self) -> Vec3 {
        self.camera_offset
    }

    fn engage(&mut self, ctx: &mut BehaviourCtx<'_, '_>) {
        if ctx.arbiter.temp_lock_status(Some(Self::CODE)) || ctx.arbiter.is_sprinting() {
            log("Aim: engage aborted (locked or sprinting)");
            self.phase = AimPhase::Idle;
            return;
        }

        // Каждый заход начинается с правого плеча
        self.pivot_offset.x = self.config.pivot_offset.x.abs();
        self.camera_offset.x = self.config.camera_offset.x.abs();

        ctx.rig.animator.set_float(AnimParam::Speed, 0.0);
        ctx.rig.animator.set_bool(AnimParam::Aim, true);
        ctx.arbiter.override_with(Self::CODE);
        self.phase = AimPhase::Aiming;
        log_info("Aim: engaged");
    }

    fn release(&mut self, ctx: &mut BehaviourCtx<'_, '_>) {
        ctx.rig.animator.set_bool(AnimParam::Aim, false);
        self.phase = AimPhase::Releasing {
            remaining: self.config.release_delay,
        };
        log_info("Aim: released");
    }
}

impl Behaviour for AimBehaviour {
    fn code(&self) -> BehaviourCode {
        Self::CODE
    }

    fn update(&mut self, ctx: &mut BehaviourCtx<'_, '_>) {
        let held = ctx.input.aim_held;

        match self.phase {
            AimPhase::Idle => {
                if held {
                    self.phase = AimPhase::Engaging {
                        remaining: self.config.engage_delay,
                    };
                }
            }
            AimPhase::Engaging { remaining } => {
                let remaining = remaining - ctx.dt;
                if !held {
                    self.phase = AimPhase::Idle;
                } else if remaining <= 0.0 {
                    self.engage(ctx);
                } else {
                    self.phase = AimPhase::Engaging { remaining };
                }
            }
            AimPhase::Aiming => {
                if !held {
                    self.release(ctx);
                } else if ctx.input.shoulder_down {
                    self.pivot_offset.x = -self.pivot_offset.x;
                    self.camera_offset.x = -self.camera_offset.x;
                }
            }
            AimPhase::Releasing { remaining } => {
                let remaining = remaining - ctx.dt;
                if remaining <= 0.0 {
                    ctx.rig.camera.reset_target_offsets();
                    self.phase = AimPhase::Revoking {
                        remaining: self.config.revoke_delay,
                    };
                } else {
                    self.phase = AimPhase::Releasing { remaining };
                }
            }
            AimPhase::Revoking { remaining } => {
                let remaining = remaining - ctx.dt;
                if remaining <= 0.0 {
                    ctx.arbiter.revoke_override(Self::CODE);
                    self.phase = AimPhase::Idle;
                } else {
                    self.phase = AimPhase::Revoking { remaining };
                }
            }
        }
    }

    fn fixed_update(&mut self, ctx: &mut BehaviourCtx<'_, '_>) {
        if self.is_aiming() {
            ctx.rig
                .camera
                .set_target_offsets(self.pivot_offset, self.camera_offset);
        }
    }

    fn late_update(&mut self, ctx: &mut BehaviourCtx<'_, '_>) {
        if !self.is_aiming() {
            return;
        }

        let forward = flatten(ctx.rig.camera.transform_direction(FORWARD));
        if forward == Vec3::ZERO {
            return;
        }

        let target = look_rotation(forward);
        let rotation = ctx.rig.body.rotation();
        let angle = rotation.angle_between(target).to_degrees();
        let t = (angle * self.config.turn_smoothing * ctx.dt).clamp(0.0, 1.0);

        ctx.arbiter.set_last_direction(forward);
        ctx.rig.body.set_rotation(rotation.slerp(target, t));
    }

    fn allows_sprint(&self) -> bool {
        !self.is_aiming()
    }
}
