// Grounded locomotion states

use glam::Vec3;

use crate::core::math;
use crate::engine::animation::params;
use crate::game::player::context::PlayerContext;
use crate::game::player::driver::PlayerRig;

use super::{
    begin_tick, falling_entry, match_camera, planar_step, publish_intent,
    set_locomotion_toggles, PlayerEvent, StateKind,
};

/// Standing still. The resting state everything funnels back into.
#[derive(Debug, Default)]
pub struct IdleState;

impl IdleState {
    pub(super) fn init(
        &mut self,
        ctx: &mut PlayerContext,
        rig: &mut PlayerRig<'_>,
    ) -> Option<StateKind> {
        rig.animator.set_bool(params::CROUCH_TOGGLE, false);
        self.pick_locomotion(ctx)
    }

    pub(super) fn update(
        &mut self,
        ctx: &mut PlayerContext,
        rig: &mut PlayerRig<'_>,
        dt: f32,
    ) -> Option<StateKind> {
        let basis = begin_tick(ctx, rig, dt);
        if let Some(next) = falling_entry(ctx, &basis) {
            return Some(next);
        }
        rig.body.translate(basis.gravity_step);
        if ctx.combat_mode {
            match_camera(ctx, rig);
        }
        self.pick_locomotion(ctx)
    }

    pub(super) fn handle_event(
        &mut self,
        event: PlayerEvent,
        ctx: &mut PlayerContext,
    ) -> Option<StateKind> {
        match event {
            PlayerEvent::Jump => Some(StateKind::Jump),
            PlayerEvent::LeftAttack => {
                ctx.left_hand_attack = true;
                Some(StateKind::Attack)
            }
            PlayerEvent::RightAttack => {
                ctx.right_hand_attack = true;
                Some(StateKind::Attack)
            }
            PlayerEvent::ParryOrDual => {
                if ctx.dual_wield_equipped || ctx.shield_equipped {
                    Some(StateKind::Parry)
                } else {
                    None
                }
            }
        }
    }

    fn pick_locomotion(&self, ctx: &PlayerContext) -> Option<StateKind> {
        if ctx.walk_mode {
            Some(StateKind::Walking)
        } else if ctx.crouch_mode && !ctx.combat_mode {
            Some(StateKind::Crouching)
        } else if ctx.has_intent() {
            Some(StateKind::Running)
        } else {
            None
        }
    }
}

/// Deliberate walking, held via walk mode.
#[derive(Debug, Default)]
pub struct WalkingState {
    movement: Vec3,
}

impl WalkingState {
    pub(super) fn init(&mut self, rig: &mut PlayerRig<'_>) -> Option<StateKind> {
        set_locomotion_toggles(rig, true, false, false);
        None
    }

    pub(super) fn update(
        &mut self,
        ctx: &mut PlayerContext,
        rig: &mut PlayerRig<'_>,
        dt: f32,
    ) -> Option<StateKind> {
        let basis = begin_tick(ctx, rig, dt);
        if let Some(next) = falling_entry(ctx, &basis) {
            return Some(next);
        }
        if !ctx.walk_mode {
            return Some(StateKind::Running);
        }

        publish_intent(ctx, rig);
        self.movement = planar_step(ctx, ctx.config.walk_speed, dt);
        let next = if self.movement.length() >= math::INTENT_EPSILON {
            rig.body.translate(self.movement + basis.gravity_step);
            None
        } else {
            Some(StateKind::Idle)
        };
        match_camera(ctx, rig);
        next
    }

    pub(super) fn handle_event(&mut self, event: PlayerEvent) -> Option<StateKind> {
        match event {
            PlayerEvent::Jump => Some(StateKind::Jump),
            _ => None,
        }
    }
}

/// Default ground locomotion whenever there is input and no mode override.
#[derive(Debug, Default)]
pub struct RunningState {
    movement: Vec3,
}

impl RunningState {
    pub(super) fn init(&mut self, rig: &mut PlayerRig<'_>) -> Option<StateKind> {
        set_locomotion_toggles(rig, false, false, false);
        None
    }

    pub(super) fn update(
        &mut self,
        ctx: &mut PlayerContext,
        rig: &mut PlayerRig<'_>,
        dt: f32,
    ) -> Option<StateKind> {
        let basis = begin_tick(ctx, rig, dt);
        if let Some(next) = falling_entry(ctx, &basis) {
            return Some(next);
        }
        if ctx.walk_mode {
            return Some(StateKind::Walking);
        }
        if ctx.sprint_mode && ctx.stamina.can_start_sprint(ctx.config.sprinting_start_cost) {
            return Some(StateKind::Sprinting);
        }
        if ctx.crouch_mode {
            return Some(StateKind::Crouching);
        }

        publish_intent(ctx, rig);
        self.movement = planar_step(ctx, ctx.config.run_speed, dt);
        let next = if self.movement.length() >= math::INTENT_EPSILON {
            rig.body.translate(self.movement + basis.gravity_step);
            None
        } else {
            Some(StateKind::Idle)
        };
        match_camera(ctx, rig);
        next
    }

    pub(super) fn handle_event(&mut self, event: PlayerEvent) -> Option<StateKind> {
        match event {
            PlayerEvent::Jump => Some(StateKind::Jump),
            _ => None,
        }
    }
}

/// Stamina-fueled top speed.
#[derive(Debug, Default)]
pub struct SprintingState {
    movement: Vec3,
}

impl SprintingState {
    pub(super) fn init(&mut self, rig: &mut PlayerRig<'_>) -> Option<StateKind> {
        set_locomotion_toggles(rig, false, true, false);
        None
    }

    pub(super) fn update(
        &mut self,
        ctx: &mut PlayerContext,
        rig: &mut PlayerRig<'_>,
        dt: f32,
    ) -> Option<StateKind> {
        let basis = begin_tick(ctx, rig, dt);
        if let Some(next) = falling_entry(ctx, &basis) {
            return Some(next);
        }
        if ctx.walk_mode {
            return Some(StateKind::Walking);
        }
        if !ctx.sprint_mode && !ctx.stamina.exhausted() {
            return Some(StateKind::Running);
        }

        ctx.stamina.drain(ctx.config.sprinting_cost_per_second * dt);
        if ctx.stamina.exhausted() {
            // Out of breath: drop back to a run even with sprint still held.
            return Some(StateKind::Running);
        }

        publish_intent(ctx, rig);
        self.movement = planar_step(ctx, ctx.config.sprint_speed, dt);
        let next = if self.movement.length() >= math::INTENT_EPSILON {
            rig.body.translate(self.movement + basis.gravity_step);
            None
        } else {
            Some(StateKind::Idle)
        };
        match_camera(ctx, rig);
        next
    }

    pub(super) fn handle_event(
        &mut self,
        event: PlayerEvent,
        ctx: &mut PlayerContext,
    ) -> Option<StateKind> {
        match event {
            PlayerEvent::Jump => Some(StateKind::Jump),
            PlayerEvent::RightAttack if forward_only(ctx) => {
                ctx.right_hand_running_attack = true;
                Some(StateKind::RunningAttack)
            }
            _ => None,
        }
    }
}

/// A sprint momentum attack needs clean forward intent; strafing or
/// backpedal input keeps the blades sheathed.
fn forward_only(ctx: &PlayerContext) -> bool {
    (ctx.movement_intent - glam::Vec2::Y).length() < 1e-3
}

/// Crouched movement at walking pace.
#[derive(Debug, Default)]
pub struct CrouchingState {
    movement: Vec3,
}

impl CrouchingState {
    pub(super) fn init(&mut self, rig: &mut PlayerRig<'_>) -> Option<StateKind> {
        set_locomotion_toggles(rig, false, false, true);
        None
    }

    pub(super) fn update(
        &mut self,
        ctx: &mut PlayerContext,
        rig: &mut PlayerRig<'_>,
        dt: f32,
    ) -> Option<StateKind> {
        let basis = begin_tick(ctx, rig, dt);
        if let Some(next) = falling_entry(ctx, &basis) {
            return Some(next);
        }
        if !ctx.crouch_mode {
            return Some(if ctx.walk_mode {
                StateKind::Walking
            } else if ctx.has_intent() {
                StateKind::Running
            } else {
                StateKind::Idle
            });
        }

        publish_intent(ctx, rig);
        self.movement = planar_step(ctx, ctx.config.walk_speed, dt);
        if self.movement.length() >= math::INTENT_EPSILON {
            rig.body.translate(self.movement + basis.gravity_step);
        }
        match_camera(ctx, rig);
        None
    }
}
