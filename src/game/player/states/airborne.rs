// Airborne states - the jump arc and falling

use glam::Vec3;

use crate::core::math;
use crate::engine::animation::params;
use crate::game::player::context::PlayerContext;
use crate::game::player::driver::PlayerRig;
use crate::game::player::gravity;

use super::{begin_tick, match_camera, planar_step, publish_intent, StateKind};

/// Jump arc. Air control runs at walking pace; the exit to Falling is driven
/// by the clip boundary callback, with a touch-down check as the backstop.
#[derive(Debug, Default)]
pub struct JumpState {
    movement: Vec3,
    /// The backstop only arms once the body has actually left the ground;
    /// the grounded seat-down pull reads as a small negative speed and must
    /// not count as a touch-down.
    lifted_off: bool,
}

impl JumpState {
    pub(super) fn init(
        &mut self,
        ctx: &mut PlayerContext,
        rig: &mut PlayerRig<'_>,
    ) -> Option<StateKind> {
        rig.animator.set_trigger(params::JUMP);
        ctx.jumping_triggered = true;
        ctx.falling_triggered = true;
        None
    }

    pub(super) fn update(
        &mut self,
        ctx: &mut PlayerContext,
        rig: &mut PlayerRig<'_>,
        dt: f32,
    ) -> Option<StateKind> {
        let basis = begin_tick(ctx, rig, dt);
        if !basis.grounded {
            self.lifted_off = true;
        }

        // Touched down before the boundary callback arrived: hand the
        // landing to Falling, which owns the trigger flags and land anims.
        if self.lifted_off
            && ctx.falling_triggered
            && basis.grounded
            && ctx.falling_speed < gravity::LANDING_SPEED
        {
            return Some(StateKind::Falling);
        }

        publish_intent(ctx, rig);
        self.movement = planar_step(ctx, ctx.config.walk_speed, dt);
        if self.movement.length() >= math::INTENT_EPSILON {
            rig.body.translate(self.movement + basis.gravity_step);
        } else {
            rig.body.translate(basis.gravity_step);
        }
        match_camera(ctx, rig);
        None
    }
}

/// Falling arc. Owns the landing decision and its animation triggers.
#[derive(Debug, Default)]
pub struct FallingState {
    movement: Vec3,
}

impl FallingState {
    pub(super) fn init(
        &mut self,
        ctx: &mut PlayerContext,
        rig: &mut PlayerRig<'_>,
    ) -> Option<StateKind> {
        ctx.falling_triggered = true;
        ctx.jumping_triggered = true;
        rig.animator.set_trigger(params::FALLING);
        None
    }

    pub(super) fn update(
        &mut self,
        ctx: &mut PlayerContext,
        rig: &mut PlayerRig<'_>,
        dt: f32,
    ) -> Option<StateKind> {
        let basis = begin_tick(ctx, rig, dt);

        if gravity::confirm_landing(ctx, basis.grounded) {
            // Branch on the previous tick's planar motion: rolling into a
            // run when the player was steering, a plain landing otherwise.
            return Some(if self.movement.length() >= math::INTENT_EPSILON {
                rig.animator.set_trigger(params::LAND_ROLL_RUN);
                StateKind::Running
            } else {
                rig.animator.set_trigger(params::LAND);
                StateKind::Idle
            });
        }

        self.movement = planar_step(ctx, ctx.config.walk_speed, dt);
        if self.movement.length() >= math::INTENT_EPSILON {
            rig.body.translate(self.movement + basis.gravity_step);
        } else {
            rig.body.translate(basis.gravity_step);
        }
        match_camera(ctx, rig);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::animation::RecordingAnimator;
    use crate::engine::motion::ScriptedBody;
    use crate::game::player::config::PlayerConfig;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn ctx() -> PlayerContext {
        PlayerContext::new(PlayerConfig::default())
    }

    #[test]
    fn test_jump_init_sets_triggers_and_flags() {
        let mut ctx = ctx();
        let mut body = ScriptedBody::standing();
        let mut animator = RecordingAnimator::default();
        let mut rig = PlayerRig {
            body: &mut body,
            animator: &mut animator,
            camera_yaw: 0.0,
        };
        JumpState::default().init(&mut ctx, &mut rig);

        assert!(ctx.jumping_triggered);
        assert!(ctx.falling_triggered);
        assert!(animator.has_trigger(params::JUMP));
    }

    #[test]
    fn test_jump_applies_gravity_without_input() {
        let mut ctx = ctx();
        ctx.jumping_triggered = true;
        ctx.current_gravity = 8.0;
        let mut body = ScriptedBody::airborne(8.0);
        let mut animator = RecordingAnimator::default();
        let mut rig = PlayerRig {
            body: &mut body,
            animator: &mut animator,
            camera_yaw: 0.0,
        };
        JumpState::default().update(&mut ctx, &mut rig, DT);
        assert!(body.last_move().y > 0.0, "a positive accumulator lifts the body");
    }

    #[test]
    fn test_jump_touch_down_hands_off_to_falling() {
        let mut ctx = ctx();
        ctx.jumping_triggered = true;
        ctx.falling_triggered = true;
        let mut animator = RecordingAnimator::default();
        let mut state = JumpState::default();

        // Rising tick arms the backstop...
        let mut body = ScriptedBody::airborne(3.0);
        let mut rig = PlayerRig {
            body: &mut body,
            animator: &mut animator,
            camera_yaw: 0.0,
        };
        assert_eq!(state.update(&mut ctx, &mut rig, DT), None);

        // ...the touch-down tick hands off.
        let mut body = ScriptedBody::standing();
        body.velocity = glam::Vec3::new(0.0, -4.0, 0.0);
        let mut rig = PlayerRig {
            body: &mut body,
            animator: &mut animator,
            camera_yaw: 0.0,
        };
        assert_eq!(state.update(&mut ctx, &mut rig, DT), Some(StateKind::Falling));
        assert!(ctx.falling_triggered, "flags stay set for Falling to clear");
    }

    #[test]
    fn test_jump_ignores_grounded_seat_down_before_liftoff() {
        let mut ctx = ctx();
        ctx.jumping_triggered = true;
        ctx.falling_triggered = true;
        let mut body = ScriptedBody::standing();
        body.velocity = glam::Vec3::new(0.0, -1.3, 0.0);
        let mut animator = RecordingAnimator::default();
        let mut rig = PlayerRig {
            body: &mut body,
            animator: &mut animator,
            camera_yaw: 0.0,
        };
        assert_eq!(JumpState::default().update(&mut ctx, &mut rig, DT), None);
    }

    #[test]
    fn test_falling_lands_idle_without_steering() {
        let mut ctx = ctx();
        ctx.falling_triggered = true;
        ctx.jumping_triggered = true;
        let mut body = ScriptedBody::standing();
        body.velocity = glam::Vec3::new(0.0, -4.0, 0.0);
        let mut animator = RecordingAnimator::default();
        let mut rig = PlayerRig {
            body: &mut body,
            animator: &mut animator,
            camera_yaw: 0.0,
        };
        assert_eq!(
            FallingState::default().update(&mut ctx, &mut rig, DT),
            Some(StateKind::Idle)
        );
        assert!(!ctx.falling_triggered);
        assert!(!ctx.jumping_triggered);
        assert!(animator.has_trigger(params::LAND));
    }

    #[test]
    fn test_falling_lands_rolling_into_a_run() {
        let mut ctx = ctx();
        ctx.falling_triggered = true;
        ctx.jumping_triggered = true;
        ctx.movement_intent = Vec2::new(0.0, 1.0);
        let mut animator = RecordingAnimator::default();
        let mut state = FallingState::default();

        // One airborne tick to accumulate planar movement...
        let mut body = ScriptedBody::airborne(-4.0);
        let mut rig = PlayerRig {
            body: &mut body,
            animator: &mut animator,
            camera_yaw: 0.0,
        };
        assert_eq!(state.update(&mut ctx, &mut rig, DT), None);

        // ...then the touch-down tick.
        let mut body = ScriptedBody::standing();
        body.velocity = glam::Vec3::new(0.0, -4.0, 0.0);
        let mut rig = PlayerRig {
            body: &mut body,
            animator: &mut animator,
            camera_yaw: 0.0,
        };
        assert_eq!(state.update(&mut ctx, &mut rig, DT), Some(StateKind::Running));
        assert!(animator.has_trigger(params::LAND_ROLL_RUN));
    }

    #[test]
    fn test_falling_keeps_falling_while_airborne() {
        let mut ctx = ctx();
        ctx.falling_triggered = true;
        ctx.jumping_triggered = true;
        let mut body = ScriptedBody::airborne(-6.0);
        let mut animator = RecordingAnimator::default();
        let mut rig = PlayerRig {
            body: &mut body,
            animator: &mut animator,
            camera_yaw: 0.0,
        };
        let mut state = FallingState::default();
        for _ in 0..10 {
            assert_eq!(state.update(&mut ctx, &mut rig, DT), None);
        }
    }
}
