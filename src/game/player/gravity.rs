// Gravity accumulator and airborne detection

use glam::Vec3;

use super::context::PlayerContext;

/// Vertical speed a touch-down must still carry to count as a landing.
pub(crate) const LANDING_SPEED: f32 = -0.1;

/// Advance the accumulator one tick and return the gravity displacement.
///
/// Grounded without a jump in progress pins the accumulator to the constant
/// seat-down pull; otherwise it decays toward the terminal value. Positive
/// accumulator values (the jump keyframe) move the body up.
pub(crate) fn step(ctx: &mut PlayerContext, grounded: bool, dt: f32) -> Vec3 {
    if grounded && !ctx.jumping_triggered {
        ctx.current_gravity = ctx.config.constant_gravity;
    } else if ctx.current_gravity > ctx.config.max_gravity {
        ctx.current_gravity -= ctx.config.gravity_rate * dt;
    }
    Vec3::NEG_Y * (-ctx.current_gravity * dt)
}

/// Whether vertical speed has dropped past the falling threshold.
pub(crate) fn is_falling(ctx: &PlayerContext) -> bool {
    ctx.falling_speed < ctx.config.falling_threshold
}

/// Falling-state entry condition. The trigger flags suppress re-entry while
/// an airborne arc is already in progress.
pub(crate) fn should_enter_falling(ctx: &PlayerContext, grounded: bool) -> bool {
    is_falling(ctx) && !grounded && !ctx.jumping_triggered && !ctx.falling_triggered
}

/// Landing confirmation. Clears both trigger flags when it holds; the caller
/// picks the state to land into.
pub(crate) fn confirm_landing(ctx: &mut PlayerContext, grounded: bool) -> bool {
    if ctx.falling_triggered && grounded && ctx.falling_speed < LANDING_SPEED {
        ctx.falling_triggered = false;
        ctx.jumping_triggered = false;
        true
    } else {
        false
    }
}
