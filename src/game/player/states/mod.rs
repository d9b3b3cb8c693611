// Player behavioral states
//
// One variant per behavior, dispatched exhaustively by the driver. Variants
// own only per-tick scratch (the last planar movement); everything durable
// lives in PlayerContext.

mod airborne;
mod combat;
mod locomotion;

pub use airborne::{FallingState, JumpState};
pub use combat::{AttackState, ParryState, RunningAttackState};
pub use locomotion::{CrouchingState, IdleState, RunningState, SprintingState, WalkingState};

use std::fmt;

use glam::Vec3;

use crate::core::math;
use crate::engine::animation::params;
use crate::game::player::context::PlayerContext;
use crate::game::player::driver::PlayerRig;
use crate::game::player::gravity;

/// Behavioral state tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    Idle,
    Walking,
    Running,
    Sprinting,
    Crouching,
    Jump,
    Falling,
    Attack,
    RunningAttack,
    Parry,
}

impl StateKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Walking => "Walking",
            Self::Running => "Running",
            Self::Sprinting => "Sprinting",
            Self::Crouching => "Crouching",
            Self::Jump => "Jump",
            Self::Falling => "Falling",
            Self::Attack => "Attack",
            Self::RunningAttack => "RunningAttack",
            Self::Parry => "Parry",
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Transition table: the targets each state may hand control to.
/// The driver drops any request outside the table.
pub fn allows(from: StateKind, to: StateKind) -> bool {
    use StateKind::*;
    match from {
        Idle => matches!(
            to,
            Walking | Crouching | Running | Sprinting | Jump | Falling | Attack | Parry
        ),
        Walking => matches!(to, Idle | Crouching | Running | Sprinting | Jump | Falling),
        Running => matches!(to, Idle | Walking | Crouching | Sprinting | Jump | Falling),
        Sprinting => matches!(to, Idle | Walking | Running | Jump | Falling | RunningAttack),
        Crouching => matches!(to, Idle | Walking | Running | Falling),
        Jump => matches!(to, Falling),
        Falling => matches!(to, Idle | Running),
        Attack | RunningAttack | Parry => matches!(to, Idle),
    }
}

/// Discrete action events dispatched to the active variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    Jump,
    LeftAttack,
    RightAttack,
    ParryOrDual,
}

/// The live state value. Constructed fresh on every transition and dropped
/// on the next one.
#[derive(Debug)]
pub enum StateVariant {
    Idle(IdleState),
    Walking(WalkingState),
    Running(RunningState),
    Sprinting(SprintingState),
    Crouching(CrouchingState),
    Jump(JumpState),
    Falling(FallingState),
    Attack(AttackState),
    RunningAttack(RunningAttackState),
    Parry(ParryState),
}

impl StateVariant {
    pub fn new(kind: StateKind) -> Self {
        match kind {
            StateKind::Idle => Self::Idle(IdleState),
            StateKind::Walking => Self::Walking(WalkingState::default()),
            StateKind::Running => Self::Running(RunningState::default()),
            StateKind::Sprinting => Self::Sprinting(SprintingState::default()),
            StateKind::Crouching => Self::Crouching(CrouchingState::default()),
            StateKind::Jump => Self::Jump(JumpState::default()),
            StateKind::Falling => Self::Falling(FallingState::default()),
            StateKind::Attack => Self::Attack(AttackState::default()),
            StateKind::RunningAttack => Self::RunningAttack(RunningAttackState),
            StateKind::Parry => Self::Parry(ParryState),
        }
    }

    pub fn kind(&self) -> StateKind {
        match self {
            Self::Idle(_) => StateKind::Idle,
            Self::Walking(_) => StateKind::Walking,
            Self::Running(_) => StateKind::Running,
            Self::Sprinting(_) => StateKind::Sprinting,
            Self::Crouching(_) => StateKind::Crouching,
            Self::Jump(_) => StateKind::Jump,
            Self::Falling(_) => StateKind::Falling,
            Self::Attack(_) => StateKind::Attack,
            Self::RunningAttack(_) => StateKind::RunningAttack,
            Self::Parry(_) => StateKind::Parry,
        }
    }

    /// Entry hook. May itself request a follow-up transition, which the
    /// driver defers to the next tick rather than recursing.
    pub fn init(&mut self, ctx: &mut PlayerContext, rig: &mut PlayerRig<'_>) -> Option<StateKind> {
        match self {
            Self::Idle(state) => state.init(ctx, rig),
            Self::Walking(state) => state.init(rig),
            Self::Running(state) => state.init(rig),
            Self::Sprinting(state) => state.init(rig),
            Self::Crouching(state) => state.init(rig),
            Self::Jump(state) => state.init(ctx, rig),
            Self::Falling(state) => state.init(ctx, rig),
            Self::Attack(state) => state.init(ctx, rig),
            Self::RunningAttack(state) => state.init(ctx, rig),
            Self::Parry(state) => state.init(ctx, rig),
        }
    }

    /// One variable-rate tick of behavior.
    pub fn update(
        &mut self,
        ctx: &mut PlayerContext,
        rig: &mut PlayerRig<'_>,
        dt: f32,
    ) -> Option<StateKind> {
        match self {
            Self::Idle(state) => state.update(ctx, rig, dt),
            Self::Walking(state) => state.update(ctx, rig, dt),
            Self::Running(state) => state.update(ctx, rig, dt),
            Self::Sprinting(state) => state.update(ctx, rig, dt),
            Self::Crouching(state) => state.update(ctx, rig, dt),
            Self::Jump(state) => state.update(ctx, rig, dt),
            Self::Falling(state) => state.update(ctx, rig, dt),
            Self::Attack(state) => state.update(ctx, rig, dt),
            Self::RunningAttack(state) => state.update(ctx, rig, dt),
            Self::Parry(state) => state.update(ctx, rig, dt),
        }
    }

    /// Discrete action event. States that do not react simply drop it.
    pub fn handle_event(
        &mut self,
        event: PlayerEvent,
        ctx: &mut PlayerContext,
        rig: &mut PlayerRig<'_>,
    ) -> Option<StateKind> {
        match self {
            Self::Idle(state) => state.handle_event(event, ctx),
            Self::Walking(state) => state.handle_event(event),
            Self::Running(state) => state.handle_event(event),
            Self::Sprinting(state) => state.handle_event(event, ctx),
            Self::Attack(state) => state.handle_event(event, ctx, rig),
            Self::Parry(state) => state.handle_event(event, ctx, rig),
            Self::Crouching(_) | Self::Jump(_) | Self::Falling(_) | Self::RunningAttack(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Shared per-tick helpers used by the state impls
// ---------------------------------------------------------------------------

/// What every state samples at the top of its tick.
pub(crate) struct TickBasis {
    pub grounded: bool,
    pub gravity_step: Vec3,
}

/// Sample vertical speed from the body and advance the gravity accumulator.
pub(crate) fn begin_tick(
    ctx: &mut PlayerContext,
    rig: &mut PlayerRig<'_>,
    dt: f32,
) -> TickBasis {
    ctx.falling_speed = rig.body.velocity().y;
    let grounded = rig.grounded();
    let gravity_step = gravity::step(ctx, grounded, dt);
    TickBasis {
        grounded,
        gravity_step,
    }
}

/// Falling-entry check shared by every state except Jump.
pub(crate) fn falling_entry(ctx: &PlayerContext, basis: &TickBasis) -> Option<StateKind> {
    if gravity::should_enter_falling(ctx, basis.grounded) {
        Some(StateKind::Falling)
    } else {
        None
    }
}

/// Planar displacement for this tick at `speed`, from intent and facing.
pub(crate) fn planar_step(ctx: &PlayerContext, speed: f32, dt: f32) -> Vec3 {
    math::planar_direction(ctx.movement_intent, ctx.facing_yaw) * speed * dt
}

/// Publish the raw intent to the animator blend tree.
pub(crate) fn publish_intent(ctx: &PlayerContext, rig: &mut PlayerRig<'_>) {
    rig.animator.set_float(params::MOVEMENT_X, ctx.movement_intent.x);
    rig.animator.set_float(params::MOVEMENT_Y, ctx.movement_intent.y);
}

/// Exclusive walk/sprint/crouch animator bools, set on locomotion entry.
pub(crate) fn set_locomotion_toggles(
    rig: &mut PlayerRig<'_>,
    walk: bool,
    sprint: bool,
    crouch: bool,
) {
    rig.animator.set_bool(params::WALK_TOGGLE, walk);
    rig.animator.set_bool(params::SPRINT_TOGGLE, sprint);
    rig.animator.set_bool(params::CROUCH_TOGGLE, crouch);
}

/// Re-align character facing to the camera yaw.
pub(crate) fn match_camera(ctx: &mut PlayerContext, rig: &PlayerRig<'_>) {
    ctx.facing_yaw = rig.camera_yaw;
}
