// State machine driver - owns the context, the live variant and the
// animation-callback command queue

use std::collections::VecDeque;

use glam::Vec3;
use log::{debug, info, warn};

use crate::engine::animation::Animator;
use crate::engine::motion::MotionBody;

use super::config::PlayerConfig;
use super::context::PlayerContext;
use super::states::{self, PlayerEvent, StateKind, StateVariant};

/// Commands produced by animation-keyframe callbacks.
///
/// Callbacks can logically arrive at any point relative to the frame tick;
/// queuing them and draining at one place per tick keeps their effects
/// deterministic instead of reentrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Apply the jump impulse to the gravity accumulator.
    JumpForce,
    /// Open or close the combo acceptance window.
    SetComboWindow(bool),
    /// Boundary or end-of-clip transition.
    RequestTransition(StateKind),
    /// Drop any combo progress.
    ResetCombo,
}

/// Per-tick bundle of external collaborators, borrowed for exactly one call.
pub struct PlayerRig<'a> {
    pub body: &'a mut dyn MotionBody,
    pub animator: &'a mut dyn Animator,
    /// Camera yaw for this frame; pitch and roll never reach the core.
    pub camera_yaw: f32,
}

impl PlayerRig<'_> {
    /// Grounded query with the fail-safe: an unanswered query counts as
    /// airborne, the safer default for a gravity system.
    pub fn grounded(&self) -> bool {
        match self.body.is_grounded() {
            Ok(grounded) => grounded,
            Err(err) => {
                warn!("grounded query failed, assuming airborne: {err}");
                false
            }
        }
    }
}

/// Drives exactly one live state variant over the shared context.
pub struct PlayerDriver {
    ctx: PlayerContext,
    variant: StateVariant,
    commands: VecDeque<PlayerCommand>,
    /// Transition requested by an `init`, applied at the start of the next
    /// tick. One slot: transitions never recurse.
    deferred: Option<StateKind>,
}

impl PlayerDriver {
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            ctx: PlayerContext::new(config),
            variant: StateVariant::new(StateKind::Idle),
            commands: VecDeque::new(),
            deferred: None,
        }
    }

    /// Tag of the live variant.
    pub fn state(&self) -> StateKind {
        self.variant.kind()
    }

    pub fn context(&self) -> &PlayerContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut PlayerContext {
        &mut self.ctx
    }

    /// One variable-rate tick: deferred transition, queued callbacks, edge
    /// events, then the active variant's update.
    pub fn tick(&mut self, dt: f32, rig: &mut PlayerRig<'_>) {
        if let Some(target) = self.deferred.take() {
            self.apply_transition(target, rig);
        }
        self.drain_commands(rig);
        self.dispatch_events(rig);

        if let Some(target) = self.variant.update(&mut self.ctx, rig, dt) {
            self.apply_transition(target, rig);
        }

        if self.variant.kind() != StateKind::Sprinting {
            let regen = self.ctx.config.stamina_regen_per_second * dt;
            self.ctx.stamina.regen(regen);
        }
    }

    /// One fixed-rate step: the ambient pull that keeps airborne bodies
    /// accelerating between variable ticks.
    pub fn fixed_tick(&mut self, dt: f32, rig: &mut PlayerRig<'_>) {
        if !rig.grounded() {
            rig.body
                .translate(Vec3::NEG_Y * self.ctx.config.ambient_gravity * dt);
        }
    }

    // -- Animation-keyframe callbacks -------------------------------------
    // Each lands in the queue and takes effect at the next tick.

    /// Jump clip reached the lift-off keyframe.
    pub fn on_jump_apex(&mut self) {
        self.commands.push_back(PlayerCommand::JumpForce);
    }

    /// Jump clip crossed into its falling boundary.
    pub fn on_jump_to_falling_boundary(&mut self) {
        self.commands
            .push_back(PlayerCommand::RequestTransition(StateKind::Falling));
    }

    pub fn on_combo_window_open(&mut self) {
        self.commands.push_back(PlayerCommand::SetComboWindow(true));
    }

    pub fn on_combo_window_close(&mut self) {
        self.commands.push_back(PlayerCommand::SetComboWindow(false));
    }

    pub fn on_attack_clip_end(&mut self) {
        self.commands
            .push_back(PlayerCommand::RequestTransition(StateKind::Idle));
    }

    pub fn on_parry_clip_end(&mut self) {
        self.commands
            .push_back(PlayerCommand::RequestTransition(StateKind::Idle));
    }

    /// Direct queue access for shells that batch their own callbacks.
    pub fn enqueue(&mut self, command: PlayerCommand) {
        self.commands.push_back(command);
    }

    // ---------------------------------------------------------------------

    fn drain_commands(&mut self, rig: &mut PlayerRig<'_>) {
        while let Some(command) = self.commands.pop_front() {
            match command {
                PlayerCommand::JumpForce => {
                    // The jump keyframe only means something mid-jump.
                    if self.variant.kind() == StateKind::Jump {
                        self.ctx.current_gravity = self.ctx.config.jump_force;
                    } else {
                        debug!("jump force keyframe outside Jump ignored");
                    }
                }
                PlayerCommand::SetComboWindow(open) => self.ctx.combo.set_window(open),
                PlayerCommand::RequestTransition(target) => self.apply_transition(target, rig),
                PlayerCommand::ResetCombo => self.ctx.combo.reset(),
            }
        }
    }

    fn dispatch_events(&mut self, rig: &mut PlayerRig<'_>) {
        let events = self.ctx.events.clone();
        self.ctx.events.clear();

        let ordered = [
            (events.jump, PlayerEvent::Jump),
            (events.left_attack, PlayerEvent::LeftAttack),
            (events.right_attack, PlayerEvent::RightAttack),
            (events.parry_dual, PlayerEvent::ParryOrDual),
        ];
        for (latched, event) in ordered {
            if !latched {
                continue;
            }
            if let Some(target) = self.variant.handle_event(event, &mut self.ctx, rig) {
                self.apply_transition(target, rig);
            }
        }
    }

    /// The single transition path: table-checked, tag and variant swapped
    /// together, `init` run before returning. An `init` that asks for a
    /// further transition gets the deferred slot instead of recursing.
    fn apply_transition(&mut self, target: StateKind, rig: &mut PlayerRig<'_>) {
        let from = self.variant.kind();
        if from == target {
            return;
        }
        if !states::allows(from, target) {
            warn!("transition {from} -> {target} is not reachable, ignoring");
            return;
        }

        info!("player state {from} -> {target}");
        self.ctx.state = target;
        self.variant = StateVariant::new(target);
        if target == StateKind::Idle {
            self.ctx.combo.reset();
        }

        if let Some(next) = self.variant.init(&mut self.ctx, rig) {
            if self.deferred.replace(next).is_some() {
                debug!("init transition request replaced a pending one");
            }
        }
    }
}
