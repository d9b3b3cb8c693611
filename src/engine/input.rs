// Player action set and per-tick intent production

use std::collections::HashSet;

use glam::Vec2;

use crate::game::player::context::PlayerContext;

/// Everything the player can ask for.
///
/// Walk, sprint and crouch are level-triggered holds; jump and the attacks
/// are edge-triggered events latched for exactly one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement axes
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,

    // Mode holds
    Walk,
    Sprint,
    Crouch,

    // Discrete events
    Jump,
    LeftAttack,
    RightAttack,
    ParryOrDual,
}

/// Held / just-pressed tracking for one player, fed by whatever shell owns
/// the real input devices.
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Action>,
    just_pressed: HashSet<Action>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a press. Repeated presses while held do not re-edge.
    pub fn press(&mut self, action: Action) {
        if self.held.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Compose the held movement axes into a raw intent vector.
    /// Magnitude is capped at 1 so diagonals are not faster.
    pub fn movement_intent(&self) -> Vec2 {
        let mut intent = Vec2::ZERO;
        if self.is_held(Action::MoveForward) {
            intent.y += 1.0;
        }
        if self.is_held(Action::MoveBack) {
            intent.y -= 1.0;
        }
        if self.is_held(Action::MoveRight) {
            intent.x += 1.0;
        }
        if self.is_held(Action::MoveLeft) {
            intent.x -= 1.0;
        }
        if intent.length() > 1.0 {
            intent.normalize()
        } else {
            intent
        }
    }

    /// Write this tick's intent, mode flags and edge events into the player
    /// context, then clear the edge set.
    pub fn write_to(&mut self, ctx: &mut PlayerContext) {
        ctx.movement_intent = self.movement_intent();
        ctx.walk_mode = self.is_held(Action::Walk);
        ctx.sprint_mode = self.is_held(Action::Sprint);
        ctx.crouch_mode = self.is_held(Action::Crouch);

        if self.just_pressed(Action::Jump) {
            ctx.events.jump = true;
        }
        if self.just_pressed(Action::LeftAttack) {
            ctx.events.left_attack = true;
        }
        if self.just_pressed(Action::RightAttack) {
            ctx.events.right_attack = true;
        }
        if self.just_pressed(Action::ParryOrDual) {
            ctx.events.parry_dual = true;
        }

        self.just_pressed.clear();
    }
}
