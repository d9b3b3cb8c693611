// Shared player context - the single mutable surface every state reads and writes

use glam::Vec2;

use crate::core::math;

use super::combo::ComboTracker;
use super::config::PlayerConfig;
use super::stamina::StaminaLedger;
use super::states::StateKind;

/// Discrete action events latched by the intent producer and consumed once
/// per tick by the driver.
#[derive(Debug, Clone, Default)]
pub struct EventLatch {
    pub jump: bool,
    pub left_attack: bool,
    pub right_attack: bool,
    pub parry_dual: bool,
}

impl EventLatch {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Shared mutable context owned by the driver for the player's lifetime.
///
/// State variants receive it by explicit borrow each tick; nothing durable
/// lives anywhere else, so swapping variants loses no state.
#[derive(Debug)]
pub struct PlayerContext {
    pub config: PlayerConfig,

    // Per-tick intent from the input shell
    pub movement_intent: Vec2,
    pub walk_mode: bool,
    pub sprint_mode: bool,
    pub crouch_mode: bool,
    pub combat_mode: bool,
    pub events: EventLatch,

    // Gravity and airborne bookkeeping
    pub current_gravity: f32,
    pub jumping_triggered: bool,
    pub falling_triggered: bool,
    /// Vertical speed sampled from the motion body each tick.
    pub falling_speed: f32,

    // Resources
    pub stamina: StaminaLedger,
    pub combo: ComboTracker,

    // Combat requests and loadout
    pub left_hand_attack: bool,
    pub right_hand_attack: bool,
    pub left_hand_running_attack: bool,
    pub right_hand_running_attack: bool,
    pub dual_wield_equipped: bool,
    pub shield_equipped: bool,

    /// Character facing (radians). The movement basis derives from this;
    /// states that follow the camera overwrite it every tick.
    pub facing_yaw: f32,

    /// Tag of the live state variant, kept in lockstep by the driver.
    pub state: StateKind,
}

impl PlayerContext {
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            movement_intent: Vec2::ZERO,
            walk_mode: false,
            sprint_mode: false,
            crouch_mode: false,
            combat_mode: false,
            events: EventLatch::default(),

            current_gravity: config.constant_gravity,
            jumping_triggered: false,
            falling_triggered: false,
            falling_speed: 0.0,

            stamina: StaminaLedger::full(config.stamina_range),
            combo: ComboTracker::default(),

            left_hand_attack: false,
            right_hand_attack: false,
            left_hand_running_attack: false,
            right_hand_running_attack: false,
            dual_wield_equipped: false,
            shield_equipped: false,

            facing_yaw: 0.0,
            state: StateKind::Idle,
            config,
        }
    }

    /// Whether the current intent counts as input at all.
    pub fn has_intent(&self) -> bool {
        self.movement_intent.length() >= math::INTENT_EPSILON
    }
}
