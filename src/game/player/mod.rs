// Player locomotion-and-combat core
//
// This module contains everything that turns intent and action events into
// displacement, animation parameters and combo sequencing:
// - config / context: tunables and the shared mutable surface
// - stamina / combo / gravity: the leaf resources states draw on
// - states: one variant per behavior, plus the transition table
// - driver: the tick loop, command queue and transition enforcement

pub mod combo;
pub mod config;
pub mod context;
pub mod driver;
pub mod gravity;
pub mod stamina;
pub mod states;

// Re-export commonly used types
pub use combo::{AttackChain, ComboTracker, Strike};
pub use config::{ConfigError, PlayerConfig};
pub use context::PlayerContext;
pub use driver::{PlayerCommand, PlayerDriver, PlayerRig};
pub use stamina::StaminaLedger;
pub use states::{PlayerEvent, StateKind, StateVariant};
