// Player tunables - the single source for movement, gravity and stamina numbers

use thiserror::Error;

/// Validation failures raised before a config reaches the state machine.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f32 },
    #[error("stamina range is inverted ({min} >= {max})")]
    InvertedStaminaRange { min: f32, max: f32 },
    #[error("max gravity {max} must sit below constant gravity {constant}")]
    GravityBounds { constant: f32, max: f32 },
    #[error("falling threshold must be negative (got {0})")]
    FallingThresholdNotNegative(f32),
    #[error("sprint start cost {cost} must sit inside the stamina range {min}..{max}")]
    SprintCostOutOfRange { cost: f32, min: f32, max: f32 },
}

/// Tunables for the player state machine.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    // Locomotion speeds (units/second)
    pub walk_speed: f32,
    pub run_speed: f32,
    pub sprint_speed: f32,

    // Gravity accumulator
    /// Decay applied to the accumulator per second while airborne.
    pub gravity_rate: f32,
    /// Accumulator value while grounded; a small downward pull that keeps
    /// the collider seated on slopes and steps.
    pub constant_gravity: f32,
    /// Terminal accumulator value.
    pub max_gravity: f32,
    /// Constant pull applied by the fixed step while airborne.
    pub ambient_gravity: f32,

    // Jumping and falling
    /// Accumulator value applied on the jump keyframe.
    pub jump_force: f32,
    /// Vertical speed below which the character counts as falling.
    pub falling_threshold: f32,

    // Stamina
    pub stamina_range: (f32, f32),
    /// Sprint entry gate; stricter than the continuation gate.
    pub sprinting_start_cost: f32,
    pub sprinting_cost_per_second: f32,
    pub stamina_regen_per_second: f32,
}

/// Baseline tunables. Balanced for the demo scene.
pub const BASE_CONFIG: PlayerConfig = PlayerConfig {
    walk_speed: 2.0,
    run_speed: 6.0,
    sprint_speed: 10.0,

    gravity_rate: 19.6,
    constant_gravity: -1.0,
    max_gravity: -30.0,
    ambient_gravity: 9.81,

    jump_force: 8.0,
    falling_threshold: -2.0,

    stamina_range: (0.0, 100.0),
    sprinting_start_cost: 10.0,
    sprinting_cost_per_second: 15.0,
    stamina_regen_per_second: 10.0,
};

impl Default for PlayerConfig {
    fn default() -> Self {
        BASE_CONFIG
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("walk_speed", self.walk_speed),
            ("run_speed", self.run_speed),
            ("sprint_speed", self.sprint_speed),
            ("gravity_rate", self.gravity_rate),
            ("ambient_gravity", self.ambient_gravity),
            ("jump_force", self.jump_force),
            ("sprinting_cost_per_second", self.sprinting_cost_per_second),
            ("stamina_regen_per_second", self.stamina_regen_per_second),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        let (min, max) = self.stamina_range;
        if min >= max {
            return Err(ConfigError::InvertedStaminaRange { min, max });
        }
        if self.max_gravity >= self.constant_gravity {
            return Err(ConfigError::GravityBounds {
                constant: self.constant_gravity,
                max: self.max_gravity,
            });
        }
        if self.falling_threshold >= 0.0 {
            return Err(ConfigError::FallingThresholdNotNegative(
                self.falling_threshold,
            ));
        }
        if self.sprinting_start_cost <= min || self.sprinting_start_cost >= max {
            return Err(ConfigError::SprintCostOutOfRange {
                cost: self.sprinting_start_cost,
                min,
                max,
            });
        }
        Ok(())
    }
}
