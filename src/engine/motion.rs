// Motion executor boundary and a kinematic demo body

use glam::Vec3;
use thiserror::Error;

/// Failure surfaced by a motion backend when a query cannot be answered.
#[derive(Debug, Error)]
pub enum MotionError {
    /// The body has no active collider (despawned, not yet spawned).
    #[error("motion body has no active collider")]
    MissingCollider,
    /// The backend could not resolve the query this step.
    #[error("motion backend unavailable: {0}")]
    Unavailable(&'static str),
}

/// The character collider consumed by the state machine.
///
/// The core only pushes displacements and reads back grounding and
/// velocity; collision resolution itself lives behind this trait.
pub trait MotionBody {
    /// Queue a displacement for the backend to resolve.
    fn translate(&mut self, displacement: Vec3);

    /// Whether the collider rests on a supporting surface. Callers treat an
    /// `Err` as "not grounded".
    fn is_grounded(&self) -> Result<bool, MotionError>;

    /// Body velocity as resolved by the backend. The vertical component is
    /// what the state machine samples as falling speed.
    fn velocity(&self) -> Vec3;
}

const GROUND_CONTACT: f32 = 1e-4;

/// Minimal kinematic body over an infinite floor plane at height zero.
///
/// Stands in for a real character collider in headless runs and end-to-end
/// tests. Displacements accumulate during a frame and [`commit`] resolves
/// them once. Velocity is derived from the attempted displacement, so a
/// landing frame still reads the impact speed after the floor clamp.
///
/// [`commit`]: KinematicBody::commit
#[derive(Debug)]
pub struct KinematicBody {
    position: Vec3,
    velocity: Vec3,
    pending: Vec3,
    grounded: bool,
}

impl KinematicBody {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            pending: Vec3::ZERO,
            grounded: position.y <= GROUND_CONTACT,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Resolve the displacements queued since the last commit.
    pub fn commit(&mut self, dt: f32) {
        if dt <= 0.0 {
            self.pending = Vec3::ZERO;
            return;
        }
        self.velocity = self.pending / dt;
        let mut next = self.position + self.pending;
        if next.y < 0.0 {
            next.y = 0.0;
        }
        self.grounded = next.y <= GROUND_CONTACT && self.pending.y <= 0.0;
        self.position = next;
        self.pending = Vec3::ZERO;
    }
}

impl MotionBody for KinematicBody {
    fn translate(&mut self, displacement: Vec3) {
        self.pending += displacement;
    }

    fn is_grounded(&self) -> Result<bool, MotionError> {
        Ok(self.grounded)
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }
}

/// Body with externally scripted grounding and velocity, for unit tests
/// that need exact control over what the collider reports.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedBody {
    pub grounded: bool,
    pub fail_grounded: bool,
    pub velocity: Vec3,
    pub moved: Vec<Vec3>,
}

#[cfg(test)]
impl ScriptedBody {
    pub fn standing() -> Self {
        Self {
            grounded: true,
            ..Self::default()
        }
    }

    pub fn airborne(vertical_speed: f32) -> Self {
        Self {
            velocity: Vec3::new(0.0, vertical_speed, 0.0),
            ..Self::default()
        }
    }

    pub fn last_move(&self) -> Vec3 {
        self.moved.last().copied().unwrap_or(Vec3::ZERO)
    }
}

#[cfg(test)]
impl MotionBody for ScriptedBody {
    fn translate(&mut self, displacement: Vec3) {
        self.moved.push(displacement);
    }

    fn is_grounded(&self) -> Result<bool, MotionError> {
        if self.fail_grounded {
            Err(MotionError::Unavailable("scripted failure"))
        } else {
            Ok(self.grounded)
        }
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_spawns_grounded_on_floor() {
        let body = KinematicBody::new(Vec3::ZERO);
        assert_eq!(body.is_grounded().unwrap(), true);
    }

    #[test]
    fn test_commit_applies_displacement() {
        let mut body = KinematicBody::new(Vec3::ZERO);
        body.translate(Vec3::new(0.1, 0.2, 0.0));
        body.commit(DT);
        assert_relative_eq!(body.position().x, 0.1);
        assert_relative_eq!(body.position().y, 0.2);
        assert!(!body.is_grounded().unwrap());
    }

    #[test]
    fn test_floor_clamp_grounds_the_body() {
        let mut body = KinematicBody::new(Vec3::new(0.0, 0.05, 0.0));
        body.translate(Vec3::new(0.0, -0.2, 0.0));
        body.commit(DT);
        assert_relative_eq!(body.position().y, 0.0);
        assert!(body.is_grounded().unwrap());
    }

    #[test]
    fn test_landing_frame_reports_impact_speed() {
        let mut body = KinematicBody::new(Vec3::new(0.0, 0.05, 0.0));
        body.translate(Vec3::new(0.0, -5.0 * DT, 0.0));
        body.commit(DT);
        assert!(body.velocity().y < -0.1);
        assert!(body.is_grounded().unwrap());
    }

    #[test]
    fn test_pending_resets_between_commits() {
        let mut body = KinematicBody::new(Vec3::ZERO);
        body.translate(Vec3::new(1.0, 0.0, 0.0));
        body.commit(DT);
        body.commit(DT);
        assert_relative_eq!(body.position().x, 1.0);
    }

    #[test]
    fn test_zero_dt_commit_drops_pending() {
        let mut body = KinematicBody::new(Vec3::ZERO);
        body.translate(Vec3::new(1.0, 0.0, 0.0));
        body.commit(0.0);
        assert_eq!(body.position(), Vec3::ZERO);
    }
}
