// Combat states - standing attacks, the sprint momentum attack, parry and
// dual-wield

use glam::Vec3;

use crate::core::math;
use crate::engine::animation::params;
use crate::game::player::combo::{AttackChain, Strike};
use crate::game::player::context::PlayerContext;
use crate::game::player::driver::PlayerRig;

use super::{
    begin_tick, falling_entry, match_camera, planar_step, publish_intent, PlayerEvent, StateKind,
};

/// Run an attack input through the combo sequencer and fire the matching
/// trigger when it is accepted. Dropped input never reaches the animator.
fn deliver_strike(chain: AttackChain, ctx: &mut PlayerContext, rig: &mut PlayerRig<'_>) {
    let Some(strike) = ctx.combo.try_strike(chain) else {
        log::debug!("attack input outside the combo window dropped");
        return;
    };
    let trigger = match (chain, strike) {
        (AttackChain::LeftHand, Strike::Opener) => params::LEFT_HAND_ATTACK,
        (AttackChain::LeftHand, Strike::FollowUp(_)) => params::LEFT_HAND_ATTACK_COMBO,
        (AttackChain::RightHand, Strike::Opener) => params::RIGHT_HAND_ATTACK,
        (AttackChain::RightHand, Strike::FollowUp(_)) => params::RIGHT_HAND_ATTACK_COMBO,
        (AttackChain::DualWield, Strike::Opener) => params::DUAL_WIELD_ATTACK,
        (AttackChain::DualWield, Strike::FollowUp(_)) => params::DUAL_WIELD_ATTACK_COMBO,
    };
    rig.animator.set_trigger(trigger);
    ctx.combat_mode = true;
    rig.animator.set_bool(params::COMBAT_TOGGLE, true);
}

/// Standing attack chains for either hand. Moves at walking pace and never
/// exits on its own; the end-of-clip callback sends it back to Idle.
#[derive(Debug, Default)]
pub struct AttackState {
    movement: Vec3,
}

impl AttackState {
    pub(super) fn init(
        &mut self,
        ctx: &mut PlayerContext,
        rig: &mut PlayerRig<'_>,
    ) -> Option<StateKind> {
        ctx.walk_mode = true;
        ctx.combat_mode = true;
        ctx.crouch_mode = false;
        ctx.sprint_mode = false;
        rig.animator.set_bool(params::WALK_TOGGLE, true);

        if ctx.left_hand_attack {
            deliver_strike(AttackChain::LeftHand, ctx, rig);
        }
        if ctx.right_hand_attack {
            deliver_strike(AttackChain::RightHand, ctx, rig);
        }
        ctx.left_hand_attack = false;
        ctx.right_hand_attack = false;
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

        publish_intent(ctx, rig);
        self.movement = planar_step(ctx, ctx.config.walk_speed, dt);
        if self.movement.length() >= math::INTENT_EPSILON {
            rig.body.translate(self.movement + basis.gravity_step);
        }
        match_camera(ctx, rig);
        None
    }

    pub(super) fn handle_event(
        &mut self,
        event: PlayerEvent,
        ctx: &mut PlayerContext,
        rig: &mut PlayerRig<'_>,
    ) -> Option<StateKind> {
        match event {
            PlayerEvent::LeftAttack => deliver_strike(AttackChain::LeftHand, ctx, rig),
            PlayerEvent::RightAttack => deliver_strike(AttackChain::RightHand, ctx, rig),
            _ => {}
        }
        None
    }
}

/// One-shot sprint momentum attack. No planar control while it plays.
#[derive(Debug, Default)]
pub struct RunningAttackState;

impl RunningAttackState {
    pub(super) fn init(
        &mut self,
        ctx: &mut PlayerContext,
        rig: &mut PlayerRig<'_>,
    ) -> Option<StateKind> {
        ctx.combat_mode = true;
        ctx.crouch_mode = false;
        ctx.sprint_mode = false;
        ctx.walk_mode = false;

        rig.animator.set_float(params::MOVEMENT_X, 0.0);
        rig.animator.set_float(params::MOVEMENT_Y, 0.0);

        if ctx.left_hand_running_attack {
            rig.animator.set_trigger(params::LEFT_HAND_RUNNING_ATTACK);
            rig.animator.set_bool(params::COMBAT_TOGGLE, true);
        }
        if ctx.right_hand_running_attack {
            rig.animator.set_trigger(params::RIGHT_HAND_RUNNING_ATTACK);
            rig.animator.set_bool(params::COMBAT_TOGGLE, true);
        }
        ctx.left_hand_running_attack = false;
        ctx.right_hand_running_attack = false;
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
        match_camera(ctx, rig);
        None
    }
}

/// Parry with a shield, or the dual-wield chain when both hands hold blades.
#[derive(Debug, Default)]
pub struct ParryState;

impl ParryState {
    pub(super) fn init(
        &mut self,
        ctx: &mut PlayerContext,
        rig: &mut PlayerRig<'_>,
    ) -> Option<StateKind> {
        if ctx.dual_wield_equipped {
            deliver_strike(AttackChain::DualWield, ctx, rig);
        } else if ctx.shield_equipped {
            rig.animator.set_trigger(params::PARRY);
            ctx.combat_mode = true;
            rig.animator.set_bool(params::COMBAT_TOGGLE, true);
        } else {
            log::debug!("parry requested with no shield or dual blades");
        }
        None
    }

    pub(super) fn update(
        &mut self,
        ctx: &mut PlayerContext,
        rig: &mut PlayerRig<'_>,
        dt: f32,
    ) -> Option<StateKind> {
        let basis = begin_tick(ctx, rig, dt);
        falling_entry(ctx, &basis)
    }

    pub(super) fn handle_event(
        &mut self,
        event: PlayerEvent,
        ctx: &mut PlayerContext,
        rig: &mut PlayerRig<'_>,
    ) -> Option<StateKind> {
        if event == PlayerEvent::ParryOrDual && ctx.dual_wield_equipped {
            deliver_strike(AttackChain::DualWield, ctx, rig);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::animation::RecordingAnimator;
    use crate::engine::motion::ScriptedBody;
    use crate::game::player::config::PlayerConfig;

    const DT: f32 = 1.0 / 60.0;

    fn ctx() -> PlayerContext {
        PlayerContext::new(PlayerConfig::default())
    }

    #[test]
    fn test_attack_init_fires_requested_opener() {
        let mut ctx = ctx();
        ctx.left_hand_attack = true;
        let mut body = ScriptedBody::standing();
        let mut animator = RecordingAnimator::default();
        let mut rig = PlayerRig {
            body: &mut body,
            animator: &mut animator,
            camera_yaw: 0.0,
        };
        AttackState::default().init(&mut ctx, &mut rig);

        assert!(animator.has_trigger(params::LEFT_HAND_ATTACK));
        assert_eq!(ctx.combo.step(), 1);
        assert!(ctx.combat_mode);
        assert!(ctx.walk_mode, "attack locomotion is walk-paced");
        assert!(!ctx.left_hand_attack, "the request flag is consumed");
    }

    #[test]
    fn test_attack_second_input_before_window_is_dropped() {
        let mut ctx = ctx();
        ctx.right_hand_attack = true;
        let mut body = ScriptedBody::standing();
        let mut animator = RecordingAnimator::default();
        let mut rig = PlayerRig {
            body: &mut body,
            animator: &mut animator,
            camera_yaw: 0.0,
        };
        let mut state = AttackState::default();
        state.init(&mut ctx, &mut rig);
        animator.clear();

        let mut rig = PlayerRig {
            body: &mut body,
            animator: &mut animator,
            camera_yaw: 0.0,
        };
        state.handle_event(PlayerEvent::RightAttack, &mut ctx, &mut rig);
        assert_eq!(ctx.combo.step(), 1, "input outside the window must be dropped");
        assert!(!animator.has_trigger(params::RIGHT_HAND_ATTACK_COMBO));
    }

    #[test]
    fn test_attack_follow_up_inside_window() {
        let mut ctx = ctx();
        ctx.right_hand_attack = true;
        let mut body = ScriptedBody::standing();
        let mut animator = RecordingAnimator::default();
        let mut rig = PlayerRig {
            body: &mut body,
            animator: &mut animator,
            camera_yaw: 0.0,
        };
        let mut state = AttackState::default();
        state.init(&mut ctx, &mut rig);

        ctx.combo.set_window(true);
        let mut rig = PlayerRig {
            body: &mut body,
            animator: &mut animator,
            camera_yaw: 0.0,
        };
        state.handle_event(PlayerEvent::RightAttack, &mut ctx, &mut rig);
        assert_eq!(ctx.combo.step(), 2);
        assert!(animator.has_trigger(params::RIGHT_HAND_ATTACK_COMBO));
    }

    #[test]
    fn test_running_attack_init_zeroes_blend_and_fires() {
        let mut ctx = ctx();
        ctx.right_hand_running_attack = true;
        let mut body = ScriptedBody::standing();
        let mut animator = RecordingAnimator::default();
        let mut rig = PlayerRig {
            body: &mut body,
            animator: &mut animator,
            camera_yaw: 0.0,
        };
        RunningAttackState.init(&mut ctx, &mut rig);

        assert!(animator.has_trigger(params::RIGHT_HAND_RUNNING_ATTACK));
        assert!(!ctx.right_hand_running_attack);
        assert!(!ctx.sprint_mode);
    }

    #[test]
    fn test_running_attack_does_not_move() {
        let mut ctx = ctx();
        ctx.movement_intent = glam::Vec2::new(0.0, 1.0);
        let mut body = ScriptedBody::standing();
        let mut animator = RecordingAnimator::default();
        let mut rig = PlayerRig {
            body: &mut body,
            animator: &mut animator,
            camera_yaw: 0.0,
        };
        RunningAttackState.update(&mut ctx, &mut rig, DT);
        assert!(body.moved.is_empty());
    }

    #[test]
    fn test_parry_branches_on_loadout() {
        let mut body = ScriptedBody::standing();

        let mut dual = ctx();
        dual.dual_wield_equipped = true;
        let mut animator = RecordingAnimator::default();
        let mut rig = PlayerRig {
            body: &mut body,
            animator: &mut animator,
            camera_yaw: 0.0,
        };
        ParryState.init(&mut dual, &mut rig);
        assert!(animator.has_trigger(params::DUAL_WIELD_ATTACK));

        let mut shielded = ctx();
        shielded.shield_equipped = true;
        let mut animator = RecordingAnimator::default();
        let mut rig = PlayerRig {
            body: &mut body,
            animator: &mut animator,
            camera_yaw: 0.0,
        };
        ParryState.init(&mut shielded, &mut rig);
        assert!(animator.has_trigger(params::PARRY));
    }

    #[test]
    fn test_dual_wield_follow_up_through_event() {
        let mut ctx = ctx();
        ctx.dual_wield_equipped = true;
        let mut body = ScriptedBody::standing();
        let mut animator = RecordingAnimator::default();
        let mut rig = PlayerRig {
            body: &mut body,
            animator: &mut animator,
            camera_yaw: 0.0,
        };
        let mut state = ParryState;
        state.init(&mut ctx, &mut rig);

        ctx.combo.set_window(true);
        let mut rig = PlayerRig {
            body: &mut body,
            animator: &mut animator,
            camera_yaw: 0.0,
        };
        state.handle_event(PlayerEvent::ParryOrDual, &mut ctx, &mut rig);
        assert!(animator.has_trigger(params::DUAL_WIELD_ATTACK_COMBO));
        assert_eq!(ctx.combo.step(), 2);
    }
}
