// Emberfall - headless demo of the player locomotion-and-combat core
//
// Drives a scripted session over the kinematic demo body: run, sprint,
// jump, land, then an attack combo and a parry. A cue timeline stands in
// for the animation-keyframe callbacks a real rig would deliver.

use anyhow::Result;
use glam::Vec3;
use log::info;

mod core;
mod engine;
mod game;

use crate::engine::animation::NullAnimator;
use crate::engine::input::{Action, InputState};
use crate::engine::motion::KinematicBody;
use crate::engine::time::FrameClock;
use crate::game::player::{PlayerConfig, PlayerDriver, PlayerRig};

/// Scripted happenings, stamped in session seconds.
enum Cue {
    Press(Action),
    Release(Action),
    JumpApex,
    JumpToFalling,
    ComboWindowOpen,
    ComboWindowClose,
    AttackClipEnd,
    ParryClipEnd,
}

fn timeline() -> Vec<(f32, Cue)> {
    vec![
        (0.5, Cue::Press(Action::MoveForward)),
        (1.5, Cue::Press(Action::Sprint)),
        (2.5, Cue::Release(Action::Sprint)),
        (3.0, Cue::Press(Action::Jump)),
        (3.05, Cue::JumpApex),
        (3.1, Cue::Release(Action::Jump)),
        (3.45, Cue::JumpToFalling),
        (5.0, Cue::Release(Action::MoveForward)),
        (5.5, Cue::Press(Action::LeftAttack)),
        (5.55, Cue::Release(Action::LeftAttack)),
        (5.8, Cue::ComboWindowOpen),
        (5.9, Cue::Press(Action::LeftAttack)),
        (5.95, Cue::Release(Action::LeftAttack)),
        (6.2, Cue::ComboWindowClose),
        (6.5, Cue::AttackClipEnd),
        (6.8, Cue::Press(Action::ParryOrDual)),
        (6.85, Cue::Release(Action::ParryOrDual)),
        (7.2, Cue::ParryClipEnd),
    ]
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Emberfall headless session...");

    let config = PlayerConfig::default();
    config.validate()?;

    let mut driver = PlayerDriver::new(config);
    driver.context_mut().shield_equipped = true;

    let mut body = KinematicBody::new(Vec3::ZERO);
    let mut animator = NullAnimator;
    let mut input = InputState::new();
    let mut clock = FrameClock::new();

    let cues = timeline();
    let mut next_cue = 0;

    while clock.elapsed_secs() < 7.5 {
        let fixed_steps = clock.begin_frame();
        let dt = clock.render_delta_time();
        let now = clock.elapsed_secs();

        while next_cue < cues.len() && cues[next_cue].0 <= now {
            match &cues[next_cue].1 {
                Cue::Press(action) => input.press(*action),
                Cue::Release(action) => input.release(*action),
                Cue::JumpApex => driver.on_jump_apex(),
                Cue::JumpToFalling => driver.on_jump_to_falling_boundary(),
                Cue::ComboWindowOpen => driver.on_combo_window_open(),
                Cue::ComboWindowClose => driver.on_combo_window_close(),
                Cue::AttackClipEnd => driver.on_attack_clip_end(),
                Cue::ParryClipEnd => driver.on_parry_clip_end(),
            }
            next_cue += 1;
        }

        input.write_to(driver.context_mut());

        {
            let mut rig = PlayerRig {
                body: &mut body,
                animator: &mut animator,
                camera_yaw: 0.0,
            };
            driver.tick(dt, &mut rig);
            for _ in 0..fixed_steps {
                driver.fixed_tick(clock.fixed_timestep(), &mut rig);
            }
        }
        body.commit(dt);

        std::thread::sleep(std::time::Duration::from_millis(4));
    }

    info!(
        "Session over in state {} at {:?} with {:.0} stamina",
        driver.state(),
        body.position(),
        driver.context().stamina.current()
    );
    Ok(())
}
