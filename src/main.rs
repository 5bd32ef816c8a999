//! Headless session driver
//!
//! Runs the task with a scripted pointer orbit and a logging renderer: one
//! tick per "frame", then a draw request, until the input quits or a hunter
//! catches the player. Useful for soak-testing the motion model and for
//! reproducing a session from its seed.
//!
//! ```text
//! dont-get-caught [--task demo|caught] [--config FILE] [--seed N] [--frames N]
//! ```

use std::path::PathBuf;

use dont_get_caught::platform::{InputSource, ScriptedInput};
use dont_get_caught::renderer::{ConsoleRenderer, Renderer};
use dont_get_caught::sim::{GameEvent, SessionPhase, SessionState, tick};
use dont_get_caught::Config;

struct Args {
    task: String,
    config: Option<PathBuf>,
    seed: u64,
    frames: u64,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        task: "caught".into(),
        config: None,
        seed: 42,
        frames: 3600,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = |name: &str| {
            iter.next().ok_or_else(|| format!("{name} needs a value"))
        };
        match flag.as_str() {
            "--task" => args.task = value("--task")?,
            "--config" => args.config = Some(PathBuf::from(value("--config")?)),
            "--seed" => {
                args.seed = value("--seed")?
                    .parse()
                    .map_err(|e| format!("--seed: {e}"))?;
            }
            "--frames" => {
                args.frames = value("--frames")?
                    .parse()
                    .map_err(|e| format!("--frames: {e}"))?;
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(args)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => match args.task.as_str() {
            "demo" => Config::demo(),
            "caught" => Config::dont_get_caught(),
            other => return Err(format!("unknown task: {other}").into()),
        },
    };

    let mut session = SessionState::new(&config, args.seed)?;
    log::info!(
        "session seed {} arena {:.2} x {:.2} deg, {} hunters, {} distractors",
        args.seed,
        session.arena.half_width,
        session.arena.half_height,
        session.hunters.len(),
        session.distractors.len(),
    );

    // Pointer orbits at half the arena width, toggling the facing
    // condition every two seconds at 60 Hz
    let mut input = ScriptedInput::orbit(session.arena.half_width / 2.0, 0.02, args.frames)
        .with_toggle_every(120);
    let mut renderer = ConsoleRenderer;

    while session.phase == SessionPhase::Running {
        let sample = input.sample();
        for event in tick(&mut session, &sample) {
            match event {
                GameEvent::FaceTargetToggled(face) => {
                    log::info!("tick {}: face_target -> {face}", session.time_ticks);
                }
                GameEvent::PlayerCaught { hunter } => {
                    log::info!(
                        "tick {}: caught by hunter {hunter} at ({:.2}, {:.2})",
                        session.time_ticks,
                        session.player.pos.x,
                        session.player.pos.y,
                    );
                }
            }
        }
        renderer.present(&session.sprites());
    }

    log::info!("session finished after {} ticks", session.time_ticks);
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        log::error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
