//! Museum Walk - Main Entry Point
//!
//! Runs a scripted, headless walk through the demo gallery and logs where
//! the visitor ends up. Pass a RON config file as the first argument to
//! override the movement tuning. Set `RUST_LOG=debug` to see phase changes
//! and probe hits.

use anyhow::Context;
use glam::Vec3;
use museum_game::{MuseumScene, Session, SessionConfig};

/// Fixed frame step for the scripted walk.
const FRAME_TIME: f32 = 1.0 / 60.0;

/// One leg of the scripted walk.
struct Leg {
    label: &'static str,
    keys: &'static [&'static str],
    mouse: (f32, f32),
    frames: u32,
}

const SCRIPT: &[Leg] = &[
    Leg {
        label: "walk to the partition",
        keys: &["KeyW"],
        mouse: (0.0, 0.0),
        frames: 360,
    },
    Leg {
        label: "slide left along the partition",
        keys: &["KeyW", "KeyA"],
        mouse: (0.0, 0.0),
        frames: 90,
    },
    Leg {
        label: "back away",
        keys: &["ArrowDown"],
        mouse: (0.0, 0.0),
        frames: 120,
    },
    Leg {
        label: "settle",
        keys: &[],
        mouse: (0.0, 0.0),
        frames: 60,
    },
    Leg {
        label: "turn toward the amphora",
        keys: &[],
        mouse: (-40.0, 0.0),
        frames: 10,
    },
];

fn run_leg(session: &mut Session, leg: &Leg) {
    for code in leg.keys {
        session.key_code(code, true);
    }

    let start = session.view.position;
    let mut blocked_frames = 0;
    for _ in 0..leg.frames {
        session.mouse_move(leg.mouse);
        if let Some(report) = session.tick(FRAME_TIME) {
            if report.blocked {
                blocked_frames += 1;
            }
        }
    }

    for code in leg.keys {
        session.key_code(code, false);
    }

    let end = session.view.position;
    log::info!(
        "{}: {:.2?} -> {:.2?} ({:.2} units, blocked {} of {} frames, {:?})",
        leg.label,
        start,
        end,
        start.distance(end),
        blocked_frames,
        leg.frames,
        session.motion.phase
    );
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => SessionConfig::load(&path)
            .with_context(|| format!("loading config from {path}"))?,
        None => SessionConfig::default(),
    };

    let mut session = Session::new(config, MuseumScene::gallery());
    session.start();

    for leg in SCRIPT {
        run_leg(&mut session, leg);
    }

    match session.inspect_focused() {
        Some(id) => {
            if let Some(exhibit) = session.scene.exhibit(id) {
                let distance = session.view.position.distance(exhibit.position);
                log::info!("looking at '{}' from {distance:.2} units", exhibit.name);
            }

            // Walking is suspended until inspection ends
            session.key_code("KeyW", true);
            let before = session.view.position;
            for _ in 0..30 {
                session.tick(FRAME_TIME);
            }
            session.key_code("KeyW", false);
            log::info!(
                "moved {:.3} units while inspecting",
                before.distance(session.view.position)
            );

            session.end_inspection();
        }
        None => log::info!("no exhibit in range at {:.2?}", session.view.position),
    }

    let spawn: Vec3 = session.scene.spawn.position;
    log::info!(
        "finished {:.2} units from the entrance",
        spawn.distance(session.view.position)
    );
    session.stop();

    Ok(())
}
