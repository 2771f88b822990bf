//! Headless input producer.
//!
//! Usage:
//!   cargo run -p mover_client -- [--config mover.json] [--tick-hz 60]
//!
//! Reads input script lines from stdin (see `mover_client::script`), feeds
//! them to a player controller possessing a pawn on flat ground, and logs
//! every produced command that differs from the previous one. Runs one more
//! step after stdin closes so queued events still latch, then exits.
//!
//! Script commands:
//!   move x y z / move_end  - Move axis
//!   look x y / look_end    - Look axis
//!   jump / jump_end        - Jump button
//!   fly                    - Toggle flying
//!   intent x y z           - Programmatic move intent
//!   velocity x y z         - Programmatic move velocity
//!   status                 - Show controller status
//!   quit                   - Exit

use std::env;
use std::io::BufRead;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use mover_client::{
    controller::{PawnId, PlayerController},
    script::{drain_ready, parse_line, ScriptCommand},
};
use mover_shared::{
    command::MoverInputCmd,
    config::MoverConfig,
    movement::{FlatGround, StaticBasedSpace},
};
use tokio::sync::mpsc;
use tracing::{info, warn};

struct Args {
    config: Option<PathBuf>,
    tick_hz: Option<u32>,
}

fn parse_args() -> Args {
    let mut parsed = Args {
        config: None,
        tick_hz: None,
    };
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                parsed.config = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--tick-hz" if i + 1 < args.len() => {
                parsed.tick_hz = args[i + 1].parse().ok();
                i += 2;
            }
            _ => i += 1,
        }
    }
    parsed
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = parse_args();
    let mut cfg = match &args.config {
        Some(path) => MoverConfig::load(path).context("load config")?,
        None => MoverConfig::default(),
    };
    if let Some(hz) = args.tick_hz {
        cfg.controller.tick_hz = hz;
    }
    let tick_hz = cfg.controller.tick_hz.max(1);
    info!(tick_hz, character = ?cfg.character, "Starting input producer");

    let mut controller = PlayerController::new(cfg.controller.clone());
    controller.possess(PawnId(1), cfg.character);
    let ground = FlatGround::default();

    // Set up script input channel.
    let (script_tx, mut script_rx) = mpsc::channel::<String>(32);

    // Spawn stdin reader thread.
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if script_tx.blocking_send(line).is_err() {
                break;
            }
        }
    });

    let dt = 1.0 / tick_hz as f32;
    let step_ms = u64::from(1000 / tick_hz).max(1);
    let mut sim_time_ms = 0u64;
    let mut last: Option<MoverInputCmd> = None;

    'run: loop {
        let ready = drain_ready(&mut script_rx);
        for line in &ready.lines {
            match parse_line(line) {
                Ok(Some(ScriptCommand::Action(event))) => controller.queue_action(event),
                Ok(Some(ScriptCommand::RequestIntent(v))) => controller.request_move_by_intent(v),
                Ok(Some(ScriptCommand::RequestVelocity(v))) => {
                    controller.request_move_by_velocity(v)
                }
                Ok(Some(ScriptCommand::Status)) => {
                    println!("Pawn: {:?}", controller.possessed_pawn());
                    println!("Sim time: {} ms", sim_time_ms);
                    println!("Control rotation: {:?}", controller.control_rotation());
                    println!("Flying: {}", controller.input().is_flying_active());
                    println!("Commands buffered: {}", controller.history().len());
                }
                Ok(Some(ScriptCommand::Quit)) => break 'run,
                Ok(None) => {}
                Err(e) => warn!(error = %format!("{e:#}"), "Bad script line"),
            }
        }

        controller.player_tick(dt);
        sim_time_ms += step_ms;

        if let Some(cmd) = controller.produce_input(sim_time_ms, Some(&ground), &StaticBasedSpace)
        {
            let changed = last.as_ref().map_or(true, |prev| {
                MoverInputCmd {
                    sim_time_ms: cmd.sim_time_ms,
                    ..prev.clone()
                } != cmd
            });
            if changed {
                info!(command = %serde_json::to_string(&cmd)?, "Command");
            }
            last = Some(cmd);
        }

        if ready.closed {
            break 'run;
        }

        tokio::time::sleep(Duration::from_secs_f32(dt)).await;
    }

    info!(sim_time_ms, "Stopping input producer");
    Ok(())
}
