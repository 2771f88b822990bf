//! Input scripts.
//!
//! A line-based stand-in for a device layer, used by the demo binary and by
//! tests that want to describe input as text:
//!
//! ```text
//! move 0 -1 0      # move axis triggered (device convention, forward = -Y)
//! move_end
//! look 0.5 0
//! look_end
//! jump / jump_end
//! fly
//! intent 1 0 0     # programmatic intent
//! velocity 300 0 0 # programmatic velocity
//! status / quit
//! ```

use anyhow::{anyhow, bail, Context};
use mover_shared::{
    event::{ActionEvent, ActionValue, InputAction, TriggerEvent},
    math::{Vec2, Vec3},
};
use tokio::sync::mpsc::{self, error::TryRecvError};

/// One parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Action(ActionEvent),
    RequestIntent(Vec3),
    RequestVelocity(Vec3),
    Status,
    Quit,
}

/// Parses a line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> anyhow::Result<Option<ScriptCommand>> {
    let line = line.split('#').next().unwrap_or_default().trim();
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&verb, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let cmd = match verb {
        "move" => ScriptCommand::Action(ActionEvent::new(
            InputAction::Move,
            TriggerEvent::Triggered,
            ActionValue::Axis3D(parse_vec3(args).context("move")?),
        )),
        "move_end" => edge(InputAction::Move, TriggerEvent::Completed),
        "look" => ScriptCommand::Action(ActionEvent::new(
            InputAction::Look,
            TriggerEvent::Triggered,
            ActionValue::Axis2D(parse_vec2(args).context("look")?),
        )),
        "look_end" => edge(InputAction::Look, TriggerEvent::Completed),
        "jump" => edge(InputAction::Jump, TriggerEvent::Started),
        "jump_end" => edge(InputAction::Jump, TriggerEvent::Completed),
        "fly" => edge(InputAction::Fly, TriggerEvent::Triggered),
        "intent" => ScriptCommand::RequestIntent(parse_vec3(args).context("intent")?),
        "velocity" => ScriptCommand::RequestVelocity(parse_vec3(args).context("velocity")?),
        "status" => ScriptCommand::Status,
        "quit" | "exit" => ScriptCommand::Quit,
        other => bail!("unknown script command: {}", other),
    };
    Ok(Some(cmd))
}

fn edge(action: InputAction, trigger: TriggerEvent) -> ScriptCommand {
    ScriptCommand::Action(ActionEvent::edge(action, trigger))
}

fn parse_floats<const N: usize>(args: &[&str]) -> anyhow::Result<[f32; N]> {
    if args.len() != N {
        bail!("expected {} numbers, got {}", N, args.len());
    }
    let mut out = [0.0; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg
            .parse()
            .map_err(|e| anyhow!("bad number {:?}: {}", arg, e))?;
    }
    Ok(out)
}

fn parse_vec2(args: &[&str]) -> anyhow::Result<Vec2> {
    let [x, y] = parse_floats::<2>(args)?;
    Ok(Vec2::new(x, y))
}

fn parse_vec3(args: &[&str]) -> anyhow::Result<Vec3> {
    let [x, y, z] = parse_floats::<3>(args)?;
    Ok(Vec3::new(x, y, z))
}

/// Lines already waiting on a script channel.
#[derive(Debug, Default, PartialEq)]
pub struct ReadyLines {
    pub lines: Vec<String>,
    /// The sender is gone; nothing more will arrive.
    pub closed: bool,
}

/// Takes every line waiting on `rx` without blocking.
pub fn drain_ready(rx: &mut mpsc::Receiver<String>) -> ReadyLines {
    let mut ready = ReadyLines::default();
    loop {
        match rx.try_recv() {
            Ok(line) => ready.lines.push(line),
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                ready.closed = true;
                break;
            }
        }
    }
    ready
}
