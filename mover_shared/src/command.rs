//! Movement input command.
//!
//! One [`MoverInputCmd`] is produced per simulation step and handed to the
//! movement simulation. Commands are plain data: serializable, comparable,
//! and never mutated after production.

use anyhow::Context;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{
    math::{Rotator, Vec3},
    movement::{BaseId, BoneName},
};

/// How `move_input` should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MoveInputType {
    /// Direction and magnitude in [0,1] of desired acceleration.
    #[default]
    DirectionalIntent,
    /// Explicit target velocity.
    Velocity,
}

/// Movement mode the simulation is asked to switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MovementModeChange {
    #[default]
    None,
    Flying,
    Falling,
}

/// Movement base the command's vectors are expressed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasedMovement {
    pub base: BaseId,
    pub bone: BoneName,
}

/// Input for one movement simulation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MoverInputCmd {
    pub sim_time_ms: u64,
    pub control_rotation: Rotator,
    pub move_input_type: MoveInputType,
    pub move_input: Vec3,
    pub orientation_intent: Vec3,
    pub is_jump_pressed: bool,
    pub is_jump_just_pressed: bool,
    pub suggested_mode_change: MovementModeChange,
    /// True when `move_input` and `orientation_intent` are in based space.
    pub using_movement_base: bool,
    pub movement_base: Option<BasedMovement>,
}

pub fn encode_command(cmd: &MoverInputCmd) -> anyhow::Result<Bytes> {
    let payload = serde_json::to_vec(cmd).context("serialize command")?;
    Ok(Bytes::from(payload))
}

pub fn decode_command(b: &[u8]) -> anyhow::Result<MoverInputCmd> {
    serde_json::from_slice(b).context("deserialize command")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_roundtrip_bytes() {
        let cmd = MoverInputCmd {
            sim_time_ms: 1500,
            control_rotation: Rotator::new(-10.0, 45.0, 0.0),
            move_input_type: MoveInputType::Velocity,
            move_input: Vec3::new(300.0, 0.0, 0.0),
            suggested_mode_change: MovementModeChange::Flying,
            using_movement_base: true,
            movement_base: Some(BasedMovement {
                base: BaseId(3),
                bone: BoneName::new("deck"),
            }),
            ..Default::default()
        };
        let bytes = encode_command(&cmd).unwrap();
        assert_eq!(decode_command(&bytes).unwrap(), cmd);
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = decode_command(b"not json").unwrap_err();
        assert!(format!("{err:#}").contains("deserialize command"));
    }
}
