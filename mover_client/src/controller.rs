//! Player controller.
//!
//! Owns the latched input for one locally controlled player and feeds the
//! movement simulation of whichever pawn it currently possesses:
//! - Input events, applied immediately or queued until the next step
//! - Camera spin from the look axis, once per frame
//! - One command per simulation step, with replay of recorded steps
//!
//! Determinism notes:
//! - Step production reads only latched state and the control rotation.
//! - Replays never flush queued events or touch latched state.

use mover_shared::{
    command::MoverInputCmd,
    config::{CharacterConfig, ControllerConfig},
    event::{ActionEvent, ActionQueue},
    math::{Rotator, Vec3},
    movement::{BasedSpace, MovementQuery},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    bindings::InputBindings,
    history::CommandHistory,
    input::{build_command, InputState},
};

/// Identifies a controllable pawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PawnId(pub u64);

#[derive(Debug, Clone, Copy)]
struct Possession {
    pawn: PawnId,
    config: CharacterConfig,
}

pub struct PlayerController {
    cfg: ControllerConfig,
    input: InputState,
    bindings: InputBindings,
    pending: ActionQueue,
    history: CommandHistory,
    control_rotation: Rotator,
    possessed: Option<Possession>,
}

impl PlayerController {
    pub fn new(cfg: ControllerConfig) -> Self {
        Self::with_bindings(cfg, InputBindings::default())
    }

    pub fn with_bindings(cfg: ControllerConfig, bindings: InputBindings) -> Self {
        let history = CommandHistory::new(cfg.history_capacity);
        Self {
            cfg,
            input: InputState::default(),
            bindings,
            pending: ActionQueue::default(),
            history,
            control_rotation: Rotator::ZERO,
            possessed: None,
        }
    }

    /// Starts producing input for `pawn` from a clean latched state.
    pub fn possess(&mut self, pawn: PawnId, config: CharacterConfig) {
        if let Some(prev) = self.possessed {
            debug!(pawn = ?prev.pawn, "Releasing previous pawn");
        }
        self.detach();
        self.possessed = Some(Possession { pawn, config });
        info!(?pawn, "Possessed pawn");
    }

    /// Stops producing input and drops everything latched for the old pawn.
    pub fn unpossess(&mut self) {
        if let Some(prev) = self.possessed.take() {
            info!(pawn = ?prev.pawn, "Unpossessed pawn");
        }
        self.detach();
    }

    fn detach(&mut self) {
        self.input.reset();
        self.pending.clear();
        self.history.clear();
    }

    pub fn possessed_pawn(&self) -> Option<PawnId> {
        self.possessed.map(|p| p.pawn)
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn control_rotation(&self) -> Rotator {
        self.control_rotation
    }

    pub fn set_control_rotation(&mut self, rotation: Rotator) {
        self.control_rotation = rotation;
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Applies an input event right away. Ignored while unpossessed.
    pub fn handle_action(&mut self, event: ActionEvent) -> bool {
        if self.possessed.is_none() {
            return false;
        }
        self.bindings.dispatch(&event, &mut self.input)
    }

    /// Queues an input event for the next fresh simulation step.
    pub fn queue_action(&mut self, event: ActionEvent) {
        if self.possessed.is_some() {
            self.pending.push(event);
        }
    }

    pub fn pending_actions(&self) -> usize {
        self.pending.len()
    }

    pub fn request_move_by_intent(&mut self, intent: Vec3) {
        self.input.request_move_by_intent(intent);
    }

    pub fn request_move_by_velocity(&mut self, velocity: Vec3) {
        self.input.request_move_by_velocity(velocity);
    }

    /// Spins the camera from the look axis and consumes it.
    pub fn player_tick(&mut self, dt_sec: f32) {
        let look = self.input.take_look_input();
        let yaw = self.control_rotation.yaw + look.x * self.cfg.look_rate_yaw * dt_sec;
        let pitch = self.control_rotation.pitch - look.y * self.cfg.look_rate_pitch * dt_sec;

        self.control_rotation.yaw = Rotator::normalize_axis(yaw);
        self.control_rotation.pitch = pitch.clamp(self.cfg.view_pitch_min, self.cfg.view_pitch_max);
    }

    /// Produces the command for the simulation step at `sim_time_ms`.
    ///
    /// Returns `None` while no pawn is possessed. A time at or before the
    /// latest produced step is a replay and returns the recorded command.
    pub fn produce_input(
        &mut self,
        sim_time_ms: u64,
        movement: Option<&dyn MovementQuery>,
        based_space: &dyn BasedSpace,
    ) -> Option<MoverInputCmd> {
        let config = self.possessed?.config;

        if let Some(latest) = self.history.latest_time() {
            if sim_time_ms <= latest {
                return Some(self.replay(sim_time_ms, &config, movement, based_space));
            }
        }

        self.flush_pending();
        let produced = build_command(
            &self.input,
            sim_time_ms,
            self.control_rotation,
            &config,
            movement,
            based_space,
        );
        self.input.commit(&produced);
        self.history.push(produced.cmd.clone());
        Some(produced.cmd)
    }

    fn replay(
        &self,
        sim_time_ms: u64,
        config: &CharacterConfig,
        movement: Option<&dyn MovementQuery>,
        based_space: &dyn BasedSpace,
    ) -> MoverInputCmd {
        if let Some(cmd) = self.history.get(sim_time_ms) {
            debug!(sim_time_ms, "Replaying recorded command");
            return cmd.clone();
        }

        // Rebuild from what is latched now, minus the one-shots that belong
        // to the live step.
        warn!(sim_time_ms, "Replayed step not in history, rebuilding");
        let mut masked = self.input.clone();
        masked.consume_one_shots();
        build_command(
            &masked,
            sim_time_ms,
            self.control_rotation,
            config,
            movement,
            based_space,
        )
        .cmd
    }

    fn flush_pending(&mut self) {
        for event in self.pending.drain() {
            self.bindings.dispatch(&event, &mut self.input);
        }
    }
}
