//! Input handling.
//!
//! [`InputState`] latches whatever the input layer reports between simulation
//! steps. [`build_command`] samples that latched state once per step and turns
//! it into a [`MoverInputCmd`]. It only reads the latched fields, so the same
//! state always yields the same command; state changes caused by a step are
//! applied afterwards through [`InputState::commit`].

use mover_shared::{
    command::{BasedMovement, MoveInputType, MovementModeChange, MoverInputCmd},
    config::CharacterConfig,
    math::{Rotator, Vec2, Vec3},
    movement::{BasedSpace, MovementQuery},
};
use tracing::{debug, trace};

/// Move vectors shorter than this carry no orientation intent.
pub const MIN_AFFIRMATIVE_MOVE: f32 = 1e-3;

/// Latched per-controller input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    move_intent: Vec3,
    move_velocity: Vec3,
    /// World-space intent move from the last step that had one.
    last_affirmative_move_input: Vec3,
    look_input: Vec2,
    turn_input: Vec2,
    is_jump_pressed: bool,
    is_jump_just_pressed: bool,
    is_flying_active: bool,
    should_toggle_flying: bool,
}

impl InputState {
    /// Device reports forward as negative; stored intent is flipped.
    pub fn on_move_triggered(&mut self, value: Vec3) {
        self.move_intent = (-value).clamp_axes(-1.0, 1.0);
    }

    pub fn on_move_completed(&mut self) {
        self.move_intent = Vec3::ZERO;
    }

    pub fn on_look_triggered(&mut self, value: Vec2) {
        let clamped = value.clamp_axes(-1.0, 1.0);
        self.look_input = clamped;
        self.turn_input = clamped;
    }

    pub fn on_look_completed(&mut self) {
        self.look_input = Vec2::ZERO;
        self.turn_input = Vec2::ZERO;
    }

    /// A repeated start while already pressed reports no new edge.
    pub fn on_jump_started(&mut self) {
        self.is_jump_just_pressed = !self.is_jump_pressed;
        self.is_jump_pressed = true;
    }

    pub fn on_jump_completed(&mut self) {
        self.is_jump_pressed = false;
        self.is_jump_just_pressed = false;
    }

    pub fn on_fly_triggered(&mut self) {
        self.should_toggle_flying = true;
    }

    /// Programmatic intent, e.g. from AI. Length 1 is full acceleration.
    pub fn request_move_by_intent(&mut self, intent: Vec3) {
        self.move_intent = intent;
    }

    /// Programmatic velocity. Overrides intent until set back to zero.
    pub fn request_move_by_velocity(&mut self, velocity: Vec3) {
        self.move_velocity = velocity;
    }

    pub fn move_intent(&self) -> Vec3 {
        self.move_intent
    }

    pub fn move_velocity(&self) -> Vec3 {
        self.move_velocity
    }

    pub fn last_affirmative_move_input(&self) -> Vec3 {
        self.last_affirmative_move_input
    }

    /// Look axis as (yaw, pitch).
    pub fn look_input(&self) -> Vec2 {
        self.look_input
    }

    /// Turn axis as (yaw, pitch).
    pub fn turn_input(&self) -> Vec2 {
        self.turn_input
    }

    pub fn is_jump_pressed(&self) -> bool {
        self.is_jump_pressed
    }

    pub fn is_jump_just_pressed(&self) -> bool {
        self.is_jump_just_pressed
    }

    pub fn is_flying_active(&self) -> bool {
        self.is_flying_active
    }

    pub fn should_toggle_flying(&self) -> bool {
        self.should_toggle_flying
    }

    /// Returns the look axis and zeroes it. Turn input is left alone.
    pub fn take_look_input(&mut self) -> Vec2 {
        std::mem::take(&mut self.look_input)
    }

    /// Clears the one-shot flags. Runs at the end of every step whether or
    /// not the step used them.
    pub fn consume_one_shots(&mut self) {
        self.is_jump_just_pressed = false;
        self.should_toggle_flying = false;
    }

    /// Applies the sticky updates of a produced step, then consumes one-shots.
    pub fn commit(&mut self, produced: &ProducedInput) {
        if let Some(affirmative) = produced.affirmative_move_input {
            self.last_affirmative_move_input = affirmative;
        }
        if produced.toggled_flying {
            self.is_flying_active = !self.is_flying_active;
            debug!(flying = self.is_flying_active, "Flight toggled");
        }
        self.consume_one_shots();
    }

    /// Drops everything latched so far.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Output of [`build_command`]: the command plus the sticky updates it implies.
#[derive(Debug, Clone, PartialEq)]
pub struct ProducedInput {
    pub cmd: MoverInputCmd,
    /// New last-affirmative move input, if this step had one.
    pub affirmative_move_input: Option<Vec3>,
    /// Whether this step consumed a flight toggle.
    pub toggled_flying: bool,
}

/// Samples latched input into the command for one simulation step.
///
/// `movement` is `None` when no simulation is attached; ground projection and
/// base-relative conversion are then skipped.
pub fn build_command(
    input: &InputState,
    sim_time_ms: u64,
    control_rotation: Rotator,
    config: &CharacterConfig,
    movement: Option<&dyn MovementQuery>,
    based_space: &dyn BasedSpace,
) -> ProducedInput {
    let using_intent = input.move_velocity.is_zero();

    let (move_input_type, mut move_input) = if using_intent {
        let rotation = match movement {
            Some(m) if m.is_on_ground() || m.is_falling() => level_rotation(control_rotation, m),
            _ => control_rotation,
        };
        (
            MoveInputType::DirectionalIntent,
            rotation.rotate_vector(input.move_intent),
        )
    } else {
        (MoveInputType::Velocity, input.move_velocity)
    };

    let has_affirmative_input = move_input.length() >= MIN_AFFIRMATIVE_MOVE;

    let mut orientation_intent = Vec3::ZERO;
    let mut affirmative_move_input = None;
    if using_intent && has_affirmative_input {
        orientation_intent = if config.orient_rotation_to_movement {
            move_input
        } else {
            control_rotation.forward()
        };
        affirmative_move_input = Some(move_input);
    } else if config.maintain_last_input_orientation {
        orientation_intent = input.last_affirmative_move_input;
    }

    if config.should_remain_vertical {
        orientation_intent = orientation_intent.safe_normal_2d();
    }

    let (suggested_mode_change, toggled_flying) = if input.should_toggle_flying {
        let mode = if input.is_flying_active {
            MovementModeChange::Falling
        } else {
            MovementModeChange::Flying
        };
        (mode, true)
    } else {
        (MovementModeChange::None, false)
    };

    let mut using_movement_base = false;
    let mut movement_base = None;
    if config.use_base_relative_movement {
        if let Some((m, base)) = movement.and_then(|m| m.movement_base().map(|b| (m, b))) {
            let bone = m.movement_base_bone_name();
            move_input = based_space.transform_world_direction_to_based(&base, &bone, move_input);
            orientation_intent =
                based_space.transform_world_direction_to_based(&base, &bone, orientation_intent);
            using_movement_base = true;
            movement_base = Some(BasedMovement {
                base: base.id,
                bone,
            });
        }
    }

    let cmd = MoverInputCmd {
        sim_time_ms,
        control_rotation,
        move_input_type,
        move_input,
        orientation_intent,
        is_jump_pressed: input.is_jump_pressed,
        is_jump_just_pressed: input.is_jump_just_pressed,
        suggested_mode_change,
        using_movement_base,
        movement_base,
    };
    trace!(?cmd, "Built mover command");

    ProducedInput {
        cmd,
        affirmative_move_input,
        toggled_flying,
    }
}

/// Control rotation with its forward flattened onto the character's up plane.
fn level_rotation(control_rotation: Rotator, movement: &dyn MovementQuery) -> Rotator {
    let up = movement.up_direction().safe_normal();
    let projected = control_rotation.forward().plane_project(up).safe_normal();
    Rotator::from_direction(projected)
}
