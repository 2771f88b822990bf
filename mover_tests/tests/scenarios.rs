//! End-to-end command production scenarios through the player controller.

use mover_shared::{
    command::{MoveInputType, MovementModeChange},
    config::CharacterConfig,
    math::{Rotator, Vec3},
    movement::{
        BaseId, BasedSpace, BoneName, FlatGround, MovementBase, NullMovement, StaticBasedSpace,
    },
};
use mover_tests::{apply_script, init_tracing, possessed_controller};

/// Based space that maps every direction to the same vector.
struct FixedBasedSpace(Vec3);

impl BasedSpace for FixedBasedSpace {
    fn transform_world_direction_to_based(
        &self,
        _base: &MovementBase,
        _bone: &BoneName,
        _world: Vec3,
    ) -> Vec3 {
        self.0
    }
}

fn near(a: Vec3, b: Vec3) -> bool {
    a.distance(b) < 1e-5
}

#[test]
fn forward_move_on_ground_with_defaults() -> anyhow::Result<()> {
    init_tracing();
    let mut pc = possessed_controller(CharacterConfig::default());
    apply_script(&mut pc, "move 0 -1 0")?;

    let cmd = pc
        .produce_input(16, Some(&FlatGround::default()), &StaticBasedSpace)
        .expect("possessed");
    assert_eq!(cmd.move_input_type, MoveInputType::DirectionalIntent);
    assert!(near(cmd.move_input, Vec3::new(0.0, 1.0, 0.0)));
    assert!(near(cmd.orientation_intent, Vec3::new(0.0, 1.0, 0.0)));
    assert!(!cmd.using_movement_base);
    Ok(())
}

#[test]
fn base_relative_move_uses_transform() -> anyhow::Result<()> {
    init_tracing();
    let mut pc = possessed_controller(CharacterConfig {
        use_base_relative_movement: true,
        ..Default::default()
    });
    apply_script(&mut pc, "move 0 -1 0")?;

    let ground = FlatGround {
        base: Some(MovementBase {
            id: BaseId(42),
            orientation: Rotator::new(0.0, 30.0, 0.0),
        }),
        bone: BoneName::new("platform"),
    };
    let cmd = pc
        .produce_input(16, Some(&ground), &FixedBasedSpace(Vec3::new(1.0, 0.0, 0.0)))
        .expect("possessed");

    assert_eq!(cmd.move_input, Vec3::new(1.0, 0.0, 0.0));
    assert!(cmd.using_movement_base);
    let based = cmd.movement_base.expect("base attached");
    assert_eq!(based.base, BaseId(42));
    assert_eq!(based.bone, BoneName::new("platform"));
    assert_eq!(cmd.move_input_type, MoveInputType::DirectionalIntent);
    Ok(())
}

#[test]
fn idle_without_maintained_orientation() {
    init_tracing();
    let mut pc = possessed_controller(CharacterConfig {
        maintain_last_input_orientation: false,
        ..Default::default()
    });
    let cmd = pc
        .produce_input(16, Some(&FlatGround::default()), &StaticBasedSpace)
        .expect("possessed");
    assert_eq!(cmd.orientation_intent, Vec3::ZERO);
}

#[test]
fn velocity_overrides_latched_intent() -> anyhow::Result<()> {
    init_tracing();
    let mut pc = possessed_controller(CharacterConfig::default());
    apply_script(&mut pc, "move 1 1 0\nvelocity 0 0 600")?;

    let cmd = pc
        .produce_input(16, Some(&FlatGround::default()), &StaticBasedSpace)
        .expect("possessed");
    assert_eq!(cmd.move_input_type, MoveInputType::Velocity);
    assert_eq!(cmd.move_input, Vec3::new(0.0, 0.0, 600.0));

    // Zeroing velocity hands control back to the latched intent.
    apply_script(&mut pc, "velocity 0 0 0")?;
    let cmd = pc
        .produce_input(32, Some(&FlatGround::default()), &StaticBasedSpace)
        .expect("possessed");
    assert_eq!(cmd.move_input_type, MoveInputType::DirectionalIntent);
    assert!(near(cmd.move_input, Vec3::new(-1.0, -1.0, 0.0)));
    Ok(())
}

#[test]
fn one_shots_cleared_after_step() -> anyhow::Result<()> {
    init_tracing();
    let mut pc = possessed_controller(CharacterConfig::default());
    apply_script(&mut pc, "jump\nfly")?;

    let first = pc
        .produce_input(16, None, &StaticBasedSpace)
        .expect("possessed");
    assert!(first.is_jump_just_pressed);
    assert_eq!(first.suggested_mode_change, MovementModeChange::Flying);
    assert!(!pc.input().is_jump_just_pressed());
    assert!(!pc.input().should_toggle_flying());

    let second = pc
        .produce_input(32, None, &StaticBasedSpace)
        .expect("possessed");
    assert!(second.is_jump_pressed);
    assert!(!second.is_jump_just_pressed);
    assert_eq!(second.suggested_mode_change, MovementModeChange::None);

    apply_script(&mut pc, "jump_end\nfly")?;
    let third = pc
        .produce_input(48, None, &StaticBasedSpace)
        .expect("possessed");
    assert!(!third.is_jump_pressed);
    assert_eq!(third.suggested_mode_change, MovementModeChange::Falling);
    Ok(())
}

#[test]
fn remain_vertical_keeps_orientation_flat_while_flying() -> anyhow::Result<()> {
    init_tracing();
    let mut pc = possessed_controller(CharacterConfig::default());
    pc.set_control_rotation(Rotator::new(-60.0, 135.0, 0.0));

    for (i, script) in ["move -1 0 0", "move -1 -1 -1", "intent 0 0 1", "move_end"]
        .into_iter()
        .enumerate()
    {
        apply_script(&mut pc, script)?;
        let cmd = pc
            .produce_input(16 * (i as u64 + 1), Some(&NullMovement), &StaticBasedSpace)
            .expect("possessed");
        assert_eq!(cmd.orientation_intent.z, 0.0, "step {i}");
    }
    Ok(())
}

#[test]
fn camera_spin_steers_next_command() -> anyhow::Result<()> {
    init_tracing();
    let mut pc = possessed_controller(CharacterConfig::default());
    apply_script(&mut pc, "move -1 0 0\nlook 0.9 0")?;

    // 0.9 * 100 deg/s for one second of frames.
    for _ in 0..10 {
        pc.player_tick(0.1);
        apply_script(&mut pc, "look 0.9 0")?;
    }
    apply_script(&mut pc, "look_end")?;

    let cmd = pc
        .produce_input(16, Some(&FlatGround::default()), &StaticBasedSpace)
        .expect("possessed");
    assert!((pc.control_rotation().yaw - 90.0).abs() < 1e-3);
    assert!(near(cmd.move_input, Vec3::new(0.0, 1.0, 0.0)));
    Ok(())
}
