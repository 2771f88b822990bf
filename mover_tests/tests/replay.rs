//! Replay determinism and command serialization across crates.

use mover_client::controller::PawnId;
use mover_shared::{
    command::{decode_command, encode_command, MovementModeChange},
    config::{CharacterConfig, MoverConfig},
    math::Rotator,
    movement::{BaseId, FlatGround, MovementBase, StaticBasedSpace},
};
use mover_tests::{apply_script, init_tracing, possessed_controller};
use tracing::info;

#[test]
fn replayed_steps_match_first_run() -> anyhow::Result<()> {
    init_tracing();
    let mut pc = possessed_controller(CharacterConfig {
        maintain_last_input_orientation: true,
        ..Default::default()
    });
    let ground = FlatGround::on_base(MovementBase {
        id: BaseId(5),
        orientation: Rotator::new(0.0, -45.0, 0.0),
    });

    let script = [
        "move 0 -1 0\njump",
        "look 0.5 0",
        "fly",
        "move_end\njump_end",
        "",
        "velocity 120 0 0",
    ];
    let mut produced = Vec::new();
    for (i, lines) in script.iter().enumerate() {
        apply_script(&mut pc, lines)?;
        pc.player_tick(1.0 / 60.0);
        let t = 16 * (i as u64 + 1);
        produced.push(pc.produce_input(t, Some(&ground), &StaticBasedSpace).expect("possessed"));
    }
    info!(steps = produced.len(), "Recorded steps");

    // Live input arriving mid-replay must not leak into replayed steps.
    apply_script(&mut pc, "jump\nfly\nmove 1 0 0")?;
    let flying = pc.input().is_flying_active();

    for first in &produced {
        let again = pc
            .produce_input(first.sim_time_ms, Some(&ground), &StaticBasedSpace)
            .expect("possessed");
        assert_eq!(&again, first);
    }
    assert_eq!(pc.input().is_flying_active(), flying);
    assert!(pc.input().should_toggle_flying());

    assert_eq!(produced[2].suggested_mode_change, MovementModeChange::Flying);
    assert!(produced[0].is_jump_just_pressed);
    assert!(!produced[1].is_jump_just_pressed);
    Ok(())
}

#[test]
fn commands_survive_the_wire() -> anyhow::Result<()> {
    init_tracing();
    let mut pc = possessed_controller(CharacterConfig::default());
    apply_script(&mut pc, "move 0.3 -0.8 0\nfly")?;
    let ground = FlatGround::on_base(MovementBase {
        id: BaseId(9),
        orientation: Rotator::new(0.0, 10.0, 0.0),
    });
    let cmd = pc
        .produce_input(100, Some(&ground), &StaticBasedSpace)
        .expect("possessed");

    let back = decode_command(&encode_command(&cmd)?)?;
    assert_eq!(back, cmd);
    Ok(())
}

#[test]
fn config_document_drives_controller() -> anyhow::Result<()> {
    init_tracing();
    let cfg = MoverConfig::from_json_str(
        r#"{ "character": { "use_base_relative_movement": false },
             "controller": { "look_rate_yaw": 180.0, "history_capacity": 4 } }"#,
    )?;
    let mut pc = mover_client::PlayerController::new(cfg.controller.clone());
    pc.possess(PawnId(3), cfg.character);
    apply_script(&mut pc, "look 1 0\nmove 0 -1 0")?;
    pc.player_tick(0.5);
    assert!((pc.control_rotation().yaw - 90.0).abs() < 1e-3);

    let ground = FlatGround::on_base(MovementBase {
        id: BaseId(1),
        orientation: Rotator::ZERO,
    });
    for t in 1..=6u64 {
        let cmd = pc
            .produce_input(t * 16, Some(&ground), &StaticBasedSpace)
            .expect("possessed");
        assert!(!cmd.using_movement_base);
    }
    assert_eq!(pc.history().len(), 4);
    Ok(())
}
