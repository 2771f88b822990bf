//! Helpers shared by the integration tests.

use mover_client::{
    controller::{PawnId, PlayerController},
    script::{parse_line, ScriptCommand},
};
use mover_shared::config::{CharacterConfig, ControllerConfig};

/// Installs a test-friendly subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init();
}

/// Controller possessing pawn 1 with the given character options.
pub fn possessed_controller(character: CharacterConfig) -> PlayerController {
    let mut pc = PlayerController::new(ControllerConfig::default());
    pc.possess(PawnId(1), character);
    pc
}

/// Applies script lines to a controller immediately, in order.
pub fn apply_script(pc: &mut PlayerController, script: &str) -> anyhow::Result<()> {
    for line in script.lines() {
        match parse_line(line)? {
            Some(ScriptCommand::Action(event)) => {
                pc.handle_action(event);
            }
            Some(ScriptCommand::RequestIntent(v)) => pc.request_move_by_intent(v),
            Some(ScriptCommand::RequestVelocity(v)) => pc.request_move_by_velocity(v),
            Some(ScriptCommand::Status) | Some(ScriptCommand::Quit) | None => {}
        }
    }
    Ok(())
}
