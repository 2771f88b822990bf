//! Action bindings.
//!
//! Maps `(action, trigger)` pairs reported by the input layer onto
//! [`InputState`] handlers. Pairs without a binding are ignored.

use std::collections::HashMap;

use mover_shared::event::{ActionEvent, InputAction, TriggerEvent};
use tracing::trace;

use crate::input::InputState;

/// Handler an action can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputHandler {
    MoveTriggered,
    MoveCompleted,
    LookTriggered,
    LookCompleted,
    JumpStarted,
    JumpCompleted,
    FlyTriggered,
}

#[derive(Debug, Clone)]
pub struct InputBindings {
    map: HashMap<(InputAction, TriggerEvent), InputHandler>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings.bind(InputAction::Move, TriggerEvent::Triggered, InputHandler::MoveTriggered);
        bindings.bind(InputAction::Move, TriggerEvent::Completed, InputHandler::MoveCompleted);
        bindings.bind(InputAction::Look, TriggerEvent::Triggered, InputHandler::LookTriggered);
        bindings.bind(InputAction::Look, TriggerEvent::Completed, InputHandler::LookCompleted);
        bindings.bind(InputAction::Jump, TriggerEvent::Started, InputHandler::JumpStarted);
        bindings.bind(InputAction::Jump, TriggerEvent::Completed, InputHandler::JumpCompleted);
        bindings.bind(InputAction::Fly, TriggerEvent::Triggered, InputHandler::FlyTriggered);
        bindings
    }
}

impl InputBindings {
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Binds a pair, replacing any previous handler.
    pub fn bind(&mut self, action: InputAction, trigger: TriggerEvent, handler: InputHandler) {
        self.map.insert((action, trigger), handler);
    }

    pub fn unbind(&mut self, action: InputAction, trigger: TriggerEvent) -> Option<InputHandler> {
        self.map.remove(&(action, trigger))
    }

    pub fn handler(&self, action: InputAction, trigger: TriggerEvent) -> Option<InputHandler> {
        self.map.get(&(action, trigger)).copied()
    }

    /// Applies an event to `input`. Returns false if nothing is bound to it.
    pub fn dispatch(&self, event: &ActionEvent, input: &mut InputState) -> bool {
        let Some(handler) = self.handler(event.action, event.trigger) else {
            trace!(action = ?event.action, trigger = ?event.trigger, "Unbound input event");
            return false;
        };

        match handler {
            InputHandler::MoveTriggered => input.on_move_triggered(event.value.as_vec3()),
            InputHandler::MoveCompleted => input.on_move_completed(),
            InputHandler::LookTriggered => input.on_look_triggered(event.value.as_vec2()),
            InputHandler::LookCompleted => input.on_look_completed(),
            InputHandler::JumpStarted => input.on_jump_started(),
            InputHandler::JumpCompleted => input.on_jump_completed(),
            InputHandler::FlyTriggered => input.on_fly_triggered(),
        }
        true
    }
}
