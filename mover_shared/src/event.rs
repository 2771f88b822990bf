//! Input events and messaging.
//!
//! The input layer reports named actions with a trigger phase and a value.
//! [`ActionQueue`] holds events between simulation ticks; draining preserves
//! arrival order.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::math::{Vec2, Vec3};

/// Named input action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    Move,
    Look,
    Jump,
    Fly,
}

/// Phase of an action as reported by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerEvent {
    Started,
    Triggered,
    Completed,
}

/// Payload carried by an action event, in arbitrary device range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActionValue {
    Bool(bool),
    Axis2D(Vec2),
    Axis3D(Vec3),
}

impl ActionValue {
    pub fn as_vec2(self) -> Vec2 {
        match self {
            ActionValue::Bool(b) => Vec2::new(if b { 1.0 } else { 0.0 }, 0.0),
            ActionValue::Axis2D(v) => v,
            ActionValue::Axis3D(v) => Vec2::new(v.x, v.y),
        }
    }

    pub fn as_vec3(self) -> Vec3 {
        match self {
            ActionValue::Bool(b) => Vec3::new(if b { 1.0 } else { 0.0 }, 0.0, 0.0),
            ActionValue::Axis2D(v) => Vec3::new(v.x, v.y, 0.0),
            ActionValue::Axis3D(v) => v,
        }
    }
}

impl Default for ActionValue {
    fn default() -> Self {
        ActionValue::Bool(false)
    }
}

/// One event from the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionEvent {
    pub action: InputAction,
    pub trigger: TriggerEvent,
    pub value: ActionValue,
}

impl ActionEvent {
    pub fn new(action: InputAction, trigger: TriggerEvent, value: ActionValue) -> Self {
        Self {
            action,
            trigger,
            value,
        }
    }

    /// Event with no meaningful payload (button edges, completions).
    pub fn edge(action: InputAction, trigger: TriggerEvent) -> Self {
        Self::new(action, trigger, ActionValue::default())
    }
}

/// FIFO of action events waiting for the next simulation step.
#[derive(Debug, Default, Clone)]
pub struct ActionQueue {
    events: VecDeque<ActionEvent>,
}

impl ActionQueue {
    pub fn push(&mut self, event: ActionEvent) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Removes and yields every queued event, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = ActionEvent> + '_ {
        self.events.drain(..)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
