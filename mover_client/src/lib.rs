//! `mover_client`
//!
//! Client-side input production for a locally controlled character:
//! - Latched input state and per-step command building
//! - Action bindings from the input layer
//! - Player controller with possession and camera spin
//! - Command history for simulation replay
//! - Line-based input scripts for headless runs

pub mod bindings;
pub mod controller;
pub mod history;
pub mod input;
pub mod script;

pub use controller::PlayerController;
