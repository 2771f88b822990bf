//! `mover_shared`
//!
//! Shared libraries used by the input producer and its consumers.
//!
//! Design goals:
//! - Deterministic: identical inputs produce identical bits.
//! - Plain data at the seams (commands, events, config) with serde support.
//! - Traits for the movement simulation collaborators.
//! - No `unsafe`.

pub mod command;
pub mod config;
pub mod event;
pub mod math;
pub mod movement;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::command::*;
    pub use crate::config::*;
    pub use crate::event::*;
    pub use crate::math::*;
    pub use crate::movement::*;
}
