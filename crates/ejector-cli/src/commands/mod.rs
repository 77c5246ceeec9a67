//! Command handlers.

pub mod eject;
