//! External process adapters.

mod runner;

pub use runner::ProcessRunner;
