//! Shared utilities

pub mod config;
pub mod shell;

pub use config::PacmanConfig;
pub use shell::{ColorChoice, Shell};
