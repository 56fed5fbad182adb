//! Command-line driver for the L{CORE} dataset pipeline.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
