//! Backend worker: owns the tokio runtime and the link directory client.

pub mod clipboard;
pub mod commands;
pub mod runtime;
