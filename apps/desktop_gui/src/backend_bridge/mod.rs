//! Bridge between the egui thread and the tokio search session.

pub mod commands;
pub mod runtime;
