//! Process-level plumbing shared by the CLI: settings and log setup.

pub mod config;
/// Log subscriber setup.
pub mod telemetry;
