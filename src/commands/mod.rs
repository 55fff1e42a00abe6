//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `admin.rs` — config/bundle command trees.
//! - `runtime.rs` — generate/stickers/validate.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod admin;
pub mod runtime;

pub use admin::{handle_bundle_commands, handle_config_commands};
pub use runtime::handle_runtime_commands;
