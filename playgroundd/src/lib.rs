//! # Playground Host Runtime
//!
//! Headless host for the playground editor core.
//!
//! ## Philosophy
//!
//! - **Host owns I/O**: The editor core never touches files or stdout
//! - **Input is explicit events**: Key presses, clock advances and commands
//! - **Deterministic mode is first-class**: A script replays identically
//!
//! ## Responsibilities
//!
//! The host runtime:
//! - Loads settings overrides into an editor configuration
//! - Replays an input script (keys, waits, `:` commands)
//! - Completes the two-phase cursor restore after each mutation
//! - Flushes pending history, then exports a standalone HTML document

pub mod commands;
pub mod input_script;
pub mod runtime;

pub use commands::{HostCommand, HostCommandError, HostCommandParser};
pub use input_script::{InputScript, InputScriptError, ScriptedInput};
pub use runtime::{HostRuntime, HostRuntimeConfig, HostRuntimeError};
