//! # Host Runtime
//!
//! Drives a playground session from a script and produces the export.

use crate::commands::{HostCommand, HostCommandParser};
use crate::input_script::{InputScript, InputScriptError, ScriptedInput};
use editor_core::{CoreOutcome, EditorConfig, EditorSnapshot, PlaygroundCore};
use playground_export::{assemble_document, export_file_name, ExportError, LibrarySet};
use playground_settings::persistence::deserialize_overrides;
use playground_settings::{create_default_registry, editor_config};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Host runtime error types
#[derive(Debug, Error)]
pub enum HostRuntimeError {
    #[error("Script error: {0}")]
    ScriptError(#[from] InputScriptError),

    #[error("Command error: {0}")]
    CommandError(String),

    #[error("Settings error: {0}")]
    SettingsError(String),

    #[error("Export error: {0}")]
    ExportError(#[from] ExportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Host runtime configuration
#[derive(Debug, Clone, Default)]
pub struct HostRuntimeConfig {
    /// Optional input script
    pub script: Option<String>,
    /// Optional settings overrides document (JSON)
    pub settings: Option<Vec<u8>>,
    /// Maximum steps to run (0 = unlimited)
    pub max_steps: usize,
    /// Export destination: a file, or a directory combined with `name`
    pub out: Option<PathBuf>,
    /// Project name used when `out` is a directory
    pub name: Option<String>,
}

/// Host runtime
pub struct HostRuntime {
    config: HostRuntimeConfig,
    core: PlaygroundCore,
    libraries: LibrarySet,
    script: Option<InputScript>,
    step_count: usize,
}

impl HostRuntime {
    /// Creates a new host runtime
    pub fn new(config: HostRuntimeConfig) -> Result<Self, HostRuntimeError> {
        let editor = Self::load_editor_config(config.settings.as_deref())?;

        let script = match &config.script {
            Some(text) => Some(InputScript::from_text(text)?),
            None => None,
        };

        log::info!(
            "playground host ready: auto_close={}, predictions={}, debounce={}ms",
            editor.auto_close,
            editor.predictions,
            editor.debounce_ms
        );

        Ok(Self {
            config,
            core: PlaygroundCore::new(editor),
            libraries: LibrarySet::new(),
            script,
            step_count: 0,
        })
    }

    fn load_editor_config(settings: Option<&[u8]>) -> Result<EditorConfig, HostRuntimeError> {
        let mut registry = create_default_registry();
        if let Some(bytes) = settings {
            let data = deserialize_overrides(bytes)
                .map_err(|e| HostRuntimeError::SettingsError(e.to_string()))?;
            data.apply_to(&mut registry)
                .map_err(|e| HostRuntimeError::SettingsError(e.to_string()))?;
            log::debug!("applied {} settings overrides", data.overrides.len());
        }
        editor_config(&registry).map_err(|e| HostRuntimeError::SettingsError(e.to_string()))
    }

    /// Runs the script to its end, then flushes the pending commit
    pub fn run(&mut self) -> Result<(), HostRuntimeError> {
        while self.step()? {
            if self.config.max_steps > 0 && self.step_count >= self.config.max_steps {
                log::info!("reached max steps ({})", self.config.max_steps);
                break;
            }
        }
        self.flush();
        Ok(())
    }

    /// Executes one scripted input; returns false once the script is spent
    pub fn step(&mut self) -> Result<bool, HostRuntimeError> {
        let Some(input) = self.script.as_mut().and_then(|s| s.next_input()) else {
            return Ok(false);
        };
        self.step_count += 1;

        match input {
            ScriptedInput::Key(press) => {
                let outcome = self.core.apply_key(press);
                if let CoreOutcome::Applied { action, .. } = &outcome {
                    log::debug!(
                        "step {}: {:?} on {:?} ({})",
                        self.step_count,
                        action,
                        press.key,
                        press.modifiers
                    );
                }
                self.render();
            }
            ScriptedInput::Wait(ms) => {
                if self.core.advance(ms) {
                    log::trace!("history committed at {}ms", self.core.now_ms());
                }
            }
            ScriptedInput::Command(command) => self.execute(command)?,
        }

        Ok(true)
    }

    /// Parses and executes a host command (without the leading `:`)
    pub fn execute_command(&mut self, command_text: &str) -> Result<(), HostRuntimeError> {
        let command = HostCommandParser::parse(command_text)
            .map_err(|e| HostRuntimeError::CommandError(e.to_string()))?;
        self.execute(command)
    }

    fn execute(&mut self, command: HostCommand) -> Result<(), HostRuntimeError> {
        match command {
            HostCommand::Facet(facet) => {
                self.core.switch_facet(facet);
                self.render();
            }
            HostCommand::Hover(index) => {
                if !self.core.hover_suggestion(index) {
                    log::warn!("no suggestion at index {}", index);
                }
            }
            HostCommand::Click(index) => {
                if self.core.click_suggestion(index) == CoreOutcome::Continue {
                    log::warn!("no suggestion at index {}", index);
                }
                self.render();
            }
            HostCommand::Select { start, end } => {
                self.core.set_selection(start, end);
            }
            HostCommand::Library(id) => match self.libraries.toggle_catalog(&id) {
                Ok(enabled) => log::info!("library {} {}", id, if enabled { "enabled" } else { "disabled" }),
                Err(e) => log::warn!("{}", e),
            },
            HostCommand::CustomLibrary { kind, url, name } => {
                match self.libraries.add_custom(name, url, kind) {
                    Ok(library) => log::info!("library {} added as {}", library.url, library.id),
                    Err(e) => log::warn!("{}", e),
                }
            }
            HostCommand::Skeleton(id) => {
                if self.core.inject_skeleton(&id) {
                    self.render();
                } else {
                    log::warn!("unknown skeleton: {}", id);
                }
            }
            HostCommand::AutoClose(enabled) => self.core.set_auto_close(enabled),
            HostCommand::Predictions(enabled) => self.core.set_predictions(enabled),
        }
        Ok(())
    }

    /// Applies the pending cursor, as a host does after re-rendering
    fn render(&mut self) {
        if let Some(cursor) = self.core.finish_render() {
            log::trace!("cursor restored to {}..{}", cursor.start, cursor.end);
        }
    }

    /// Commits typing still waiting on the debounce window
    pub fn flush(&mut self) -> bool {
        let window = self.core.config().debounce_ms;
        self.core.advance(window)
    }

    /// Assembles the standalone HTML document
    pub fn export_html(&self) -> String {
        assemble_document(self.core.document(), &self.libraries)
    }

    /// Session snapshot as pretty JSON
    pub fn snapshot_json(&self) -> Result<String, HostRuntimeError> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        self.core.snapshot()
    }

    /// Where the export is written, if an output was configured
    pub fn output_path(&self) -> Option<PathBuf> {
        let out = self.config.out.as_deref()?;
        let project = self.config.name.as_deref().unwrap_or("");

        if out.is_dir() {
            return Some(out.join(export_file_name(project)));
        }

        let file_name = out
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(project);
        let parent = out.parent().unwrap_or_else(|| Path::new(""));
        Some(parent.join(export_file_name(file_name)))
    }

    /// Writes the export to the configured output; returns the path written
    pub fn write_output(&self) -> Result<Option<PathBuf>, HostRuntimeError> {
        let Some(path) = self.output_path() else {
            return Ok(None);
        };
        std::fs::write(&path, self.export_html())?;
        log::info!("exported {}", path.display());
        Ok(Some(path))
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn core(&self) -> &PlaygroundCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut PlaygroundCore {
        &mut self.core
    }

    pub fn libraries(&self) -> &LibrarySet {
        &self.libraries
    }
}
