#![no_std]

//! # Playground Settings
//!
//! Typed settings for the playground editor.
//!
//! ## Philosophy
//!
//! - **Typed settings**: All settings have explicit types, not stringly-typed
//! - **Layered**: Read-only defaults + overrides
//! - **Closed set**: Only registered keys can be overridden
//! - **Deterministic**: Settings are serializable and reproducible
//!
//! ## Example
//!
//! ```ignore
//! use playground_settings::{create_default_registry, editor_config, keys, SettingValue};
//!
//! let mut registry = create_default_registry();
//! registry.set_override(keys::EDITOR_AUTO_CLOSE, SettingValue::Boolean(false))?;
//! let config = editor_config(&registry)?;
//! assert!(!config.auto_close);
//! ```

pub mod persistence;

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use editor_core::{EditorConfig, PopupMetrics};
use serde::{Deserialize, Serialize};

/// Setting key (path-like identifier)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SettingKey(String);

impl SettingKey {
    /// Creates a new setting key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks if this key starts with the given prefix
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SettingKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Setting value (strongly typed)
///
/// Serialized as a bare JSON value; integers stay integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl SettingValue {
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            SettingValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Tries to get as float; integers widen
    pub fn as_float(&self) -> Option<f64> {
        match self {
            SettingValue::Float(v) => Some(*v),
            SettingValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            SettingValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Name of the value's type, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            SettingValue::Boolean(_) => "boolean",
            SettingValue::Integer(_) => "integer",
            SettingValue::Float(_) => "float",
            SettingValue::String(_) => "string",
        }
    }

    /// Whether a value of this type may replace `default`
    fn fits(&self, default: &SettingValue) -> bool {
        matches!(
            (self, default),
            (SettingValue::Boolean(_), SettingValue::Boolean(_))
                | (SettingValue::Integer(_), SettingValue::Integer(_))
                | (SettingValue::Integer(_), SettingValue::Float(_))
                | (SettingValue::Float(_), SettingValue::Float(_))
                | (SettingValue::String(_), SettingValue::String(_))
        )
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Boolean(v) => write!(f, "{}", v),
            SettingValue::Integer(v) => write!(f, "{}", v),
            SettingValue::Float(v) => write!(f, "{}", v),
            SettingValue::String(v) => write!(f, "{}", v),
        }
    }
}

/// Errors from reading or overriding settings
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// Key has no registered default
    UnknownKey(String),
    /// Value type differs from the default's type
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
    /// Value has the right type but cannot be used
    OutOfRange { key: String, value: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::UnknownKey(key) => write!(f, "Unknown setting: {}", key),
            SettingsError::TypeMismatch {
                key,
                expected,
                found,
            } => write!(f, "Setting {} expects {}, got {}", key, expected, found),
            SettingsError::OutOfRange { key, value } => {
                write!(f, "Setting {} out of range: {}", key, value)
            }
        }
    }
}

/// Settings registry
pub struct SettingsRegistry {
    /// Default settings (read-only)
    defaults: BTreeMap<SettingKey, SettingValue>,
    overrides: BTreeMap<SettingKey, SettingValue>,
}

impl SettingsRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            defaults: BTreeMap::new(),
            overrides: BTreeMap::new(),
        }
    }

    /// Registers a default setting
    pub fn register_default(&mut self, key: impl Into<SettingKey>, value: SettingValue) {
        self.defaults.insert(key.into(), value);
    }

    /// Overrides a registered setting
    pub fn set_override(
        &mut self,
        key: impl Into<SettingKey>,
        value: SettingValue,
    ) -> Result<(), SettingsError> {
        let key = key.into();
        let default = self
            .defaults
            .get(&key)
            .ok_or_else(|| SettingsError::UnknownKey(String::from(key.as_str())))?;

        if !value.fits(default) {
            return Err(SettingsError::TypeMismatch {
                key: String::from(key.as_str()),
                expected: default.type_name(),
                found: value.type_name(),
            });
        }

        log::debug!("setting {} = {}", key, value);
        self.overrides.insert(key, value);
        Ok(())
    }

    /// Removes an override; returns true if one was set
    pub fn remove_override(&mut self, key: &SettingKey) -> bool {
        self.overrides.remove(key).is_some()
    }

    /// Gets the effective setting value (override or default)
    pub fn get(&self, key: &SettingKey) -> Option<&SettingValue> {
        self.overrides.get(key).or_else(|| self.defaults.get(key))
    }

    /// Gets the default value for a setting
    pub fn get_default(&self, key: &SettingKey) -> Option<&SettingValue> {
        self.defaults.get(key)
    }

    /// Returns all default setting keys
    pub fn list_defaults(&self) -> Vec<SettingKey> {
        self.defaults.keys().cloned().collect()
    }

    /// Returns all overridden keys
    pub fn list_overrides(&self) -> Vec<SettingKey> {
        self.overrides.keys().cloned().collect()
    }

    /// Returns all effective settings with a given prefix
    pub fn list_with_prefix(&self, prefix: &str) -> Vec<(SettingKey, SettingValue)> {
        self.defaults
            .keys()
            .filter(|key| key.starts_with(prefix))
            .filter_map(|key| self.get(key).map(|value| (key.clone(), value.clone())))
            .collect()
    }

    /// Drops every override
    pub fn clear_overrides(&mut self) {
        self.overrides.clear();
    }

    /// Exports overrides for persistence
    pub fn export_overrides(&self) -> BTreeMap<SettingKey, SettingValue> {
        self.overrides.clone()
    }

    /// Applies overrides (merges with existing); stops at the first invalid one
    pub fn apply_overrides(
        &mut self,
        overrides: BTreeMap<SettingKey, SettingValue>,
    ) -> Result<(), SettingsError> {
        for (key, value) in overrides {
            self.set_override(key, value)?;
        }
        Ok(())
    }

    fn boolean(&self, key: &str) -> Result<bool, SettingsError> {
        let value = self.require(key)?;
        value.as_boolean().ok_or_else(|| mismatch(key, "boolean", value))
    }

    fn float(&self, key: &str) -> Result<f64, SettingsError> {
        let value = self.require(key)?;
        value.as_float().ok_or_else(|| mismatch(key, "float", value))
    }

    /// Non-negative integer setting
    fn count(&self, key: &str) -> Result<u64, SettingsError> {
        let value = self.require(key)?;
        let n = value.as_integer().ok_or_else(|| mismatch(key, "integer", value))?;
        u64::try_from(n).map_err(|_| SettingsError::OutOfRange {
            key: String::from(key),
            value: alloc::format!("{}", n),
        })
    }

    fn require(&self, key: &str) -> Result<&SettingValue, SettingsError> {
        self.get(&SettingKey::new(key))
            .ok_or_else(|| SettingsError::UnknownKey(String::from(key)))
    }
}

impl Default for SettingsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn mismatch(key: &str, expected: &'static str, found: &SettingValue) -> SettingsError {
    SettingsError::TypeMismatch {
        key: String::from(key),
        expected,
        found: found.type_name(),
    }
}

/// Registered setting keys
pub mod keys {
    pub const EDITOR_AUTO_CLOSE: &str = "editor.auto_close";
    pub const EDITOR_PREDICTIONS: &str = "editor.predictions";
    pub const HISTORY_CAPACITY: &str = "history.capacity";
    pub const HISTORY_DEBOUNCE_MS: &str = "history.debounce_ms";
    pub const SUGGEST_MAX_RESULTS: &str = "suggest.max_results";
    pub const POPUP_LINE_HEIGHT: &str = "popup.line_height";
    pub const POPUP_CHAR_WIDTH: &str = "popup.char_width";
    pub const POPUP_TOP_OFFSET: &str = "popup.top_offset";
    pub const POPUP_LEFT_OFFSET: &str = "popup.left_offset";
    pub const POPUP_VIEWPORT_WIDTH: &str = "popup.viewport_width";
    pub const POPUP_VIEWPORT_HEIGHT: &str = "popup.viewport_height";
}

/// Creates a settings registry with default settings
pub fn create_default_registry() -> SettingsRegistry {
    let mut registry = SettingsRegistry::new();
    let defaults = EditorConfig::default();

    // Editor toggles
    registry.register_default(keys::EDITOR_AUTO_CLOSE, SettingValue::Boolean(defaults.auto_close));
    registry.register_default(keys::EDITOR_PREDICTIONS, SettingValue::Boolean(defaults.predictions));

    // History
    registry.register_default(
        keys::HISTORY_CAPACITY,
        SettingValue::Integer(defaults.history_capacity as i64),
    );
    registry.register_default(
        keys::HISTORY_DEBOUNCE_MS,
        SettingValue::Integer(defaults.debounce_ms as i64),
    );

    // Suggestions
    registry.register_default(
        keys::SUGGEST_MAX_RESULTS,
        SettingValue::Integer(defaults.max_suggestions as i64),
    );
    let popup = defaults.popup;
    registry.register_default(keys::POPUP_LINE_HEIGHT, SettingValue::Float(popup.line_height));
    registry.register_default(keys::POPUP_CHAR_WIDTH, SettingValue::Float(popup.char_width));
    registry.register_default(keys::POPUP_TOP_OFFSET, SettingValue::Float(popup.top_offset));
    registry.register_default(keys::POPUP_LEFT_OFFSET, SettingValue::Float(popup.left_offset));
    registry.register_default(keys::POPUP_VIEWPORT_WIDTH, SettingValue::Float(popup.viewport_width));
    registry.register_default(keys::POPUP_VIEWPORT_HEIGHT, SettingValue::Float(popup.viewport_height));

    registry
}

/// Projects the effective settings into an editor configuration
pub fn editor_config(registry: &SettingsRegistry) -> Result<EditorConfig, SettingsError> {
    Ok(EditorConfig {
        auto_close: registry.boolean(keys::EDITOR_AUTO_CLOSE)?,
        predictions: registry.boolean(keys::EDITOR_PREDICTIONS)?,
        history_capacity: registry.count(keys::HISTORY_CAPACITY)? as usize,
        debounce_ms: registry.count(keys::HISTORY_DEBOUNCE_MS)?,
        max_suggestions: registry.count(keys::SUGGEST_MAX_RESULTS)? as usize,
        popup: PopupMetrics {
            line_height: registry.float(keys::POPUP_LINE_HEIGHT)?,
            char_width: registry.float(keys::POPUP_CHAR_WIDTH)?,
            top_offset: registry.float(keys::POPUP_TOP_OFFSET)?,
            left_offset: registry.float(keys::POPUP_LEFT_OFFSET)?,
            viewport_width: registry.float(keys::POPUP_VIEWPORT_WIDTH)?,
            viewport_height: registry.float(keys::POPUP_VIEWPORT_HEIGHT)?,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_key_starts_with() {
        let key = SettingKey::new("popup.char_width");
        assert!(key.starts_with("popup."));
        assert!(!key.starts_with("editor."));
    }

    #[test]
    fn test_setting_value_accessors() {
        assert_eq!(SettingValue::Boolean(true).as_boolean(), Some(true));
        assert_eq!(SettingValue::Integer(3).as_integer(), Some(3));
        assert_eq!(SettingValue::Integer(3).as_float(), Some(3.0));
        assert_eq!(SettingValue::String("x".into()).as_string(), Some("x"));
        assert_eq!(SettingValue::Boolean(true).as_integer(), None);
    }

    #[test]
    fn test_default_registry_matches_editor_defaults() {
        let registry = create_default_registry();
        assert_eq!(registry.list_defaults().len(), 11);
        assert_eq!(editor_config(&registry), Ok(EditorConfig::default()));
    }

    #[test]
    fn test_override_wins() {
        let mut registry = create_default_registry();
        registry
            .set_override(keys::EDITOR_AUTO_CLOSE, SettingValue::Boolean(false))
            .unwrap();
        registry
            .set_override(keys::HISTORY_CAPACITY, SettingValue::Integer(5))
            .unwrap();

        let config = editor_config(&registry).unwrap();
        assert!(!config.auto_close);
        assert_eq!(config.history_capacity, 5);
        assert!(config.predictions);

        assert!(registry.remove_override(&SettingKey::new(keys::HISTORY_CAPACITY)));
        assert_eq!(editor_config(&registry).unwrap().history_capacity, 50);
    }

    #[test]
    fn test_integer_accepted_for_float() {
        let mut registry = create_default_registry();
        registry
            .set_override(keys::POPUP_LINE_HEIGHT, SettingValue::Integer(20))
            .unwrap();
        assert_eq!(editor_config(&registry).unwrap().popup.line_height, 20.0);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut registry = create_default_registry();
        let err = registry
            .set_override("editor.tab_size", SettingValue::Integer(2))
            .unwrap_err();
        assert_eq!(err, SettingsError::UnknownKey("editor.tab_size".into()));
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let mut registry = create_default_registry();
        let err = registry
            .set_override(keys::EDITOR_PREDICTIONS, SettingValue::Integer(1))
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::TypeMismatch {
                expected: "boolean",
                found: "integer",
                ..
            }
        ));
        // Float does not narrow to integer
        assert!(registry
            .set_override(keys::HISTORY_CAPACITY, SettingValue::Float(1.5))
            .is_err());
    }

    #[test]
    fn test_negative_count_out_of_range() {
        let mut registry = create_default_registry();
        registry
            .set_override(keys::HISTORY_DEBOUNCE_MS, SettingValue::Integer(-1))
            .unwrap();
        assert!(matches!(
            editor_config(&registry),
            Err(SettingsError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_list_with_prefix() {
        let mut registry = create_default_registry();
        registry
            .set_override(keys::POPUP_CHAR_WIDTH, SettingValue::Float(8.0))
            .unwrap();
        let popup = registry.list_with_prefix("popup.");
        assert_eq!(popup.len(), 6);
        assert!(popup.contains(&(
            SettingKey::new(keys::POPUP_CHAR_WIDTH),
            SettingValue::Float(8.0)
        )));
    }

    #[test]
    fn test_error_display() {
        let err = SettingsError::UnknownKey("x.y".into());
        assert_eq!(alloc::format!("{}", err), "Unknown setting: x.y");
    }
}
