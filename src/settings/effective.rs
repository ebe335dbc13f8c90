//! Effective settings with provenance
//!
//! The merged settings object plus a record of which layers contributed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::defaults::BuiltinDefaults;
use super::merge::merge_layers;
use crate::viewer::{GraphProperty, SpectrumKind};

/// Log levels accepted in `log.level`.
const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Origin of a settings layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SettingsOrigin {
    Builtin,
    File,
    Cli,
}

/// A contributing settings layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsSource {
    pub origin: SettingsOrigin,

    /// File path (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of the raw file bytes (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// How the CLI prints its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{}' (expected text or json)", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Settings file location when `--settings` is not given:
/// `$XDG_CONFIG_HOME/tardis-gui/settings.toml`, else `~/.config/tardis-gui/settings.toml`.
pub fn default_settings_path() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Some(PathBuf::from(xdg).join("tardis-gui/settings.toml"));
        }
    }
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config/tardis-gui/settings.toml"))
}

/// Merged application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveSettings {
    /// When these settings were computed
    pub created_at: DateTime<Utc>,

    /// The merged settings object
    pub settings: Value,

    /// Contributing layers in precedence order
    pub sources: Vec<SettingsSource>,
}

impl EffectiveSettings {
    /// Resolve the settings file and build.
    ///
    /// An explicit path must exist. The default location is skipped when absent.
    pub fn load(explicit: Option<&Path>, cli_overrides: Option<Value>) -> Result<Self, SettingsError> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(SettingsError::IoError(format!(
                        "settings file not found: {}",
                        path.display()
                    )));
                }
                Self::build(Some(path), cli_overrides)
            }
            None => Self::build(default_settings_path().as_deref(), cli_overrides),
        }
    }

    /// Build from layers. A settings file that does not exist is skipped.
    pub fn build(settings_path: Option<&Path>, cli_overrides: Option<Value>) -> Result<Self, SettingsError> {
        let mut layers = vec![BuiltinDefaults::default().to_value()];
        let mut sources = vec![SettingsSource {
            origin: SettingsOrigin::Builtin,
            path: None,
            digest: None,
        }];

        if let Some(path) = settings_path {
            if path.exists() {
                let (value, digest) = Self::load_toml_file(path)?;
                layers.push(value);
                sources.push(SettingsSource {
                    origin: SettingsOrigin::File,
                    path: Some(path.to_string_lossy().to_string()),
                    digest: Some(digest),
                });
            }
        }

        if let Some(cli) = cli_overrides {
            layers.push(cli);
            sources.push(SettingsSource {
                origin: SettingsOrigin::Cli,
                path: None,
                digest: None,
            });
        }

        let merged = merge_layers(layers);
        Self::validate(&merged)?;

        Ok(Self {
            created_at: Utc::now(),
            settings: merged,
            sources,
        })
    }

    fn load_toml_file(path: &Path) -> Result<(Value, String), SettingsError> {
        let bytes = fs::read(path).map_err(|e| SettingsError::IoError(e.to_string()))?;
        let digest = hex::encode(Sha256::digest(&bytes));

        let contents = String::from_utf8(bytes)
            .map_err(|e| SettingsError::ParseError(format!("Invalid UTF-8: {}", e)))?;
        let table: toml::Value = toml::from_str(&contents)
            .map_err(|e| SettingsError::ParseError(format!("TOML parse error: {}", e)))?;

        Ok((Self::toml_to_json(table), digest))
    }

    fn toml_to_json(toml: toml::Value) -> Value {
        match toml {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(i) => Value::Number(i.into()),
            toml::Value::Float(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => Value::String(dt.to_string()),
            toml::Value::Array(arr) => Value::Array(arr.into_iter().map(Self::toml_to_json).collect()),
            toml::Value::Table(table) => Value::Object(
                table
                    .into_iter()
                    .map(|(k, v)| (k, Self::toml_to_json(v)))
                    .collect(),
            ),
        }
    }

    fn validate(settings: &Value) -> Result<(), SettingsError> {
        let viewer = settings.get("viewer");

        // shell_scale must be in (0, 10]
        if let Some(scale) = viewer.and_then(|v| v.get("shell_scale")) {
            match scale.as_f64() {
                Some(s) if s > 0.0 && s <= 10.0 => {}
                _ => {
                    return Err(SettingsError::ValidationError(
                        "viewer.shell_scale must be a number in (0, 10]".to_string(),
                    ))
                }
            }
        }

        check_enum::<GraphProperty>(viewer.and_then(|v| v.get("graph_property")), "viewer.graph_property")?;
        check_enum::<SpectrumKind>(viewer.and_then(|v| v.get("spectrum")), "viewer.spectrum")?;
        check_enum::<OutputFormat>(
            settings.get("output").and_then(|v| v.get("format")),
            "output.format",
        )?;

        if let Some(level) = settings.get("log").and_then(|v| v.get("level")) {
            let ok = level
                .as_str()
                .map(|l| LOG_LEVELS.contains(&l.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            if !ok {
                return Err(SettingsError::ValidationError(format!(
                    "log.level must be one of {}",
                    LOG_LEVELS.join(", ")
                )));
            }
        }

        Ok(())
    }

    /// Get a value by dotted path
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current = &self.settings;
        for part in path.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(|v| v.as_str())
    }

    pub fn get_f64(&self, path: &str) -> Option<f64> {
        self.get(path).and_then(|v| v.as_f64())
    }

    pub fn graph_property(&self) -> GraphProperty {
        self.get_str("viewer.graph_property")
            .and_then(|s| s.parse().ok())
            .unwrap_or(GraphProperty::TRads)
    }

    pub fn spectrum(&self) -> SpectrumKind {
        self.get_str("viewer.spectrum")
            .and_then(|s| s.parse().ok())
            .unwrap_or(SpectrumKind::Real)
    }

    pub fn shell_scale(&self) -> f64 {
        self.get_f64("viewer.shell_scale")
            .unwrap_or(BuiltinDefaults::default().shell_scale)
    }

    pub fn output_format(&self) -> OutputFormat {
        self.get_str("output.format")
            .and_then(|s| s.parse().ok())
            .unwrap_or(OutputFormat::Text)
    }

    pub fn log_level(&self) -> &str {
        self.get_str("log.level").unwrap_or("warn")
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn check_enum<T: FromStr<Err = String>>(value: Option<&Value>, key: &str) -> Result<(), SettingsError> {
    let Some(value) = value else {
        return Ok(());
    };
    let text = value
        .as_str()
        .ok_or_else(|| SettingsError::ValidationError(format!("{} must be a string", key)))?;
    text.parse::<T>()
        .map(|_| ())
        .map_err(|e| SettingsError::ValidationError(format!("{}: {}", key, e)))
}

/// Settings errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_build_with_defaults_only() {
        let settings = EffectiveSettings::build(None, None).unwrap();

        assert_eq!(settings.graph_property(), GraphProperty::TRads);
        assert_eq!(settings.spectrum(), SpectrumKind::Real);
        assert_eq!(settings.shell_scale(), 0.2);
        assert_eq!(settings.output_format(), OutputFormat::Text);
        assert_eq!(settings.sources.len(), 1);
        assert_eq!(settings.sources[0].origin, SettingsOrigin::Builtin);
    }

    #[test]
    fn test_cli_override() {
        let cli = serde_json::json!({"viewer": {"graph_property": "ws"}});
        let settings = EffectiveSettings::build(None, Some(cli)).unwrap();

        assert_eq!(settings.graph_property(), GraphProperty::Ws);
        assert_eq!(settings.get_str("viewer.spectrum"), Some("real"));
        assert_eq!(settings.sources.last().unwrap().origin, SettingsOrigin::Cli);
    }

    #[test]
    fn test_file_layer_with_digest() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "[viewer]").unwrap();
        writeln!(temp, "spectrum = \"virtual\"").unwrap();
        writeln!(temp, "shell_scale = 0.5").unwrap();
        writeln!(temp, "[output]").unwrap();
        writeln!(temp, "format = \"json\"").unwrap();

        let settings = EffectiveSettings::build(Some(temp.path()), None).unwrap();

        assert_eq!(settings.spectrum(), SpectrumKind::Virtual);
        assert_eq!(settings.shell_scale(), 0.5);
        assert_eq!(settings.output_format(), OutputFormat::Json);

        let file = &settings.sources[1];
        assert_eq!(file.origin, SettingsOrigin::File);
        assert_eq!(file.digest.as_ref().map(String::len), Some(64));
    }

    #[test]
    fn test_missing_default_file_skipped() {
        let settings = EffectiveSettings::build(Some(Path::new("/nonexistent/settings.toml")), None).unwrap();
        assert_eq!(settings.sources.len(), 1);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = EffectiveSettings::load(Some(Path::new("/nonexistent/settings.toml")), None).unwrap_err();
        assert!(err.to_string().contains("settings file not found"));
    }

    #[test]
    fn test_shell_scale_bounds() {
        for bad in [serde_json::json!(0.0), serde_json::json!(10.5), serde_json::json!("big")] {
            let cli = serde_json::json!({"viewer": {"shell_scale": bad}});
            let err = EffectiveSettings::build(None, Some(cli)).unwrap_err();
            assert!(err.to_string().contains("shell_scale"));
        }
        let cli = serde_json::json!({"viewer": {"shell_scale": 10}});
        assert!(EffectiveSettings::build(None, Some(cli)).is_ok());
    }

    #[test]
    fn test_enumerations_checked() {
        let cli = serde_json::json!({"viewer": {"graph_property": "density"}});
        let err = EffectiveSettings::build(None, Some(cli)).unwrap_err();
        assert!(err.to_string().contains("viewer.graph_property"));

        let cli = serde_json::json!({"output": {"format": "xml"}});
        assert!(EffectiveSettings::build(None, Some(cli)).is_err());

        let cli = serde_json::json!({"log": {"level": "loud"}});
        assert!(EffectiveSettings::build(None, Some(cli)).is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "[viewer").unwrap();
        let err = EffectiveSettings::build(Some(temp.path()), None).unwrap_err();
        assert!(matches!(err, SettingsError::ParseError(_)));
    }
}
