//! Edits applied to an open configuration.

use tardis_config_tree::Value;

use crate::error::GuiError;

/// A single user edit, addressed by dotted key path.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Pick a variant of a choice key.
    Select { path: String, option: String },
    /// Commit a new value for a value key.
    Set { path: String, value: Value },
}

impl Edit {
    pub fn select(path: impl Into<String>, option: impl Into<String>) -> Self {
        Self::Select {
            path: path.into(),
            option: option.into(),
        }
    }

    /// `raw` is read as YAML, so `5`, `true` and `[Si 2]` keep their types.
    pub fn set(path: impl Into<String>, raw: &str) -> Self {
        Self::Set {
            path: path.into(),
            value: parse_value(raw),
        }
    }

    /// Parse `path=option`.
    pub fn parse_select(text: &str) -> Result<Self, GuiError> {
        let (path, option) = split_assignment(text)?;
        Ok(Self::select(path, option.trim()))
    }

    /// Parse `path=value`.
    pub fn parse_set(text: &str) -> Result<Self, GuiError> {
        let (path, raw) = split_assignment(text)?;
        Ok(Self::set(path, raw))
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Select { path, .. } | Self::Set { path, .. } => path,
        }
    }
}

fn split_assignment(text: &str) -> Result<(&str, &str), GuiError> {
    match text.split_once('=') {
        Some((path, value)) if !path.trim().is_empty() => Ok((path.trim(), value)),
        _ => Err(GuiError::InvalidEdit(text.to_string())),
    }
}

/// Empty input clears the value. Text that is not valid YAML stays a string.
fn parse_value(raw: &str) -> Value {
    let raw = raw.trim();
    if raw.is_empty() {
        return Value::Null;
    }
    serde_yaml::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
