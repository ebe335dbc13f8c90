//! Template entries: the schema a user configuration is merged against.
//!
//! A template is written as a YAML document:
//!
//! ```yaml
//! density:
//!   type: [true, ["uniform|value", "exponential|time_0|rho_0"]]
//!   value: [true, null]
//!   time_0: [true, null]
//!   rho_0: [true, null]
//! ```
//!
//! Mappings are internal keys, `[required, default]` pairs are leaves, and a
//! leaf whose default is a list of strings is a choice. Each option string is
//! `name|param|param...`: the variant name followed by the sibling keys that
//! variant activates.

use serde_yaml::{Mapping, Value};

use crate::error::TreeError;

/// Separator between an option name and its parameter names.
pub const OPTION_DELIMITER: char = '|';

/// One variant of a choice key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    /// Variant name, the value a user writes for the choice key.
    pub name: String,
    /// Sibling keys this variant activates.
    pub params: Vec<String>,
}

impl ChoiceOption {
    pub fn new<I, S>(name: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse `name|param|param`.
    pub fn parse(encoded: &str) -> Self {
        let mut parts = encoded.split(OPTION_DELIMITER);
        let name = parts.next().unwrap_or_default().to_string();
        Self {
            name,
            params: parts.map(str::to_string).collect(),
        }
    }

    /// Inverse of [`ChoiceOption::parse`].
    pub fn encode(&self) -> String {
        let mut encoded = self.name.clone();
        for param in &self.params {
            encoded.push(OPTION_DELIMITER);
            encoded.push_str(param);
        }
        encoded
    }
}

/// A node of the template schema.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateEntry {
    /// Key with sub-keys.
    Mapping(TemplateMap),
    /// Key with a single value; `Null` means no default.
    Scalar { required: bool, default: Value },
    /// Enumerated key. `options[0]` is the current selection.
    Choice {
        required: bool,
        options: Vec<ChoiceOption>,
    },
}

impl TemplateEntry {
    pub fn scalar(required: bool, default: impl Into<Value>) -> Self {
        Self::Scalar {
            required,
            default: default.into(),
        }
    }

    /// Build a choice from encoded option strings.
    pub fn choice(required: bool, options: &[&str]) -> Self {
        Self::Choice {
            required,
            options: options.iter().map(|o| ChoiceOption::parse(o)).collect(),
        }
    }

    pub fn is_required(&self) -> bool {
        match self {
            Self::Mapping(_) => false,
            Self::Scalar { required, .. } | Self::Choice { required, .. } => *required,
        }
    }

    /// Name of the selected option, for choices.
    pub fn selected(&self) -> Option<&str> {
        match self {
            Self::Choice { options, .. } => options.first().map(|o| o.name.as_str()),
            _ => None,
        }
    }

    /// Interpret a YAML value from a template document. `path` is used in errors.
    pub fn from_value(value: &Value, path: &str) -> Result<Self, TreeError> {
        match value {
            Value::Mapping(mapping) => Ok(Self::Mapping(TemplateMap::from_mapping(mapping, path)?)),
            Value::Sequence(pair) if pair.len() == 2 && pair[0].is_bool() => {
                let required = pair[0].as_bool().unwrap_or(false);
                match option_strings(&pair[1]) {
                    Some(options) => Ok(Self::Choice {
                        required,
                        options: options.into_iter().map(ChoiceOption::parse).collect(),
                    }),
                    None => Ok(Self::Scalar {
                        required,
                        default: pair[1].clone(),
                    }),
                }
            }
            other => Ok(Self::Scalar {
                required: false,
                default: other.clone(),
            }),
        }
    }

    /// Back to the `[required, default]` document shape.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Mapping(map) => map.to_value(),
            Self::Scalar { required, default } => {
                Value::Sequence(vec![Value::Bool(*required), default.clone()])
            }
            Self::Choice { required, options } => Value::Sequence(vec![
                Value::Bool(*required),
                Value::Sequence(options.iter().map(|o| Value::String(o.encode())).collect()),
            ]),
        }
    }
}

/// Non-empty list made only of strings.
fn option_strings(value: &Value) -> Option<Vec<&str>> {
    let items = value.as_sequence()?;
    if items.is_empty() {
        return None;
    }
    items.iter().map(Value::as_str).collect()
}

/// Insertion-ordered mapping of template keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateMap {
    entries: Vec<(String, TemplateEntry)>,
}

impl TemplateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a template document whose top level is a mapping.
    pub fn from_yaml_str(text: &str) -> Result<Self, TreeError> {
        let value: Value = serde_yaml::from_str(text).map_err(|e| TreeError::Template {
            path: String::new(),
            message: e.to_string(),
        })?;
        match value {
            Value::Mapping(mapping) => Self::from_mapping(&mapping, ""),
            _ => Err(TreeError::Template {
                path: String::new(),
                message: "top level of a template must be a mapping".to_string(),
            }),
        }
    }

    pub fn from_mapping(mapping: &Mapping, path: &str) -> Result<Self, TreeError> {
        let mut map = Self::new();
        for (key, value) in mapping {
            let key = key_name(key).ok_or_else(|| TreeError::Template {
                path: path.to_string(),
                message: format!("unsupported key {:?}", key),
            })?;
            let child_path = join_path(path, &key);
            let entry = TemplateEntry::from_value(value, &child_path)?;
            map.insert(key, entry);
        }
        Ok(map)
    }

    pub fn get(&self, key: &str) -> Option<&TemplateEntry> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut TemplateEntry> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, e)| e)
    }

    /// Replace an existing key in place, or append a new one.
    pub fn insert(&mut self, key: impl Into<String>, entry: TemplateEntry) -> Option<TemplateEntry> {
        let key = key.into();
        match self.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, entry)),
            None => {
                self.entries.push((key, entry));
                None
            }
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TemplateEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by dotted path (`model.structure.type`).
    pub fn lookup(&self, path: &str) -> Option<&TemplateEntry> {
        let mut parts = path.split('.');
        let mut current = self.get(parts.next()?)?;
        for part in parts {
            match current {
                TemplateEntry::Mapping(map) => current = map.get(part)?,
                _ => return None,
            }
        }
        Some(current)
    }

    pub fn to_value(&self) -> Value {
        let mut mapping = Mapping::new();
        for (key, entry) in &self.entries {
            mapping.insert(Value::String(key.clone()), entry.to_value());
        }
        Value::Mapping(mapping)
    }
}

impl FromIterator<(String, TemplateEntry)> for TemplateMap {
    fn from_iter<T: IntoIterator<Item = (String, TemplateEntry)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (key, entry) in iter {
            map.insert(key, entry);
        }
        map
    }
}

/// String form of a YAML mapping key. Collections are not valid keys.
pub(crate) fn key_name(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        _ => None,
    }
}

pub(crate) fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}
