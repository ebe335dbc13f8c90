//! Merging a user configuration into a template.
//!
//! Merge semantics, per user key:
//! - template mapping: recurse into the user's sub-mapping
//! - template choice: the user value must name one of the options; the
//!   selected option is swapped to position 0
//! - template scalar: the user value replaces the default
//! - unknown key: appended as a non-required scalar
//!
//! The whole user mapping is validated before anything is written, so a
//! failed merge leaves the template untouched. Required keys missing from the
//! user configuration are not reported here.

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::TreeError;
use crate::template::{join_path, key_name, ChoiceOption, TemplateEntry, TemplateMap};

/// Merge `user` into `template` in place.
pub fn merge(user: &Mapping, template: &mut TemplateMap) -> Result<(), TreeError> {
    validate(user, template, "")?;
    apply(user, template);
    debug!(keys = user.len(), "merged user configuration into template");
    Ok(())
}

/// Check every choice value in `user` without modifying the template.
pub fn validate(user: &Mapping, template: &TemplateMap, path: &str) -> Result<(), TreeError> {
    for (key, value) in user {
        let key = user_key(key);
        let child_path = join_path(path, &key);
        match template.get(&key) {
            Some(TemplateEntry::Mapping(sub)) => match value {
                Value::Mapping(user_sub) => validate(user_sub, sub, &child_path)?,
                Value::Null => {}
                _ => return Err(TreeError::ExpectedMapping { path: child_path }),
            },
            Some(TemplateEntry::Choice { options, .. }) => {
                if option_position(value, options).is_none() {
                    return Err(TreeError::InvalidOption {
                        path: child_path,
                        value: describe(value),
                        options: options.iter().map(|o| o.name.clone()).collect(),
                    });
                }
            }
            Some(TemplateEntry::Scalar { .. }) | None => {}
        }
    }
    Ok(())
}

fn apply(user: &Mapping, template: &mut TemplateMap) {
    for (key, value) in user {
        let key = user_key(key);
        match template.get_mut(&key) {
            Some(TemplateEntry::Mapping(sub)) => {
                if let Value::Mapping(user_sub) = value {
                    apply(user_sub, sub);
                }
            }
            Some(TemplateEntry::Choice { options, .. }) => {
                if let Some(index) = option_position(value, options) {
                    options.swap(0, index);
                }
            }
            Some(TemplateEntry::Scalar { default, .. }) => {
                *default = value.clone();
            }
            None => {
                template.insert(
                    key,
                    TemplateEntry::Scalar {
                        required: false,
                        default: value.clone(),
                    },
                );
            }
        }
    }
}

fn option_position(value: &Value, options: &[ChoiceOption]) -> Option<usize> {
    let selected = key_name(value)?;
    options.iter().position(|o| o.name == selected)
}

fn user_key(key: &Value) -> String {
    key_name(key).unwrap_or_else(|| describe(key))
}

fn describe(value: &Value) -> String {
    key_name(value).unwrap_or_else(|| {
        serde_yaml::to_string(value)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| format!("{:?}", value))
    })
}
