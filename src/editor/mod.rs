//! Configuration editor session
//!
//! Loads a user configuration, merges it against the built-in template and
//! keeps the resulting tree model for editing. Edits go through the model's
//! choice and value protocols; the edited configuration is read back as a
//! mapping or YAML text.

mod edit;
mod render;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use tardis_config_tree::{ConfigTreeModel, Mapping, NodeId, TemplateMap, TreeError, Value};

use crate::error::GuiError;
use crate::template::tardis_template;

pub use edit::Edit;
pub use render::render_tree;

/// Where an opened configuration came from.
#[derive(Debug, Clone, Serialize)]
pub struct Provenance {
    pub path: PathBuf,
    /// SHA-256 of the file contents
    pub digest: String,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ConfigEditor {
    model: ConfigTreeModel,
    provenance: Option<Provenance>,
}

impl ConfigEditor {
    /// Read a YAML configuration file and merge it against the TARDIS template.
    pub fn open(path: &Path) -> Result<Self, GuiError> {
        let text = fs::read_to_string(path).map_err(|source| GuiError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let digest = hex::encode(Sha256::digest(text.as_bytes()));

        let mut editor = Self::from_yaml_str(&text)?;
        info!(path = %path.display(), digest = %digest, "opened configuration");
        editor.provenance = Some(Provenance {
            path: path.to_path_buf(),
            digest,
            loaded_at: Utc::now(),
        });
        Ok(editor)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, GuiError> {
        Self::with_template(text, tardis_template()?)
    }

    /// Like [`ConfigEditor::from_yaml_str`] with a caller-supplied template.
    pub fn with_template(text: &str, template: TemplateMap) -> Result<Self, GuiError> {
        let user = match serde_yaml::from_str::<Value>(text)? {
            Value::Mapping(mapping) => mapping,
            Value::Null => Mapping::new(),
            _ => return Err(GuiError::NotAMapping),
        };

        let model = ConfigTreeModel::from_user_config(&user, template)?;
        for path in model.missing_required() {
            warn!(key = %path, "required configuration key has no value");
        }

        Ok(Self {
            model,
            provenance: None,
        })
    }

    pub fn model(&self) -> &ConfigTreeModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut ConfigTreeModel {
        &mut self.model
    }

    pub fn provenance(&self) -> Option<&Provenance> {
        self.provenance.as_ref()
    }

    /// Apply one edit. A failed edit leaves the tree unchanged.
    pub fn apply(&mut self, edit: &Edit) -> Result<(), GuiError> {
        let leaf = self.leaf_at(edit.path())?;
        match edit {
            Edit::Select { option, .. } => self.model.on_choice_changed(leaf, option)?,
            Edit::Set { value, .. } => self.model.set_value(leaf, value.clone())?,
        }
        Ok(())
    }

    fn leaf_at(&self, path: &str) -> Result<NodeId, TreeError> {
        let key = self
            .model
            .find(path)
            .ok_or_else(|| TreeError::UnknownPath(path.to_string()))?;
        self.model.value_leaf(key).ok_or(TreeError::NotALeaf(key))
    }

    /// Current value of the key at `path`.
    pub fn value(&self, path: &str) -> Option<&Value> {
        let leaf = self.leaf_at(path).ok()?;
        self.model.field_at(leaf, 0)
    }

    pub fn missing_required(&self) -> Vec<String> {
        self.model.missing_required()
    }

    pub fn to_mapping(&self) -> Result<Value, GuiError> {
        Ok(self.model.to_mapping()?)
    }

    pub fn to_yaml(&self) -> Result<String, GuiError> {
        Ok(serde_yaml::to_string(&self.to_mapping()?)?)
    }

    pub fn render_tree(&self) -> String {
        render_tree(&self.model)
    }

    /// Rerun the simulation with the edited configuration.
    pub fn recalculate(&self) -> Result<(), GuiError> {
        warn!("recalculation is not available; the edited configuration was not run");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_template_defaults() {
        let editor = ConfigEditor::from_yaml_str("").unwrap();
        assert_eq!(editor.value("plasma.initial_t_rad"), Some(&Value::from("10000K")));
        assert!(editor.missing_required().contains(&"supernova.time_explosion".to_string()));
        assert!(editor.provenance().is_none());
    }

    #[test]
    fn test_non_mapping_rejected() {
        let err = ConfigEditor::from_yaml_str("- a\n- b\n").unwrap_err();
        assert!(matches!(err, GuiError::NotAMapping));
    }

    #[test]
    fn test_apply_unknown_path() {
        let mut editor = ConfigEditor::from_yaml_str("").unwrap();
        let err = editor.apply(&Edit::set("supernova.colour", "blue")).unwrap_err();
        assert!(matches!(err, GuiError::Tree(TreeError::UnknownPath(_))));
    }

    #[test]
    fn test_apply_set_on_mapping_key() {
        let mut editor = ConfigEditor::from_yaml_str("").unwrap();
        let err = editor.apply(&Edit::set("supernova", "1")).unwrap_err();
        assert!(matches!(err, GuiError::Tree(TreeError::NotALeaf(_))));
    }

    #[test]
    fn test_recalculate_is_noop() {
        let editor = ConfigEditor::from_yaml_str("").unwrap();
        let before = editor.to_mapping().unwrap();
        editor.recalculate().unwrap();
        assert_eq!(editor.to_mapping().unwrap(), before);
    }
}
