//! The editable configuration tree consumers query and mutate.
//!
//! Rows address a parent's children and columns address a node's fields, so
//! a column view can be driven directly from [`ConfigTreeModel::child_at`]
//! and [`ConfigTreeModel::field_at`].
//!
//! Choice protocol: each choice leaf is a small state machine whose states
//! are its option names. Selecting an option swaps it to field 0, disables
//! the sibling subtrees of the previous option and enables those of the new
//! one. There is no terminal state.

use std::collections::HashSet;

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::builder::build;
use crate::error::TreeError;
use crate::merge::merge;
use crate::node::{Node, NodeId, NodeKind, Tree};
use crate::serialize::to_mapping;
use crate::template::TemplateMap;

/// What a view may do with a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemFlags {
    pub enabled: bool,
    pub selectable: bool,
    pub editable: bool,
}

/// Change notifications for the view layer, drained with
/// [`ConfigTreeModel::take_events`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelEvent {
    FieldChanged { node: NodeId, column: usize },
    SelectionChanged { leaf: NodeId, from: String, to: String },
}

#[derive(Debug, Clone)]
pub struct ConfigTreeModel {
    tree: Tree,
    choice_nodes: Vec<NodeId>,
    disabled: HashSet<NodeId>,
    events: Vec<ModelEvent>,
}

impl ConfigTreeModel {
    /// Build a model from an already merged template.
    pub fn from_template(template: &TemplateMap) -> Self {
        let built = build(template);
        Self {
            tree: built.tree,
            choice_nodes: built.choice_nodes,
            disabled: built.disabled,
            events: Vec::new(),
        }
    }

    /// Merge `user` into `template`, then build. Invalid choices abort.
    pub fn from_user_config(user: &Mapping, mut template: TemplateMap) -> Result<Self, TreeError> {
        merge(user, &mut template)?;
        Ok(Self::from_template(&template))
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.tree.get(id)
    }

    /// `None` past the end of the child list.
    pub fn child_at(&self, parent: NodeId, row: usize) -> Option<NodeId> {
        self.tree.get(parent)?.child(row)
    }

    pub fn row_count(&self, parent: NodeId) -> usize {
        self.tree.get(parent).map_or(0, Node::num_children)
    }

    pub fn column_count(&self, node: NodeId) -> usize {
        self.tree.get(node).map_or(0, Node::num_fields)
    }

    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.tree.get(node)?.parent()
    }

    pub fn row_of(&self, node: NodeId) -> Option<usize> {
        self.tree.row_of(node)
    }

    /// `None` past the end of the field list.
    pub fn field_at(&self, node: NodeId, column: usize) -> Option<&Value> {
        self.tree.get(node)?.field(column)
    }

    pub fn header(&self, column: usize) -> Option<&Value> {
        self.field_at(self.root(), column)
    }

    /// Overwrite one field. Returns false if the column is out of bounds.
    pub fn set_field(&mut self, node: NodeId, column: usize, value: Value) -> bool {
        let changed = self
            .tree
            .get_mut(node)
            .map_or(false, |n| n.set_field(column, value));
        if changed {
            self.events.push(ModelEvent::FieldChanged { node, column });
        }
        changed
    }

    pub fn disabled(&self) -> &HashSet<NodeId> {
        &self.disabled
    }

    pub fn choice_nodes(&self) -> &[NodeId] {
        &self.choice_nodes
    }

    /// True when the node or any of its ancestors is disabled.
    pub fn is_disabled(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if self.disabled.contains(&id) {
                return true;
            }
            current = self.parent_of(id);
        }
        false
    }

    pub fn flags(&self, node: NodeId) -> ItemFlags {
        match self.tree.get(node) {
            None => ItemFlags::default(),
            Some(_) if self.is_disabled(node) => ItemFlags::default(),
            Some(n) => ItemFlags {
                enabled: true,
                selectable: true,
                editable: n.is_leaf(),
            },
        }
    }

    pub fn is_editable(&self, node: NodeId) -> bool {
        self.flags(node).editable
    }

    /// Select `new_option` on a choice (or multi-option) leaf and update the
    /// disabled set.
    ///
    /// Selecting the option that is already active changes nothing.
    pub fn on_choice_changed(&mut self, leaf: NodeId, new_option: &str) -> Result<(), TreeError> {
        let node = self.tree.get(leaf).ok_or(TreeError::UnknownNode(leaf))?;
        if !node.is_choice() && !node.is_multi_option() {
            return Err(TreeError::NotAChoice(leaf));
        }
        let index = node
            .option_index(new_option)
            .ok_or_else(|| TreeError::UnknownOption {
                option: new_option.to_string(),
                available: node
                    .fields()
                    .iter()
                    .filter_map(|f| f.as_str().map(str::to_string))
                    .collect(),
            })?;
        if self.is_disabled(leaf) {
            return Err(TreeError::Disabled(leaf));
        }
        if index == 0 {
            return Ok(());
        }

        let old_option = node.name().unwrap_or_default().to_string();
        let to_disable = node.siblings(&old_option).to_vec();
        let to_enable = node.siblings(new_option).to_vec();

        if let Some(node) = self.tree.get_mut(leaf) {
            node.fields.swap(0, index);
        }
        self.disabled.extend(to_disable);
        for id in &to_enable {
            self.disabled.remove(id);
        }

        debug!(
            path = %self.tree.path_of(leaf),
            from = %old_option,
            to = %new_option,
            disabled = self.disabled.len(),
            "choice changed"
        );
        self.events.push(ModelEvent::SelectionChanged {
            leaf,
            from: old_option,
            to: new_option.to_string(),
        });
        Ok(())
    }

    /// Commit a new value on a single-value leaf. Choice leaves only change
    /// through [`Self::on_choice_changed`].
    pub fn set_value(&mut self, leaf: NodeId, value: Value) -> Result<(), TreeError> {
        let node = self.tree.get(leaf).ok_or(TreeError::UnknownNode(leaf))?;
        if !node.is_leaf() || node.is_choice() || node.num_fields() != 1 {
            return Err(TreeError::NotALeaf(leaf));
        }
        if self.is_disabled(leaf) {
            return Err(TreeError::Disabled(leaf));
        }
        self.set_field(leaf, 0, value);
        Ok(())
    }

    /// Key node at a dotted path such as `model.structure.density.type`.
    pub fn find(&self, path: &str) -> Option<NodeId> {
        let mut current = self.root();
        for part in path.split('.') {
            current = self
                .tree
                .get(current)?
                .children()
                .iter()
                .copied()
                .find(|&id| {
                    self.tree
                        .get(id)
                        .map_or(false, |n| n.kind() == NodeKind::Key && n.name() == Some(part))
                })?;
        }
        Some(current)
    }

    /// The leaf holding the value of `key_node`, if it is a value key.
    pub fn value_leaf(&self, key_node: NodeId) -> Option<NodeId> {
        let node = self.tree.get(key_node)?;
        match node.children() {
            [only] if self.tree.get(*only).map_or(false, Node::is_leaf) => Some(*only),
            _ => None,
        }
    }

    /// Dotted paths of enabled required keys that still have no value.
    pub fn missing_required(&self) -> Vec<String> {
        let mut missing = Vec::new();
        self.collect_missing(self.root(), &mut missing);
        missing
    }

    fn collect_missing(&self, id: NodeId, missing: &mut Vec<String>) {
        let Some(node) = self.tree.get(id) else {
            return;
        };
        for &child in node.children() {
            if self.disabled.contains(&child) {
                continue;
            }
            match self.value_leaf(child) {
                Some(leaf) => {
                    let required = self.tree.get(child).map_or(false, Node::is_required);
                    if required && self.field_at(leaf, 0).map_or(true, Value::is_null) {
                        missing.push(self.tree.path_of(child));
                    }
                }
                None => self.collect_missing(child, missing),
            }
        }
    }

    /// The edited configuration, without disabled subtrees.
    pub fn to_mapping(&self) -> Result<Value, TreeError> {
        to_mapping(&self.tree, &self.disabled, self.root())
    }

    pub fn take_events(&mut self) -> Vec<ModelEvent> {
        std::mem::take(&mut self.events)
    }
}
