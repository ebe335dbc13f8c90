//! Tree vertices and the arena that owns them.
//!
//! Key nodes hold a single field (the key name). A key with a plain value has
//! exactly one child, a leaf holding that value; a key with sub-keys has one
//! key node child per sub-key. A choice leaf holds the selected option name
//! followed by its alternatives, plus the sibling nodes each option activates.

use std::collections::BTreeMap;
use std::fmt;

use serde_yaml::Value;

/// Stable index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Role of a node in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    /// Holds a configuration key.
    Key,
    /// Holds a value (or the options of a choice). Never has children.
    Leaf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) fields: Vec<Value>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// Option name -> nodes activated by that option. Only set on choice leaves.
    pub(crate) siblings: BTreeMap<String, Vec<NodeId>>,
    /// Template required flag (key nodes only).
    pub(crate) required: bool,
    /// Set on leaves built from a choice entry, whatever their option count.
    pub(crate) choice: bool,
}

impl Node {
    fn new(kind: NodeKind, fields: Vec<Value>, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            fields,
            parent,
            children: Vec::new(),
            siblings: BTreeMap::new(),
            required: false,
            choice: false,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_leaf(&self) -> bool {
        self.kind == NodeKind::Leaf
    }

    /// A leaf offering more than one option.
    pub fn is_multi_option(&self) -> bool {
        self.is_leaf() && self.fields.len() > 1
    }

    /// A leaf holding the options of a choice key. A choice with a single
    /// option is still a choice.
    pub fn is_choice(&self) -> bool {
        self.is_leaf() && self.choice
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn child(&self, row: usize) -> Option<NodeId> {
        self.children.get(row).copied()
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    pub fn fields(&self) -> &[Value] {
        &self.fields
    }

    pub fn field(&self, column: usize) -> Option<&Value> {
        self.fields.get(column)
    }

    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    /// First field as text, the key name for key nodes.
    pub fn name(&self) -> Option<&str> {
        self.fields.first().and_then(Value::as_str)
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn siblings(&self, option: &str) -> &[NodeId] {
        self.siblings.get(option).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns false when `column` is out of bounds.
    pub fn set_field(&mut self, column: usize, value: Value) -> bool {
        match self.fields.get_mut(column) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Position of an option name among the fields.
    pub(crate) fn option_index(&self, option: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.as_str() == Some(option))
    }
}

/// Arena of nodes; `NodeId(0)` is always the root.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            nodes: vec![Node::new(
                NodeKind::Root,
                vec![Value::String(header.into())],
                None,
            )],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Append a key node under `parent`.
    pub fn add_key(&mut self, parent: NodeId, key: impl Into<String>, required: bool) -> NodeId {
        let id = self.push(NodeKind::Key, vec![Value::String(key.into())], parent);
        if let Some(node) = self.get_mut(id) {
            node.required = required;
        }
        id
    }

    /// Append a value leaf under `parent`.
    pub fn add_leaf(&mut self, parent: NodeId, fields: Vec<Value>) -> NodeId {
        self.push(NodeKind::Leaf, fields, parent)
    }

    /// Append a choice leaf holding encoded options under `parent`.
    pub fn add_choice_leaf(&mut self, parent: NodeId, options: Vec<Value>) -> NodeId {
        let id = self.push(NodeKind::Leaf, options, parent);
        if let Some(node) = self.get_mut(id) {
            node.choice = true;
        }
        id
    }

    fn push(&mut self, kind: NodeKind, fields: Vec<Value>, parent: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind, fields, Some(parent)));
        if let Some(owner) = self.nodes.get_mut(parent.0) {
            owner.children.push(id);
        }
        id
    }

    /// Index of `id` among its parent's children; 0 for the root.
    pub fn row_of(&self, id: NodeId) -> Option<usize> {
        let node = self.get(id)?;
        match node.parent {
            Some(parent) => self.get(parent)?.children.iter().position(|c| *c == id),
            None => Some(0),
        }
    }

    /// Dotted key path of a node, e.g. `model.structure.type`.
    pub fn path_of(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        let mut current = self.get(id);
        while let Some(node) = current {
            if node.kind == NodeKind::Key {
                parts.push(node.name().unwrap_or_default().to_string());
            }
            current = node.parent.and_then(|p| self.get(p));
        }
        parts.reverse();
        parts.join(".")
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Tree, NodeId, NodeId, NodeId) {
        let mut tree = Tree::new("Configuration");
        let density = tree.add_key(tree.root(), "density", false);
        let value = tree.add_key(density, "value", true);
        let leaf = tree.add_leaf(value, vec![Value::from(3)]);
        (tree, density, value, leaf)
    }

    #[test]
    fn test_parent_child_links() {
        let (tree, density, value, leaf) = sample();
        let root = tree.get(tree.root()).unwrap();
        assert_eq!(root.parent(), None);
        assert_eq!(root.child(0), Some(density));
        assert_eq!(tree.get(value).unwrap().parent(), Some(density));
        assert_eq!(tree.get(leaf).unwrap().parent(), Some(value));
        assert!(tree.get(leaf).unwrap().is_leaf());
        assert!(tree.get(value).unwrap().is_required());
    }

    #[test]
    fn test_out_of_range_access_is_none() {
        let (tree, density, _, leaf) = sample();
        let node = tree.get(density).unwrap();
        assert_eq!(node.child(5), None);
        assert_eq!(node.field(1), None);
        assert_eq!(tree.get(leaf).unwrap().field(0), Some(&Value::from(3)));
        assert!(tree.get(NodeId(99)).is_none());
    }

    #[test]
    fn test_single_option_choice_leaf_is_choice() {
        let (mut tree, density, _, leaf) = sample();
        let kind = tree.add_key(density, "type", true);
        let choice = tree.add_choice_leaf(kind, vec![Value::from("only")]);
        let node = tree.get(choice).unwrap();
        assert!(node.is_choice());
        assert!(!node.is_multi_option());
        assert!(!tree.get(leaf).unwrap().is_choice());
    }

    #[test]
    fn test_set_field_bounds() {
        let (mut tree, _, _, leaf) = sample();
        let node = tree.get_mut(leaf).unwrap();
        assert!(node.set_field(0, Value::from("5")));
        assert!(!node.set_field(1, Value::from("6")));
        assert_eq!(node.fields(), &[Value::from("5")]);
    }

    #[test]
    fn test_row_and_path() {
        let (mut tree, density, value, leaf) = sample();
        let other = tree.add_key(density, "time_0", true);
        assert_eq!(tree.row_of(tree.root()), Some(0));
        assert_eq!(tree.row_of(value), Some(0));
        assert_eq!(tree.row_of(other), Some(1));
        assert_eq!(tree.path_of(other), "density.time_0");
        assert_eq!(tree.path_of(leaf), "density.value");
    }
}
