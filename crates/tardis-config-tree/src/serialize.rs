//! Tree back to a plain nested mapping.

use std::collections::HashSet;

use serde_yaml::{Mapping, Value};

use crate::error::TreeError;
use crate::node::{Node, NodeId, Tree};

/// Serialize the subtree rooted at `node`, skipping disabled nodes.
///
/// A key whose only child is a leaf yields that leaf's first field (the
/// selected option for choices). Any other key yields a mapping of its
/// enabled children. A key without children is an error.
pub fn to_mapping(tree: &Tree, disabled: &HashSet<NodeId>, node: NodeId) -> Result<Value, TreeError> {
    let current = tree.get(node).ok_or(TreeError::UnknownNode(node))?;

    match current.children() {
        [] => Err(TreeError::EmptyNode {
            key: display_path(tree, node),
        }),
        [only] if tree.get(*only).map_or(false, Node::is_leaf) => Ok(tree
            .get(*only)
            .and_then(|leaf| leaf.field(0))
            .cloned()
            .unwrap_or(Value::Null)),
        children => {
            let mut mapping = Mapping::new();
            for child in children {
                if disabled.contains(child) {
                    continue;
                }
                let key = tree
                    .get(*child)
                    .and_then(|n| n.field(0))
                    .cloned()
                    .unwrap_or(Value::Null);
                mapping.insert(key, to_mapping(tree, disabled, *child)?);
            }
            Ok(Value::Mapping(mapping))
        }
    }
}

fn display_path(tree: &Tree, node: NodeId) -> String {
    let path = tree.path_of(node);
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_nested_mapping() {
        let mut tree = Tree::new("Configuration");
        let root = tree.root();
        let plasma = tree.add_key(root, "plasma", true);
        let t_rad = tree.add_key(plasma, "initial_t_rad", false);
        tree.add_leaf(t_rad, vec![Value::from("10000K")]);
        let nlte = tree.add_key(plasma, "nlte", false);
        let species = tree.add_key(nlte, "species", false);
        tree.add_leaf(species, vec![Value::Sequence(vec![])]);

        let value = to_mapping(&tree, &HashSet::new(), root).unwrap();
        assert_eq!(
            value,
            yaml("plasma: {initial_t_rad: 10000K, nlte: {species: []}}")
        );
    }

    #[test]
    fn test_disabled_children_omitted() {
        let mut tree = Tree::new("Configuration");
        let root = tree.root();
        let a = tree.add_key(root, "a", true);
        tree.add_leaf(a, vec![Value::from(1)]);
        let b = tree.add_key(root, "b", true);
        tree.add_leaf(b, vec![Value::from(2)]);

        let value = to_mapping(&tree, &HashSet::from([b]), root).unwrap();
        assert_eq!(value, yaml("a: 1"));
    }

    #[test]
    fn test_choice_leaf_yields_selection() {
        let mut tree = Tree::new("Configuration");
        let root = tree.root();
        let kind = tree.add_key(root, "type", true);
        tree.add_leaf(kind, vec![Value::from("exponential"), Value::from("uniform")]);
        let value = to_mapping(&tree, &HashSet::new(), root).unwrap();
        assert_eq!(value, yaml("type: exponential"));
    }

    #[test]
    fn test_empty_key_is_error() {
        let mut tree = Tree::new("Configuration");
        let root = tree.root();
        let outer = tree.add_key(root, "outer", false);
        tree.add_key(outer, "inner", false);

        let err = to_mapping(&tree, &HashSet::new(), root).unwrap_err();
        assert_eq!(
            err,
            TreeError::EmptyNode {
                key: "outer.inner".to_string()
            }
        );
    }
}
