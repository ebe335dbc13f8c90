//! Turning a merged template into a node tree.

use std::collections::{HashMap, HashSet};

use serde_yaml::Value;
use tracing::debug;

use crate::node::{Node, NodeId, Tree};
use crate::template::{ChoiceOption, TemplateEntry, TemplateMap};

/// Header stored on the root node.
pub const ROOT_HEADER: &str = "Configuration";

/// Output of [`build`].
#[derive(Debug, Clone)]
pub struct BuiltTree {
    pub tree: Tree,
    /// Key nodes whose value is a choice.
    pub choice_nodes: Vec<NodeId>,
    /// Sibling nodes of every non-selected option.
    pub disabled: HashSet<NodeId>,
}

/// Build the tree for a (merged) template and link its choices.
pub fn build(template: &TemplateMap) -> BuiltTree {
    let mut tree = Tree::new(ROOT_HEADER);
    let mut choice_nodes = Vec::new();
    let root = tree.root();
    populate(&mut tree, root, template, &mut choice_nodes);
    let disabled = link_choices(&mut tree, &choice_nodes);

    debug!(
        nodes = tree.len(),
        choices = choice_nodes.len(),
        disabled = disabled.len(),
        "built configuration tree"
    );

    BuiltTree {
        tree,
        choice_nodes,
        disabled,
    }
}

fn populate(tree: &mut Tree, parent: NodeId, template: &TemplateMap, choice_nodes: &mut Vec<NodeId>) {
    for (key, entry) in template.iter() {
        let child = tree.add_key(parent, key, entry.is_required());
        match entry {
            TemplateEntry::Mapping(sub) => populate(tree, child, sub, choice_nodes),
            TemplateEntry::Choice { options, .. } => {
                let encoded = options.iter().map(|o| Value::String(o.encode())).collect();
                tree.add_choice_leaf(child, encoded);
                choice_nodes.push(child);
            }
            TemplateEntry::Scalar { default, .. } => {
                tree.add_leaf(child, vec![default.clone()]);
            }
        }
    }
}

/// Split the encoded options of each choice leaf into names and resolve
/// their parameters against the choice key's siblings.
///
/// Returns the nodes that start out disabled: the siblings of every option
/// but the selected one. Siblings the selected option shares with another
/// option stay enabled. Parameters naming a key that does not exist at this
/// level are skipped.
pub fn link_choices(tree: &mut Tree, choice_nodes: &[NodeId]) -> HashSet<NodeId> {
    let mut disabled = HashSet::new();

    for &key_node in choice_nodes {
        let Some(parent) = tree.get(key_node).and_then(Node::parent) else {
            continue;
        };
        let by_name = sibling_names(tree, parent);
        let Some(leaf_id) = tree.get(key_node).and_then(|n| n.child(0)) else {
            continue;
        };
        let Some(leaf) = tree.get_mut(leaf_id) else {
            continue;
        };

        for column in 0..leaf.fields.len() {
            let option = match leaf.fields[column].as_str() {
                Some(encoded) => ChoiceOption::parse(encoded),
                None => continue,
            };
            let activated: Vec<NodeId> = option
                .params
                .iter()
                .filter_map(|param| by_name.get(param).copied())
                .collect();
            leaf.fields[column] = Value::String(option.name.clone());
            leaf.siblings.insert(option.name, activated);
        }

        // Each choice contributes only its own non-selected siblings; the
        // selection of one choice never re-enables another choice's nodes.
        let selected: HashSet<NodeId> = leaf
            .name()
            .map(|name| leaf.siblings(name).iter().copied().collect())
            .unwrap_or_default();
        for field in leaf.fields.iter().skip(1) {
            if let Some(name) = field.as_str() {
                disabled.extend(
                    leaf.siblings(name)
                        .iter()
                        .filter(|id| !selected.contains(*id))
                        .copied(),
                );
            }
        }
    }

    disabled
}

fn sibling_names(tree: &Tree, parent: NodeId) -> HashMap<String, NodeId> {
    let Some(parent) = tree.get(parent) else {
        return HashMap::new();
    };
    parent
        .children()
        .iter()
        .filter_map(|&id| tree.get(id).and_then(Node::name).map(|name| (name.to_string(), id)))
        .collect()
}
