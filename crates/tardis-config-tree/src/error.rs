//! Error types for template merging, tree edits and serialization.

use crate::node::NodeId;

/// Errors raised by the configuration tree.
///
/// Navigation past the end of a child or field list is not an error; the
/// accessors return `None` for that.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeError {
    /// A user value for an enumerated key is not among the declared options.
    #[error("invalid option {value:?} for '{path}' (expected one of: {})", options.join(", "))]
    InvalidOption {
        path: String,
        value: String,
        options: Vec<String>,
    },

    /// The template declares a mapping but the user supplied something else.
    #[error("expected a mapping at '{path}'")]
    ExpectedMapping { path: String },

    /// A template document could not be interpreted.
    #[error("template error at '{path}': {message}")]
    Template { path: String, message: String },

    /// An option name passed to a choice leaf that it does not offer.
    #[error("option {option:?} is not offered here (available: {})", available.join(", "))]
    UnknownOption {
        option: String,
        available: Vec<String>,
    },

    /// A choice operation was applied to a node that is not a multi-option leaf.
    #[error("node {0} is not a choice leaf")]
    NotAChoice(NodeId),

    /// A value edit was applied to a node that is not a single-value leaf.
    #[error("node {0} is not a value leaf")]
    NotALeaf(NodeId),

    /// The node belongs to an inactive choice variant.
    #[error("node {0} is disabled")]
    Disabled(NodeId),

    /// A node id that does not belong to the tree.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// A dotted key path did not resolve to a node.
    #[error("no configuration key at '{0}'")]
    UnknownPath(String),

    /// A key node without children was reached during serialization.
    #[error("key '{key}' has no value to serialize")]
    EmptyNode { key: String },
}
