//! Template-driven configuration tree.
//!
//! A user configuration (nested YAML mapping) is merged into a template that
//! declares required/optional keys, defaults and enumerated choices. The
//! merged template becomes an editable node tree in which every choice key
//! enables the sibling subtrees of its selected option and disables those of
//! the others. The edited tree serializes back to a plain mapping without the
//! disabled subtrees.

mod builder;
mod error;
mod merge;
mod model;
mod node;
mod serialize;
mod template;

pub use builder::{build, link_choices, BuiltTree, ROOT_HEADER};
pub use error::TreeError;
pub use merge::{merge, validate};
pub use model::{ConfigTreeModel, ItemFlags, ModelEvent};
pub use node::{Node, NodeId, NodeKind, Tree};
pub use serialize::to_mapping;
pub use template::{ChoiceOption, TemplateEntry, TemplateMap, OPTION_DELIMITER};

/// Re-exported so callers can build user mappings without naming the YAML crate.
pub use serde_yaml::{Mapping, Value};
