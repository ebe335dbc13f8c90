//! The built-in TARDIS configuration template.

use tardis_config_tree::{TemplateMap, TreeError};

/// Template document shipped with the binary.
pub const TARDIS_TEMPLATE: &str = include_str!("template/tardis.yml");

/// Parse the built-in template. Every call returns a fresh, unmerged copy.
pub fn tardis_template() -> Result<TemplateMap, TreeError> {
    TemplateMap::from_yaml_str(TARDIS_TEMPLATE)
}
