//! Built-in defaults (layer 1)

use serde::{Deserialize, Serialize};

/// Values used when neither the settings file nor the CLI say otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Shell property shown in the graph (default: "t_rads")
    pub graph_property: String,

    /// Spectrum shown in the spectrum view (default: "real")
    pub spectrum: String,

    /// Scale of the shell wedge normalising factor (default: 0.2)
    pub shell_scale: f64,

    /// Output format of the CLI (default: "text")
    pub output_format: String,

    /// Log level when RUST_LOG is unset (default: "warn")
    pub log_level: String,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            graph_property: "t_rads".to_string(),
            spectrum: "real".to_string(),
            shell_scale: 0.2,
            output_format: "text".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl BuiltinDefaults {
    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "viewer": {
                "graph_property": self.graph_property,
                "spectrum": self.spectrum,
                "shell_scale": self.shell_scale
            },
            "output": {
                "format": self.output_format
            },
            "log": {
                "level": self.log_level
            }
        })
    }
}
