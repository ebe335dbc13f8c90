//! Errors for loading and checking simulation results.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum ResultError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported result file extension: {0:?}")]
    UnsupportedFormat(String),

    #[error("Result has no shells")]
    NoShells,

    #[error("Shell field '{field}' has {got} entries, expected {expected}")]
    ShellCountMismatch {
        field: String,
        got: usize,
        expected: usize,
    },

    #[error("Spectrum '{name}' has {got} luminosity bins for {expected} wavelengths")]
    SpectrumMismatch {
        name: String,
        got: usize,
        expected: usize,
    },

    #[error("Line interaction {index} absorbs in one species and emits in another")]
    MixedSpeciesInteraction { index: usize },
}
