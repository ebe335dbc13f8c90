//! Error types for the application crate

use std::path::PathBuf;

use tardis_config_tree::TreeError;
use tardis_result::ResultError;

use crate::settings::SettingsError;

/// Errors preparing result data for display
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ViewerError {
    #[error("Shell {shell} out of range (result has {count} shells)")]
    ShellOutOfRange { shell: usize, count: usize },

    #[error("No plasma state stored for shell {0}")]
    NoPlasma(usize),

    #[error("Element Z = {z} not present in shell {shell}")]
    UnknownElement { shell: usize, z: u32 },

    #[error("Ion {ion} of Z = {z} not present in shell {shell}")]
    UnknownIon { shell: usize, z: u32, ion: u32 },

    #[error("Cannot normalise by zero {what}")]
    ZeroPopulation { what: String },

    #[error("Innermost radius is zero, shells cannot be scaled")]
    ZeroInnerRadius,

    #[error("Invalid wavelength window {start} - {end} A")]
    InvalidWindow { start: f64, end: f64 },

    #[error("Result stores no line interactions")]
    NoLineInteractions,
}

/// Top-level error of the application
#[derive(Debug, thiserror::Error)]
pub enum GuiError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Result(#[from] ResultError),

    #[error("{0}")]
    Viewer(#[from] ViewerError),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration root must be a mapping")]
    NotAMapping,

    #[error("Invalid edit '{0}' (expected path=value)")]
    InvalidEdit(String),

    #[error("{0} is temporarily unavailable")]
    UnsupportedMode(String),
}
