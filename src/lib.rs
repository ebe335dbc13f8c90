//! TARDIS GUI - result viewer and configuration editor
//!
//! Prepares the data of a finished TARDIS supernova simulation for display
//! (summary, shell graphs, spectra, per-shell abundances) and edits TARDIS
//! configuration files through a template-driven tree.

pub mod editor;
pub mod error;
pub mod logging;
pub mod mode;
pub mod settings;
pub mod template;
pub mod viewer;

pub use editor::{ConfigEditor, Edit, Provenance};
pub use error::{GuiError, ViewerError};
pub use mode::Mode;
pub use settings::{EffectiveSettings, OutputFormat, SettingsError};
pub use template::{tardis_template, TARDIS_TEMPLATE};
pub use viewer::{FilterMode, GraphProperty, LineInfo, ModelViewer, ShellInfo, SpectrumKind, Summary};
