//! Application settings
//!
//! Settings are merged in three layers:
//! 1. Built-in defaults
//! 2. User settings file (~/.config/tardis-gui/settings.toml)
//! 3. CLI flags

mod defaults;
mod effective;
mod merge;

pub use defaults::BuiltinDefaults;
pub use effective::{
    default_settings_path, EffectiveSettings, OutputFormat, SettingsError, SettingsOrigin,
    SettingsSource,
};
pub use merge::{deep_merge, merge_layers};
