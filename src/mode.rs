//! Application modes.
//!
//! Passive mode shows a finished result. Active mode, editing a configuration
//! and rerunning the simulation from the window, is not available yet.

use std::fmt;
use std::path::Path;

use crate::error::GuiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Passive,
    Active,
}

impl Mode {
    /// Active when a configuration file is supplied.
    pub fn from_config(config: Option<&Path>) -> Self {
        match config {
            Some(_) => Self::Active,
            None => Self::Passive,
        }
    }

    /// Switch the application into this mode.
    pub fn enter(self) -> Result<(), GuiError> {
        match self {
            Self::Passive => Ok(()),
            Self::Active => Err(GuiError::UnsupportedMode(self.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passive => write!(f, "Passive mode"),
            Self::Active => write!(f, "Active mode"),
        }
    }
}
