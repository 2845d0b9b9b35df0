//! Runtime configuration.
//!
//! Both structs deserialize from any serde format with every field
//! optional, so an embedding application can keep them in its own settings
//! file.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Simulator limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Largest step count `calculate` accepts. Every cached step holds an
    /// n×n matrix, so interactive front ends usually set this.
    /// Default: unbounded.
    pub max_steps: Option<usize>,
}

impl SimulatorConfig {
    pub fn with_max_steps(max_steps: usize) -> Self {
        Self { max_steps: Some(max_steps) }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_steps == Some(0) {
            return Err(Error::Config("max_steps must be at least 1".into()));
        }
        Ok(())
    }
}

/// Document file naming and window title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Suffix of the window title.
    /// Default: "Cognitive Modeling".
    pub app_title: String,

    /// File extension for saved graphs, without the dot.
    /// Default: "cgg".
    pub extension: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            app_title: "Cognitive Modeling".into(),
            extension: "cgg".into(),
        }
    }
}

impl DocumentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(Error::Config(format!(
                "extension must be non-empty and given without a dot, got {:?}",
                self.extension
            )));
        }
        Ok(())
    }
}
