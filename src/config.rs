//! Parse options.
//!
//! Options can be built in code or loaded from YAML, for hosts that keep
//! importer settings in a configuration file:
//!
//! ```yaml
//! max_depth: 64
//! special_floats: false
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DdlError, Result};

/// Settings that tune the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Deepest allowed structure nesting. Root structures are at depth 1.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Accept `inf` and `nan` as floating-point literals.
    #[serde(default = "default_special_floats")]
    pub special_floats: bool,
}

fn default_max_depth() -> usize {
    256
}

fn default_special_floats() -> bool {
    true
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            special_floats: default_special_floats(),
        }
    }
}

impl ParseOptions {
    /// Parse options from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        let options: ParseOptions = serde_yaml::from_str(content).map_err(|e| DdlError::Config {
            message: e.to_string(),
        })?;

        if options.max_depth == 0 {
            return Err(DdlError::Config {
                message: "max_depth must be at least 1".to_string(),
            });
        }

        Ok(options)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_special_floats(mut self, enabled: bool) -> Self {
        self.special_floats = enabled;
        self
    }
}
