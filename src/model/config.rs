use serde::{Deserialize, Serialize};

use crate::model::task::Column;

/// Configuration from board.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub board: BoardInfo,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardInfo {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Column new tasks land in when none is given on the command line.
    #[serde(default = "default_column")]
    pub column: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        DefaultsConfig {
            column: default_column(),
        }
    }
}

fn default_column() -> String {
    "backlog".to_string()
}

impl BoardConfig {
    /// Resolve the configured default column, falling back to backlog for
    /// values outside the fixed set.
    pub fn default_column(&self) -> Column {
        Column::parse(&self.defaults.column).unwrap_or(Column::Backlog)
    }
}
