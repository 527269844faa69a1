//! Tab kinds
//!
//! ```text
//! paper    research paper with section scrollspy and mobile menu
//! api      split-pane API reference with pane scrollspy
//! example  worked example, fade-in reveal only
//! ```

use serde::{Deserialize, Serialize};

use crate::error::TabError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabKind {
    Paper,
    Api,
    Example,
}

impl TabKind {
    pub const ALL: [TabKind; 3] = [TabKind::Paper, TabKind::Api, TabKind::Example];

    /// Only the paper tab shows the secondary section navigation bar
    pub fn shows_secondary_nav(&self) -> bool {
        matches!(self, TabKind::Paper)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TabKind::Paper => "paper",
            TabKind::Api => "api",
            TabKind::Example => "example",
        }
    }
}

impl std::fmt::Display for TabKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TabKind {
    type Err = TabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paper" => Ok(TabKind::Paper),
            "api" => Ok(TabKind::Api),
            "example" => Ok(TabKind::Example),
            _ => Err(TabError::UnknownKind(s.to_string())),
        }
    }
}
