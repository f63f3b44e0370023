use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Workflow stage a task occupies on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    /// The To-Do column.
    #[default]
    #[serde(alias = "to-do")]
    Study,
    Review,
    Exercise,
}

impl Column {
    /// Display order of the board columns.
    pub const ALL: [Column; 3] = [Column::Study, Column::Review, Column::Exercise];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Column::Study => "study",
            Column::Review => "review",
            Column::Exercise => "exercise",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Column::Study => "To-Do",
            Column::Review => "Review",
            Column::Exercise => "Exercises",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown column: {0}")]
pub struct ColumnParseError(pub String);

impl FromStr for Column {
    type Err = ColumnParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "study" | "to-do" | "todo" => Ok(Column::Study),
            "review" => Ok(Column::Review),
            "exercise" | "exercises" => Ok(Column::Exercise),
            other => Err(ColumnParseError(other.to_owned())),
        }
    }
}
