//! Domain Value Objects
//!
//! Immutable value types for the Todo domain.

use kernel::id::{TodoId, UserId};
use platform::store::SortDirection;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TodoError, TodoResult};

/// Default page size for listing and searching
pub const DEFAULT_LIMIT: u64 = 100;

/// Required, trimmed text field (name, title)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoText(String);

impl TodoText {
    /// `field` names the input in the validation message
    pub fn required(raw: &str, field: &str) -> TodoResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TodoError::Validation(format!(
                "Todo {field} is either missing or invalid."
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Start/end of a todo, Unix milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
}

/// Search criteria, always scoped to one owner
#[derive(Debug, Clone, PartialEq)]
pub struct TodoQuery {
    pub owner: UserId,
    pub ids: Vec<TodoId>,
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Case-insensitive substring of the title
    pub title: Option<String>,
}

impl TodoQuery {
    /// Every todo of `owner`
    pub fn owned_by(owner: UserId) -> Self {
        Self {
            owner,
            ids: Vec::new(),
            name: None,
            title: None,
        }
    }

    /// Whether any criterion besides the owner is set
    pub fn has_keys(&self) -> bool {
        !self.ids.is_empty() || self.name.is_some() || self.title.is_some()
    }
}

/// Paging and ordering by creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u64,
    /// `None` returns every remaining todo
    pub limit: Option<u64>,
    pub order: SortDirection,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: Some(DEFAULT_LIMIT),
            order: SortDirection::Ascending,
        }
    }
}
