//! Domain Entities
//!
//! Core business entities for the Todo domain.

use chrono::{DateTime, SubsecRound, Utc};
use kernel::id::{TodoId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{TodoDates, TodoText};

/// Todo entity - one item on an account's list
///
/// Serialized as stored and as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub name: TodoText,
    pub title: TodoText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub dates: TodoDates,
    /// Owner
    pub created_by: UserId,
    #[serde(default)]
    pub updated_by: Option<UserId>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Create a new todo owned by `owner`
    pub fn new(
        owner: UserId,
        name: TodoText,
        title: TodoText,
        text: Option<String>,
        dates: TodoDates,
    ) -> Self {
        let now = now_millis();
        Self {
            id: TodoId::new(),
            name,
            title,
            text: normalize_text(text),
            dates,
            created_by: owner,
            updated_by: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Replacement values for an update
#[derive(Debug, Clone, PartialEq)]
pub struct TodoChanges {
    pub name: TodoText,
    pub title: TodoText,
    /// `None` keeps the stored text
    pub text: Option<String>,
    /// `None` keeps the stored dates
    pub dates: Option<TodoDates>,
    pub updated_by: UserId,
    pub updated_at: DateTime<Utc>,
}

impl TodoChanges {
    pub fn new(
        editor: UserId,
        name: TodoText,
        title: TodoText,
        text: Option<String>,
        dates: Option<TodoDates>,
    ) -> Self {
        Self {
            name,
            title,
            text: normalize_text(text),
            dates,
            updated_by: editor,
            updated_at: now_millis(),
        }
    }
}

/// Current time at the precision timestamps are stored with
fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Trimmed description; blank becomes `None`
fn normalize_text(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
