//! API DTOs (Data Transfer Objects)

use serde::Deserialize;
use serde_json::Value;

use crate::application::{CreateTodoInput, SearchTodosInput, UpdateTodoInput};
use crate::domain::value_objects::TodoDates;

// ============================================================================
// Create / Update
// ============================================================================

/// Body of `POST /` and `PUT /{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct TodoRequest {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub dates: Option<TodoDates>,
    /// Client-side hints; accepted and ignored
    #[serde(default)]
    pub flags: Option<Value>,
}

impl From<TodoRequest> for CreateTodoInput {
    fn from(req: TodoRequest) -> Self {
        Self {
            name: req.name,
            title: req.title,
            text: req.text,
            dates: req.dates,
        }
    }
}

impl From<TodoRequest> for UpdateTodoInput {
    fn from(req: TodoRequest) -> Self {
        Self {
            name: req.name,
            title: req.title,
            text: req.text,
            dates: req.dates,
        }
    }
}

// ============================================================================
// Search
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFlags {
    #[serde(default)]
    pub is_get_total_count: bool,
}

/// Body of `POST /search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchTodosRequest {
    #[serde(default)]
    pub ids: Vec<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
    pub sort: Option<i64>,
    #[serde(default)]
    pub flags: SearchFlags,
}

impl From<SearchTodosRequest> for SearchTodosInput {
    fn from(req: SearchTodosRequest) -> Self {
        Self {
            ids: req.ids,
            name: req.name,
            title: req.title,
            limit: req.limit,
            skip: req.skip,
            sort: req.sort,
            with_total_count: req.flags.is_get_total_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_flags() {
        let req: SearchTodosRequest = serde_json::from_str(
            r#"{"title":"milk","sort":-1,"flags":{"isGetTotalCount":true}}"#,
        )
        .unwrap();
        let input = SearchTodosInput::from(req);

        assert!(input.with_total_count);
        assert_eq!(input.sort, Some(-1));
        assert!(input.ids.is_empty());
    }

    #[test]
    fn test_todo_request_dates() {
        let req: TodoRequest = serde_json::from_str(
            r#"{"name":"home","title":"Paint","dates":{"start":1700000000000}}"#,
        )
        .unwrap();
        let dates = req.dates.unwrap();
        assert_eq!(dates.start, Some(1_700_000_000_000));
        assert_eq!(dates.end, None);
    }
}
