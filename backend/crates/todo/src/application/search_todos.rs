//! Search Todos Use Case
//!
//! Filters the caller's todos by id list and case-insensitive name/title
//! substrings, with paging and creation-time ordering. At least one search
//! key is required.

use kernel::id::{TodoId, UserId};
use platform::store::SortDirection;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::entities::Todo;
use crate::domain::repository::TodoRepository;
use crate::domain::value_objects::{DEFAULT_LIMIT, Page, TodoQuery};
use crate::error::{TodoError, TodoResult};

/// Input DTO for search
#[derive(Debug, Clone, Default)]
pub struct SearchTodosInput {
    pub ids: Vec<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    /// Page size; `0` means unlimited, absent means the default
    pub limit: Option<u64>,
    pub skip: Option<u64>,
    /// `1` oldest first, `-1` newest first; anything else is ignored
    pub sort: Option<i64>,
    pub with_total_count: bool,
}

/// Output DTO for search
#[derive(Debug, Clone, Serialize)]
pub struct SearchTodosOutput {
    pub todos: Vec<Todo>,
    /// Present when the caller asked for it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

pub struct SearchTodosUseCase<R>
where
    R: TodoRepository,
{
    repo: Arc<R>,
}

impl<R> SearchTodosUseCase<R>
where
    R: TodoRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        owner: UserId,
        input: SearchTodosInput,
    ) -> TodoResult<SearchTodosOutput> {
        let ids = input
            .ids
            .iter()
            .map(|id| id.parse::<TodoId>().map_err(|_| TodoError::InvalidId))
            .collect::<TodoResult<Vec<_>>>()?;

        let query = TodoQuery {
            owner,
            ids,
            name: non_blank(input.name),
            title: non_blank(input.title),
        };

        if !query.has_keys() {
            return Err(TodoError::NoSearchKeys);
        }

        let page = Page {
            skip: input.skip.unwrap_or(0),
            limit: match input.limit {
                None => Some(DEFAULT_LIMIT),
                Some(0) => None,
                Some(limit) => Some(limit),
            },
            order: input
                .sort
                .and_then(SortDirection::from_signum)
                .unwrap_or_default(),
        };

        let total = if input.with_total_count {
            Some(self.repo.count(&query).await?)
        } else {
            None
        };

        let todos = self.repo.find_many(&query, &page).await?;
        tracing::debug!(owner = %owner, found = todos.len(), "Todo search");

        Ok(SearchTodosOutput { todos, total })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
