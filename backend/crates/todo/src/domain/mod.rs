//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Todo)
//! - Domain value objects (TodoText, TodoDates, TodoQuery, Page)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod value_objects;
