//! Infrastructure Layer

pub mod document;
