//! Infrastructure Layer
//!
//! Repository implementations over the platform document store.

pub mod document;
