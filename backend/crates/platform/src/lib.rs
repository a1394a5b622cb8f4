//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id with a tunable work factor)
//! - Signed, time-limited bearer tokens (HS256 JWT)
//! - The generic document store contract and its implementations
//!   (in-memory, PostgreSQL JSONB, timeout wrapper)

pub mod password;
pub mod store;
pub mod token;
