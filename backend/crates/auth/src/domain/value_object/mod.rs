//! Value Object Module

pub mod email;
pub mod user_lookup;
pub mod user_name;
pub mod user_status;
pub mod user_type;
