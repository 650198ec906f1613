//! Core types for Oakmere.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod product;
pub mod role;

pub use id::ProductId;
pub use product::ProductRecord;
pub use role::{AdminRole, AdminRoleParseError};
