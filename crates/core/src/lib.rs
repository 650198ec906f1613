//! Oakmere Core - Shared types library.
//!
//! This crate provides common types used across all Oakmere components:
//! - `admin` - Internal administration panel (access-proxy only)
//! - the catalog API service (external to this repository)
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, catalog records, and admin roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
