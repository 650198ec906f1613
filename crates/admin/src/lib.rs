//! Oakmere Admin library.
//!
//! This crate provides the admin panel as a library, allowing it to be
//! tested and reused.
//!
//! # Security
//!
//! This crate holds the catalog API bearer token (full write access to the
//! product catalog). Only deploy behind the access proxy; the panel itself
//! never authenticates users, it trusts the proxy's identity headers.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
