//! Sanchi Wellness Storefront library.
//!
//! This crate provides the storefront API as a library, allowing the router
//! to be driven directly in tests and reused by the binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
