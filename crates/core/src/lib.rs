//! Sanchi Core - Shared types library.
//!
//! This crate provides the domain types shared by the Sanchi Wellness
//! storefront components:
//! - `storefront` - Public REST API (catalog, cart, checkout, order history)
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and
//!   order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
