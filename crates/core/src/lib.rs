//! Farm Direct Core - Shared types library.
//!
//! This crate provides the domain types used across the Farm Direct components:
//! - `client` - Request gateway, session store and resource APIs
//! - `cli` - Command-line front end for farmers, businesses and customers
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
