//! ServeRest Core - Shared data model for the end-to-end harness.
//!
//! This crate provides the types used across every harness component:
//! - `client` - HTTP request helper and per-resource commands
//! - `harness` - Fixture-driven setup and teardown
//! - `cli` - Operator commands for resetting a shared server
//! - `integration-tests` - Scenario suites
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O and no HTTP clients. The
//! server under test owns every lifecycle rule; these types only shape
//! requests and responses.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, emails, prices, flags, and statuses
//! - [`models`] - Wire payloads for users, products, carts, and login
//! - [`messages`] - Localized messages the server answers with

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod messages;
pub mod models;
pub mod types;

pub use models::*;
pub use types::*;
