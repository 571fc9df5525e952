//! Data setup and teardown for the ServeRest end-to-end suites.
//!
//! Scenarios start from a known state: the API ships with default data
//! (one user, two products, one cart) and leftovers of earlier runs may
//! still be present. This crate loads the scenario fixtures and brings the
//! API to the state each scenario expects.
//!
//! - [`fixtures`] - Typed fixture files (bundled, or read from a directory)
//! - [`reset`] - Removal of default and fixture data
//! - [`seed`] - Idempotent creation of fixture data and login sessions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod fixtures;
pub mod reset;
pub mod seed;

pub use error::{FixtureError, HarnessError};
pub use fixtures::Fixtures;
pub use reset::ResetReport;
pub use seed::Session;
