//! Harness error types.

use std::path::PathBuf;

use serverest_client::ClientError;
use thiserror::Error;

/// Errors raised while reading fixture files.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid fixture {name}: {source}")]
    Parse {
        name: &'static str,
        source: serde_json::Error,
    },
}

/// Errors raised by setup and teardown routines.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// A setup step needed a success status and the API refused.
    #[error("{step} rejected with {status}: {message}")]
    Rejected {
        step: String,
        status: u16,
        message: String,
    },
}
