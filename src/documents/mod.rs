//! Third-party document API integration.
//!
//! # Responsibilities
//! - Obtain an access token via the client-credentials grant
//! - Fetch the user's documents with bearer auth
//! - Treat non-2xx answers as request failures

pub mod client;
pub mod types;

pub use client::DocumentApiClient;
pub use types::{ApiError, Document};
