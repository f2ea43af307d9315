//! Land-verification application client.
//!
//! # Responsibilities
//! - Deploy the application and fund its escrow account
//! - Invoke the three contract methods (submit hash, read back, transfer)
//! - Surface each call as a submit-and-confirm round trip

pub mod client;

pub use client::{CallOutcome, ContractClient};
