//! End-to-end orchestration runs.
//!
//! Two entry points mirror the two external workflows:
//! - [`documents::DocumentPipeline`]: fetch documents, then per document
//!   run the verify-then-transfer chain directly against the ledger.
//! - [`contract::ContractPipeline`]: deploy the land-verification app,
//!   fund it, and drive its three methods in sequence.

pub mod contract;
pub mod documents;

pub use contract::ContractPipeline;
pub use documents::{DocumentPipeline, DocumentRunSummary};
