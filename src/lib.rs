//! Land-Registry Transactional Workflow Executor
//!
//! Orchestrates land-verification workflows against an asynchronous ledger
//! and a third-party document API.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                    ORCHESTRATOR                              │
//!   │                                                              │
//!   │  ┌──────────┐   ┌───────────┐   ┌───────────┐   ┌─────────┐ │
//!   │  │ pipeline │──▶│ workflow  │──▶│ submitter │──▶│ ledger  │─┼──▶ Ledger
//!   │  │          │   │ steps     │   │ (signed)  │   │ client  │ │    Node
//!   │  └────┬─────┘   └───────────┘   └───────────┘   └────┬────┘ │
//!   │       │                                              │      │
//!   │       ▼                                              ▼      │
//!   │  ┌──────────┐                                  ┌──────────┐ │
//!   │  │ document │                                  │ poller   │ │
//!   │  │ API      │                                  │ (bounded)│ │
//!   │  └──────────┘                                  └──────────┘ │
//!   │                                                              │
//!   │  Cross-cutting: config │ observability │ lifecycle/shutdown  │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps run strictly in order and fail fast: a step executes only after
//! every preceding step reached a confirmed terminal state. Confirmed
//! ledger actions are never rolled back; partial progress is surfaced in
//! the [`workflow::WorkflowReport`].

// Core subsystems
pub mod config;
pub mod workflow;

// External collaborators
pub mod contract;
pub mod documents;
pub mod ledger;

// End-to-end runs
pub mod pipeline;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::OrchestratorConfig;
pub use lifecycle::Shutdown;
pub use workflow::types::{ConfirmationResult, SubmissionHandle, WorkflowReport};
