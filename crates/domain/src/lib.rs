//! Clinicheck Domain - Core harness types
//!
//! This crate defines the domain model for the clinicheck acceptance
//! harness. All types here are pure Rust with no I/O dependencies.

pub mod assertion;
pub mod body;
pub mod case;
pub mod config;
pub mod error;
pub mod method;
pub mod report;
pub mod response;

pub use assertion::{Assertion, AssertionResult};
pub use body::RequestBody;
pub use case::{BasicCredentials, CheckCase};
pub use config::HarnessConfig;
pub use error::{DomainError, DomainResult};
pub use method::HttpMethod;
pub use report::{CaseOutcome, CaseReport, SuiteReport};
pub use response::CheckResponse;
