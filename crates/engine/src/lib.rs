//! Clinicheck Engine - Request execution and assertion evaluation
//!
//! This crate sends the request described by a check case, captures the
//! response, and evaluates the case's assertions against it.

pub mod assertions;
pub mod client;
pub mod report;
pub mod runner;

pub use assertions::evaluate;
pub use client::{HttpClient, ReqwestClient, TransportError};
pub use report::render;
pub use runner::CaseRunner;
