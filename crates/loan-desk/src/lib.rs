//! Loan desk for the AI branch manager demo.
//!
//! The crate exposes the credit-tier decision engine, the guided application workflow that
//! wraps it, and the ambient configuration, telemetry, and error plumbing shared with the
//! HTTP service.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
