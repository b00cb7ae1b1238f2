//! Core data models for the fee engine.
//!
//! This module contains the request, result and audit types used
//! throughout the engine.

mod audit;
mod fee_request;
mod fee_result;

pub use audit::{AuditStep, AuditTrace};
pub use fee_request::FeeRequest;
pub use fee_result::{FeeBreakdown, FeeResult, FeeSummary};
