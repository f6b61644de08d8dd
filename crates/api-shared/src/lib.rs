//! # API Shared
//!
//! Shared request/response types and utilities for the VetPR API surface.
//!
//! Contains:
//! - Wire DTOs (`dto` module) — plain serde structs with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! DTOs carry strings, not validated domain types: validation happens at the
//! handler boundary, where a failing field can be reported back to the caller
//! with a proper status code. Used by `api-rest` and the `vetpr-run` binary.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
