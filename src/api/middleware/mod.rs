//! HTTP middleware for request processing and protection.
//!
//! Provides bearer authentication and observability middleware.

pub mod bearer;
pub mod tracing;
