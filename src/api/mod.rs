//! HTTP host glue for the bearer authentication core.
//!
//! # Modules
//!
//! - [`dto`] - Response payloads
//! - [`extractors`] - Ticket extractor for handlers
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Bearer authentication and tracing middleware
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
