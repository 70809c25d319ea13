//! Pipeline stages and the coordinator composing them.

pub mod challenge_builder;
pub mod coordinator;
pub mod error_classifier;
pub mod event_pipeline;
pub mod policy_validator;
pub mod ticket_resolver;
pub mod token_extractor;

pub use coordinator::AuthenticationCoordinator;
