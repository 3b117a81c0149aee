//! Shared plumbing for Disha services: the JSON response envelope, health
//! handlers, request-id middleware, tracing setup, and serde helpers.

pub mod envelope;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
