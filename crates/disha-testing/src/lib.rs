//! Test utilities for Disha crates.
//!
//! Mints session tokens (including expired and cross-namespace ones) so
//! tests don't have to spell out JWT plumbing. Import in `[dev-dependencies]`
//! only — never in production code.

pub mod auth;
