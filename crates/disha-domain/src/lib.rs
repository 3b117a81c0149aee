//! Domain types shared across Disha crates.
//!
//! This crate contains only pure types and validation helpers with no
//! framework dependencies, so both server and client crates can use them.

pub mod admin;
pub mod email;
