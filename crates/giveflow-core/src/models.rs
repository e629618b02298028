//! Domain models for GiveFlow.
//!
//! These are the core types shared across all crates.

pub mod donation;
pub mod organization;
pub mod request;
