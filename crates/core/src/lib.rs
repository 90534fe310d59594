//! Shared types and domain errors for the Keel backend.

pub mod error;
pub mod types;
pub mod validation;
