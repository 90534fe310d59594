//! Keel API server library.
//!
//! Exposes the response envelope, the error translator, the response
//! builder used by every handler, and the router, so integration tests and
//! the binary entrypoint share the same building blocks.

pub mod config;
pub mod controller;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod translator;
