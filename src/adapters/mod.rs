//! Infrastructure adapters. Implement ports and expose the HTTP surface.
//!
//! AI backends, HTTP server, terminal output. Map errors to DomainError.

pub mod ai;
pub mod http;
pub mod ui;
