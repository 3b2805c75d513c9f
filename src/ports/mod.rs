//! Port traits. API boundaries for the hexagon.
//!
//! - Outbound: Called by the design service into the AI backends
//!
//! The HTTP adapter drives the service directly; there is no inbound trait.

pub mod outbound;

pub use outbound::{ImageGenerationPort, TextGenerationPort};
