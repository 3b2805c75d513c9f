//! Application use cases. Orchestrate domain logic via ports.

pub mod design_service;

pub use design_service::DesignService;
