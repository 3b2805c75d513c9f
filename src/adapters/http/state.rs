//! Server application state shared across handlers

use crate::shared::config::BackendStatus;
use crate::usecases::DesignService;
use std::sync::Arc;

/// Shared, read-only state. Nothing in here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    /// Design generation orchestrator
    pub design_service: Arc<DesignService>,

    /// Which backend secrets were present at startup
    pub backend_status: BackendStatus,
}

impl AppState {
    pub fn new(design_service: Arc<DesignService>, backend_status: BackendStatus) -> Self {
        Self {
            design_service,
            backend_status,
        }
    }
}
