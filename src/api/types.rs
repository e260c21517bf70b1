//! Shared types for the API layer.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::core_state::ClinicState;

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub state: Arc<ClinicState>,
}

impl ApiContext {
    pub fn new(state: Arc<ClinicState>) -> Self {
        Self { state }
    }
}

/// Bearer token of the current request, injected by the auth middleware
/// next to the resolved `DoctorContext`.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// Body of a `201 Created` response.
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: Uuid,
}
