//! Clinic HTTP API.
//!
//! Exposes visit recording, catalogs, the patient timeline and the daily
//! report as JSON endpoints under `/api/`. Everything except health,
//! registration and login needs a bearer session:
//! Auth → Access log → Handler.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::clinic_api_router;
pub use server::{ApiServer, ApiServerInfo};
pub use types::ApiContext;
