use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub login: String,
    /// Opaque credential string; never serialized out.
    #[serde(skip_serializing, default)]
    pub password: String,
    pub name: String,
}

/// The doctor acting on a single request, resolved from a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorContext {
    pub doctor_id: Uuid,
    pub login: String,
    pub name: String,
}

impl From<&Doctor> for DoctorContext {
    fn from(doctor: &Doctor) -> Self {
        Self {
            doctor_id: doctor.id,
            login: doctor.login.clone(),
            name: doctor.name.clone(),
        }
    }
}
