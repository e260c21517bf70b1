pub mod auth;
pub mod diagnoses;
pub mod exam;
pub mod health;
pub mod medicines;
pub mod patients;
pub mod reports;
