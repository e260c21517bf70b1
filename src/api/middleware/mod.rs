//! API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. Auth — resolves the bearer session to a `DoctorContext`
//! 2. Access log — logs after auth, knows the acting doctor

pub mod audit;
pub mod auth;
