//! In-memory login sessions.
//!
//! Each login gets its own bearer token mapped to the doctor who logged
//! in, so concurrent doctors never share an identity. Only SHA-256 hashes
//! of tokens are held. Sessions live for the life of the process.

use std::collections::HashMap;

use base64::Engine;

use crate::models::DoctorContext;

/// Hash a bearer token string using SHA-256.
pub fn hash_token(token: &str) -> [u8; 32] {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}

/// Generate a random bearer token (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<[u8; 32], DoctorContext>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `doctor` and return its bearer token. Any
    /// earlier session of the same doctor is dropped, so the table holds at
    /// most one entry per doctor.
    pub fn open(&mut self, doctor: DoctorContext) -> String {
        let before = self.sessions.len();
        self.sessions.retain(|_, d| d.doctor_id != doctor.doctor_id);
        if self.sessions.len() < before {
            tracing::info!(login = %doctor.login, "Previous session replaced");
        }
        let token = generate_token();
        tracing::info!(login = %doctor.login, "Session opened");
        self.sessions.insert(hash_token(&token), doctor);
        token
    }

    pub fn resolve(&self, token: &str) -> Option<DoctorContext> {
        self.sessions.get(&hash_token(token)).cloned()
    }

    /// End the session for `token`. Returns whether one existed.
    pub fn close(&mut self, token: &str) -> bool {
        match self.sessions.remove(&hash_token(token)) {
            Some(doctor) => {
                tracing::info!(login = %doctor.login, "Session closed");
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
