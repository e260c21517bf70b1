//! Doctor credentials: PBKDF2-SHA256 with a per-doctor random salt.
//!
//! The stored value is self-describing (`pbkdf2-sha256$<iterations>$<salt>$<hash>`)
//! and otherwise opaque to the rest of the crate.

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use rusqlite::Connection;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::db;
use crate::error::ClinicError;
use crate::models::{Doctor, DoctorContext};

const SCHEME: &str = "pbkdf2-sha256";
const SALT_LENGTH: usize = 16;
const HASH_LENGTH: usize = 32;

#[cfg(not(test))]
pub const CREDENTIAL_ITERATIONS: u32 = 210_000;
#[cfg(test)]
pub const CREDENTIAL_ITERATIONS: u32 = 1_000;

/// Derive the stored credential for a plaintext password.
pub fn hash_credential(password: &str) -> String {
    hash_credential_with(password, CREDENTIAL_ITERATIONS)
}

pub(crate) fn hash_credential_with(password: &str, iterations: u32) -> String {
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    let hash = derive(password, &salt, iterations);
    format!(
        "{SCHEME}${iterations}${}${}",
        STANDARD_NO_PAD.encode(salt),
        STANDARD_NO_PAD.encode(hash)
    )
}

/// Check a plaintext password against a stored credential.
/// Malformed stored values never verify.
pub fn verify_credential(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(scheme), Some(iterations), Some(salt), Some(hash), None) =
        (parts.next(), parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    if scheme != SCHEME {
        return false;
    }
    let Ok(iterations) = iterations.parse::<u32>() else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (STANDARD_NO_PAD.decode(salt), STANDARD_NO_PAD.decode(hash))
    else {
        return false;
    };
    if iterations == 0 || expected.len() != HASH_LENGTH {
        return false;
    }

    let actual = derive(password, &salt, iterations);
    actual.as_slice().ct_eq(expected.as_slice()).into()
}

/// Resolve a login/password pair to the doctor it belongs to.
/// Unknown login and wrong password are indistinguishable to the caller.
pub fn authenticate(
    conn: &Connection,
    login: &str,
    password: &str,
) -> Result<Option<DoctorContext>, ClinicError> {
    let doctor = find_doctor(conn, login)?;
    Ok(doctor.as_ref().and_then(|d| check_credential(d, password)))
}

/// Storage half of a login: fetch the doctor row, if any.
pub fn find_doctor(conn: &Connection, login: &str) -> Result<Option<Doctor>, ClinicError> {
    Ok(db::get_doctor_by_login(conn, login.trim())?)
}

/// CPU half of a login: key derivation only, no storage access.
pub fn check_credential(doctor: &Doctor, password: &str) -> Option<DoctorContext> {
    if !verify_credential(password, &doctor.password) {
        tracing::warn!(login = %doctor.login, "Rejected login: bad credential");
        return None;
    }
    Some(DoctorContext::from(doctor))
}

fn derive(password: &str, salt: &[u8], iterations: u32) -> [u8; HASH_LENGTH] {
    let mut out = [0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut out);
    out
}
