//! Shared application state: the single storage connection and the
//! session table.
//!
//! Wrapped in `Arc` at startup and handed to the API router. All
//! statements go through one `Connection` guarded by a `Mutex`; the
//! session table sits behind a `RwLock` since lookups vastly outnumber
//! logins.

use std::sync::{Mutex, RwLock};

use rusqlite::Connection;

use crate::auth;
use crate::config::ClinicConfig;
use crate::db;
use crate::error::ClinicError;
use crate::models::DoctorContext;
use crate::session::SessionStore;

pub struct ClinicState {
    conn: Mutex<Connection>,
    sessions: RwLock<SessionStore>,
}

impl ClinicState {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            sessions: RwLock::new(SessionStore::new()),
        }
    }

    /// Open the configured database. Failure here means the process
    /// cannot serve traffic.
    pub fn open(config: &ClinicConfig) -> Result<Self, ClinicError> {
        let conn = db::open_database(&config.database_path)
            .map_err(|e| ClinicError::StorageUnavailable(e.to_string()))?;
        Ok(Self::new(conn))
    }

    /// In-memory state (for testing).
    pub fn in_memory() -> Result<Self, ClinicError> {
        let conn = db::open_memory_database()
            .map_err(|e| ClinicError::StorageUnavailable(e.to_string()))?;
        Ok(Self::new(conn))
    }

    /// Run `f` with exclusive use of the connection.
    pub fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, ClinicError>,
    ) -> Result<T, ClinicError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| ClinicError::StorageUnavailable("connection lock poisoned".into()))?;
        f(&conn)
    }

    // ── Sessions ────────────────────────────────────────────

    /// Check credentials and open a session. `None` on bad credentials.
    pub fn login(
        &self,
        login: &str,
        password: &str,
    ) -> Result<Option<(String, DoctorContext)>, ClinicError> {
        // Only the row lookup holds the connection; key derivation runs unlocked.
        let found = self.with_conn(|conn| auth::find_doctor(conn, login))?;
        let Some(doctor) = found.and_then(|d| auth::check_credential(&d, password)) else {
            return Ok(None);
        };
        let mut sessions = self.write_sessions()?;
        let token = sessions.open(doctor.clone());
        Ok(Some((token, doctor)))
    }

    pub fn resolve_session(&self, token: &str) -> Result<Option<DoctorContext>, ClinicError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| ClinicError::StorageUnavailable("session lock poisoned".into()))?;
        Ok(sessions.resolve(token))
    }

    pub fn logout(&self, token: &str) -> Result<bool, ClinicError> {
        Ok(self.write_sessions()?.close(token))
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    fn write_sessions(&self) -> Result<std::sync::RwLockWriteGuard<'_, SessionStore>, ClinicError> {
        self.sessions
            .write()
            .map_err(|_| ClinicError::StorageUnavailable("session lock poisoned".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Doctor;
    use crate::recording;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    fn state_with_doctor() -> ClinicState {
        let state = ClinicState::in_memory().unwrap();
        state
            .with_conn(|conn| recording::register_doctor(conn, "doctor1", "doctor123", "Dr. One"))
            .unwrap();
        state
    }

    #[test]
    fn login_opens_resolvable_session() {
        let state = state_with_doctor();
        let (token, doctor) = state.login("doctor1", "doctor123").unwrap().unwrap();

        assert_eq!(doctor.login, "doctor1");
        assert_eq!(state.resolve_session(&token).unwrap(), Some(doctor));
        assert_eq!(state.session_count(), 1);
    }

    #[test]
    fn bad_credentials_open_nothing() {
        let state = state_with_doctor();
        assert!(state.login("doctor1", "nope").unwrap().is_none());
        assert_eq!(state.session_count(), 0);
    }

    #[test]
    fn logout_ends_session() {
        let state = state_with_doctor();
        let (token, _) = state.login("doctor1", "doctor123").unwrap().unwrap();

        assert!(state.logout(&token).unwrap());
        assert!(state.resolve_session(&token).unwrap().is_none());
    }

    #[test]
    fn storage_reads_proceed_while_a_login_verifies() {
        let state = Arc::new(ClinicState::in_memory().unwrap());
        state
            .with_conn(|conn| {
                let doctor = Doctor {
                    id: uuid::Uuid::new_v4(),
                    login: "slow".into(),
                    password: auth::hash_credential_with("doctor123", 300_000),
                    name: "Dr. Slow".into(),
                };
                db::insert_doctor(conn, &doctor)?;
                Ok(())
            })
            .unwrap();

        let login_state = Arc::clone(&state);
        let login = std::thread::spawn(move || {
            let started = Instant::now();
            let result = login_state.login("slow", "doctor123").unwrap();
            (result.is_some(), started.elapsed())
        });

        std::thread::sleep(Duration::from_millis(20));
        let started = Instant::now();
        let patients = state
            .with_conn(|conn| db::get_all_patients(conn).map_err(Into::into))
            .unwrap();
        let read_wait = started.elapsed();

        let (logged_in, login_time) = login.join().unwrap();
        assert!(logged_in);
        assert!(patients.is_empty());
        assert!(
            read_wait < login_time / 2,
            "read waited {read_wait:?} during a {login_time:?} login"
        );
    }

    #[test]
    fn open_reports_unavailable_storage() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let config = ClinicConfig {
            database_path: blocker.join("clinic.db"),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
        };
        let err = ClinicState::open(&config).err().unwrap();
        assert!(matches!(err, ClinicError::StorageUnavailable(_)));
    }
}
