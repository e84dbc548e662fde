//! Person, patient and appointment records, and the `RecordStore` seam
//! the page handlers read them through.
//!
//! Two implementations:
//! - `BackendRecordStore`: the managed backend (production)
//! - `InMemoryRecordStore`: seeded maps for tests

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::{is_valid_id, Backend, BackendError, UNIQUE_ID};
use crate::config::BackendConfig;

// ─── Types ────────────────────────────────────────────────────────────────────

/// Identity account of a portal user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Patient document created by a completed registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    #[serde(rename = "$id")]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Payload for creating a patient document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRegistration {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Scheduled,
    Cancelled,
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Scheduled => write!(f, "Scheduled"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Appointment document. `primary_physician` is free text matched
/// against the roster by exact name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRecord {
    #[serde(rename = "$id")]
    pub id: String,
    pub schedule: DateTime<Utc>,
    pub primary_physician: String,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

// ─── Store seam ───────────────────────────────────────────────────────────────

/// Id-keyed access to remote records. `Ok(None)` means "no such record";
/// `Err` is reserved for transport, auth and configuration failures.
pub trait RecordStore: Send + Sync + 'static {
    fn get_user(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Option<UserRecord>, BackendError>> + Send;

    fn get_appointment(
        &self,
        appointment_id: &str,
    ) -> impl Future<Output = Result<Option<AppointmentRecord>, BackendError>> + Send;

    fn register_patient(
        &self,
        registration: PatientRegistration,
    ) -> impl Future<Output = Result<PatientRecord, BackendError>> + Send;
}

// ─── Backend implementation ───────────────────────────────────────────────────

/// `RecordStore` over the managed backend.
///
/// Users come from the identity service; patients and appointments are
/// documents in the configured database.
#[derive(Debug, Clone)]
pub struct BackendRecordStore {
    backend: Backend,
    database_id: Option<String>,
    patient_collection_id: Option<String>,
    appointment_collection_id: Option<String>,
}

impl BackendRecordStore {
    pub fn new(backend: Backend, config: &BackendConfig) -> Self {
        Self {
            backend,
            database_id: config.database_id.clone(),
            patient_collection_id: config.patient_collection_id.clone(),
            appointment_collection_id: config.appointment_collection_id.clone(),
        }
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    fn database(&self) -> Result<&str, BackendError> {
        self.database_id
            .as_deref()
            .ok_or(BackendError::MissingCollection(BackendConfig::DATABASE_VAR))
    }
}

fn required<'a>(value: &'a Option<String>, var: &'static str) -> Result<&'a str, BackendError> {
    value.as_deref().ok_or(BackendError::MissingCollection(var))
}

impl RecordStore for BackendRecordStore {
    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, BackendError> {
        self.backend.users().get(user_id).await
    }

    async fn get_appointment(
        &self,
        appointment_id: &str,
    ) -> Result<Option<AppointmentRecord>, BackendError> {
        if !is_valid_id(appointment_id) {
            return Ok(None);
        }
        let database = self.database()?;
        let collection = required(
            &self.appointment_collection_id,
            BackendConfig::APPOINTMENT_COLLECTION_VAR,
        )?;
        self.backend
            .databases()
            .get_document(database, collection, appointment_id)
            .await
    }

    async fn register_patient(
        &self,
        registration: PatientRegistration,
    ) -> Result<PatientRecord, BackendError> {
        let database = self.database()?;
        let collection = required(
            &self.patient_collection_id,
            BackendConfig::PATIENT_COLLECTION_VAR,
        )?;
        let patient: PatientRecord = self
            .backend
            .databases()
            .create_document(database, collection, UNIQUE_ID, &registration)
            .await?;
        tracing::info!(patient_id = %patient.id, user_id = %patient.user_id, "Patient registered");
        Ok(patient)
    }
}

// ─── In-memory implementation ─────────────────────────────────────────────────

#[cfg(test)]
pub(crate) use memory::InMemoryRecordStore;

#[cfg(test)]
mod memory {
    use std::collections::HashMap;
    use std::sync::RwLock;

    use uuid::Uuid;

    use super::*;

    /// `RecordStore` backed by in-process maps.
    ///
    /// `fail_with(status)` makes every call return `BackendError::Status`,
    /// which stands in for an unreachable or misbehaving backend.
    #[derive(Debug, Default)]
    pub struct InMemoryRecordStore {
        users: RwLock<HashMap<String, UserRecord>>,
        appointments: RwLock<HashMap<String, AppointmentRecord>>,
        patients: RwLock<Vec<PatientRecord>>,
        fail_status: Option<u16>,
    }

    impl InMemoryRecordStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_user(self, user: UserRecord) -> Self {
            if let Ok(mut users) = self.users.write() {
                users.insert(user.id.clone(), user);
            }
            self
        }

        pub fn with_appointment(self, appointment: AppointmentRecord) -> Self {
            if let Ok(mut appointments) = self.appointments.write() {
                appointments.insert(appointment.id.clone(), appointment);
            }
            self
        }

        pub fn fail_with(mut self, status: u16) -> Self {
            self.fail_status = Some(status);
            self
        }

        /// Patients registered so far, oldest first.
        pub fn patients(&self) -> Result<Vec<PatientRecord>, BackendError> {
            self.patients
                .read()
                .map(|p| p.clone())
                .map_err(|_| BackendError::LockPoisoned)
        }

        fn check_available(&self) -> Result<(), BackendError> {
            match self.fail_status {
                Some(status) => Err(BackendError::Status {
                    status,
                    body: "in-memory store configured to fail".into(),
                }),
                None => Ok(()),
            }
        }
    }

    impl RecordStore for InMemoryRecordStore {
        async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, BackendError> {
            self.check_available()?;
            let users = self.users.read().map_err(|_| BackendError::LockPoisoned)?;
            Ok(users.get(user_id).cloned())
        }

        async fn get_appointment(
            &self,
            appointment_id: &str,
        ) -> Result<Option<AppointmentRecord>, BackendError> {
            self.check_available()?;
            let appointments = self
                .appointments
                .read()
                .map_err(|_| BackendError::LockPoisoned)?;
            Ok(appointments.get(appointment_id).cloned())
        }

        async fn register_patient(
            &self,
            registration: PatientRegistration,
        ) -> Result<PatientRecord, BackendError> {
            self.check_available()?;
            let patient = PatientRecord {
                id: Uuid::new_v4().simple().to_string(),
                user_id: registration.user_id,
                name: registration.name,
                email: registration.email,
                phone: registration.phone,
            };
            self.patients
                .write()
                .map_err(|_| BackendError::LockPoisoned)?
                .push(patient.clone());
            Ok(patient)
        }
    }
}
