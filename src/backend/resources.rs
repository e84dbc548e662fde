//! Resource handles derived from one `Backend`.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{Backend, BackendError};
use crate::records::UserRecord;

/// Placeholder id that asks the backend to generate one.
pub const UNIQUE_ID: &str = "unique()";

/// Backend id rule: up to 36 of `[A-Za-z0-9._-]`, not starting with a
/// special character.
static ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]{0,35}$").expect("valid regex"));

/// Whether `id` can name a record at all. The backend answers 400 for
/// anything else, so lookups treat such ids as "no record" without a
/// request.
pub fn is_valid_id(id: &str) -> bool {
    ID_RE.is_match(id)
}

// ═══════════════════════════════════════════════════════════
// Databases: document records
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct Databases {
    backend: Backend,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDocumentRequest<'a, D: Serialize> {
    document_id: &'a str,
    data: &'a D,
}

impl Databases {
    pub(crate) fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Fetch one document. Missing documents and unusable ids are `None`.
    pub async fn get_document<T: DeserializeOwned>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<Option<T>, BackendError> {
        if !is_valid_id(document_id) {
            return Ok(None);
        }
        self.backend
            .get_json(&[
                "databases",
                database_id,
                "collections",
                collection_id,
                "documents",
                document_id,
            ])
            .await
    }

    /// Create a document. Pass `UNIQUE_ID` to let the backend pick the id.
    pub async fn create_document<D: Serialize, T: DeserializeOwned>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &D,
    ) -> Result<T, BackendError> {
        self.backend
            .post_json(
                &["databases", database_id, "collections", collection_id, "documents"],
                &CreateDocumentRequest { document_id, data },
            )
            .await
    }
}

// ═══════════════════════════════════════════════════════════
// Storage: file buckets
// ═══════════════════════════════════════════════════════════

/// File metadata as reported by the storage service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    #[serde(rename = "$id")]
    pub id: String,
    pub bucket_id: String,
    pub name: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub size_original: u64,
}

#[derive(Debug, Clone)]
pub struct Storage {
    backend: Backend,
}

impl Storage {
    pub(crate) fn new(backend: Backend) -> Self {
        Self { backend }
    }

    pub async fn get_file(
        &self,
        bucket_id: &str,
        file_id: &str,
    ) -> Result<Option<FileRecord>, BackendError> {
        if !is_valid_id(file_id) {
            return Ok(None);
        }
        self.backend
            .get_json(&["storage", "buckets", bucket_id, "files", file_id])
            .await
    }

    /// Public view URL for a stored file, scoped to this project.
    pub fn file_view_url(&self, bucket_id: &str, file_id: &str) -> Result<String, BackendError> {
        let mut url = self
            .backend
            .url(&["storage", "buckets", bucket_id, "files", file_id, "view"])?;
        url.query_pairs_mut()
            .append_pair("project", self.backend.project_id());
        Ok(url.into())
    }
}

// ═══════════════════════════════════════════════════════════
// Users: identity accounts
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct Users {
    backend: Backend,
}

impl Users {
    pub(crate) fn new(backend: Backend) -> Self {
        Self { backend }
    }

    pub async fn get(&self, user_id: &str) -> Result<Option<UserRecord>, BackendError> {
        if !is_valid_id(user_id) {
            return Ok(None);
        }
        self.backend.get_json(&["users", user_id]).await
    }
}

// ═══════════════════════════════════════════════════════════
// Messaging: notification messages
// ═══════════════════════════════════════════════════════════

/// Delivery state of one outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    #[serde(rename = "$id")]
    pub id: String,
    pub provider_type: String,
    pub status: String,
    #[serde(default)]
    pub delivered_total: u64,
}

#[derive(Debug, Clone)]
pub struct Messaging {
    backend: Backend,
}

impl Messaging {
    pub(crate) fn new(backend: Backend) -> Self {
        Self { backend }
    }

    pub async fn get_message(&self, message_id: &str) -> Result<Option<MessageRecord>, BackendError> {
        if !is_valid_id(message_id) {
            return Ok(None);
        }
        self.backend
            .get_json(&["messaging", "messages", message_id])
            .await
    }
}
