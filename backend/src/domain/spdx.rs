//! SPDX documents and the artifacts they describe.
//!
//! An [`SpdxInfo`] record describes one artifact's bill of materials. The
//! [`Artifact`] references it and owns zero or more download [`Link`]s.
//! Removing a document removes the whole graph, leaf first.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message returned when no document matches the requested id.
pub const NOT_FOUND_MESSAGE: &str = "not found";

/// Validation error for SPDX identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpdxIdValidationError {
    #[error("spdx id must not be empty")]
    Empty,
}

/// SPDX document identifier, e.g. `SPDXRef-DOCUMENT-1a2b`.
///
/// # Examples
/// ```
/// use vulnetix_backend::domain::SpdxId;
///
/// let id = SpdxId::new("SPDXRef-DOCUMENT").expect("valid id");
/// assert_eq!(id.as_str(), "SPDXRef-DOCUMENT");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpdxId(String);

impl SpdxId {
    /// Validate a raw identifier.
    pub fn new(raw: impl Into<String>) -> Result<Self, SpdxIdValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(SpdxIdValidationError::Empty);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for SpdxId {
    type Error = SpdxIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SpdxId> for String {
    fn from(value: SpdxId) -> Self {
        value.0
    }
}

impl fmt::Display for SpdxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored SPDX document metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpdxInfo {
    pub spdx_id: SpdxId,
    pub spdx_version: String,
    pub name: String,
    pub document_namespace: Option<String>,
    pub member_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Software artifact described by an SPDX document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub uuid: Uuid,
    pub display_identifier: String,
    pub download_location: Option<String>,
    pub spdx_id: Option<SpdxId>,
    pub created_at: DateTime<Utc>,
}

/// Download location owned by an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: Uuid,
    pub url: String,
    pub artifact_uuid: Uuid,
}

/// Record of what a cascade delete removed.
///
/// ## Invariants
/// - `link_ids` is empty when `artifact_uuid` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpdxDeletion {
    pub spdx_id: SpdxId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_uuid: Option<Uuid>,
    #[serde(default)]
    pub link_ids: Vec<Uuid>,
}

impl SpdxDeletion {
    /// Summarise a resolved document graph.
    ///
    /// Links that do not belong to `artifact` are ignored, so callers may
    /// pass the raw result of a join.
    ///
    /// # Examples
    /// ```
    /// use vulnetix_backend::domain::{SpdxDeletion, SpdxId};
    ///
    /// let deletion = SpdxDeletion::from_graph(SpdxId::new("SPDXRef-1").unwrap(), None, &[]);
    /// assert!(deletion.artifact_uuid.is_none());
    /// assert!(deletion.link_ids.is_empty());
    /// ```
    pub fn from_graph(spdx_id: SpdxId, artifact: Option<&Artifact>, links: &[Link]) -> Self {
        let Some(artifact) = artifact else {
            return Self {
                spdx_id,
                artifact_uuid: None,
                link_ids: Vec::new(),
            };
        };
        Self {
            spdx_id,
            artifact_uuid: Some(artifact.uuid),
            link_ids: links
                .iter()
                .filter(|link| link.artifact_uuid == artifact.uuid)
                .map(|link| link.id)
                .collect(),
        }
    }
}
