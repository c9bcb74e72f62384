//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types validate
//! stored values and report violations as query errors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Artifact, Link, LogSource, MemberEmail, SpdxId, SpdxInfo, UsageLogEntry,
};

use super::schema::{artifacts, integration_usage_log, links, sessions, spdx_info};

/// Row struct for reading from the sessions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SessionRow {
    pub kid: String,
    pub member_email: String,
    pub expiry: DateTime<Utc>,
}

/// Row struct for reading from the integration_usage_log table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = integration_usage_log)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UsageLogRow {
    pub id: Uuid,
    pub member_email: String,
    pub source: String,
    pub status_code: Option<i32>,
    pub request_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<UsageLogRow> for UsageLogEntry {
    type Error = String;

    fn try_from(row: UsageLogRow) -> Result<Self, Self::Error> {
        let source = row
            .source
            .parse::<LogSource>()
            .map_err(|err| format!("usage log {}: {err}", row.id))?;
        let member_email = MemberEmail::new(row.member_email)
            .map_err(|err| format!("usage log {}: {err}", row.id))?;
        Ok(Self {
            id: row.id,
            member_email,
            source,
            status_code: row.status_code,
            request_path: row.request_path,
            created_at: row.created_at,
        })
    }
}

/// Row struct for reading from the spdx_info table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = spdx_info)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SpdxInfoRow {
    pub spdx_id: String,
    pub spdx_version: String,
    pub name: String,
    pub document_namespace: Option<String>,
    pub member_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<SpdxInfoRow> for SpdxInfo {
    type Error = String;

    fn try_from(row: SpdxInfoRow) -> Result<Self, Self::Error> {
        Ok(Self {
            spdx_id: SpdxId::new(row.spdx_id).map_err(|err| err.to_string())?,
            spdx_version: row.spdx_version,
            name: row.name,
            document_namespace: row.document_namespace,
            member_email: row.member_email,
            created_at: row.created_at,
        })
    }
}

/// Row struct for reading from the artifacts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = artifacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ArtifactRow {
    pub uuid: Uuid,
    pub display_identifier: String,
    pub download_location: Option<String>,
    pub spdx_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ArtifactRow> for Artifact {
    type Error = String;

    fn try_from(row: ArtifactRow) -> Result<Self, Self::Error> {
        let spdx_id = row
            .spdx_id
            .map(SpdxId::new)
            .transpose()
            .map_err(|err| format!("artifact {}: {err}", row.uuid))?;
        Ok(Self {
            uuid: row.uuid,
            display_identifier: row.display_identifier,
            download_location: row.download_location,
            spdx_id,
            created_at: row.created_at,
        })
    }
}

/// Row struct for reading from the links table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = links)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LinkRow {
    pub id: Uuid,
    pub url: String,
    pub artifact_uuid: Uuid,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Self {
            id: row.id,
            url: row.url,
            artifact_uuid: row.artifact_uuid,
        }
    }
}
