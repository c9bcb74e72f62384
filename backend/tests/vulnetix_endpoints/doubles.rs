//! In-memory store implementing the persistence-facing ports.
//!
//! Reads and deletes are counted so tests can assert that rejected requests
//! never touch the store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageRequest;
use vulnetix_backend::domain::ports::{
    SessionVerifier, SessionVerifierError, SpdxRepository, SpdxRepositoryError,
    UsageLogRepository, UsageLogRepositoryError,
};
use vulnetix_backend::domain::{
    Artifact, AuthResult, Link, LogSource, MemberEmail, Session, SessionToken,
    SessionVerification, SpdxDeletion, SpdxId, SpdxInfo, UsageLogEntry,
};

#[derive(Default)]
struct Tables {
    sessions: HashMap<String, (MemberEmail, DateTime<Utc>)>,
    usage: Vec<UsageLogEntry>,
    documents: HashMap<SpdxId, SpdxInfo>,
    artifacts: Vec<Artifact>,
    links: Vec<Link>,
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    reads: AtomicUsize,
    deletes: AtomicUsize,
}

impl InMemoryStore {
    pub fn add_session(&self, token: &str, member: &str, expiry: DateTime<Utc>) {
        let email = MemberEmail::new(member).expect("valid member email");
        self.tables
            .lock()
            .expect("tables lock")
            .sessions
            .insert(token.to_owned(), (email, expiry));
    }

    pub fn add_usage(&self, entry: UsageLogEntry) {
        self.tables.lock().expect("tables lock").usage.push(entry);
    }

    pub fn add_document(&self, info: SpdxInfo, artifact: Option<Artifact>, links: Vec<Link>) {
        let mut tables = self.tables.lock().expect("tables lock");
        tables.documents.insert(info.spdx_id.clone(), info);
        tables.artifacts.extend(artifact);
        tables.links.extend(links);
    }

    pub fn has_document(&self, spdx_id: &SpdxId) -> bool {
        self.tables
            .lock()
            .expect("tables lock")
            .documents
            .contains_key(spdx_id)
    }

    pub fn artifact_count(&self) -> usize {
        self.tables.lock().expect("tables lock").artifacts.len()
    }

    pub fn link_count(&self) -> usize {
        self.tables.lock().expect("tables lock").links.len()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionVerifier for InMemoryStore {
    async fn verify(
        &self,
        token: &SessionToken,
    ) -> Result<SessionVerification, SessionVerifierError> {
        let tables = self.tables.lock().expect("tables lock");
        let Some((email, expiry)) = tables.sessions.get(token.expose()) else {
            return Ok(SessionVerification::Rejected(AuthResult::Revoked));
        };
        if *expiry <= Utc::now() {
            return Ok(SessionVerification::Rejected(AuthResult::Expired));
        }
        Ok(SessionVerification::Authenticated(Session::new(
            email.clone(),
            token.clone(),
        )))
    }
}

#[async_trait]
impl UsageLogRepository for InMemoryStore {
    async fn list_for_member(
        &self,
        member_email: &MemberEmail,
        source: LogSource,
        page: PageRequest,
    ) -> Result<Vec<UsageLogEntry>, UsageLogRepositoryError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables.lock().expect("tables lock");
        let mut rows: Vec<UsageLogEntry> = tables
            .usage
            .iter()
            .filter(|entry| &entry.member_email == member_email && entry.source == source)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows
            .into_iter()
            .skip(page.skip() as usize)
            .take(page.take() as usize)
            .collect())
    }
}

#[async_trait]
impl SpdxRepository for InMemoryStore {
    async fn delete_cascade(
        &self,
        spdx_id: &SpdxId,
    ) -> Result<Option<SpdxDeletion>, SpdxRepositoryError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let mut tables = self.tables.lock().expect("tables lock");
        if !tables.documents.contains_key(spdx_id) {
            return Ok(None);
        }
        self.deletes.fetch_add(1, Ordering::SeqCst);

        let artifact = tables
            .artifacts
            .iter()
            .find(|artifact| artifact.spdx_id.as_ref() == Some(spdx_id))
            .cloned();
        let links: Vec<Link> = match &artifact {
            Some(artifact) => tables
                .links
                .iter()
                .filter(|link| link.artifact_uuid == artifact.uuid)
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        if let Some(artifact) = &artifact {
            tables.links.retain(|link| link.artifact_uuid != artifact.uuid);
            tables.artifacts.retain(|row| row.uuid != artifact.uuid);
        }
        tables.documents.remove(spdx_id);

        Ok(Some(SpdxDeletion::from_graph(
            spdx_id.clone(),
            artifact.as_ref(),
            &links,
        )))
    }
}
