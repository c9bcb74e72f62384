//! PostgreSQL-backed `SpdxRepository` implementation using Diesel ORM.
//!
//! The cascade runs inside one transaction bounded by a local
//! `statement_timeout`: links are removed first, then the artifact, then the
//! document row, so foreign keys hold at every step and a failure part-way
//! leaves the graph untouched.

use std::time::Duration;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{SpdxRepository, SpdxRepositoryError};
use crate::domain::{Artifact, Link, SpdxDeletion, SpdxId, SpdxInfo};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ArtifactRow, LinkRow, SpdxInfoRow};
use super::pool::{DbPool, PoolError};
use super::schema::{artifacts, links, spdx_info};

/// Diesel-backed implementation of the SPDX repository port.
#[derive(Clone)]
pub struct DieselSpdxRepository {
    pool: DbPool,
}

impl DieselSpdxRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SpdxRepositoryError {
    map_basic_pool_error(error, |message| SpdxRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> SpdxRepositoryError {
    map_basic_diesel_error(
        error,
        SpdxRepositoryError::query,
        SpdxRepositoryError::connection,
    )
}

/// `SET LOCAL` does not accept bind parameters, so the value is rendered
/// from the configured duration.
fn statement_timeout_sql(timeout: Duration) -> String {
    format!("SET LOCAL statement_timeout = '{}ms'", timeout.as_millis())
}

/// Rows removed by one cascade, captured before deletion.
struct Graph {
    document: SpdxInfoRow,
    artifact: Option<ArtifactRow>,
    links: Vec<LinkRow>,
}

/// Resolve and delete the document graph. Runs inside the caller's
/// transaction.
async fn delete_graph(
    conn: &mut AsyncPgConnection,
    spdx_id: &str,
) -> Result<Option<Graph>, diesel::result::Error> {
    let document: Option<SpdxInfoRow> = spdx_info::table
        .filter(spdx_info::spdx_id.eq(spdx_id))
        .select(SpdxInfoRow::as_select())
        .first(conn)
        .await
        .optional()?;
    let Some(document) = document else {
        return Ok(None);
    };

    let artifact: Option<ArtifactRow> = artifacts::table
        .filter(artifacts::spdx_id.eq(spdx_id))
        .select(ArtifactRow::as_select())
        .first(conn)
        .await
        .optional()?;

    let mut link_rows = Vec::new();
    if let Some(artifact) = &artifact {
        link_rows = links::table
            .filter(links::artifact_uuid.eq(artifact.uuid))
            .order(links::id.asc())
            .select(LinkRow::as_select())
            .load(conn)
            .await?;

        diesel::delete(links::table.filter(links::artifact_uuid.eq(artifact.uuid)))
            .execute(conn)
            .await?;
        diesel::delete(artifacts::table.filter(artifacts::uuid.eq(artifact.uuid)))
            .execute(conn)
            .await?;
    }

    diesel::delete(spdx_info::table.filter(spdx_info::spdx_id.eq(spdx_id)))
        .execute(conn)
        .await?;

    Ok(Some(Graph {
        document,
        artifact,
        links: link_rows,
    }))
}

fn graph_to_deletion(spdx_id: &SpdxId, graph: Graph) -> Result<SpdxDeletion, SpdxRepositoryError> {
    let Graph {
        document,
        artifact,
        links,
    } = graph;

    let document = SpdxInfo::try_from(document).map_err(SpdxRepositoryError::query)?;
    let artifact = artifact
        .map(Artifact::try_from)
        .transpose()
        .map_err(SpdxRepositoryError::query)?;
    let links: Vec<Link> = links.into_iter().map(Link::from).collect();

    debug!(
        spdx_id = %document.spdx_id,
        artifact = ?artifact.as_ref().map(|a| a.uuid),
        links = links.len(),
        "spdx graph deleted"
    );

    Ok(SpdxDeletion::from_graph(
        spdx_id.clone(),
        artifact.as_ref(),
        &links,
    ))
}

#[async_trait]
impl SpdxRepository for DieselSpdxRepository {
    async fn delete_cascade(
        &self,
        spdx_id: &SpdxId,
    ) -> Result<Option<SpdxDeletion>, SpdxRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let timeout_sql = statement_timeout_sql(self.pool.statement_timeout());
        let key = spdx_id.as_str().to_owned();

        let graph = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::sql_query(timeout_sql).execute(conn).await?;
                    delete_graph(conn, &key).await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        graph
            .map(|graph| graph_to_deletion(spdx_id, graph))
            .transpose()
    }
}
