//! PostgreSQL-backed `UsageLogRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::ports::{UsageLogRepository, UsageLogRepositoryError};
use crate::domain::{LogSource, MemberEmail, UsageLogEntry};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::UsageLogRow;
use super::pool::{DbPool, PoolError};
use super::schema::integration_usage_log;

/// Diesel-backed implementation of the usage log repository port.
#[derive(Clone)]
pub struct DieselUsageLogRepository {
    pool: DbPool,
}

impl DieselUsageLogRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UsageLogRepositoryError {
    map_basic_pool_error(error, |message| {
        UsageLogRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> UsageLogRepositoryError {
    map_basic_diesel_error(
        error,
        UsageLogRepositoryError::query,
        UsageLogRepositoryError::connection,
    )
}

#[async_trait]
impl UsageLogRepository for DieselUsageLogRepository {
    async fn list_for_member(
        &self,
        member_email: &MemberEmail,
        source: LogSource,
        page: PageRequest,
    ) -> Result<Vec<UsageLogEntry>, UsageLogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UsageLogRow> = integration_usage_log::table
            .filter(integration_usage_log::member_email.eq(member_email.as_str()))
            .filter(integration_usage_log::source.eq(source.as_str()))
            .order((
                integration_usage_log::created_at.desc(),
                integration_usage_log::id.desc(),
            ))
            .limit(page.limit())
            .offset(page.offset())
            .select(UsageLogRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(UsageLogEntry::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(UsageLogRepositoryError::query)
    }
}
