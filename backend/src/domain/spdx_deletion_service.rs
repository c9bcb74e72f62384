//! SPDX deletion domain service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{DeleteSpdxRequest, SpdxCommand, SpdxRepository, SpdxRepositoryError};
use crate::domain::{Error, NOT_FOUND_MESSAGE, SpdxDeletion};

fn map_repository_error(error: SpdxRepositoryError) -> Error {
    match error {
        SpdxRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("spdx repository unavailable: {message}"))
        }
        SpdxRepositoryError::Query { message } => {
            Error::internal(format!("spdx repository error: {message}"))
        }
    }
}

/// SPDX service implementing [`SpdxCommand`].
#[derive(Clone)]
pub struct SpdxDeletionService<R> {
    spdx_repo: Arc<R>,
}

impl<R> SpdxDeletionService<R> {
    /// Create a new deletion service with the SPDX repository.
    pub fn new(spdx_repo: Arc<R>) -> Self {
        Self { spdx_repo }
    }
}

#[async_trait]
impl<R> SpdxCommand for SpdxDeletionService<R>
where
    R: SpdxRepository,
{
    async fn delete_spdx(&self, request: DeleteSpdxRequest) -> Result<SpdxDeletion, Error> {
        let DeleteSpdxRequest {
            member_email,
            spdx_id,
        } = request;
        let outcome = self
            .spdx_repo
            .delete_cascade(&spdx_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE));

        match &outcome {
            Ok(deletion) => info!(
                spdx_id = %spdx_id,
                member = %member_email,
                artifact_uuid = ?deletion.artifact_uuid,
                links = deletion.link_ids.len(),
                "spdx cascade removed document"
            ),
            Err(_) => info!(
                spdx_id = %spdx_id,
                member = %member_email,
                "spdx cascade found nothing to remove"
            ),
        }
        outcome
    }
}

#[cfg(test)]
#[path = "spdx_deletion_service_tests.rs"]
mod tests;
