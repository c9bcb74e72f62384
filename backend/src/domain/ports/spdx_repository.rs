//! Port for SPDX document persistence.

use async_trait::async_trait;

use crate::domain::{SpdxDeletion, SpdxId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by SPDX repository adapters.
    pub enum SpdxRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "spdx repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "spdx repository query failed: {message}",
    }
}

/// Port for removing SPDX documents with their artifact graph.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpdxRepository: Send + Sync {
    /// Delete the document, its artifact, and the artifact's links.
    ///
    /// Adapters resolve the graph and delete links, then the artifact, then
    /// the document as one atomic unit. Returns `Ok(None)` when no document
    /// with `spdx_id` exists; nothing is deleted in that case.
    async fn delete_cascade(
        &self,
        spdx_id: &SpdxId,
    ) -> Result<Option<SpdxDeletion>, SpdxRepositoryError>;
}

/// Fixture repository that never finds a document.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSpdxRepository;

#[async_trait]
impl SpdxRepository for FixtureSpdxRepository {
    async fn delete_cascade(
        &self,
        _spdx_id: &SpdxId,
    ) -> Result<Option<SpdxDeletion>, SpdxRepositoryError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_delete_finds_nothing() {
        let id = SpdxId::new("SPDXRef-DOCUMENT").expect("valid id");
        let deleted = FixtureSpdxRepository
            .delete_cascade(&id)
            .await
            .expect("fixture delete succeeds");
        assert!(deleted.is_none());
    }

    #[rstest]
    fn connection_error_formats_message() {
        let err = SpdxRepositoryError::connection("refused");
        assert_eq!(err.to_string(), "spdx repository connection failed: refused");
    }
}
