//! Driving port for SPDX document mutations.

use async_trait::async_trait;

use crate::domain::{Error, MemberEmail, SpdxDeletion, SpdxId};

/// Request to delete an SPDX document and everything hanging off it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteSpdxRequest {
    /// Member issuing the delete; named in the service's outcome log.
    pub member_email: MemberEmail,
    pub spdx_id: SpdxId,
}

/// Driving port for SPDX document mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpdxCommand: Send + Sync {
    /// Cascade-delete the document's links, artifact, and the document.
    ///
    /// Fails with `not_found` when the document does not exist.
    async fn delete_spdx(&self, request: DeleteSpdxRequest) -> Result<SpdxDeletion, Error>;
}

/// Fixture command for tests that never delete anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSpdxCommand;

#[async_trait]
impl SpdxCommand for FixtureSpdxCommand {
    async fn delete_spdx(&self, _request: DeleteSpdxRequest) -> Result<SpdxDeletion, Error> {
        Err(Error::not_found(crate::domain::NOT_FOUND_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use crate::domain::ErrorCode;

    #[tokio::test]
    async fn fixture_command_reports_not_found() {
        let request = DeleteSpdxRequest {
            member_email: MemberEmail::new("ada@example.com").expect("valid email"),
            spdx_id: SpdxId::new("SPDXRef-DOCUMENT").expect("valid id"),
        };

        let error = FixtureSpdxCommand
            .delete_spdx(request)
            .await
            .expect_err("fixture never finds documents");

        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "not found");
    }
}
