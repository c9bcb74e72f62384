//! SPDX document HTTP handlers.
//!
//! ```text
//! DELETE /spdx/{spdxId}
//! ```

use actix_web::{delete, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::DeleteSpdxRequest;
use crate::domain::{Error, SpdxDeletion, SpdxId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::schemas::{ErrorEnvelopeSchema, RejectedEnvelopeSchema};
use crate::inbound::http::state::HttpState;

/// Confirmation of a cascade delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSpdxResponseBody {
    #[schema(example = true)]
    pub ok: bool,
    #[schema(example = "SPDXRef-DOCUMENT")]
    pub spdx_id: String,
    /// Absent when the document had no artifact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(format = "uuid")]
    pub artifact_uuid: Option<String>,
    #[schema(value_type = Vec<uuid::Uuid>)]
    pub link_ids: Vec<String>,
}

impl From<SpdxDeletion> for DeleteSpdxResponseBody {
    fn from(value: SpdxDeletion) -> Self {
        Self {
            ok: true,
            spdx_id: value.spdx_id.into(),
            artifact_uuid: value.artifact_uuid.map(|uuid| uuid.to_string()),
            link_ids: value.link_ids.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Delete an SPDX document together with its artifact and download links.
#[utoipa::path(
    delete,
    path = "/spdx/{spdxId}",
    params(("spdxId" = String, Path, description = "SPDX document identifier")),
    responses(
        (status = 200, description = "Document graph deleted", body = DeleteSpdxResponseBody),
        (status = 401, description = "Session rejected", body = RejectedEnvelopeSchema),
        (status = 404, description = "No such document", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal server error", body = ErrorEnvelopeSchema),
        (status = 503, description = "Store unavailable", body = ErrorEnvelopeSchema)
    ),
    tags = ["spdx"],
    operation_id = "deleteSpdx",
    security(("SessionToken" = []))
)]
#[delete("/spdx/{spdx_id}")]
pub async fn delete_spdx(
    state: web::Data<HttpState>,
    auth: Authenticated,
    spdx_id: web::Path<String>,
) -> ApiResult<web::Json<DeleteSpdxResponseBody>> {
    let session = auth.into_inner();
    let spdx_id = SpdxId::new(spdx_id.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    let request = DeleteSpdxRequest {
        member_email: session.member_email().clone(),
        spdx_id,
    };

    let deletion = state.spdx.delete_spdx(request).await?;
    Ok(web::Json(deletion.into()))
}

#[cfg(test)]
#[path = "spdx_tests.rs"]
mod tests;
