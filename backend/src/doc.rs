//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the HTTP handlers from the inbound layer, the
//! envelope schemas that stand in for domain types, and the `X-Vulnetix`
//! session token scheme. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` exports it for tooling.

use crate::inbound::http::schemas::{
    AuthResultSchema, ErrorCodeSchema, ErrorEnvelopeSchema, ErrorSchema, RejectedEnvelopeSchema,
};
use crate::inbound::http::spdx::DeleteSpdxResponseBody;
use crate::inbound::http::usage_logs::{UsageLogEntryBody, UsageLogsResponseBody};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the security scheme referenced by authenticated handlers.
pub const SESSION_TOKEN_SCHEME: &str = "SessionToken";

/// Enrich the generated document with the session token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            SESSION_TOKEN_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                crate::domain::SESSION_TOKEN_HEADER,
                "Session token issued at member login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Vulnetix backend API",
        description = "Usage log queries and SPDX document deletion for authenticated members.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionToken" = [])),
    paths(
        crate::inbound::http::usage_logs::list_usage_logs,
        crate::inbound::http::spdx::delete_spdx,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        ErrorEnvelopeSchema,
        AuthResultSchema,
        RejectedEnvelopeSchema,
        UsageLogEntryBody,
        UsageLogsResponseBody,
        DeleteSpdxResponseBody,
    )),
    tags(
        (name = "usage-logs", description = "Upstream feed usage per member"),
        (name = "spdx", description = "SPDX document lifecycle"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
