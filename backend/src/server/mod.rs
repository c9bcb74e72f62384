//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use vulnetix_backend::Trace;
#[cfg(debug_assertions)]
use vulnetix_backend::doc::ApiDoc;
use vulnetix_backend::inbound::http::health::{HealthState, live, ready};
use vulnetix_backend::inbound::http::spdx::delete_spdx;
use vulnetix_backend::inbound::http::state::HttpState;
use vulnetix_backend::inbound::http::usage_logs::list_usage_logs;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.service(delete_spdx).service(list_usage_logs)
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// Readiness is left to the caller, which marks it once the server is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails or, with the
/// `metrics` feature, when no Prometheus middleware was attached.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let ServerConfig {
        bind_addr,
        db_pool: _,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;
    #[cfg(feature = "metrics")]
    let prometheus = prometheus.ok_or_else(|| {
        std::io::Error::other("metrics feature enabled without Prometheus middleware")
    })?;

    let server = HttpServer::new(move || {
        let app = build_app(health_state.clone(), http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for app wiring.

    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[actix_web::test]
    async fn health_probe_is_routed() {
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        let app = test::init_service(build_app(health, web::Data::new(HttpState::default()))).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn responses_carry_trace_header() {
        let app = test::init_service(build_app(
            web::Data::new(HealthState::new()),
            web::Data::new(HttpState::default()),
        ))
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/osv/log").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(
            res.headers()
                .contains_key(vulnetix_backend::domain::TRACE_ID_HEADER)
        );
    }
}
