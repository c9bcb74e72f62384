//! Session authentication extractor.
//!
//! Handlers take an [`Authenticated`] argument to require a valid
//! `X-Vulnetix` session. Extraction runs before the handler body, so a
//! rejected request never reaches a use-case port.

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, http::StatusCode, web,
};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};

use crate::domain::ports::SessionVerifierError;
use crate::domain::{
    AuthResult, Error, SESSION_TOKEN_HEADER, Session, SessionToken, SessionVerification,
    TRACE_ID_HEADER, TraceId,
};
use crate::inbound::http::envelope::Rejected;
use crate::inbound::http::state::HttpState;

/// Session rejection rendered as `{"ok": false, "result": <tag>}` with 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("session rejected: {result}")]
pub struct AuthFailure {
    result: AuthResult,
}

impl AuthFailure {
    pub fn new(result: AuthResult) -> Self {
        Self { result }
    }

    pub fn result(&self) -> AuthResult {
        self.result
    }
}

impl ResponseError for AuthFailure {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = TraceId::current() {
            builder.insert_header((TRACE_ID_HEADER, id.to_string()));
        }
        builder.json(Rejected::new(self.result))
    }
}

fn map_verifier_error(error: SessionVerifierError) -> Error {
    match error {
        SessionVerifierError::Connection { message } => {
            Error::service_unavailable(format!("session store unavailable: {message}"))
        }
        SessionVerifierError::Query { message } => {
            Error::internal(format!("session store error: {message}"))
        }
    }
}

fn presented_token(req: &HttpRequest) -> Option<SessionToken> {
    req.headers()
        .get(SESSION_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| SessionToken::new(raw).ok())
}

/// Verified session for the current request.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Session);

impl Authenticated {
    pub fn session(&self) -> &Session {
        &self.0
    }

    pub fn into_inner(self) -> Session {
        self.0
    }
}

impl FromRequest for Authenticated {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = presented_token(req);
        Box::pin(async move {
            let Some(state) = state else {
                return Err(Error::internal("http state not configured").into());
            };
            let Some(token) = token else {
                debug!("request carried no usable session token");
                return Err(AuthFailure::new(AuthResult::Forbidden).into());
            };

            match state
                .sessions
                .verify(&token)
                .await
                .map_err(map_verifier_error)?
            {
                SessionVerification::Authenticated(session) => Ok(Self(session)),
                SessionVerification::Rejected(result) => {
                    warn!(result = %result, "session rejected");
                    Err(AuthFailure::new(result).into())
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
