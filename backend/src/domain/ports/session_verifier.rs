//! Port for resolving session tokens into authenticated members.

use async_trait::async_trait;

use crate::domain::{AuthResult, MemberEmail, Session, SessionToken, SessionVerification};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session verifier adapters.
    pub enum SessionVerifierError {
        /// Session store connection could not be established.
        Connection { message: String } =>
            "session store connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } =>
            "session lookup failed: {message}",
    }
}

/// Port checking a presented token against the session store.
///
/// Adapters distinguish tokens they have never issued (`REVOKED`) from
/// tokens whose session has lapsed (`EXPIRED`). Missing credentials never
/// reach the verifier; the inbound adapter tags those `FORBIDDEN` itself.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// Verify `token` and resolve the acting member.
    async fn verify(&self, token: &SessionToken)
    -> Result<SessionVerification, SessionVerifierError>;
}

/// Fixture verifier accepting exactly one token for one member.
#[derive(Debug, Clone)]
pub struct FixtureSessionVerifier {
    token: String,
    member_email: MemberEmail,
}

impl FixtureSessionVerifier {
    /// Token accepted by [`FixtureSessionVerifier::default`].
    pub const TOKEN: &'static str = "fixture-session-token";
    /// Member resolved by [`FixtureSessionVerifier::default`].
    pub const MEMBER_EMAIL: &'static str = "member@example.com";

    /// Accept `token` as a session for `member_email`.
    pub fn new(token: impl Into<String>, member_email: MemberEmail) -> Self {
        Self {
            token: token.into(),
            member_email,
        }
    }
}

impl Default for FixtureSessionVerifier {
    fn default() -> Self {
        Self {
            token: Self::TOKEN.to_owned(),
            member_email: MemberEmail(Self::MEMBER_EMAIL.to_owned()),
        }
    }
}

#[async_trait]
impl SessionVerifier for FixtureSessionVerifier {
    async fn verify(
        &self,
        token: &SessionToken,
    ) -> Result<SessionVerification, SessionVerifierError> {
        if token.expose() == self.token {
            Ok(SessionVerification::Authenticated(Session::new(
                self.member_email.clone(),
                token.clone(),
            )))
        } else {
            Ok(SessionVerification::Rejected(AuthResult::Revoked))
        }
    }
}
