//! PostgreSQL-backed `SessionVerifier` reading the `sessions` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SessionVerifier, SessionVerifierError};
use crate::domain::{AuthResult, MemberEmail, Session, SessionToken, SessionVerification};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::SessionRow;
use super::pool::{DbPool, PoolError};
use super::schema::sessions;

/// Diesel-backed session verifier.
#[derive(Clone)]
pub struct DieselSessionVerifier {
    pool: DbPool,
}

impl DieselSessionVerifier {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SessionVerifierError {
    map_basic_pool_error(error, |message| SessionVerifierError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> SessionVerifierError {
    map_basic_diesel_error(
        error,
        SessionVerifierError::query,
        SessionVerifierError::connection,
    )
}

/// Decide the outcome for a looked-up session row at `now`.
///
/// Unknown tokens are `REVOKED`; sessions whose expiry is at or before `now`
/// are `EXPIRED`.
fn classify(
    row: Option<SessionRow>,
    token: &SessionToken,
    now: DateTime<Utc>,
) -> Result<SessionVerification, SessionVerifierError> {
    let Some(row) = row else {
        return Ok(SessionVerification::Rejected(AuthResult::Revoked));
    };
    if row.expiry <= now {
        return Ok(SessionVerification::Rejected(AuthResult::Expired));
    }
    let member_email = MemberEmail::new(row.member_email)
        .map_err(|err| SessionVerifierError::query(format!("session {}: {err}", row.kid)))?;
    Ok(SessionVerification::Authenticated(Session::new(
        member_email,
        token.clone(),
    )))
}

#[async_trait]
impl SessionVerifier for DieselSessionVerifier {
    async fn verify(
        &self,
        token: &SessionToken,
    ) -> Result<SessionVerification, SessionVerifierError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<SessionRow> = sessions::table
            .filter(sessions::kid.eq(token.expose()))
            .select(SessionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        classify(row, token, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::Duration;
    use rstest::rstest;

    use super::*;

    fn row(expiry: DateTime<Utc>) -> SessionRow {
        SessionRow {
            kid: "kid-1".to_owned(),
            member_email: "ada@example.com".to_owned(),
            expiry,
        }
    }

    fn token() -> SessionToken {
        SessionToken::new("kid-1").expect("valid token")
    }

    #[rstest]
    fn unknown_token_is_revoked() {
        let outcome = classify(None, &token(), Utc::now()).expect("classified");
        assert_eq!(outcome.result(), AuthResult::Revoked);
    }

    #[rstest]
    #[case(Duration::zero())]
    #[case(Duration::minutes(5))]
    fn lapsed_session_is_expired(#[case] age: Duration) {
        let now = Utc::now();
        let outcome = classify(Some(row(now - age)), &token(), now).expect("classified");
        assert_eq!(outcome.result(), AuthResult::Expired);
    }

    #[rstest]
    fn live_session_resolves_member() {
        let now = Utc::now();
        let outcome =
            classify(Some(row(now + Duration::hours(1))), &token(), now).expect("classified");

        let SessionVerification::Authenticated(session) = outcome else {
            panic!("expected authenticated session");
        };
        assert_eq!(session.member_email().as_str(), "ada@example.com");
    }

    #[rstest]
    fn blank_stored_email_is_a_query_error() {
        let mut stored = row(Utc::now() + Duration::hours(1));
        stored.member_email = "  ".to_owned();

        let err = classify(Some(stored), &token(), Utc::now()).expect_err("invalid row");

        assert!(matches!(err, SessionVerifierError::Query { .. }));
    }
}
