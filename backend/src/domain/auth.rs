//! Session authentication primitives.
//!
//! Requests authenticate with an opaque session token carried in the
//! `X-Vulnetix` header. The inbound adapter parses that header into a
//! [`SessionToken`] and hands it to a session verifier, which resolves the
//! acting member or a tagged [`AuthResult`] explaining the rejection.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Header carrying the session token on authenticated requests.
pub const SESSION_TOKEN_HEADER: &str = "X-Vulnetix";

/// Validation errors raised when parsing authentication inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthValidationError {
    /// Token was missing or blank once trimmed.
    #[error("session token must not be empty")]
    EmptyToken,
    /// Email was missing or blank once trimmed.
    #[error("member email must not be empty")]
    EmptyEmail,
}

/// Opaque session token presented by the caller.
///
/// ## Invariants
/// - The token is trimmed and non-empty.
/// - The raw value is zeroed on drop.
///
/// # Examples
/// ```
/// use vulnetix_backend::domain::SessionToken;
///
/// let token = SessionToken::new(" abc123 ").expect("non-empty token");
/// assert_eq!(token.expose(), "abc123");
/// assert!(SessionToken::new("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(Zeroizing<String>);

impl SessionToken {
    /// Parse a raw header value into a token.
    pub fn new(raw: &str) -> Result<Self, AuthValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AuthValidationError::EmptyToken);
        }
        Ok(Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Borrow the raw token for comparison against persisted sessions.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Email address identifying a member account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MemberEmail(pub(crate) String);

impl MemberEmail {
    /// Validate and wrap an email address.
    pub fn new(raw: impl Into<String>) -> Result<Self, AuthValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AuthValidationError::EmptyEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the address as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for MemberEmail {
    type Error = AuthValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MemberEmail> for String {
    fn from(value: MemberEmail) -> Self {
        value.0
    }
}

impl fmt::Display for MemberEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome tag of a session verification.
///
/// Rejections are rendered to clients as the upper-case tag in the
/// `result` field of the failure envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthResult {
    /// The session is valid.
    Authenticated,
    /// No usable credential was presented.
    Forbidden,
    /// The credential is unknown or has been withdrawn.
    Revoked,
    /// The credential matched a session past its expiry.
    Expired,
}

impl AuthResult {
    /// Upper-case wire tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Authenticated => "AUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::Revoked => "REVOKED",
            Self::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for AuthResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated principal for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    member_email: MemberEmail,
    token: SessionToken,
}

impl Session {
    /// Build a session for a verified token.
    pub fn new(member_email: MemberEmail, token: SessionToken) -> Self {
        Self {
            member_email,
            token,
        }
    }

    /// Email of the acting member.
    pub fn member_email(&self) -> &MemberEmail {
        &self.member_email
    }

    /// Token the session was verified from.
    pub fn token(&self) -> &SessionToken {
        &self.token
    }
}

/// Result of checking a token against the session store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionVerification {
    /// The token resolved to a live session.
    Authenticated(Session),
    /// The token was rejected; the tag is never [`AuthResult::Authenticated`].
    Rejected(AuthResult),
}

impl SessionVerification {
    /// Tag describing this verification.
    pub fn result(&self) -> AuthResult {
        match self {
            Self::Authenticated(_) => AuthResult::Authenticated,
            Self::Rejected(result) => *result,
        }
    }
}
