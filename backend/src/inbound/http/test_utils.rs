//! Test helpers for inbound HTTP components.

use crate::domain::MemberEmail;
use crate::domain::ports::FixtureSessionVerifier;

/// Token accepted by [`accepting_verifier`].
pub const TEST_TOKEN: &str = "test-session-token";
/// Member resolved for [`TEST_TOKEN`].
pub const TEST_MEMBER: &str = "analyst@example.com";

/// Session verifier accepting [`TEST_TOKEN`] and revoking anything else.
pub fn accepting_verifier() -> FixtureSessionVerifier {
    FixtureSessionVerifier::new(
        TEST_TOKEN,
        MemberEmail::new(TEST_MEMBER).expect("fixture email is valid"),
    )
}
