//! JSON response envelopes.
//!
//! Every response body carries a boolean `ok`. Success bodies are defined
//! next to their handlers; failures carry either a domain `error` object or
//! an authentication `result` tag, never both.

use serde::Serialize;

use crate::domain::{AuthResult, Error};

/// Failure wrapper for domain errors: `{"ok": false, "error": {...}}`.
#[derive(Debug, Serialize)]
pub struct Failure<'a> {
    ok: bool,
    error: &'a Error,
}

impl<'a> Failure<'a> {
    pub fn new(error: &'a Error) -> Self {
        Self { ok: false, error }
    }
}

/// Failure wrapper for rejected sessions: `{"ok": false, "result": "REVOKED"}`.
#[derive(Debug, Serialize)]
pub struct Rejected {
    ok: bool,
    result: AuthResult,
}

impl Rejected {
    pub fn new(result: AuthResult) -> Self {
        Self { ok: false, result }
    }
}
