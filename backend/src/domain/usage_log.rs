//! Integration usage log entries.
//!
//! Every call the platform makes to an upstream vulnerability feed is
//! recorded against the member that triggered it. Members read their own
//! entries back per feed.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::MemberEmail;

/// Message returned when the path names a feed outside the allow-list.
pub const INVALID_LOG_SOURCE_MESSAGE: &str = "Invalid log source";

/// Upstream vulnerability data feeds that produce usage log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSource {
    /// Open Source Vulnerabilities database.
    Osv,
    /// FIRST EPSS scoring.
    First,
    /// VulnCheck KEV and NVD++ feeds.
    Vulncheck,
    /// GitHub security advisories.
    Github,
}

impl LogSource {
    /// Every accepted source, in declaration order.
    pub const ALL: [Self; 4] = [Self::Osv, Self::First, Self::Vulncheck, Self::Github];

    /// Canonical lower-case name stored in the `source` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Osv => "osv",
            Self::First => "first",
            Self::Vulncheck => "vulncheck",
            Self::Github => "github",
        }
    }
}

impl fmt::Display for LogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a path segment names a feed outside the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log source: {0}")]
pub struct UnknownLogSource(pub String);

impl FromStr for LogSource {
    type Err = UnknownLogSource;

    /// Case-insensitive match against the allow-list.
    ///
    /// # Examples
    /// ```
    /// use vulnetix_backend::domain::LogSource;
    ///
    /// assert_eq!("GitHub".parse::<LogSource>(), Ok(LogSource::Github));
    /// assert!("nvd".parse::<LogSource>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|source| source.as_str() == lowered)
            .ok_or_else(|| UnknownLogSource(s.to_owned()))
    }
}

/// One recorded call to an upstream feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageLogEntry {
    pub id: Uuid,
    pub member_email: MemberEmail,
    pub source: LogSource,
    pub status_code: Option<i32>,
    pub request_path: Option<String>,
    pub created_at: DateTime<Utc>,
}
