//! Offset pagination primitives shared by backend list endpoints.
//!
//! List endpoints accept `take` and `skip` query parameters. Parsing is
//! deliberately lenient: absent, blank, or non-numeric values fall back to
//! the defaults instead of rejecting the request. Numbers too large for `u32`
//! saturate, and `take` is clamped to [`MAX_TAKE`]. When a parameter repeats,
//! the first occurrence wins.
//!
//! # Examples
//! ```
//! use pagination::{PageParams, PageRequest};
//!
//! let params = PageParams {
//!     take: Some("10".to_owned()),
//!     skip: Some("abc".to_owned()),
//! };
//! let page = PageRequest::from(&params);
//! assert_eq!(page.take(), 10);
//! assert_eq!(page.skip(), 0);
//! ```

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Number of rows returned when `take` is absent or unusable.
pub const DEFAULT_TAKE: u32 = 50;

/// Upper bound applied to caller-provided `take` values.
pub const MAX_TAKE: u32 = 500;

/// Raw `take`/`skip` query parameters as received from the transport.
///
/// Values stay as strings so malformed numbers can fall back to defaults
/// rather than failing query-string deserialisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    /// Requested page size.
    pub take: Option<String>,
    /// Number of rows to skip before the page starts.
    pub skip: Option<String>,
}

impl PageParams {
    /// Extract `take` and `skip` from a raw query string.
    ///
    /// Unrelated keys are ignored and the first occurrence of each key wins,
    /// so `take=1&take=2` reads as `take=1`.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageParams;
    ///
    /// let params = PageParams::from_query_string("take=1&take=2&skip=3");
    /// assert_eq!(params.take.as_deref(), Some("1"));
    /// assert_eq!(params.skip.as_deref(), Some("3"));
    /// ```
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "take" => &mut params.take,
                "skip" => &mut params.skip,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }
}

/// Validated offset page request.
///
/// ## Invariants
/// - `take` is within `1..=MAX_TAKE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    take: u32,
    skip: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            take: DEFAULT_TAKE,
            skip: 0,
        }
    }
}

impl PageRequest {
    /// Build a page request from already-numeric values.
    ///
    /// A zero `take` falls back to [`DEFAULT_TAKE`]; larger values are clamped
    /// to [`MAX_TAKE`].
    #[must_use]
    pub const fn new(take: u32, skip: u32) -> Self {
        let take = if take == 0 {
            DEFAULT_TAKE
        } else if take > MAX_TAKE {
            MAX_TAKE
        } else {
            take
        };
        Self { take, skip }
    }

    /// Build a page request from raw optional strings.
    #[must_use]
    pub fn from_raw(take: Option<&str>, skip: Option<&str>) -> Self {
        let take = take.and_then(parse_leading_digits).unwrap_or(DEFAULT_TAKE);
        let skip = skip.and_then(parse_leading_digits).unwrap_or(0);
        Self::new(take, skip)
    }

    /// Page size.
    #[must_use]
    pub const fn take(&self) -> u32 {
        self.take
    }

    /// Offset of the first row.
    #[must_use]
    pub const fn skip(&self) -> u32 {
        self.skip
    }

    /// Page size as a SQL `LIMIT` value.
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.take)
    }

    /// Offset as a SQL `OFFSET` value.
    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.skip)
    }
}

impl From<&PageParams> for PageRequest {
    fn from(value: &PageParams) -> Self {
        Self::from_raw(value.take.as_deref(), value.skip.as_deref())
    }
}

/// Parse the leading decimal digits of `raw`, ignoring surrounding
/// whitespace. `"25rows"` yields 25; `"-3"` and `"x"` yield `None`; digit runs
/// beyond `u32::MAX` saturate.
fn parse_leading_digits(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let end = trimmed
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map_or(trimmed.len(), |(index, _)| index);
    let digits = trimmed.get(..end).filter(|digits| !digits.is_empty())?;
    Some(digits.parse::<u32>().unwrap_or(u32::MAX))
}
