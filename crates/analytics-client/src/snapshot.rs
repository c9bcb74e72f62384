//! Analytics document shapes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `data` object of a successful `/analytics` response.
///
/// Sub-fields are opaque JSON; a missing (or `null`) sub-field decodes to
/// `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsData {
    /// All-time totals.
    #[serde(default)]
    pub total: Option<Value>,
    /// Totals for the current week.
    #[serde(default)]
    pub current_week: Option<Value>,
    /// Totals since the start of the month.
    #[serde(default)]
    pub month_to_date: Option<Value>,
    /// Totals since the start of the year.
    #[serde(default)]
    pub year_to_date: Option<Value>,
    /// Per-month series.
    #[serde(default)]
    pub monthly: Option<Value>,
}

/// Local mirror of the analytics document.
///
/// Starts with empty objects for the four aggregates and an empty `monthly`
/// series, and is replaced wholesale by each successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSnapshot {
    /// All-time totals.
    pub total: Option<Value>,
    /// Totals for the current week.
    pub current_week: Option<Value>,
    /// Totals since the start of the month.
    pub month_to_date: Option<Value>,
    /// Totals since the start of the year.
    pub year_to_date: Option<Value>,
    /// Per-month series.
    pub monthly: Option<Value>,
}

impl AnalyticsData {
    /// Pick the five aggregates out of an arbitrary `data` value.
    ///
    /// Missing or `null` sub-fields, or a `data` value that is not an object,
    /// leave the corresponding fields `None`.
    #[must_use]
    pub fn from_value(data: &Value) -> Self {
        let field = |name: &str| data.get(name).filter(|value| !value.is_null()).cloned();
        Self {
            total: field("total"),
            current_week: field("current_week"),
            month_to_date: field("month_to_date"),
            year_to_date: field("year_to_date"),
            monthly: field("monthly"),
        }
    }
}

impl Default for AnalyticsSnapshot {
    fn default() -> Self {
        let empty = || Some(Value::Object(Map::new()));
        Self {
            total: empty(),
            current_week: empty(),
            month_to_date: empty(),
            year_to_date: empty(),
            monthly: Some(Value::Array(Vec::new())),
        }
    }
}

impl From<AnalyticsData> for AnalyticsSnapshot {
    fn from(data: AnalyticsData) -> Self {
        let AnalyticsData {
            total,
            current_week,
            month_to_date,
            year_to_date,
            monthly,
        } = data;
        Self {
            total,
            current_week,
            month_to_date,
            year_to_date,
            monthly,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn initial_snapshot_is_empty_aggregates() {
        let snapshot = AnalyticsSnapshot::default();

        assert_eq!(snapshot.total, Some(json!({})));
        assert_eq!(snapshot.year_to_date, Some(json!({})));
        assert_eq!(snapshot.monthly, Some(json!([])));
    }

    #[rstest]
    fn non_object_data_clears_every_field() {
        let data = AnalyticsData::from_value(&json!("unexpected"));
        assert_eq!(data, AnalyticsData::default());
    }

    #[rstest]
    fn missing_sub_fields_become_none() {
        let data: AnalyticsData =
            serde_json::from_value(json!({ "total": 5 })).expect("decodes");

        let snapshot = AnalyticsSnapshot::from(data);

        assert_eq!(snapshot.total, Some(json!(5)));
        assert_eq!(snapshot.current_week, None);
        assert_eq!(snapshot.monthly, None);
    }
}
