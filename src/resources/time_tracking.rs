//! Issue time tracking summaries.

use serde_json::Value;

use crate::api::field;

/// Estimates and logged time for an issue.
///
/// Found in the `timetracking` field of an issue. It has no identity of its
/// own, so it is a plain value rather than a [`Resource`](crate::Resource).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeTracking {
    original_estimate: String,
    remaining_estimate: String,
    time_spent: String,
    original_estimate_seconds: i64,
    remaining_estimate_seconds: i64,
    time_spent_seconds: i64,
}

impl TimeTracking {
    /// Read time tracking data. Missing fields are empty or zero.
    pub fn from_json(json: &Value) -> Self {
        Self {
            original_estimate: field::get_string(json.get("originalEstimate")),
            remaining_estimate: field::get_string(json.get("remainingEstimate")),
            time_spent: field::get_string(json.get("timeSpent")),
            original_estimate_seconds: field::get_integer(json.get("originalEstimateSeconds")),
            remaining_estimate_seconds: field::get_integer(json.get("remainingEstimateSeconds")),
            time_spent_seconds: field::get_integer(json.get("timeSpentSeconds")),
        }
    }

    pub fn original_estimate(&self) -> &str {
        &self.original_estimate
    }

    pub fn remaining_estimate(&self) -> &str {
        &self.remaining_estimate
    }

    pub fn time_spent(&self) -> &str {
        &self.time_spent
    }

    pub fn original_estimate_seconds(&self) -> i64 {
        self.original_estimate_seconds
    }

    pub fn remaining_estimate_seconds(&self) -> i64 {
        self.remaining_estimate_seconds
    }

    pub fn time_spent_seconds(&self) -> i64 {
        self.time_spent_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attribute_mappings() {
        let time = TimeTracking::from_json(&json!({
            "originalEstimate": "1w",
            "remainingEstimate": "2d",
            "timeSpent": "3d",
            "originalEstimateSeconds": 144000,
            "remainingEstimateSeconds": 57600,
            "timeSpentSeconds": 86400
        }));

        assert_eq!(time.original_estimate(), "1w");
        assert_eq!(time.original_estimate_seconds(), 144000);
        assert_eq!(time.remaining_estimate(), "2d");
        assert_eq!(time.remaining_estimate_seconds(), 57600);
        assert_eq!(time.time_spent(), "3d");
        assert_eq!(time.time_spent_seconds(), 86400);
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(TimeTracking::from_json(&Value::Null), TimeTracking::default());
    }
}
