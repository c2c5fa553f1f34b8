//! Generic tagged records and the typed views layered over them.
//!
//! The server describes entities with nested, vendor-defined structures. The
//! crate keeps them as opaque field-name → JSON-value records and exposes a
//! thin read-only accessor per entity kind actually used, instead of
//! mirroring the full vendor object model.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq)]
/// One result record: a mapping of field names to values.
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Wrap a JSON object as a record.
    pub fn from_json(value: Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Ok(Self {
                fields: map.into_iter().collect(),
            }),
            _ => Err(ValidationError::NotAnObject),
        }
    }

    /// Build a record from field/value pairs.
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    /// Look up a top-level field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Top-level field names and values.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Convert back into a JSON object for wire encoding.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        )
    }

    /// String value of a top-level field.
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Integer value of a top-level field.
    ///
    /// The server serializes 64-bit ids either as numbers or as decimal
    /// strings; both are accepted.
    pub fn i64_field(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(value_as_i64)
    }
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}

fn nested_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

fn nested_i64(value: &Value, key: &str) -> Option<i64> {
    value.get(key).and_then(value_as_i64)
}

#[derive(Debug, Clone, Copy)]
/// Read-only view of an ad-group ad record with its policy summary.
pub struct AdGroupAd<'a> {
    record: &'a Record,
}

impl<'a> AdGroupAd<'a> {
    /// View `record` as an ad-group ad.
    pub fn new(record: &'a Record) -> Self {
        Self { record }
    }

    /// Id of the underlying ad.
    pub fn ad_id(&self) -> Option<i64> {
        self.record.get("ad").and_then(|ad| nested_i64(ad, "id"))
    }

    /// Type of the underlying ad, e.g. `EXPANDED_TEXT_AD`.
    pub fn ad_type(&self) -> Option<&'a str> {
        self.record.get("ad").and_then(|ad| nested_str(ad, "type"))
    }

    /// Policy summary, when the `PolicySummary` field was selected.
    pub fn policy_summary(&self) -> Option<PolicySummary<'a>> {
        self.record.get("policySummary").map(PolicySummary::new)
    }
}

#[derive(Debug, Clone, Copy)]
/// Policy findings attached to an ad.
pub struct PolicySummary<'a> {
    value: &'a Value,
}

impl<'a> PolicySummary<'a> {
    fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// Combined approval status, e.g. `DISAPPROVED`.
    pub fn approval_status(&self) -> Option<&'a str> {
        nested_str(self.value, "combinedApprovalStatus")
    }

    /// Policy topic entries in server order.
    pub fn policy_topic_entries(&self) -> Vec<PolicyTopicEntry<'a>> {
        self.value
            .get("policyTopicEntries")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().map(PolicyTopicEntry::new).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy)]
/// One policy topic an ad was flagged for.
pub struct PolicyTopicEntry<'a> {
    value: &'a Value,
}

impl<'a> PolicyTopicEntry<'a> {
    fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// Topic identifier.
    pub fn topic_id(&self) -> Option<&'a str> {
        nested_str(self.value, "policyTopicId")
    }

    /// Human-readable topic name.
    pub fn topic_name(&self) -> Option<&'a str> {
        nested_str(self.value, "policyTopicName")
    }

    /// Evidences that triggered this topic, in server order.
    pub fn evidences(&self) -> Vec<PolicyTopicEvidence<'a>> {
        self.value
            .get("policyTopicEvidences")
            .and_then(Value::as_array)
            .map(|evidences| evidences.iter().map(PolicyTopicEvidence::new).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy)]
/// One piece of evidence behind a policy topic entry.
pub struct PolicyTopicEvidence<'a> {
    value: &'a Value,
}

impl<'a> PolicyTopicEvidence<'a> {
    fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// Kind of evidence, e.g. `AD_TEXT`.
    pub fn evidence_type(&self) -> Option<&'a str> {
        nested_str(self.value, "policyTopicEvidenceType")
    }

    /// Offending text fragments, in server order.
    pub fn texts(&self) -> Vec<&'a str> {
        self.value
            .get("evidenceTextList")
            .and_then(Value::as_array)
            .map(|texts| texts.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy)]
/// Read-only view of a remarketing user list record.
pub struct UserList<'a> {
    record: &'a Record,
}

impl<'a> UserList<'a> {
    /// View `record` as a user list.
    pub fn new(record: &'a Record) -> Self {
        Self { record }
    }

    /// List id.
    pub fn id(&self) -> Option<i64> {
        self.record.i64_field("id")
    }

    /// List name.
    pub fn name(&self) -> Option<&'a str> {
        self.record.str_field("name")
    }

    /// List description.
    pub fn description(&self) -> Option<&'a str> {
        self.record.str_field("description")
    }

    /// Ids of the conversion types feeding this list, in server order.
    pub fn conversion_type_ids(&self) -> Vec<i64> {
        self.record
            .get("conversionTypes")
            .and_then(Value::as_array)
            .map(|types| {
                types
                    .iter()
                    .filter_map(|entry| nested_i64(entry, "id"))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy)]
/// Read-only view of a conversion tracker record.
pub struct ConversionTracker<'a> {
    record: &'a Record,
}

impl<'a> ConversionTracker<'a> {
    /// View `record` as a conversion tracker.
    pub fn new(record: &'a Record) -> Self {
        Self { record }
    }

    /// Tracker id.
    pub fn id(&self) -> Option<i64> {
        self.record.i64_field("id")
    }

    /// Site-wide tag snippet.
    pub fn global_site_tag(&self) -> Option<&'a str> {
        self.record.str_field("googleGlobalSiteTag")
    }

    /// Per-event snippet.
    pub fn event_snippet(&self) -> Option<&'a str> {
        self.record.str_field("googleEventSnippet")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn record_rejects_non_objects() {
        assert!(Record::from_json(json!([1, 2])).is_err());
        assert!(Record::from_json(json!("text")).is_err());
        assert!(Record::from_json(json!({"id": 1})).is_ok());
    }

    #[test]
    fn record_field_accessors_handle_numbers_and_strings() {
        let record = Record::from_json(json!({
            "id": 42,
            "stringId": "99",
            "name": "List"
        }))
        .unwrap();

        assert_eq!(record.i64_field("id"), Some(42));
        assert_eq!(record.i64_field("stringId"), Some(99));
        assert_eq!(record.i64_field("name"), None);
        assert_eq!(record.str_field("name"), Some("List"));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn ad_group_ad_view_walks_nested_policy_structures() {
        let record = Record::from_json(json!({
            "ad": { "id": 123456, "type": "EXPANDED_TEXT_AD" },
            "policySummary": {
                "combinedApprovalStatus": "DISAPPROVED",
                "policyTopicEntries": [
                    {
                        "policyTopicId": "abc",
                        "policyTopicName": "Destination not working",
                        "policyTopicEvidences": [
                            {
                                "policyTopicEvidenceType": "DESTINATION_NOT_WORKING",
                                "evidenceTextList": ["http://example.invalid", "404"]
                            }
                        ]
                    }
                ]
            }
        }))
        .unwrap();

        let ad = AdGroupAd::new(&record);
        assert_eq!(ad.ad_id(), Some(123456));
        assert_eq!(ad.ad_type(), Some("EXPANDED_TEXT_AD"));

        let summary = ad.policy_summary().unwrap();
        assert_eq!(summary.approval_status(), Some("DISAPPROVED"));

        let entries = summary.policy_topic_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].topic_id(), Some("abc"));
        assert_eq!(entries[0].topic_name(), Some("Destination not working"));

        let evidences = entries[0].evidences();
        assert_eq!(evidences.len(), 1);
        assert_eq!(
            evidences[0].evidence_type(),
            Some("DESTINATION_NOT_WORKING")
        );
        assert_eq!(evidences[0].texts(), vec!["http://example.invalid", "404"]);
    }

    #[test]
    fn ad_group_ad_view_tolerates_missing_policy_summary() {
        let record = Record::from_json(json!({ "ad": { "id": 1 } })).unwrap();
        let ad = AdGroupAd::new(&record);
        assert!(ad.policy_summary().is_none());
        assert_eq!(ad.ad_type(), None);
    }

    #[test]
    fn user_list_view_collects_conversion_type_ids() {
        let record = Record::from_json(json!({
            "id": 555,
            "name": "Mars cruise customers",
            "description": "Customers in the last year",
            "conversionTypes": [
                { "id": 1, "name": "tag one" },
                { "id": "2" }
            ]
        }))
        .unwrap();

        let list = UserList::new(&record);
        assert_eq!(list.id(), Some(555));
        assert_eq!(list.name(), Some("Mars cruise customers"));
        assert_eq!(list.conversion_type_ids(), vec![1, 2]);
    }

    #[test]
    fn conversion_tracker_view_reads_snippets() {
        let record = Record::from_json(json!({
            "id": 7,
            "googleGlobalSiteTag": "<script>gtag</script>",
            "googleEventSnippet": "<script>event</script>"
        }))
        .unwrap();

        let tracker = ConversionTracker::new(&record);
        assert_eq!(tracker.id(), Some(7));
        assert_eq!(tracker.global_site_tag(), Some("<script>gtag</script>"));
        assert_eq!(tracker.event_snippet(), Some("<script>event</script>"));
    }
}
