use std::fmt;

use crate::domain::record::Record;

#[derive(Debug, Clone, PartialEq)]
/// One page of query results.
///
/// `entries` preserves server order. `total_entries` is the server's count
/// of the whole result set when it reports one; paging decisions fall back
/// to the short-page heuristic when it is absent.
pub struct Page {
    pub entries: Vec<Record>,
    pub total_entries: Option<u64>,
}

impl Page {
    /// Number of records in this page.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this page carries no records.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Result of a mutate call: the entities as the server stored them, in
/// server order.
pub struct MutateResult {
    pub value: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One structured sub-error returned by the remote side within a failed call.
pub struct ApiErrorDetail {
    /// Error code, e.g. `AdGroupAdError.CANNOT_OPERATE_ON_REMOVED_ADGROUPAD`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Path of the request field that triggered the error, when reported.
    pub field_path: Option<String>,
    /// Offending input value, when reported.
    pub trigger: Option<String>,
}

impl fmt::Display for ApiErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(field_path) = self.field_path.as_deref() {
            write!(f, " (field: {field_path})")?;
        }
        if let Some(trigger) = self.trigger.as_deref() {
            write!(f, " (trigger: {trigger})")?;
        }
        Ok(())
    }
}
