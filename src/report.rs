//! Plain-text rendering of query and mutate results.
//!
//! Everything here writes to a caller-supplied [`io::Write`] so the demos can
//! print to stdout and the tests can capture into a buffer. Output is written
//! incrementally: records already rendered stay rendered even if a later page
//! fetch fails.

use std::io;

use crate::domain::{AdGroupAd, ApiErrorDetail, ConversionTracker, Record, UserList};

/// Print one disapproved ad with its policy topic entries and evidences.
pub fn report_disapproved_ad(out: &mut impl io::Write, record: &Record) -> io::Result<()> {
    let ad = AdGroupAd::new(record);
    writeln!(
        out,
        "Ad with ID {} and type '{}' was disapproved with the following policy topic entries:",
        ad.ad_id().map_or_else(|| "?".to_owned(), |id| id.to_string()),
        ad.ad_type().unwrap_or("?"),
    )?;

    let Some(summary) = ad.policy_summary() else {
        return Ok(());
    };
    for entry in summary.policy_topic_entries() {
        writeln!(
            out,
            "  topic id: {}, topic name: '{}'",
            entry.topic_id().unwrap_or("?"),
            entry.topic_name().unwrap_or("?"),
        )?;
        for evidence in entry.evidences() {
            writeln!(
                out,
                "    evidence type: {}",
                evidence.evidence_type().unwrap_or("?")
            )?;
            for (index, text) in evidence.texts().iter().enumerate() {
                writeln!(out, "      evidence text[{index}]: {text}")?;
            }
        }
    }
    Ok(())
}

/// Print the closing count line of a disapproved-ads run.
pub fn report_disapproved_count(out: &mut impl io::Write, count: usize) -> io::Result<()> {
    writeln!(out, "{count} disapproved ads were found.")
}

/// Print one stored user list.
pub fn report_user_list(out: &mut impl io::Write, record: &Record) -> io::Result<()> {
    let list = UserList::new(record);
    writeln!(
        out,
        "User list with name '{}' and ID {} was added.",
        list.name().unwrap_or("?"),
        list.id().map_or_else(|| "?".to_owned(), |id| id.to_string()),
    )
}

/// Print the tracking snippets of one conversion tracker.
pub fn report_conversion_tracker_snippets(
    out: &mut impl io::Write,
    record: &Record,
) -> io::Result<()> {
    let tracker = ConversionTracker::new(record);
    if let Some(tag) = tracker.global_site_tag() {
        writeln!(out, "Google global site tag:")?;
        writeln!(out, "{tag}")?;
    }
    if let Some(snippet) = tracker.event_snippet() {
        writeln!(out, "Google event snippet:")?;
        writeln!(out, "{snippet}")?;
    }
    Ok(())
}

/// Print a failed call's sub-errors, one indexed line per error.
pub fn report_api_errors(out: &mut impl io::Write, errors: &[ApiErrorDetail]) -> io::Result<()> {
    for (index, error) in errors.iter().enumerate() {
        writeln!(out, "  Error {index}: {error}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn render<F>(body: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buffer = Vec::new();
        body(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn disapproved_ad_renders_nested_policy_details() {
        let record = Record::from_json(json!({
            "ad": { "id": 987654, "type": "EXPANDED_TEXT_AD" },
            "policySummary": {
                "combinedApprovalStatus": "DISAPPROVED",
                "policyTopicEntries": [
                    {
                        "policyTopicId": "abortion",
                        "policyTopicName": "Abortion",
                        "policyTopicEvidences": [
                            {
                                "policyTopicEvidenceType": "AD_TEXT",
                                "evidenceTextList": ["first snippet", "second snippet"]
                            }
                        ]
                    }
                ]
            }
        }))
        .unwrap();

        let output = render(|out| report_disapproved_ad(out, &record));
        assert_eq!(
            output,
            "Ad with ID 987654 and type 'EXPANDED_TEXT_AD' was disapproved with the \
             following policy topic entries:\n\
             \x20 topic id: abortion, topic name: 'Abortion'\n\
             \x20   evidence type: AD_TEXT\n\
             \x20     evidence text[0]: first snippet\n\
             \x20     evidence text[1]: second snippet\n"
        );
    }

    #[test]
    fn disapproved_ad_without_policy_summary_prints_only_the_header() {
        let record = Record::from_json(json!({
            "ad": { "id": 1, "type": "TEXT_AD" }
        }))
        .unwrap();

        let output = render(|out| report_disapproved_ad(out, &record));
        assert_eq!(output.lines().count(), 1);
        assert!(output.starts_with("Ad with ID 1 and type 'TEXT_AD'"));
    }

    #[test]
    fn count_line_matches_expected_wording() {
        let output = render(|out| report_disapproved_count(out, 7));
        assert_eq!(output, "7 disapproved ads were found.\n");
    }

    #[test]
    fn user_list_line_includes_name_and_id() {
        let record = Record::from_json(json!({
            "id": 555,
            "name": "Mars cruise customers #1234"
        }))
        .unwrap();

        let output = render(|out| report_user_list(out, &record));
        assert_eq!(
            output,
            "User list with name 'Mars cruise customers #1234' and ID 555 was added.\n"
        );
    }

    #[test]
    fn conversion_tracker_prints_both_snippets_when_present() {
        let record = Record::from_json(json!({
            "id": 1,
            "googleGlobalSiteTag": "<script>gtag</script>",
            "googleEventSnippet": "<script>event</script>"
        }))
        .unwrap();

        let output = render(|out| report_conversion_tracker_snippets(out, &record));
        assert_eq!(
            output,
            "Google global site tag:\n<script>gtag</script>\n\
             Google event snippet:\n<script>event</script>\n"
        );
    }

    #[test]
    fn conversion_tracker_skips_missing_snippets() {
        let record = Record::from_json(json!({ "id": 1 })).unwrap();
        let output = render(|out| report_conversion_tracker_snippets(out, &record));
        assert!(output.is_empty());
    }

    #[test]
    fn api_errors_render_one_indexed_line_each() {
        let errors = vec![
            ApiErrorDetail {
                code: "UserListError.DUPLICATE_NAME".to_owned(),
                message: "name already in use".to_owned(),
                field_path: Some("operations[0].operand.name".to_owned()),
                trigger: None,
            },
            ApiErrorDetail {
                code: "RateExceededError".to_owned(),
                message: "too many requests".to_owned(),
                field_path: None,
                trigger: None,
            },
        ];

        let output = render(|out| report_api_errors(out, &errors));
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  Error 0: UserListError.DUPLICATE_NAME"));
        assert!(lines[1].starts_with("  Error 1: RateExceededError"));
    }

    #[test]
    fn records_already_rendered_survive_a_later_failure() {
        // Simulate a paging loop that fails after the first record.
        let mut buffer = Vec::new();
        let record = Record::from_json(json!({
            "ad": { "id": 1, "type": "TEXT_AD" }
        }))
        .unwrap();
        report_disapproved_ad(&mut buffer, &record).unwrap();
        let rendered_so_far = String::from_utf8(buffer.clone()).unwrap();

        // Later page fetch fails; nothing more is written.
        assert_eq!(String::from_utf8(buffer).unwrap(), rendered_so_far);
        assert!(rendered_so_far.starts_with("Ad with ID 1"));
    }
}
