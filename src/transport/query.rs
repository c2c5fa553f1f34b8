use serde::Deserialize;
use serde_json::Value;

use crate::domain::{Page, Record};
use crate::transport::TransportError;

#[derive(Debug, Clone, Deserialize)]
struct PageJsonResponse {
    #[serde(default, rename = "totalNumEntries")]
    total_num_entries: Option<u64>,
    #[serde(default)]
    entries: Vec<Value>,
}

/// Build the JSON body of a paged query request from its AWQL string.
pub fn encode_query_request(awql: &str) -> Value {
    serde_json::json!({ "query": awql })
}

/// Decode a page payload, preserving server order of `entries`.
pub fn decode_page_json_response(json: &str) -> Result<Page, TransportError> {
    let parsed: PageJsonResponse = serde_json::from_str(json)?;

    let entries = parsed
        .entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            Record::from_json(entry).map_err(|_| TransportError::InvalidEntry { index })
        })
        .collect::<Result<Vec<Record>, TransportError>>()?;

    Ok(Page {
        entries,
        total_entries: parsed.total_num_entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_wraps_awql_string() {
        let body = encode_query_request("SELECT Id LIMIT 0,100");
        assert_eq!(body["query"], "SELECT Id LIMIT 0,100");
    }

    #[test]
    fn decode_preserves_entry_order_and_total() {
        let json = r#"
        {
          "totalNumEntries": 250,
          "entries": [
            { "ad": { "id": 3 } },
            { "ad": { "id": 1 } },
            { "ad": { "id": 2 } }
          ]
        }
        "#;

        let page = decode_page_json_response(json).unwrap();
        assert_eq!(page.total_entries, Some(250));
        let ids: Vec<i64> = page
            .entries
            .iter()
            .map(|record| record.get("ad").unwrap()["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn decode_tolerates_missing_total_and_entries() {
        let page = decode_page_json_response("{}").unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_entries, None);
    }

    #[test]
    fn decode_rejects_non_object_entries() {
        let err = decode_page_json_response(r#"{ "entries": [ {"id": 1}, 7 ] }"#).unwrap_err();
        assert!(matches!(err, TransportError::InvalidEntry { index: 1 }));
    }

    #[test]
    fn decode_rejects_invalid_json() {
        assert!(matches!(
            decode_page_json_response("{ not json }"),
            Err(TransportError::Json(_))
        ));
    }
}
