use serde::Deserialize;

use crate::domain::ApiErrorDetail;

#[derive(Debug, Clone, Deserialize)]
struct ApiFaultJson {
    errors: Vec<ApiErrorJson>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiErrorJson {
    #[serde(default, rename = "errorString")]
    error_string: Option<String>,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "fieldPath")]
    field_path: Option<String>,
    #[serde(default)]
    trigger: Option<String>,
}

/// Try to read a structured error payload out of a failed response body.
///
/// Returns `None` when the body is not a recognizable fault (the caller then
/// falls back to reporting the raw HTTP status). An empty `errors` array is
/// still a fault: the remote call failed with zero sub-errors attached.
pub fn decode_api_errors(body: &str) -> Option<Vec<ApiErrorDetail>> {
    let parsed: ApiFaultJson = serde_json::from_str(body).ok()?;
    Some(
        parsed
            .errors
            .into_iter()
            .map(|error| ApiErrorDetail {
                code: error
                    .error_string
                    .or(error.error_type)
                    .unwrap_or_else(|| "ApiError".to_owned()),
                message: error.message.unwrap_or_default(),
                field_path: error.field_path,
                trigger: error.trigger,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_structured_errors_in_order() {
        let body = r#"
        {
          "errors": [
            {
              "errorString": "UserListError.DUPLICATE_NAME",
              "message": "name already in use",
              "fieldPath": "operations[0].operand.name",
              "trigger": "Mars cruise customers"
            },
            {
              "type": "RateExceededError",
              "message": "too many requests"
            }
          ]
        }
        "#;

        let errors = decode_api_errors(body).unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].code, "UserListError.DUPLICATE_NAME");
        assert_eq!(
            errors[0].field_path.as_deref(),
            Some("operations[0].operand.name")
        );
        assert_eq!(errors[1].code, "RateExceededError");
        assert_eq!(errors[1].trigger, None);
    }

    #[test]
    fn empty_errors_array_is_still_a_fault() {
        let errors = decode_api_errors(r#"{ "errors": [] }"#).unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn unrecognizable_bodies_yield_none() {
        assert!(decode_api_errors("Internal Server Error").is_none());
        assert!(decode_api_errors(r#"{ "status": "ERROR" }"#).is_none());
    }
}
