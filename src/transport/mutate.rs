use serde::Deserialize;
use serde_json::Value;

use crate::domain::{MutateResult, Operation, Record};
use crate::transport::TransportError;

#[derive(Debug, Clone, Deserialize)]
struct MutateJsonResponse {
    #[serde(default)]
    value: Vec<Value>,
}

/// Build the JSON body of a mutate request.
pub fn encode_mutate_request(operations: &[Operation]) -> Value {
    let operations: Vec<Value> = operations
        .iter()
        .map(|operation| {
            serde_json::json!({
                "operator": operation.operator().as_str(),
                "operand": operation.operand().to_json(),
            })
        })
        .collect();
    serde_json::json!({ "operations": operations })
}

/// Decode a mutate result payload, preserving server order of `value`.
pub fn decode_mutate_json_response(json: &str) -> Result<MutateResult, TransportError> {
    let parsed: MutateJsonResponse = serde_json::from_str(json)?;

    let value = parsed
        .value
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            Record::from_json(entry).map_err(|_| TransportError::InvalidEntry { index })
        })
        .collect::<Result<Vec<Record>, TransportError>>()?;

    Ok(MutateResult { value })
}
