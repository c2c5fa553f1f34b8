//! Transport layer: wire-format details (AWQL rendering, JSON
//! serialization/deserialization).

mod awql;
mod fault;
mod mutate;
mod query;

pub use awql::render_awql;
pub use fault::decode_api_errors;
pub use mutate::{decode_mutate_json_response, encode_mutate_request};
pub use query::{decode_page_json_response, encode_query_request};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("result entry {index} is not a JSON object")]
    InvalidEntry { index: usize },
}
