use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidEndpoint { input: String },
    NonPositiveId { field: &'static str, actual: i64 },
    NotANumber { field: &'static str, input: String },
    PageSizeOutOfRange { min: u32, max: u32, actual: u32 },
    LifespanOutOfRange { max: u32, actual: u32 },
    NoFieldsSelected,
    EmptyInList { field: String },
    NoOperations,
    NotAnObject,
    MissingCredential,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidEndpoint { input } => write!(f, "invalid endpoint URL: {input}"),
            Self::NonPositiveId { field, actual } => {
                write!(f, "{field} must be positive, got {actual}")
            }
            Self::NotANumber { field, input } => {
                write!(f, "{field} must be a number, got '{input}'")
            }
            Self::PageSizeOutOfRange { min, max, actual } => {
                write!(f, "page size out of range: {actual} (expected {min}..={max})")
            }
            Self::LifespanOutOfRange { max, actual } => {
                write!(
                    f,
                    "membership lifespan out of range: {actual} (expected 0..={max})"
                )
            }
            Self::NoFieldsSelected => write!(f, "query must select at least one field"),
            Self::EmptyInList { field } => {
                write!(f, "IN predicate on {field} requires at least one value")
            }
            Self::NoOperations => write!(f, "mutate requires at least one operation"),
            Self::NotAnObject => write!(f, "record value must be a JSON object"),
            Self::MissingCredential => write!(f, "session requires a credential"),
        }
    }
}

impl std::error::Error for ValidationError {}
