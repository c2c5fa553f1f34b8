//! Domain layer: strong types with validation and invariants (no I/O).

mod record;
mod request;
mod response;
mod validation;
mod value;

pub use record::{
    AdGroupAd, ConversionTracker, PolicySummary, PolicyTopicEntry, PolicyTopicEvidence, Record,
    UserList,
};
pub use request::{
    Operation, Operator, PageWindow, Predicate, PredicateOperator, PredicateValue, ServiceQuery,
    ServiceQueryBuilder, SortOrder,
};
pub use response::{ApiErrorDetail, MutateResult, Page};
pub use validation::ValidationError;
pub use value::{
    AccessToken, AdGroupId, ClientCustomerId, ClientId, ClientSecret, DeveloperToken, FieldName,
    MembershipLifespanDays, PageSize, RefreshToken,
};
