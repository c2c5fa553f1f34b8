use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Developer token identifying the API consumer.
///
/// Invariant: non-empty after trimming.
pub struct DeveloperToken(String);

impl DeveloperToken {
    /// Configuration key and request header name (`developer_token`).
    pub const KEY: &'static str = "developer_token";

    /// Create a validated [`DeveloperToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::KEY });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Customer (account) identifier the session operates on, e.g. `123-456-7890`.
///
/// Invariant: non-empty after trimming. Dashes are preserved as provided.
pub struct ClientCustomerId(String);

impl ClientCustomerId {
    /// Configuration key and request header name (`client_customer_id`).
    pub const KEY: &'static str = "client_customer_id";

    /// Create a validated [`ClientCustomerId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::KEY });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated customer id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// OAuth2 client id of the registered application.
///
/// Invariant: non-empty after trimming.
pub struct ClientId(String);

impl ClientId {
    /// Configuration key (`client_id`).
    pub const KEY: &'static str = "client_id";

    /// Create a validated [`ClientId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::KEY });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated client id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// OAuth2 client secret of the registered application.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct ClientSecret(String);

impl ClientSecret {
    /// Configuration key (`client_secret`).
    pub const KEY: &'static str = "client_secret";

    /// Create a validated [`ClientSecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::KEY });
        }
        Ok(Self(value))
    }

    /// Borrow the secret as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Long-lived OAuth2 refresh token exchanged out of band for access tokens.
///
/// Invariant: non-empty after trimming.
pub struct RefreshToken(String);

impl RefreshToken {
    /// Configuration key (`refresh_token`).
    pub const KEY: &'static str = "refresh_token";

    /// Create a validated [`RefreshToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::KEY });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated refresh token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Short-lived OAuth2 access token attached to every request.
///
/// Invariant: non-empty after trimming.
pub struct AccessToken(String);

impl AccessToken {
    /// Configuration key (`access_token`).
    pub const KEY: &'static str = "access_token";

    /// Create a validated [`AccessToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::KEY });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated access token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Name of a selectable/filterable entity field, e.g. `Id` or `PolicySummary`.
///
/// Invariant: non-empty after trimming. The server defines which names are
/// valid for a given service; this type only guards against blank input.
pub struct FieldName(String);

impl FieldName {
    /// Create a validated [`FieldName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "field name" });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated field name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Number of records requested per page.
///
/// Invariant: `1..=10_000`.
pub struct PageSize(u32);

impl PageSize {
    /// Minimum allowed page size.
    pub const MIN: u32 = 1;
    /// Maximum allowed page size.
    pub const MAX: u32 = 10_000;

    /// Create a validated page size.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::PageSizeOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// Get the underlying page size.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageSize {
    /// The page size the original tooling uses for query loops.
    fn default() -> Self {
        Self(100)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Ad group identifier.
///
/// Invariant: positive.
pub struct AdGroupId(i64);

impl AdGroupId {
    /// AWQL field name this id filters on (`AdGroupId`).
    pub const FIELD: &'static str = "AdGroupId";

    /// Create a validated [`AdGroupId`].
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::NonPositiveId {
                field: "ad_group_id",
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// Parse and validate an [`AdGroupId`] from text, e.g. a command-line
    /// argument or a placeholder left unfilled.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let value: i64 = input
            .trim()
            .parse()
            .map_err(|_| ValidationError::NotANumber {
                field: "ad_group_id",
                input: input.to_owned(),
            })?;
        Self::new(value)
    }

    /// Get the underlying id.
    pub fn get(self) -> i64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// How long a user stays on a remarketing list, in days.
///
/// Invariant: `0..=10_000` (the upper bound means "no expiration").
pub struct MembershipLifespanDays(u32);

impl MembershipLifespanDays {
    /// Maximum allowed lifespan.
    pub const MAX: u32 = 10_000;

    /// Create a validated lifespan.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value > Self::MAX {
            return Err(ValidationError::LifespanOutOfRange {
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// Get the underlying day count.
    pub fn get(self) -> u32 {
        self.0
    }
}
