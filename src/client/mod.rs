//! Client layer: session construction, request orchestration, and the
//! paginated query runner.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::config::{ApiConfig, ConfigError, OAuth2Config};
use crate::domain::{
    AccessToken, ClientCustomerId, ClientId, ClientSecret, DeveloperToken, MutateResult,
    Operation, Page, Record, RefreshToken, ServiceQuery, ValidationError,
};
use crate::domain::ApiErrorDetail;
use crate::transport;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        headers: Vec<(String, String)>,
        body: serde_json::Value,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        headers: Vec<(String, String)>,
        body: serde_json::Value,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut request = self.client.post(url).json(&body);
            for (name, value) in headers {
                request = request.header(name, value);
            }
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`AdsClient`] and [`Session`] construction.
///
/// All of these are fatal to the run: nothing in this crate retries or
/// recovers. Configuration, authentication, and validation failures happen
/// before any remote call; the remaining variants describe a failed call.
pub enum AdsError {
    /// Configuration file missing, unreadable, or malformed.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// Credential material could not be turned into a usable credential.
    #[error("authentication error: {0}")]
    Authentication(String),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The remote side rejected the call, with zero or more structured
    /// sub-errors describing the causes.
    #[error("API request failed with {} error(s)", .errors.len())]
    Api { errors: Vec<ApiErrorDetail> },

    /// Non-successful HTTP status without a recognizable error payload.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),
}

#[derive(Debug, Clone)]
/// Ready-to-use OAuth2 credential attached to every request.
pub struct Credential {
    token: AccessToken,
}

impl Credential {
    /// Create a credential from an access token obtained out of band.
    pub fn access_token(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            token: AccessToken::new(value)?,
        })
    }

    /// Borrow the underlying access token.
    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    fn authorization_value(&self) -> String {
        format!("Bearer {}", self.token.as_str())
    }
}

#[derive(Debug, Clone)]
/// Offline (refresh-token based) credential material from the config file.
///
/// Exchanging the refresh token for an access token is the platform's OAuth2
/// tooling's job, not this crate's; [`OfflineCredentials::generate_credential`]
/// only hands out the access token the configuration already carries.
pub struct OfflineCredentials {
    client_id: ClientId,
    client_secret: ClientSecret,
    refresh_token: RefreshToken,
    access_token: Option<AccessToken>,
}

impl OfflineCredentials {
    /// Validate the `[oauth2]` section of the configuration.
    pub fn from_config(config: &OAuth2Config) -> Result<Self, AdsError> {
        let access_token = match config.access_token.as_deref() {
            Some(token) => Some(AccessToken::new(token)?),
            None => None,
        };
        Ok(Self {
            client_id: ClientId::new(config.client_id.clone())?,
            client_secret: ClientSecret::new(config.client_secret.clone())?,
            refresh_token: RefreshToken::new(config.refresh_token.clone())?,
            access_token,
        })
    }

    /// OAuth2 client id.
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// OAuth2 client secret.
    pub fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// OAuth2 refresh token.
    pub fn refresh_token(&self) -> &RefreshToken {
        &self.refresh_token
    }

    /// Produce the credential for session construction.
    ///
    /// Fails with [`AdsError::Authentication`] when the configuration carries
    /// no access token: the exchange of the refresh token is external, so at
    /// this point there is nothing to authenticate with.
    pub fn generate_credential(&self) -> Result<Credential, AdsError> {
        match self.access_token.clone() {
            Some(token) => Ok(Credential { token }),
            None => Err(AdsError::Authentication(
                "no access token in configuration; exchange the refresh token with your \
                 OAuth2 tooling and set oauth2.access_token"
                    .to_owned(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Entity collection a query or mutate targets.
pub enum Service {
    /// Ads within ad groups, including policy summaries.
    AdGroupAd,
    /// Remarketing user lists (audiences).
    AdwordsUserList,
    /// Conversion trackers and their code snippets.
    ConversionTracker,
}

impl Service {
    /// URL path segment of this service under the session endpoint.
    pub fn path(self) -> &'static str {
        match self {
            Self::AdGroupAd => "AdGroupAdService",
            Self::AdwordsUserList => "AdwordsUserListService",
            Self::ConversionTracker => "ConversionTrackerService",
        }
    }
}

#[derive(Debug, Clone)]
/// Authenticated context for issuing calls against one account/endpoint.
///
/// Immutable once built; create one per run and discard it at exit.
pub struct Session {
    endpoint: Url,
    developer_token: DeveloperToken,
    client_customer_id: ClientCustomerId,
    credential: Credential,
}

impl Session {
    /// Start building a session.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// Endpoint all service URLs are rooted at.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Customer (account) id this session operates on.
    pub fn client_customer_id(&self) -> &ClientCustomerId {
        &self.client_customer_id
    }

    fn service_url(&self, service: Service) -> String {
        format!(
            "{}/{}",
            self.endpoint.as_str().trim_end_matches('/'),
            service.path()
        )
    }

    fn request_headers(&self) -> Vec<(String, String)> {
        vec![
            ("Authorization".to_owned(), self.credential.authorization_value()),
            (
                "developerToken".to_owned(),
                self.developer_token.as_str().to_owned(),
            ),
            (
                "clientCustomerId".to_owned(),
                self.client_customer_id.as_str().to_owned(),
            ),
        ]
    }
}

#[derive(Debug, Clone, Default)]
/// Builder for [`Session`].
pub struct SessionBuilder {
    endpoint: Option<String>,
    developer_token: Option<String>,
    client_customer_id: Option<String>,
    credential: Option<Credential>,
}

impl SessionBuilder {
    /// Fill endpoint and identifiers from a loaded configuration.
    pub fn from_config(mut self, config: &ApiConfig) -> Self {
        self.endpoint = Some(config.endpoint.clone());
        self.developer_token = Some(config.developer_token.clone());
        self.client_customer_id = Some(config.client_customer_id.clone());
        self
    }

    /// Override the endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Override the developer token.
    pub fn developer_token(mut self, token: impl Into<String>) -> Self {
        self.developer_token = Some(token.into());
        self
    }

    /// Override the customer id.
    pub fn client_customer_id(mut self, id: impl Into<String>) -> Self {
        self.client_customer_id = Some(id.into());
        self
    }

    /// Attach the credential. Required.
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Validate everything and build the session.
    pub fn build(self) -> Result<Session, AdsError> {
        let endpoint_raw = self.endpoint.ok_or(ValidationError::Empty { field: "endpoint" })?;
        let endpoint = Url::parse(endpoint_raw.trim()).map_err(|_| {
            ValidationError::InvalidEndpoint {
                input: endpoint_raw.clone(),
            }
        })?;
        let developer_token = DeveloperToken::new(self.developer_token.unwrap_or_default())?;
        let client_customer_id =
            ClientCustomerId::new(self.client_customer_id.unwrap_or_default())?;
        let credential = self.credential.ok_or(ValidationError::MissingCredential)?;

        Ok(Session {
            endpoint,
            developer_token,
            client_customer_id,
            credential,
        })
    }
}

#[derive(Debug, Clone)]
/// Builder for [`AdsClient`].
///
/// Use this when you need to customize the timeout or user-agent.
pub struct AdsClientBuilder {
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl AdsClientBuilder {
    /// Create a builder with no overrides.
    pub fn new() -> Self {
        Self {
            timeout: None,
            user_agent: None,
        }
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build an [`AdsClient`].
    pub fn build(self) -> Result<AdsClient, AdsError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| AdsError::Transport(Box::new(err)))?;

        Ok(AdsClient {
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

impl Default for AdsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
/// High-level client: renders queries, issues requests, maps responses and
/// faults into domain types.
///
/// The session is passed to each call explicitly; one client can serve any
/// number of sessions.
pub struct AdsClient {
    http: Arc<dyn HttpTransport>,
}

impl AdsClient {
    /// Create a client with default HTTP settings.
    ///
    /// For more customization, use [`AdsClient::builder`].
    pub fn new() -> Self {
        Self {
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder() -> AdsClientBuilder {
        AdsClientBuilder::new()
    }

    /// Fetch one page of `query` results from `service`.
    ///
    /// Issues exactly one remote request for the query's current page window.
    ///
    /// Errors:
    /// - [`AdsError::Api`] when the remote side rejects the call with
    ///   structured sub-errors,
    /// - [`AdsError::HttpStatus`] for other non-2xx responses,
    /// - [`AdsError::Transport`] / [`AdsError::Parse`] for wire failures.
    pub async fn query(
        &self,
        session: &Session,
        service: Service,
        query: &ServiceQuery,
    ) -> Result<Page, AdsError> {
        let awql = transport::render_awql(query);
        tracing::debug!(
            service = service.path(),
            offset = query.window().offset(),
            limit = query.window().limit().get(),
            "issuing query request"
        );

        let body = transport::encode_query_request(&awql);
        let response = self.post(session, service, body).await?;

        let page = transport::decode_page_json_response(&response.body)
            .map_err(|err| AdsError::Parse(Box::new(err)))?;
        tracing::debug!(
            entries = page.len(),
            total = page.total_entries,
            "page received"
        );
        Ok(page)
    }

    /// Apply `operations` against `service` and return the stored entities.
    pub async fn mutate(
        &self,
        session: &Session,
        service: Service,
        operations: &[Operation],
    ) -> Result<MutateResult, AdsError> {
        if operations.is_empty() {
            return Err(ValidationError::NoOperations.into());
        }
        tracing::debug!(
            service = service.path(),
            operations = operations.len(),
            "issuing mutate request"
        );

        let body = transport::encode_mutate_request(operations);
        let response = self.post(session, service, body).await?;

        transport::decode_mutate_json_response(&response.body)
            .map_err(|err| AdsError::Parse(Box::new(err)))
    }

    /// Run `query` as a lazy page sequence.
    ///
    /// The returned pager issues one request per [`QueryPager::next_page`]
    /// call and stops by the query's own termination rule (total count when
    /// reported, short page otherwise).
    pub fn paginate<'a>(
        &'a self,
        session: &'a Session,
        service: Service,
        query: ServiceQuery,
    ) -> QueryPager<'a> {
        QueryPager {
            client: self,
            session,
            service,
            query,
            started: false,
            done: false,
        }
    }

    async fn post(
        &self,
        session: &Session,
        service: Service,
        body: serde_json::Value,
    ) -> Result<HttpResponse, AdsError> {
        let url = session.service_url(service);
        let headers = session.request_headers();

        let response = self
            .http
            .post_json(&url, headers, body)
            .await
            .map_err(AdsError::Transport)?;

        if !(200..=299).contains(&response.status) {
            if let Some(errors) = transport::decode_api_errors(&response.body) {
                return Err(AdsError::Api { errors });
            }
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(AdsError::HttpStatus {
                status: response.status,
                body,
            });
        }

        Ok(response)
    }
}

impl Default for AdsClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy sequence of result pages for one query.
///
/// Offsets advance monotonically by the page size; a failed page fetch
/// propagates immediately and leaves pages already yielded untouched.
pub struct QueryPager<'a> {
    client: &'a AdsClient,
    session: &'a Session,
    service: Service,
    query: ServiceQuery,
    started: bool,
    done: bool,
}

impl QueryPager<'_> {
    /// Fetch the next page, or `None` once the sequence is exhausted.
    pub async fn next_page(&mut self) -> Result<Option<Page>, AdsError> {
        if self.done {
            return Ok(None);
        }
        if self.started {
            self.query.advance();
        }

        let page = self
            .client
            .query(self.session, self.service, &self.query)
            .await?;

        self.started = true;
        self.done = !self.query.has_next(&page);
        Ok(Some(page))
    }

    /// Drain the remaining pages into one record list, in server order.
    pub async fn collect_records(mut self) -> Result<Vec<Record>, AdsError> {
        let mut records = Vec::new();
        while let Some(page) = self.next_page().await? {
            records.extend(page.entries);
        }
        Ok(records)
    }
}
