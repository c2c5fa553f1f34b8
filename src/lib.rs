//! Typed client for an AdWords-style campaign management API.
//!
//! The crate covers the three pieces every integration needs: building an
//! authenticated [`client::Session`] from configuration, running paginated
//! AWQL queries through [`client::AdsClient`], and reporting results and
//! structured API errors.
//!
//! ```no_run
//! use adwords::client::{AdsClient, OfflineCredentials, Service, Session};
//! use adwords::config::ApiConfig;
//! use adwords::domain::{PageSize, Predicate, ServiceQuery, SortOrder};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ApiConfig::load()?;
//! let credential = OfflineCredentials::from_config(&config.oauth2)?.generate_credential()?;
//! let session = Session::builder()
//!     .from_config(&config)
//!     .credential(credential)
//!     .build()?;
//!
//! let query = ServiceQuery::builder()
//!     .fields(["Id", "AdGroupId", "Status", "PolicySummary"])?
//!     .filter(Predicate::equal_to("CombinedApprovalStatus", "DISAPPROVED")?)
//!     .order_by("Id", SortOrder::Ascending)?
//!     .page_size(PageSize::default())
//!     .build()?;
//!
//! let client = AdsClient::new();
//! let mut pager = client.paginate(&session, Service::AdGroupAd, query);
//! while let Some(page) = pager.next_page().await? {
//!     for record in &page.entries {
//!         println!("{:?}", record.get("ad"));
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod domain;
pub mod report;

mod transport;

pub use client::{AdsClient, AdsError, Credential, OfflineCredentials, Service, Session};
pub use config::ApiConfig;
