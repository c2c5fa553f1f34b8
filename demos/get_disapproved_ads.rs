//! Retrieves all disapproved ads in an ad group, with the policy topic
//! entries that caused each disapproval.

use std::path::PathBuf;
use std::process::ExitCode;

use adwords::client::{AdsClient, OfflineCredentials, Service, Session};
use adwords::config::ApiConfig;
use adwords::domain::{AdGroupId, PageSize, Predicate, ServiceQuery, SortOrder};
use adwords::{AdsError, report};
use clap::Parser;

// Filled in here when not passed on the command line, matching the
// placeholder style of the configuration file.
const AD_GROUP_ID: &str = "INSERT_AD_GROUP_ID_HERE";

#[derive(Debug, Parser)]
#[command(about = "List disapproved ads in an ad group with their policy details")]
struct Args {
    /// Ad group to inspect.
    #[arg(long)]
    ad_group_id: Option<i64>,

    /// Path to the configuration file (defaults to ads.toml).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<AdsError>() {
                Some(AdsError::Api { errors }) => {
                    eprintln!("Request failed with the following API errors:");
                    let mut stderr = std::io::stderr();
                    let _ = report::report_api_errors(&mut stderr, errors);
                }
                _ => eprintln!("{err}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match args.config {
        Some(path) => ApiConfig::from_path(path)?,
        None => ApiConfig::load()?,
    };
    let credential = OfflineCredentials::from_config(&config.oauth2)?.generate_credential()?;
    let session = Session::builder()
        .from_config(&config)
        .credential(credential)
        .build()?;

    let ad_group_id = match args.ad_group_id {
        Some(id) => AdGroupId::new(id)?,
        None => AdGroupId::parse(AD_GROUP_ID)?,
    };

    let query = ServiceQuery::builder()
        .fields(["Id", "PolicySummary"])?
        .filter(Predicate::equal_to(AdGroupId::FIELD, ad_group_id.get())?)
        .filter(Predicate::equal_to(
            "CombinedApprovalStatus",
            "DISAPPROVED",
        )?)
        .order_by("Id", SortOrder::Ascending)?
        .page_size(PageSize::default())
        .build()?;

    let client = AdsClient::new();
    let mut pager = client.paginate(&session, Service::AdGroupAd, query);

    let mut stdout = std::io::stdout();
    let mut disapproved = 0usize;
    while let Some(page) = pager.next_page().await? {
        for record in &page.entries {
            disapproved += 1;
            report::report_disapproved_ad(&mut stdout, record)?;
        }
    }
    report::report_disapproved_count(&mut stdout, disapproved)?;

    Ok(())
}
