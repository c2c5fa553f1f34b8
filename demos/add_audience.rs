//! Creates a remarketing user list (audience) and prints the tracking
//! snippets associated with its conversion types.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use adwords::client::{AdsClient, OfflineCredentials, Service, Session};
use adwords::config::ApiConfig;
use adwords::domain::{
    MembershipLifespanDays, Operation, PageSize, Predicate, Record, ServiceQuery, SortOrder,
    UserList,
};
use adwords::{AdsError, report};
use clap::Parser;
use serde_json::json;

#[derive(Debug, Parser)]
#[command(about = "Create a remarketing user list and print its tracking snippets")]
struct Args {
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
    let client = AdsClient::new();

    // Timestamp suffix keeps repeated runs from tripping duplicate-name checks.
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();
    let name = format!("Mars cruise customers #{millis}");
    let lifespan = MembershipLifespanDays::new(365)?;

    let operand = Record::from_json(json!({
        "xsi_type": "BasicUserList",
        "name": name,
        "description": "A list of mars cruise customers in the last year",
        "status": "OPEN",
        "membershipLifeSpan": lifespan.get(),
        "conversionTypes": [{ "name": name }],
        "isEligibleForSearch": true
    }))?;

    let result = client
        .mutate(&session, Service::AdwordsUserList, &[Operation::add(operand)])
        .await?;

    let mut stdout = std::io::stdout();
    let mut conversion_ids: Vec<String> = Vec::new();
    for record in &result.value {
        report::report_user_list(&mut stdout, record)?;
        let list = UserList::new(record);
        conversion_ids.extend(list.conversion_type_ids().iter().map(|id| id.to_string()));
    }

    if conversion_ids.is_empty() {
        return Ok(());
    }

    let query = ServiceQuery::builder()
        .fields(["Id", "GoogleGlobalSiteTag", "GoogleEventSnippet"])?
        .filter(Predicate::in_list("Id", conversion_ids)?)
        .order_by("Id", SortOrder::Ascending)?
        .page_size(PageSize::default())
        .build()?;

    let trackers = client
        .paginate(&session, Service::ConversionTracker, query)
        .collect_records()
        .await?;
    for record in &trackers {
        report::report_conversion_tracker_snippets(&mut stdout, record)?;
    }

    Ok(())
}
