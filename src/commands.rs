//! Console Commands Module
//!
//! Handlers behind the CLI subcommands. Each returns JSON for printing.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Subcommand;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::auth::AuthState;
use crate::feed::FeedState;
use crate::filter::{FilterCriteria, FilterFields};
use crate::services::ProductFamily;
use crate::AdminConsole;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub state: AuthState,
    pub api_base_url: String,
    pub demo_login: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ProductAction {
    /// List all records
    List,
    /// Show one record
    Get { id: String },
    /// Create a record from a JSON payload
    Create {
        #[arg(long)]
        data: String,
    },
    /// Replace a record with a JSON payload
    Update {
        id: String,
        #[arg(long)]
        data: String,
    },
    /// Delete a record
    Delete { id: String },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ApplicationAction {
    /// List applications, filtered locally
    List {
        /// Case-insensitive match on customer name, email or id
        #[arg(long)]
        search: Option<String>,
        /// Exact status, or "all"
        #[arg(long)]
        status: Option<String>,
        /// Submitted on or after this day (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Submitted on or before this day (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Show one application
    Get { id: String },
    /// Submit an application from a JSON payload
    Create {
        #[arg(long)]
        data: String,
    },
    /// Delete an application and print the refreshed list
    Delete { id: String },
}

/// Log in and print the user profile
pub async fn login(console: &AdminConsole, email: &str, password: &str) -> Result<Value> {
    let response = console
        .auth
        .login(email, password)
        .await
        .context("Login failed")?;

    Ok(json!({
        "success": true,
        "user": response.user,
    }))
}

pub fn logout(console: &AdminConsole) -> Value {
    console.auth.logout();
    json!({ "success": true })
}

/// Report the authentication state, recovering it from the auth signal if possible
pub fn session(console: &AdminConsole) -> SessionResponse {
    let state = if console.auth.is_authenticated() {
        AuthState::Authenticated
    } else {
        AuthState::Unauthenticated
    };

    SessionResponse {
        state,
        api_base_url: console.config.api_base_url.clone(),
        demo_login: console.config.demo_login,
    }
}

pub fn dashboard_stats(console: &AdminConsole) -> Result<Value> {
    serde_json::to_value(console.statistics.dashboard_stats()).context("Failed to encode stats")
}

pub async fn product(console: &AdminConsole, family: ProductFamily, action: ProductAction) -> Result<Value> {
    let service = console.products.family(family);
    debug!("Product command on {}", family);

    let value = match action {
        ProductAction::List => Value::Array(service.list().await?),
        ProductAction::Get { id } => service.get(&id).await?,
        ProductAction::Create { data } => service.create(parse_payload(&data)?).await?,
        ProductAction::Update { id, data } => service.update(&id, parse_payload(&data)?).await?,
        ProductAction::Delete { id } => service.delete(&id).await?,
    };

    Ok(value)
}

pub async fn application(console: &AdminConsole, action: ApplicationAction) -> Result<Value> {
    match action {
        ApplicationAction::List { search, status, from, to } => {
            let criteria = FilterCriteria {
                search_text: search,
                status,
                date_from: from,
                date_to: to,
            };
            list_applications(console, &criteria).await
        }
        ApplicationAction::Get { id } => Ok(console.applications.get(&id).await?),
        ApplicationAction::Create { data } => {
            Ok(console.applications.create(parse_payload(&data)?).await?)
        }
        ApplicationAction::Delete { id } => {
            let feed = console.applications_feed();
            feed.delete(&id)
                .await
                .with_context(|| format!("Failed to delete application {}", id))?;
            info!("Deleted application {}", id);
            Ok(feed_json(&feed.snapshot(), &FilterCriteria::default()))
        }
    }
}

/// Fetch the list and apply `criteria` client-side.
///
/// A failed fetch still prints, as an empty list plus the error message.
pub async fn list_applications(console: &AdminConsole, criteria: &FilterCriteria) -> Result<Value> {
    let feed = console.applications_feed();
    feed.refresh().await;

    Ok(feed_json(&feed.snapshot(), criteria))
}

fn feed_json(state: &FeedState, criteria: &FilterCriteria) -> Value {
    let applications = criteria.apply(&state.applications, &FilterFields::default());
    json!({
        "total": state.applications.len(),
        "shown": applications.len(),
        "applications": applications,
        "error": state.error,
    })
}

fn parse_payload(data: &str) -> Result<Value> {
    serde_json::from_str(data).context("Payload is not valid JSON")
}
