//! Window Admin Library
//!
//! Authenticated API access layer for the window/door admin console.

pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod feed;
pub mod filter;
pub mod logging;
pub mod services;
pub mod storage;

use std::sync::Arc;

use api::{ApiClient, ApiError};
use auth::AuthManager;
use config::ConsoleConfig;
use feed::ApplicationsFeed;
use services::{ApplicationsService, AuthService, ProductsService, StatisticsService};
use storage::SecureStorage;

/// Console state shared across commands
pub struct AdminConsole {
    pub config: ConsoleConfig,
    pub auth: AuthService,
    pub products: ProductsService,
    pub applications: ApplicationsService,
    pub statistics: StatisticsService,
}

impl AdminConsole {
    /// Wire storage, session, HTTP client and services from `config`
    pub fn new(config: ConsoleConfig) -> Result<Self, ApiError> {
        let storage = match &config.storage_dir {
            Some(dir) => SecureStorage::with_dir(dir),
            None => SecureStorage::new(),
        };
        let manager = Arc::new(AuthManager::restore(Arc::new(storage)));

        let api = ApiClient::new(&config.api_base_url, manager.reader(), config.request_timeout)?;

        Ok(Self {
            auth: AuthService::new(api.clone(), manager, config.demo_login),
            products: ProductsService::new(api.clone()),
            applications: ApplicationsService::new(api),
            statistics: StatisticsService::new(),
            config,
        })
    }

    /// A fresh list view over the applications service
    pub fn applications_feed(&self) -> ApplicationsFeed {
        ApplicationsFeed::new(self.applications.clone())
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn declared_toolchain_covers_dependency_floor() {
        let declared: Vec<u32> = env!("CARGO_PKG_RUST_VERSION")
            .split('.')
            .map(|part| part.parse().unwrap())
            .collect();
        // clap 4.5 and wiremock 0.6 need at least 1.74
        assert!(declared[..2] >= [1, 74][..], "rust-version {:?}", declared);
    }
}
