//! Applications Feed Module
//!
//! State behind the applications list view. Each refresh is tagged with a
//! generation number and only the newest one may publish its results, so a
//! slow, older response never overwrites a newer list.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::api::ApiError;
use crate::services::{ApplicationQuery, ApplicationsService, Record};

/// Snapshot of the list view state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedState {
    pub applications: Vec<Record>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub filters: ApplicationQuery,
}

/// What happened to a refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Results were published
    Applied,
    /// A newer refresh was issued while this one was in flight
    Superseded,
}

pub struct ApplicationsFeed {
    service: ApplicationsService,
    generation: AtomicU64,
    state: Mutex<FeedState>,
}

impl ApplicationsFeed {
    pub fn new(service: ApplicationsService) -> Self {
        Self {
            service,
            generation: AtomicU64::new(0),
            state: Mutex::new(FeedState::default()),
        }
    }

    pub fn snapshot(&self) -> FeedState {
        self.lock().clone()
    }

    /// Fetch the list with the current filters.
    ///
    /// A failed fetch publishes an empty list plus the error message.
    pub async fn refresh(&self) -> RefreshOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let filters = {
            let mut state = self.lock();
            state.is_loading = true;
            state.error = None;
            state.filters.clone()
        };

        let result = self.service.list(Some(&filters)).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding superseded applications fetch #{}", generation);
            return RefreshOutcome::Superseded;
        }

        let mut state = self.lock();
        match result {
            Ok(applications) => {
                debug!("Fetched {} applications", applications.len());
                state.applications = applications;
            }
            Err(e) => {
                error!("Error fetching applications: {}", e);
                state.applications = Vec::new();
                state.error = Some(e.message());
            }
        }
        state.is_loading = false;

        RefreshOutcome::Applied
    }

    /// Replace the filters and refresh
    pub async fn filter(&self, filters: ApplicationQuery) -> RefreshOutcome {
        self.lock().filters = filters;
        self.refresh().await
    }

    /// Fetch one application, recording a failure in the view error
    pub async fn details(&self, id: &str) -> Result<Value, ApiError> {
        self.begin();

        let result = self.service.get(id).await;

        let mut state = self.lock();
        state.is_loading = false;
        if let Err(e) = &result {
            error!("Error fetching application details: {}", e);
            state.error = Some(e.message());
        }
        result
    }

    /// Delete an application, then reload the list.
    ///
    /// A failed delete is recorded in the view error and returned; the
    /// list is left untouched.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.begin();

        if let Err(e) = self.service.delete(id).await {
            error!("Error deleting application: {}", e);
            let mut state = self.lock();
            state.is_loading = false;
            state.error = Some(e.message());
            return Err(e);
        }

        self.refresh().await;
        Ok(())
    }

    fn begin(&self) {
        let mut state = self.lock();
        state.is_loading = true;
        state.error = None;
    }

    fn lock(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
