//! Customer applications service.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{ApiClient, ApiError, RequestOptions};
use super::{item_path, records_from, Record};

pub const APPLICATIONS_ENDPOINT: &str = "/application";

/// Server-side filters for the applications list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
}

impl ApplicationQuery {
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.status.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    /// Query-string pairs in a stable order
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status".to_string(), status.clone()));
        }
        if let Some(from) = self.date_from {
            pairs.push(("dateFrom".to_string(), from.to_string()));
        }
        if let Some(to) = self.date_to {
            pairs.push(("dateTo".to_string(), to.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone)]
pub struct ApplicationsService {
    api: ApiClient,
}

impl ApplicationsService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// List applications, sending `filters` as a query string when any is set
    pub async fn list(&self, filters: Option<&ApplicationQuery>) -> Result<Vec<Record>, ApiError> {
        let mut options = RequestOptions::get();
        if let Some(filters) = filters.filter(|f| !f.is_empty()) {
            options = options.query(filters.to_pairs());
        }

        self.api
            .request(APPLICATIONS_ENDPOINT, options)
            .await
            .map(records_from)
    }

    pub async fn get(&self, id: &str) -> Result<Value, ApiError> {
        self.api.get(&item_path(APPLICATIONS_ENDPOINT, id)).await
    }

    pub async fn create(&self, data: Value) -> Result<Value, ApiError> {
        self.api.post(APPLICATIONS_ENDPOINT, data).await
    }

    pub async fn delete(&self, id: &str) -> Result<Value, ApiError> {
        self.api.delete(&item_path(APPLICATIONS_ENDPOINT, id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query() {
        let query = ApplicationQuery::default();
        assert!(query.is_empty());
        assert!(query.to_pairs().is_empty());
    }

    #[test]
    fn pairs_use_wire_names() {
        let query = ApplicationQuery {
            search: Some("doe".into()),
            status: Some("pending".into()),
            date_from: NaiveDate::from_ymd_opt(2023, 6, 1),
            date_to: NaiveDate::from_ymd_opt(2023, 6, 30),
        };
        assert!(!query.is_empty());
        assert_eq!(
            query.to_pairs(),
            vec![
                ("search".to_string(), "doe".to_string()),
                ("status".to_string(), "pending".to_string()),
                ("dateFrom".to_string(), "2023-06-01".to_string()),
                ("dateTo".to_string(), "2023-06-30".to_string()),
            ]
        );
    }
}
