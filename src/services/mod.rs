//! Domain Services Module
//!
//! One service per resource family, each a thin set of verbs over
//! [`ApiClient`](crate::api::ApiClient).

pub mod applications;
pub mod auth;
pub mod products;
pub mod statistics;

pub use applications::{ApplicationQuery, ApplicationsService};
pub use auth::{AuthService, LoginResponse};
pub use products::{ProductFamily, ProductsService, ResourceService};
pub use statistics::{DashboardStats, StatisticsService};

use serde_json::Value;

/// Opaque backend record
pub type Record = Value;

/// Path of one item under `collection`; the id is percent-encoded as a single segment
pub fn item_path(collection: &str, id: &str) -> String {
    format!("{}/{}", collection, urlencoding::encode(id))
}

/// Elements of a list payload; anything but a JSON array is treated as empty
pub fn records_from(payload: Value) -> Vec<Record> {
    match payload {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}
