//! Product catalog service: windows, window models, materials and systems.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{ApiClient, ApiError};
use super::{item_path, records_from, Record};

/// Resource families of the product catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ProductFamily {
    Windows,
    WindowModels,
    Materials,
    Systems,
}

impl ProductFamily {
    pub const ALL: [ProductFamily; 4] = [
        ProductFamily::Windows,
        ProductFamily::WindowModels,
        ProductFamily::Materials,
        ProductFamily::Systems,
    ];

    /// REST collection path
    pub fn path(self) -> &'static str {
        match self {
            ProductFamily::Windows => "/window",
            ProductFamily::WindowModels => "/window/model",
            ProductFamily::Materials => "/materials",
            ProductFamily::Systems => "/systems",
        }
    }
}

impl std::fmt::Display for ProductFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductFamily::Windows => write!(f, "windows"),
            ProductFamily::WindowModels => write!(f, "window-models"),
            ProductFamily::Materials => write!(f, "materials"),
            ProductFamily::Systems => write!(f, "systems"),
        }
    }
}

/// CRUD verbs over one product family
#[derive(Debug, Clone)]
pub struct ResourceService {
    api: ApiClient,
    family: ProductFamily,
}

impl ResourceService {
    pub fn new(api: ApiClient, family: ProductFamily) -> Self {
        Self { api, family }
    }

    pub fn family(&self) -> ProductFamily {
        self.family
    }

    pub async fn list(&self) -> Result<Vec<Record>, ApiError> {
        self.api.get(self.family.path()).await.map(records_from)
    }

    pub async fn get(&self, id: &str) -> Result<Value, ApiError> {
        self.api.get(&self.item_path(id)).await
    }

    pub async fn create(&self, data: Value) -> Result<Value, ApiError> {
        self.api.post(self.family.path(), data).await
    }

    pub async fn update(&self, id: &str, data: Value) -> Result<Value, ApiError> {
        self.api.put(&self.item_path(id), data).await
    }

    pub async fn delete(&self, id: &str) -> Result<Value, ApiError> {
        self.api.delete(&self.item_path(id)).await
    }

    fn item_path(&self, id: &str) -> String {
        item_path(self.family.path(), id)
    }
}

/// Catalog service grouping the four families
#[derive(Debug, Clone)]
pub struct ProductsService {
    api: ApiClient,
}

impl ProductsService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn family(&self, family: ProductFamily) -> ResourceService {
        ResourceService::new(self.api.clone(), family)
    }

    pub fn windows(&self) -> ResourceService {
        self.family(ProductFamily::Windows)
    }

    pub fn window_models(&self) -> ResourceService {
        self.family(ProductFamily::WindowModels)
    }

    pub fn materials(&self) -> ResourceService {
        self.family(ProductFamily::Materials)
    }

    pub fn systems(&self) -> ResourceService {
        self.family(ProductFamily::Systems)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_paths() {
        assert_eq!(ProductFamily::Windows.path(), "/window");
        assert_eq!(ProductFamily::WindowModels.path(), "/window/model");
        assert_eq!(ProductFamily::Materials.path(), "/materials");
        assert_eq!(ProductFamily::Systems.path(), "/systems");
    }

    #[test]
    fn family_display_matches_serde() {
        for family in ProductFamily::ALL {
            let json = serde_json::to_string(&family).unwrap();
            assert_eq!(json, format!("\"{}\"", family));
        }
    }
}
