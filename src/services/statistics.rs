//! Dashboard statistics.
//!
//! The backend exposes no statistics endpoint yet, so the figures are fixed.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_revenue: u64,
    pub new_orders: u64,
    pub active_products: u64,
}

impl Default for DashboardStats {
    fn default() -> Self {
        Self {
            total_users: 0,
            total_revenue: 0,
            new_orders: 0,
            active_products: 24,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatisticsService;

impl StatisticsService {
    pub fn new() -> Self {
        Self
    }

    /// Placeholder figures; no request is made
    pub fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_figures() {
        let stats = StatisticsService::new().dashboard_stats();
        assert_eq!(stats.active_products, 24);
        assert_eq!(stats.total_users, 0);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["activeProducts"], 24);
        assert_eq!(json["newOrders"], 0);
        assert_eq!(
            json,
            serde_json::json!({
                "totalUsers": 0,
                "totalRevenue": 0,
                "newOrders": 0,
                "activeProducts": 24,
            })
        );
    }
}
