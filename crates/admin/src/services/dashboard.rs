//! Dashboard summary for the manager overview chart.

use serde::Serialize;
use tracing::instrument;

use super::catalog::{CatalogError, CatalogService};
use crate::models::Product;

/// Products plotted on the overview chart.
pub const CHART_LIMIT: usize = 12;

/// Figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Names of the first [`CHART_LIMIT`] products, in catalog order.
    pub labels: Vec<String>,
    /// Quantities matching `labels`.
    pub quantities: Vec<i64>,
    /// Number of products in the catalog.
    pub product_count: usize,
    /// Units in stock across the catalog, saturating at the `i64` bounds.
    pub total_quantity: i64,
    /// `price * quantity` summed across the catalog.
    pub inventory_value: f64,
}

impl DashboardSummary {
    /// Summarize `products`.
    #[must_use]
    pub fn from_products(products: &[Product]) -> Self {
        let charted = products.iter().take(CHART_LIMIT);
        Self {
            labels: charted.clone().map(|p| p.fields.name.clone()).collect(),
            quantities: charted.map(|p| p.fields.quantity).collect(),
            product_count: products.len(),
            total_quantity: products
                .iter()
                .map(|p| p.fields.quantity)
                .fold(0, i64::saturating_add),
            inventory_value: products.iter().map(Product::stock_value).sum(),
        }
    }
}

impl CatalogService {
    /// Dashboard figures for the current catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Store` if storage fails.
    #[instrument(skip(self))]
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, CatalogError> {
        let products = self.list_products().await?;
        Ok(DashboardSummary::from_products(&products))
    }
}
