use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use contracts::dashboards::d100_sales_dashboard::{SalesDashboardRequest, SalesDashboardResponse};
use contracts::enums::region::Region;
use std::sync::Arc;

use crate::dashboards::d100_sales_dashboard::SalesDashboardService;
use crate::shared::error::DashboardError;

/// Handler для пересчёта дашборда продаж
pub async fn get_sales_dashboard(
    State(service): State<Arc<SalesDashboardService>>,
    Query(req): Query<SalesDashboardRequest>,
) -> Result<Json<SalesDashboardResponse>, StatusCode> {
    let (filter, top_sellers) = req.into_filter();

    service
        .get_dashboard(filter, top_sellers)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("Failed to compute sales dashboard: {}", e);
            status_for(&e)
        })
}

/// Handler для списка регионов
pub async fn list_regions() -> Json<Vec<String>> {
    Json(
        Region::all()
            .into_iter()
            .map(|r| r.display_name().to_string())
            .collect(),
    )
}

fn status_for(error: &DashboardError) -> StatusCode {
    if error.is_data_integrity() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::BAD_GATEWAY
    }
}
