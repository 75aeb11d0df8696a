use axum::{routing::get, Router};
use std::sync::Arc;

use crate::dashboards::d100_sales_dashboard::SalesDashboardService;
use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes(service: Arc<SalesDashboardService>) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // D100 Sales Dashboard
        .route(
            "/api/d100/sales_dashboard",
            get(handlers::d100_sales_dashboard::get_sales_dashboard),
        )
        .route(
            "/api/d100/regions",
            get(handlers::d100_sales_dashboard::list_regions),
        )
        .with_state(service)
}
