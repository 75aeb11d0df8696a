use contracts::dashboards::d100_sales_dashboard::{
    SalesDashboardResponse, SalesFilter, SellerMetric,
};
use std::sync::Arc;

use super::engine;
use crate::domain::a001_sales_transaction::RecordStore;
use crate::shared::config::DashboardConfig;
use crate::shared::data::{SalesDataSource, SalesQuery};
use crate::shared::error::Result;
use crate::shared::format::format_metric;

/// Recomputes the sales dashboard for a filter.
///
/// Holds no dataset between calls: every request fetches, filters and
/// aggregates from scratch.
pub struct SalesDashboardService {
    source: Arc<dyn SalesDataSource>,
    settings: DashboardConfig,
}

impl SalesDashboardService {
    pub fn new(source: Arc<dyn SalesDataSource>, settings: DashboardConfig) -> Self {
        Self { source, settings }
    }

    /// Load the record store for a filter, returning it together with the
    /// seller options seen before seller filtering.
    pub async fn load(&self, filter: &SalesFilter) -> Result<(RecordStore, Vec<String>)> {
        let raw = self.source.fetch(&SalesQuery::from_filter(filter)).await?;
        let store = RecordStore::from_raw(raw)?;
        let seller_options = store.seller_options();
        Ok((store.with_sellers(&filter.sellers), seller_options))
    }

    pub async fn get_dashboard(
        &self,
        filter: SalesFilter,
        top_sellers: Option<usize>,
    ) -> Result<SalesDashboardResponse> {
        let (store, seller_options) = self.load(&filter).await?;
        let response = self.build_response(filter, &store, seller_options, top_sellers)?;

        tracing::info!(
            "Sales dashboard recomputed: {} sales, {} locations, {} months, {} sellers",
            response.transaction_count,
            response.summary.revenue_by_location.len(),
            response.summary.revenue_by_month.len(),
            response.summary.sellers.len()
        );

        Ok(response)
    }

    /// Aggregate an already filtered store
    pub fn build_response(
        &self,
        filter: SalesFilter,
        store: &RecordStore,
        seller_options: Vec<String>,
        top_sellers: Option<usize>,
    ) -> Result<SalesDashboardResponse> {
        let summary = engine::compute_summary(store)?;

        let total_revenue = store.total_revenue();
        let transaction_count = store.transaction_count();
        let top_n = engine::clamp_top_n(top_sellers.unwrap_or(self.settings.default_top_sellers));
        let top_locations = self.settings.top_locations;

        Ok(SalesDashboardResponse {
            filter,
            total_revenue,
            transaction_count,
            total_revenue_display: format_metric(total_revenue, &self.settings.revenue_prefix),
            transaction_count_display: format_metric(transaction_count as f64, ""),
            top_locations_by_revenue: engine::top_rows(&summary.revenue_by_location, top_locations),
            top_locations_by_count: engine::top_rows(&summary.sales_by_location, top_locations),
            top_sellers: top_n,
            top_sellers_by_revenue: engine::top_sellers(&summary.sellers, SellerMetric::Revenue, top_n),
            top_sellers_by_count: engine::top_sellers(&summary.sellers, SellerMetric::SalesCount, top_n),
            seller_options,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_sales_transaction::record_store::tests::{raw, sample_raw};
    use crate::shared::data::source::StaticSource;
    use crate::shared::error::DashboardError;
    use std::collections::BTreeSet;

    fn service(source: Arc<StaticSource>) -> SalesDashboardService {
        SalesDashboardService::new(source, DashboardConfig::default())
    }

    #[tokio::test]
    async fn test_dashboard_over_all_sales() {
        let source = Arc::new(StaticSource::new(sample_raw()));
        let response = service(source)
            .get_dashboard(SalesFilter::default(), None)
            .await
            .unwrap();

        assert_eq!(response.transaction_count, 6);
        assert!((response.total_revenue - 1965.5).abs() < 1e-9);
        assert!(response.total_revenue_display.starts_with("R$ 1.9"));
        assert!(response.total_revenue_display.ends_with(" mil"));
        assert_eq!(response.transaction_count_display, "6.00 ");
        assert_eq!(response.top_sellers, 5);
        assert_eq!(response.top_sellers_by_revenue.len(), 3);
        assert_eq!(response.top_locations_by_revenue.len(), 4);
        assert_eq!(response.summary.revenue_by_month.len(), 5);
        assert_eq!(
            response.seller_options,
            vec!["Ana Duarte", "Thiago Silva", "Juliana Costa"]
        );
    }

    #[tokio::test]
    async fn test_region_and_year_are_pushed_to_source() {
        let source = Arc::new(StaticSource::new(sample_raw()));
        let filter = SalesFilter {
            region: Some("Sudeste".to_string()),
            year: Some(2021),
            ..Default::default()
        };
        service(source.clone()).get_dashboard(filter, None).await.unwrap();

        let query = source.last_query.lock().unwrap().clone().unwrap();
        assert_eq!(query.region_param(), "sudeste");
        assert_eq!(query.year, Some(2021));
    }

    #[tokio::test]
    async fn test_seller_filter_is_local() {
        let source = Arc::new(StaticSource::new(sample_raw()));
        let filter = SalesFilter {
            sellers: BTreeSet::from(["Thiago Silva".to_string()]),
            ..Default::default()
        };
        let response = service(source).get_dashboard(filter, Some(1)).await.unwrap();

        assert_eq!(response.transaction_count, 2);
        assert!((response.total_revenue - 290.0).abs() < 1e-9);
        assert_eq!(response.summary.sellers.len(), 1);
        // опции продавцов считаются до фильтра по продавцам
        assert_eq!(response.seller_options.len(), 3);
        assert_eq!(response.top_sellers, 2);
    }

    #[tokio::test]
    async fn test_empty_source() {
        let source = Arc::new(StaticSource::new(vec![]));
        let response = service(source)
            .get_dashboard(SalesFilter::default(), Some(3))
            .await
            .unwrap();

        assert_eq!(response.total_revenue, 0.0);
        assert_eq!(response.transaction_count, 0);
        assert_eq!(response.total_revenue_display, "R$ 0.00 ");
        assert_eq!(response.transaction_count_display, "0.00 ");
        assert!(response.summary.revenue_by_location.is_empty());
        assert!(response.summary.sales_by_month.is_empty());
        assert!(response.top_sellers_by_count.is_empty());
        assert!(response.seller_options.is_empty());
    }

    #[tokio::test]
    async fn test_bad_date_fails_whole_request() {
        let mut rows = sample_raw();
        rows.push(raw(10.0, "15-01-2021", "SP", "livros", "Ana Duarte"));
        let source = Arc::new(StaticSource::new(rows));

        let err = service(source)
            .get_dashboard(SalesFilter::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::InvalidPurchaseDate { row: 6, .. }));
        assert!(err.is_data_integrity());
    }
}
