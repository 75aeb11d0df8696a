use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Filters of one dashboard recomputation.
///
/// `region` and `year` are pushed to the data source, `sellers` is applied
/// locally. Unset values select everything; an empty seller set means no
/// seller filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesFilter {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub sellers: BTreeSet<String>,
}

/// Query string of `GET /api/d100/sales_dashboard`.
///
/// Numeric parameters sent empty (`year=`) mean "unset".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesDashboardRequest {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub year: Option<i32>,
    /// Comma separated seller names
    #[serde(default)]
    pub sellers: Option<String>,
    /// Number of sellers in the "top sellers" charts
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub top_sellers: Option<usize>,
}

fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(de::Error::custom),
    }
}

impl SalesDashboardRequest {
    /// Split the request into the filter and the requested top-N
    pub fn into_filter(self) -> (SalesFilter, Option<usize>) {
        let sellers = self
            .sellers
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let filter = SalesFilter {
            region: self.region.filter(|r| !r.trim().is_empty()),
            year: self.year,
            sellers,
        };
        (filter, self.top_sellers)
    }
}

// ---------------------------------------------------------------------------
// Summary table rows
// ---------------------------------------------------------------------------

/// Calendar month a sale falls into.
///
/// Every field is derived from `period_end`, the last day of the month.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthBucket {
    pub period_end: NaiveDate,
    pub year: i32,
    pub month: u32,
    /// Localized month name, e.g. "Janeiro"
    pub month_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRevenue {
    pub location: String,
    pub lat: f64,
    pub lon: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSales {
    pub location: String,
    pub lat: f64,
    pub lon: f64,
    pub sales_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub month: MonthBucket,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySales {
    pub month: MonthBucket,
    pub sales_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySales {
    pub category: String,
    pub sales_count: u64,
}

/// Revenue and number of sales of one seller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerSummary {
    pub seller: String,
    pub revenue: f64,
    pub sales_count: u64,
}

/// Metric used to rank sellers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SellerMetric {
    Revenue,
    SalesCount,
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// The seven summary tables computed from one record store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub revenue_by_location: Vec<LocationRevenue>,
    pub revenue_by_month: Vec<MonthlyRevenue>,
    pub revenue_by_category: Vec<CategoryRevenue>,
    pub sales_by_location: Vec<LocationSales>,
    pub sales_by_month: Vec<MonthlySales>,
    pub sales_by_category: Vec<CategorySales>,
    pub sellers: Vec<SellerSummary>,
}

/// Everything the presentation layer needs to draw the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesDashboardResponse {
    pub filter: SalesFilter,
    pub total_revenue: f64,
    pub transaction_count: u64,
    /// e.g. "R$ 2.50 milhões"
    pub total_revenue_display: String,
    pub transaction_count_display: String,
    pub summary: SalesSummary,
    pub top_locations_by_revenue: Vec<LocationRevenue>,
    pub top_locations_by_count: Vec<LocationSales>,
    /// Effective N after clamping
    pub top_sellers: usize,
    pub top_sellers_by_revenue: Vec<SellerSummary>,
    pub top_sellers_by_count: Vec<SellerSummary>,
    /// Sellers available in the current region/year, before seller filtering
    pub seller_options: Vec<String>,
}
