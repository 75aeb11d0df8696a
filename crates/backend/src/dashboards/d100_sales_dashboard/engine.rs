//! Summary tables of the sales dashboard.
//!
//! Every function takes the current record store and builds one table from
//! scratch. Nothing here performs I/O or keeps state between calls.

use chrono::{Datelike, Months, NaiveDate};
use contracts::dashboards::d100_sales_dashboard::{
    CategoryRevenue, CategorySales, LocationRevenue, LocationSales, MonthBucket, MonthlyRevenue,
    MonthlySales, SalesSummary, SellerMetric, SellerSummary,
};
use contracts::domain::a001_sales_transaction::Transaction;
use std::collections::{BTreeMap, HashMap};

use crate::domain::a001_sales_transaction::RecordStore;
use crate::shared::error::{DashboardError, Result};

/// Bounds of the "top sellers" selector
pub const MIN_TOP_SELLERS: usize = 2;
pub const MAX_TOP_SELLERS: usize = 10;

const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

// ---------------------------------------------------------------------------
// Grouping helpers
// ---------------------------------------------------------------------------

/// Group records by a string key, keeping groups in order of first appearance
fn group_in_order<V, K, F>(store: &RecordStore, key: K, mut fold: F) -> Vec<(String, V)>
where
    V: Default,
    K: Fn(&Transaction) -> &str,
    F: FnMut(&mut V, &Transaction),
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, V)> = Vec::new();

    for t in store.records() {
        let k = key(t);
        let pos = *index.entry(k).or_insert_with(|| {
            groups.push((k.to_string(), V::default()));
            groups.len() - 1
        });
        fold(&mut groups[pos].1, t);
    }

    groups
}

/// Group records by month, then fill the months between the first and the
/// last populated one with empty groups.
fn group_by_month<V, F>(store: &RecordStore, mut fold: F) -> Vec<(MonthBucket, V)>
where
    V: Default,
    F: FnMut(&mut V, &Transaction),
{
    let mut groups: BTreeMap<NaiveDate, V> = BTreeMap::new();
    for t in store.records() {
        fold(groups.entry(month_end(t.purchase_date)).or_default(), t);
    }

    let (first, last) = match (groups.keys().next(), groups.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };

    let mut rows = Vec::new();
    let mut current = first;
    loop {
        let value = groups.remove(&current).unwrap_or_default();
        rows.push((month_bucket(current), value));

        if current >= last {
            break;
        }
        match current.succ_opt() {
            Some(next_month_start) => current = month_end(next_month_start),
            None => break,
        }
    }

    rows
}

/// Distinct `(location, lat, lon)` in order of first appearance.
///
/// A location reported with two different coordinate pairs is rejected.
fn location_coordinates(store: &RecordStore) -> Result<Vec<(String, f64, f64)>> {
    let mut seen: HashMap<&str, (f64, f64)> = HashMap::new();
    let mut locations = Vec::new();

    for t in store.records() {
        match seen.get(t.location.as_str()) {
            Some(&(lat, lon)) => {
                if lat != t.lat || lon != t.lon {
                    return Err(DashboardError::LocationCoordinatesConflict {
                        location: t.location.clone(),
                        first: (lat, lon),
                        second: (t.lat, t.lon),
                    });
                }
            }
            None => {
                seen.insert(t.location.as_str(), (t.lat, t.lon));
                locations.push((t.location.clone(), t.lat, t.lon));
            }
        }
    }

    Ok(locations)
}

/// Join per-location metrics onto the deduplicated coordinates.
/// Produces exactly one row per distinct location.
fn join_coordinates<V: Copy, R>(
    store: &RecordStore,
    metrics: Vec<(String, V)>,
    build: impl Fn(String, f64, f64, V) -> R,
) -> Result<Vec<R>> {
    let coordinates = location_coordinates(store)?;
    let metrics: HashMap<String, V> = metrics.into_iter().collect();

    Ok(coordinates
        .into_iter()
        .filter_map(|(location, lat, lon)| {
            let value = *metrics.get(&location)?;
            Some(build(location, lat, lon, value))
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Month buckets
// ---------------------------------------------------------------------------

/// Last day of the month `date` falls in
pub fn month_end(date: NaiveDate) -> NaiveDate {
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        // only December of the last representable year overflows
        .unwrap_or(NaiveDate::MAX)
}

/// Month bucket of a date. Year, month number and name all come from the
/// same truncated date.
pub fn month_bucket(date: NaiveDate) -> MonthBucket {
    let period_end = month_end(date);
    MonthBucket {
        period_end,
        year: period_end.year(),
        month: period_end.month(),
        month_name: MONTH_NAMES[period_end.month0() as usize].to_string(),
    }
}

// ---------------------------------------------------------------------------
// Revenue tables
// ---------------------------------------------------------------------------

/// Sum of prices per location, largest first
pub fn revenue_by_location(store: &RecordStore) -> Result<Vec<LocationRevenue>> {
    let sums = group_in_order(store, |t| t.location.as_str(), |sum: &mut f64, t| *sum += t.price);

    let mut rows = join_coordinates(store, sums, |location, lat, lon, revenue| {
        LocationRevenue {
            location,
            lat,
            lon,
            revenue,
        }
    })?;
    rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    Ok(rows)
}

/// Sum of prices per calendar month, oldest first
pub fn revenue_by_month(store: &RecordStore) -> Vec<MonthlyRevenue> {
    group_by_month(store, |sum: &mut f64, t| *sum += t.price)
        .into_iter()
        .map(|(month, revenue)| MonthlyRevenue { month, revenue })
        .collect()
}

/// Sum of prices per product category, largest first
pub fn revenue_by_category(store: &RecordStore) -> Vec<CategoryRevenue> {
    let mut rows: Vec<CategoryRevenue> =
        group_in_order(store, |t| t.category.as_str(), |sum: &mut f64, t| *sum += t.price)
            .into_iter()
            .map(|(category, revenue)| CategoryRevenue { category, revenue })
            .collect();
    rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    rows
}

// ---------------------------------------------------------------------------
// Sales count tables
// ---------------------------------------------------------------------------

/// Number of sales per location, largest first
pub fn sales_by_location(store: &RecordStore) -> Result<Vec<LocationSales>> {
    let counts = group_in_order(store, |t| t.location.as_str(), |n: &mut u64, _| *n += 1);

    let mut rows = join_coordinates(store, counts, |location, lat, lon, sales_count| {
        LocationSales {
            location,
            lat,
            lon,
            sales_count,
        }
    })?;
    rows.sort_by(|a, b| b.sales_count.cmp(&a.sales_count));
    Ok(rows)
}

/// Number of sales per calendar month, oldest first
pub fn sales_by_month(store: &RecordStore) -> Vec<MonthlySales> {
    group_by_month(store, |n: &mut u64, _| *n += 1)
        .into_iter()
        .map(|(month, sales_count)| MonthlySales { month, sales_count })
        .collect()
}

/// Number of sales per product category, largest first
pub fn sales_by_category(store: &RecordStore) -> Vec<CategorySales> {
    let mut rows: Vec<CategorySales> =
        group_in_order(store, |t| t.category.as_str(), |n: &mut u64, _| *n += 1)
            .into_iter()
            .map(|(category, sales_count)| CategorySales {
                category,
                sales_count,
            })
            .collect();
    rows.sort_by(|a, b| b.sales_count.cmp(&a.sales_count));
    rows
}

// ---------------------------------------------------------------------------
// Sellers
// ---------------------------------------------------------------------------

/// Revenue and sales count per seller, ordered by seller name
pub fn seller_summary(store: &RecordStore) -> Vec<SellerSummary> {
    let mut totals: BTreeMap<&str, (f64, u64)> = BTreeMap::new();
    for t in store.records() {
        let entry = totals.entry(t.seller.as_str()).or_default();
        entry.0 += t.price;
        entry.1 += 1;
    }

    totals
        .into_iter()
        .map(|(seller, (revenue, sales_count))| SellerSummary {
            seller: seller.to_string(),
            revenue,
            sales_count,
        })
        .collect()
}

/// Clamp the requested number of sellers to the selector bounds
pub fn clamp_top_n(n: usize) -> usize {
    n.clamp(MIN_TOP_SELLERS, MAX_TOP_SELLERS)
}

/// The `n` best sellers by `metric`. Ties keep the summary order.
pub fn top_sellers(sellers: &[SellerSummary], metric: SellerMetric, n: usize) -> Vec<SellerSummary> {
    let mut ranked = sellers.to_vec();
    match metric {
        SellerMetric::Revenue => ranked.sort_by(|a, b| b.revenue.total_cmp(&a.revenue)),
        SellerMetric::SalesCount => ranked.sort_by(|a, b| b.sales_count.cmp(&a.sales_count)),
    }
    ranked.truncate(clamp_top_n(n));
    ranked
}

/// First `n` rows of an already sorted table
pub fn top_rows<T: Clone>(rows: &[T], n: usize) -> Vec<T> {
    rows.iter().take(n).cloned().collect()
}

// ---------------------------------------------------------------------------
// All tables at once
// ---------------------------------------------------------------------------

pub fn compute_summary(store: &RecordStore) -> Result<SalesSummary> {
    Ok(SalesSummary {
        revenue_by_location: revenue_by_location(store)?,
        revenue_by_month: revenue_by_month(store),
        revenue_by_category: revenue_by_category(store),
        sales_by_location: sales_by_location(store)?,
        sales_by_month: sales_by_month(store),
        sales_by_category: sales_by_category(store),
        sellers: seller_summary(store),
    })
}
