use chrono::NaiveDate;
use contracts::domain::a001_sales_transaction::{RawTransaction, Transaction};
use std::collections::{BTreeSet, HashSet};

use crate::shared::error::{DashboardError, Result};

/// Формат даты покупки в ответе API
pub const PURCHASE_DATE_FORMAT: &str = "%d/%m/%Y";

/// Typed, immutable set of sales a dashboard is computed from.
///
/// Filtering never mutates a store, it builds a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    records: Vec<Transaction>,
}

impl RecordStore {
    /// Parse raw API rows. A single malformed date rejects the whole load.
    pub fn from_raw(raw: Vec<RawTransaction>) -> Result<Self> {
        let mut records = Vec::with_capacity(raw.len());

        for (row, item) in raw.into_iter().enumerate() {
            let purchase_date = parse_purchase_date(&item.purchase_date).ok_or_else(|| {
                DashboardError::InvalidPurchaseDate {
                    row,
                    value: item.purchase_date.clone(),
                }
            })?;
            records.push(Transaction::from_raw(item, purchase_date));
        }

        Ok(Self { records })
    }

    /// Keep only sales of the given sellers. An empty set keeps everything.
    pub fn with_sellers(&self, sellers: &BTreeSet<String>) -> Self {
        if sellers.is_empty() {
            return self.clone();
        }

        let records = self
            .records
            .iter()
            .filter(|t| sellers.contains(&t.seller))
            .cloned()
            .collect();

        Self { records }
    }

    /// Distinct sellers in order of first appearance
    pub fn seller_options(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|t| seen.insert(t.seller.as_str()))
            .map(|t| t.seller.clone())
            .collect()
    }

    pub fn records(&self) -> &[Transaction] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_revenue(&self) -> f64 {
        self.records.iter().map(|t| t.price).sum()
    }

    pub fn transaction_count(&self) -> u64 {
        self.records.len() as u64
    }
}

/// Strict `dd/mm/yyyy`: chrono skips whitespace before numeric fields,
/// padded values are refused here instead.
fn parse_purchase_date(value: &str) -> Option<NaiveDate> {
    if value.trim() != value {
        return None;
    }
    NaiveDate::parse_from_str(value, PURCHASE_DATE_FORMAT).ok()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn raw(
        price: f64,
        date: &str,
        location: &str,
        category: &str,
        seller: &str,
    ) -> RawTransaction {
        let (lat, lon) = coordinates(location);
        RawTransaction {
            product: format!("{} item", category),
            category: category.to_string(),
            price,
            purchase_date: date.to_string(),
            seller: seller.to_string(),
            location: location.to_string(),
            lat,
            lon,
        }
    }

    pub(crate) fn coordinates(location: &str) -> (f64, f64) {
        match location {
            "SP" => (-22.19, -48.79),
            "RJ" => (-22.25, -42.66),
            "MG" => (-18.10, -44.38),
            "BA" => (-13.29, -41.71),
            _ => (0.0, 0.0),
        }
    }

    pub(crate) fn sample_raw() -> Vec<RawTransaction> {
        vec![
            raw(100.0, "15/01/2021", "SP", "livros", "Ana Duarte"),
            raw(250.0, "03/01/2021", "RJ", "eletronicos", "Thiago Silva"),
            raw(40.0, "28/02/2021", "SP", "livros", "Thiago Silva"),
            raw(1200.0, "01/04/2021", "MG", "eletronicos", "Ana Duarte"),
            raw(75.5, "31/12/2020", "BA", "moveis", "Juliana Costa"),
            raw(300.0, "10/04/2021", "SP", "moveis", "Ana Duarte"),
        ]
    }

    pub(crate) fn sample_store() -> RecordStore {
        RecordStore::from_raw(sample_raw()).unwrap()
    }

    #[test]
    fn test_from_raw_parses_dates() {
        let store = sample_store();
        assert_eq!(store.len(), 6);
        assert_eq!(
            store.records()[0].purchase_date,
            NaiveDate::from_ymd_opt(2021, 1, 15).unwrap()
        );
        assert_eq!(
            store.records()[4].purchase_date,
            NaiveDate::from_ymd_opt(2020, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_malformed_date_rejects_whole_load() {
        let mut rows = sample_raw();
        rows.push(raw(10.0, "2021-01-15", "SP", "livros", "Ana Duarte"));

        let err = RecordStore::from_raw(rows).unwrap_err();
        match err {
            DashboardError::InvalidPurchaseDate { row, value } => {
                assert_eq!(row, 6);
                assert_eq!(value, "2021-01-15");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        for padded in [" 01/02/2021 ", " 01/02/2021", "01/02/2021\n"] {
            let rows = vec![raw(10.0, padded, "SP", "livros", "Ana Duarte")];
            assert!(matches!(
                RecordStore::from_raw(rows),
                Err(DashboardError::InvalidPurchaseDate { row: 0, .. })
            ));
        }
    }

    #[test]
    fn test_impossible_date_is_rejected() {
        let rows = vec![raw(10.0, "31/02/2021", "SP", "livros", "Ana Duarte")];
        assert!(RecordStore::from_raw(rows).is_err());
    }

    #[test]
    fn test_with_sellers() {
        let store = sample_store();

        let all = store.with_sellers(&BTreeSet::new());
        assert_eq!(all, store);

        let only_ana: BTreeSet<String> = ["Ana Duarte".to_string()].into();
        let filtered = store.with_sellers(&only_ana);
        assert_eq!(filtered.len(), 3);
        assert!(filtered.records().iter().all(|t| t.seller == "Ana Duarte"));
        // исходный набор не меняется
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn test_unknown_seller_yields_empty_store() {
        let unknown: BTreeSet<String> = ["Nobody".to_string()].into();
        assert!(sample_store().with_sellers(&unknown).is_empty());
    }

    #[test]
    fn test_seller_options_in_first_appearance_order() {
        assert_eq!(
            sample_store().seller_options(),
            vec!["Ana Duarte", "Thiago Silva", "Juliana Costa"]
        );
    }

    #[test]
    fn test_scalar_metrics() {
        let store = sample_store();
        assert!((store.total_revenue() - 1965.5).abs() < 1e-9);
        assert_eq!(store.transaction_count(), 6);

        let empty = RecordStore::from_raw(vec![]).unwrap();
        assert_eq!(empty.total_revenue(), 0.0);
        assert_eq!(empty.transaction_count(), 0);
    }
}
