use async_trait::async_trait;
use contracts::dashboards::d100_sales_dashboard::SalesFilter;
use contracts::domain::a001_sales_transaction::RawTransaction;
use contracts::enums::region::Region;

use crate::shared::error::Result;

/// The part of the filter the data source applies itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesQuery {
    pub region: Option<String>,
    pub year: Option<i32>,
}

impl SalesQuery {
    pub fn from_filter(filter: &SalesFilter) -> Self {
        Self {
            region: filter.region.clone(),
            year: filter.year,
        }
    }

    /// Region as the API expects it: lower case, empty for the whole country
    pub fn region_param(&self) -> String {
        match self.region.as_deref() {
            None => String::new(),
            Some(label) => match Region::from_label(label) {
                Some(region) => region.query_value(),
                None => label.trim().to_lowercase(),
            },
        }
    }

    /// Query string pairs. Unset filters are sent as empty strings.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("região", self.region_param()),
            ("ano", self.year.map(|y| y.to_string()).unwrap_or_default()),
        ]
    }
}

/// Источник сырых продаж
#[async_trait]
pub trait SalesDataSource: Send + Sync {
    /// Fetch every sale matching the region/year query
    async fn fetch(&self, query: &SalesQuery) -> Result<Vec<RawTransaction>>;
}

/// Fixed in-memory data source. Applies no filtering of its own and records
/// the last query it received.
#[cfg(test)]
pub struct StaticSource {
    pub rows: Vec<RawTransaction>,
    pub last_query: std::sync::Mutex<Option<SalesQuery>>,
}

#[cfg(test)]
impl StaticSource {
    pub fn new(rows: Vec<RawTransaction>) -> Self {
        Self {
            rows,
            last_query: std::sync::Mutex::new(None),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl SalesDataSource for StaticSource {
    async fn fetch(&self, query: &SalesQuery) -> Result<Vec<RawTransaction>> {
        *self.last_query.lock().unwrap() = Some(query.clone());
        Ok(self.rows.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_filters_are_sent_empty() {
        let params = SalesQuery::default().query_params();
        assert_eq!(
            params,
            vec![("região", String::new()), ("ano", String::new())]
        );
    }

    #[test]
    fn test_region_is_lowercased() {
        let query = SalesQuery {
            region: Some("Centro-Oeste".to_string()),
            year: Some(2022),
        };
        assert_eq!(
            query.query_params(),
            vec![
                ("região", "centro-oeste".to_string()),
                ("ano", "2022".to_string())
            ]
        );
    }

    #[test]
    fn test_brasil_means_no_region() {
        let query = SalesQuery {
            region: Some("Brasil".to_string()),
            year: None,
        };
        assert_eq!(query.region_param(), "");
    }

    #[test]
    fn test_from_filter_ignores_sellers() {
        let mut filter = SalesFilter {
            region: Some("Sul".to_string()),
            year: Some(2020),
            ..Default::default()
        };
        filter.sellers.insert("Ana Duarte".to_string());

        let query = SalesQuery::from_filter(&filter);
        assert_eq!(query.region.as_deref(), Some("Sul"));
        assert_eq!(query.year, Some(2020));
    }
}
