use async_trait::async_trait;
use contracts::domain::a001_sales_transaction::RawTransaction;

use super::source::{SalesDataSource, SalesQuery};
use crate::shared::config::DataSourceConfig;
use crate::shared::error::{DashboardError, Result};

/// HTTP-клиент для API продаж
pub struct ProductsApiClient {
    client: reqwest::Client,
    url: String,
}

impl ProductsApiClient {
    pub fn new(config: &DataSourceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SalesDataSource for ProductsApiClient {
    async fn fetch(&self, query: &SalesQuery) -> Result<Vec<RawTransaction>> {
        let params = query.query_params();
        tracing::debug!("GET {} {:?}", self.url, params);

        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Products API request failed: {} {}", status, body);
            return Err(DashboardError::DataSource(format!(
                "products API returned {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;

        match serde_json::from_str::<Vec<RawTransaction>>(&body) {
            Ok(rows) => {
                tracing::info!("Fetched {} sales from products API", rows.len());
                Ok(rows)
            }
            Err(e) => {
                let preview: String = body.chars().take(500).collect();
                tracing::error!("Failed to parse products API response: {}", e);
                tracing::error!("Response body: {}", preview);
                Err(e.into())
            }
        }
    }
}
