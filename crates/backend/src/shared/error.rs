use thiserror::Error;

/// Ошибки загрузки и агрегации данных дашборда
#[derive(Debug, Error)]
pub enum DashboardError {
    /// A purchase date that is not `dd/mm/yyyy`. The whole load is rejected.
    #[error("row {row}: invalid purchase date '{value}', expected dd/mm/yyyy")]
    InvalidPurchaseDate { row: usize, value: String },

    #[error("location '{location}' has conflicting coordinates {first:?} and {second:?}")]
    LocationCoordinatesConflict {
        location: String,
        first: (f64, f64),
        second: (f64, f64),
    },

    #[error("data source error: {0}")]
    DataSource(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DashboardError {
    /// Bad upstream data, as opposed to a failure to reach the upstream
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            DashboardError::InvalidPurchaseDate { .. }
                | DashboardError::LocationCoordinatesConflict { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
