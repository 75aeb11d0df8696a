use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Raw record (wire format of the products API)
// ============================================================================

/// One sale as returned by the products API.
///
/// The API sends more columns (freight, rating, payment type, installments);
/// only the ones the dashboard aggregates over are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    #[serde(rename = "Produto")]
    pub product: String,

    #[serde(rename = "Categoria do Produto")]
    pub category: String,

    #[serde(rename = "Preço")]
    pub price: f64,

    /// Дата покупки в формате `dd/mm/yyyy`
    #[serde(rename = "Data da Compra")]
    pub purchase_date: String,

    #[serde(rename = "Vendedor")]
    pub seller: String,

    #[serde(rename = "Local da compra")]
    pub location: String,

    pub lat: f64,
    pub lon: f64,
}

// ============================================================================
// Typed record
// ============================================================================

/// A sale with its purchase date parsed. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub price: f64,
    pub purchase_date: NaiveDate,
    pub location: String,
    pub lat: f64,
    pub lon: f64,
    pub category: String,
    pub seller: String,
    pub product: String,
}

impl Transaction {
    /// Build a typed record from its raw form and an already parsed date
    pub fn from_raw(raw: RawTransaction, purchase_date: NaiveDate) -> Self {
        Self {
            price: raw.price,
            purchase_date,
            location: raw.location,
            lat: raw.lat,
            lon: raw.lon,
            category: raw.category,
            seller: raw.seller,
            product: raw.product,
        }
    }
}
