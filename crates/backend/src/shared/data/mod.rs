pub mod products_api_client;
pub mod source;

pub use products_api_client::ProductsApiClient;
pub use source::{SalesDataSource, SalesQuery};
