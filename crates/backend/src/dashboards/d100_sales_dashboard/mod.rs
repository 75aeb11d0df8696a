pub mod engine;
pub mod service;

pub use service::SalesDashboardService;
