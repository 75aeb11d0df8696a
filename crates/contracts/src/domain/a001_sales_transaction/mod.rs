pub mod aggregate;

pub use aggregate::{RawTransaction, Transaction};
