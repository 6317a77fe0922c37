pub mod averages;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;

// Re-export common modules
pub use averages::model::{AveragedRecord, PriceRecord, YearMonth};
pub use averages::service::AverageService;
pub use config::Config;
pub use data::repository::PriceRepository;
pub use error::AppError;
