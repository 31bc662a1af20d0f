//! Service layer: business logic coordination.

pub mod aggregator;
pub mod news_service;
pub mod user_service;

pub use aggregator::{AggregationOutcome, BatchContext, DetailAggregator, DetailField};
pub use news_service::NewsService;
pub use user_service::UserService;
