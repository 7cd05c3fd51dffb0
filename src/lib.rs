pub mod classify;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod table;

pub use classify::{AddressClassifier, ClassifierMode, RowClass, RowClassifier};
pub use config::CleanerConfig;
pub use error::{CleanerError, Result};
pub use normalize::normalize_address;
pub use pipeline::{CleanOutcome, CleanSummary, CleaningPipeline, RemovalCounts};
pub use report::CleanReport;
pub use table::{Row, Table};
