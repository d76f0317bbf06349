//! Data module - CSV loading, cleaning and KPI enrichment

pub mod columns;
mod loader;
mod processor;

pub use loader::{DataLoader, LoaderError};
pub use processor::{DataProcessor, EnrichedTable, ProcessorError};
