//! Pipeline Configuration
//! Every path and parameter of a run lives here as a literal default.

use std::path::PathBuf;

/// Fixed input dataset.
pub const INPUT_PATH: &str = "Procurement KPI Analysis Dataset.csv";
/// Cleaned copy written after date parsing.
pub const CLEANED_PATH: &str = "procurement_kpi_cleaned.csv";

/// Settings for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub cleaned_path: PathBuf,
    /// strftime formats tried in order on `Order_Date` / `Delivery_Date`.
    /// A date-only format also matches at midnight.
    pub date_formats: Vec<String>,
    pub histogram_bins: usize,
    pub kde_points: usize,
    pub top_n: usize,
    pub window_size: [f32; 2],
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(INPUT_PATH),
            cleaned_path: PathBuf::from(CLEANED_PATH),
            date_formats: vec!["%Y-%m-%d %H:%M:%S".to_string(), "%Y-%m-%d".to_string()],
            histogram_bins: 20,
            kde_points: 200,
            top_n: 10,
            window_size: [1400.0, 900.0],
        }
    }
}
