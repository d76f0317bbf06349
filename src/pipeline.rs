//! Pipeline Module
//! Load → clean/enrich → report, run once to completion.

use crate::charts::ChartData;
use crate::config::PipelineConfig;
use crate::data::columns::{text_values, INPUT_COLUMNS, LEAD_TIME_DAYS, ON_TIME_DELIVERY, ON_TIME_YES};
use crate::data::{DataLoader, DataProcessor, LoaderError, ProcessorError};
use crate::reports::{ReportBuilder, ReportError};
use log::{debug, info};
use polars::prelude::*;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("{} is missing required column(s): {}", path.display(), missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Headline figures shown next to the charts.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiSummary {
    pub input_path: PathBuf,
    pub cleaned_path: PathBuf,
    pub rows: usize,
    pub median_lead_time: Option<f64>,
    pub missing_lead_times: usize,
    /// Share of rows marked on time, in percent.
    pub on_time_rate: f64,
}

/// Everything the viewer needs.
pub struct PipelineOutput {
    pub df: DataFrame,
    pub summary: KpiSummary,
    pub charts: Vec<ChartData>,
}

/// Run every stage in order. The first failure aborts the run.
pub fn run(config: &PipelineConfig) -> Result<PipelineOutput, PipelineError> {
    let mut loader = DataLoader::new();
    loader.load_csv(&config.input_path)?;
    check_columns(&loader)?;
    let df = loader.into_dataframe()?;

    let mut df = DataProcessor::parse_dates(df, &config.date_formats)?;
    DataProcessor::write_cleaned(&mut df, &config.cleaned_path)?;

    let enriched = DataProcessor::enrich(df)?;
    let charts = ReportBuilder::new(&enriched.df, config).build_all()?;
    info!("Built {} report views", charts.len());

    let summary = summarize(&enriched.df, enriched.median_lead_time, config)?;
    Ok(PipelineOutput {
        df: enriched.df,
        summary,
        charts,
    })
}

fn check_columns(loader: &DataLoader) -> Result<(), PipelineError> {
    let columns = loader.get_columns();
    debug!("Input columns: {}", columns.join(", "));

    let missing: Vec<String> = INPUT_COLUMNS
        .iter()
        .copied()
        .filter(|name| !columns.iter().any(|c| c.as_str() == *name))
        .map(|name| name.to_string())
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(PipelineError::MissingColumns {
        path: loader.get_file_path().cloned().unwrap_or_default(),
        missing,
    })
}

fn summarize(
    df: &DataFrame,
    median_lead_time: Option<f64>,
    config: &PipelineConfig,
) -> PolarsResult<KpiSummary> {
    let rows = df.height();
    let on_time = text_values(df, ON_TIME_DELIVERY)?
        .iter()
        .filter(|flag| flag.as_deref() == Some(ON_TIME_YES))
        .count();
    let on_time_rate = if rows == 0 {
        0.0
    } else {
        on_time as f64 / rows as f64 * 100.0
    };

    Ok(KpiSummary {
        input_path: config.input_path.clone(),
        cleaned_path: config.cleaned_path.clone(),
        rows,
        median_lead_time,
        missing_lead_times: df.column(LEAD_TIME_DAYS)?.null_count(),
        on_time_rate,
    })
}
