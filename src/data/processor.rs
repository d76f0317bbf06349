//! Data Processor Module
//! Date parsing, the cleaned-file snapshot and KPI column derivation.

use crate::data::columns::*;
use crate::stats::StatsCalculator;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use log::{debug, info, warn};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

const MILLIS_PER_DAY: i64 = 86_400_000;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Failed to write cleaned file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("{count} Order_Date value(s) match no accepted date format (first: {first:?})")]
    UnparseableOrderDate { count: usize, first: String },
}

/// Enriched table plus the figures computed while enriching it.
pub struct EnrichedTable {
    pub df: DataFrame,
    /// Dataset-wide median of `Lead_Time_Days`, `None` if no row has one.
    pub median_lead_time: Option<f64>,
}

/// Cleaning and enrichment steps, applied in order by the pipeline.
pub struct DataProcessor;

impl DataProcessor {
    /// Parse `Order_Date` strictly and `Delivery_Date` leniently.
    ///
    /// Each value is tried against `date_formats` in order. A non-empty
    /// `Order_Date` that matches none of them fails the whole call; a bad
    /// `Delivery_Date` becomes null. A column whose values all fall on
    /// midnight is stored as a date, otherwise as a datetime.
    pub fn parse_dates(mut df: DataFrame, date_formats: &[String]) -> Result<DataFrame, ProcessorError> {
        let order_text = text_values(&df, ORDER_DATE)?;
        let order = Self::parse_timestamps(&order_text, date_formats);

        let rejected: Vec<&str> = order_text
            .iter()
            .zip(&order)
            .filter_map(|(text, parsed)| match (text, parsed) {
                (Some(text), None) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        if let Some(first) = rejected.first() {
            return Err(ProcessorError::UnparseableOrderDate {
                count: rejected.len(),
                first: first.to_string(),
            });
        }

        let delivery_text = text_values(&df, DELIVERY_DATE)?;
        let delivery = Self::parse_timestamps(&delivery_text, date_formats);
        let coerced = delivery_text
            .iter()
            .zip(&delivery)
            .filter(|(text, parsed)| text.is_some() && parsed.is_none())
            .count();
        if coerced > 0 {
            warn!("{} Delivery_Date values could not be parsed, set to null", coerced);
        }

        df.with_column(Self::date_series(ORDER_DATE, &order))?;
        df.with_column(Self::date_series(DELIVERY_DATE, &delivery))?;
        Ok(df)
    }

    /// Parse each value with the first matching format; nulls stay null.
    pub fn parse_timestamps(values: &[Option<String>], date_formats: &[String]) -> Vec<Option<NaiveDateTime>> {
        values
            .iter()
            .map(|v| v.as_deref().and_then(|text| Self::parse_timestamp(text.trim(), date_formats)))
            .collect()
    }

    fn parse_timestamp(text: &str, date_formats: &[String]) -> Option<NaiveDateTime> {
        date_formats.iter().find_map(|format| {
            NaiveDateTime::parse_from_str(text, format).ok().or_else(|| {
                NaiveDate::parse_from_str(text, format)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
        })
    }

    fn date_series(name: &str, values: &[Option<NaiveDateTime>]) -> Series {
        let midnight_only = values
            .iter()
            .flatten()
            .all(|ts| ts.num_seconds_from_midnight() == 0 && ts.nanosecond() == 0);
        if midnight_only {
            let dates: Vec<Option<NaiveDate>> = values.iter().map(|v| v.map(|ts| ts.date())).collect();
            Series::new(name.into(), dates)
        } else {
            Series::new(name.into(), values.to_vec())
        }
    }

    /// Write the table as CSV with a header and no index, replacing any existing file.
    pub fn write_cleaned(df: &mut DataFrame, path: &Path) -> Result<(), ProcessorError> {
        let mut file = File::create(path)?;
        CsvWriter::new(&mut file).include_header(true).finish(df)?;
        info!("Cleaned data saved to {} ({} rows)", path.display(), df.height());
        Ok(())
    }

    /// Derive the KPI columns and the grouping month.
    pub fn enrich(mut df: DataFrame) -> Result<EnrichedTable, ProcessorError> {
        let quantity = || col(QUANTITY).cast(DataType::Float64);
        let unit_price = || col(UNIT_PRICE).cast(DataType::Float64);

        let order = epoch_millis(&df, ORDER_DATE)?;
        let lead_times = Self::lead_times(&order, &epoch_millis(&df, DELIVERY_DATE)?);

        df.with_column(Series::new(LEAD_TIME_DAYS.into(), lead_times.clone()))?;
        let mut df = df
            .lazy()
            .with_columns([
                (quantity() * unit_price()).alias(TOTAL_COST),
                ((unit_price() - col(NEGOTIATED_PRICE).cast(DataType::Float64)) * quantity())
                    .alias(COST_SAVINGS),
                (col(DEFECTIVE_UNITS).cast(DataType::Float64) / quantity()).alias(DEFECT_RATE),
            ])
            .collect()?;

        let known: Vec<f64> = lead_times.iter().flatten().map(|&d| d as f64).collect();
        let median_lead_time = StatsCalculator::median(&known);
        match median_lead_time {
            Some(m) => info!("Median lead time: {} days over {} rows", m, known.len()),
            None => warn!("No row has a lead time; every delivery is marked late"),
        }

        let flags = Self::on_time_flags(&lead_times, median_lead_time);
        df.with_column(Column::new(ON_TIME_DELIVERY.into(), flags))?;

        let months = Self::order_months(&order);
        df.with_column(Column::new(MONTH.into(), months))?;

        let non_finite = numeric_values(&df, DEFECT_RATE)?
            .into_iter()
            .flatten()
            .filter(|v| !v.is_finite())
            .count();
        if non_finite > 0 {
            warn!("{} rows have a non-finite Defect_Rate (zero Quantity)", non_finite);
        }
        debug!("Enriched table: {} rows x {} columns", df.height(), df.width());

        Ok(EnrichedTable {
            df,
            median_lead_time,
        })
    }

    /// `"Yes"` when the lead time is known and does not exceed the median.
    pub fn on_time_flags(lead_times: &[Option<i64>], median: Option<f64>) -> Vec<&'static str> {
        lead_times
            .iter()
            .map(|lead| match (lead, median) {
                (Some(d), Some(m)) if (*d as f64) <= m => ON_TIME_YES,
                _ => ON_TIME_NO,
            })
            .collect()
    }

    /// Whole days from order to delivery, truncated toward zero.
    pub fn lead_times(order: &[Option<i64>], delivery: &[Option<i64>]) -> Vec<Option<i64>> {
        order
            .iter()
            .zip(delivery)
            .map(|pair| match pair {
                (Some(o), Some(d)) => Some((d - o) / MILLIS_PER_DAY),
                _ => None,
            })
            .collect()
    }

    /// Calendar month (`YYYY-MM`) of each epoch-millisecond timestamp.
    pub fn order_months(millis: &[Option<i64>]) -> Vec<Option<String>> {
        millis
            .iter()
            .map(|ms| {
                ms.and_then(DateTime::<Utc>::from_timestamp_millis)
                    .map(|ts| ts.format("%Y-%m").to_string())
            })
            .collect()
    }
}
