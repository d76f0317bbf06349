//! Reports module - The six KPI views over the enriched table

pub mod views;

use crate::charts::{ChartData, ChartKind};
use crate::config::PipelineConfig;
use crate::data::columns::*;
use crate::stats::StatsCalculator;
use log::debug;
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Polars error in {view:?}: {source}")]
    PolarsError {
        view: ReportView,
        #[source]
        source: PolarsError,
    },
}

/// One chart of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportView {
    LeadTimeDistribution,
    MonthlyOrderTrend,
    TopSuppliersByOrders,
    TopSuppliersByOnTimeRate,
    DefectRateByCategory,
    CorrelationHeatmap,
}

impl ReportView {
    pub const ALL: [ReportView; 6] = [
        ReportView::LeadTimeDistribution,
        ReportView::MonthlyOrderTrend,
        ReportView::TopSuppliersByOrders,
        ReportView::TopSuppliersByOnTimeRate,
        ReportView::DefectRateByCategory,
        ReportView::CorrelationHeatmap,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ReportView::LeadTimeDistribution => "Delivery Lead Time Distribution",
            ReportView::MonthlyOrderTrend => "Monthly Purchase Order Trend",
            ReportView::TopSuppliersByOrders => {
                "Top 10 Suppliers by Number of Purchase Orders (POs)"
            }
            ReportView::TopSuppliersByOnTimeRate => {
                "Top 10 Suppliers with the Highest On-Time Delivery Rate"
            }
            ReportView::DefectRateByCategory => "Defect Rate per Item Category",
            ReportView::CorrelationHeatmap => "Numerical Variable Correlation Heatmap",
        }
    }

    /// (x, y) axis labels.
    pub fn axis_labels(&self) -> (&'static str, &'static str) {
        match self {
            ReportView::LeadTimeDistribution => ("Lead Time (days)", "Count"),
            ReportView::MonthlyOrderTrend => ("Month", "Total PO"),
            ReportView::TopSuppliersByOrders => ("Supplier", "Total PO"),
            ReportView::TopSuppliersByOnTimeRate => ("Supplier", "On-Time Delivery Rate (%)"),
            ReportView::DefectRateByCategory => ("Item_Category", "Defect Rate (%)"),
            ReportView::CorrelationHeatmap => ("", ""),
        }
    }
}

/// Builds chart data for each view from the enriched table.
pub struct ReportBuilder<'a> {
    df: &'a DataFrame,
    config: &'a PipelineConfig,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(df: &'a DataFrame, config: &'a PipelineConfig) -> Self {
        Self { df, config }
    }

    /// All six views, in display order.
    pub fn build_all(&self) -> Result<Vec<ChartData>, ReportError> {
        ReportView::ALL
            .iter()
            .map(|&view| self.build(view))
            .collect()
    }

    /// Aggregate the table for a single view.
    pub fn build(&self, view: ReportView) -> Result<ChartData, ReportError> {
        let kind = self
            .aggregate(view)
            .map_err(|source| ReportError::PolarsError { view, source })?;
        let (x_label, y_label) = view.axis_labels();

        Ok(ChartData {
            view,
            title: view.title().to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            kind,
        })
    }

    fn aggregate(&self, view: ReportView) -> PolarsResult<ChartKind> {
        let df = self.df;
        let kind = match view {
            ReportView::LeadTimeDistribution => {
                let lead: Vec<f64> = numeric_values(df, LEAD_TIME_DAYS)?
                    .into_iter()
                    .flatten()
                    .collect();
                let histogram = StatsCalculator::histogram(&lead, self.config.histogram_bins);
                // Density scaled to counts so it overlays the bars.
                let scale = lead.len() as f64 * histogram.bin_width();
                let density = StatsCalculator::gaussian_kde(&lead, self.config.kde_points)
                    .into_iter()
                    .map(|[x, d]| [x, d * scale])
                    .collect();
                debug!("{:?}: {} lead times binned", view, lead.len());
                ChartKind::Histogram { histogram, density }
            }
            ReportView::MonthlyOrderTrend => {
                let trend = views::distinct_per_month(
                    &text_values(df, MONTH)?,
                    &text_values(df, PO_ID)?,
                );
                debug!("{:?}: {} months", view, trend.len());
                let (labels, values) = trend.into_iter().unzip();
                ChartKind::Line { labels, values }
            }
            ReportView::TopSuppliersByOrders => {
                let top = views::top_counts(&text_values(df, SUPPLIER)?, self.config.top_n);
                let (labels, values) = top.into_iter().unzip();
                ChartKind::Bar { labels, values }
            }
            ReportView::TopSuppliersByOnTimeRate => {
                let top = views::top_rates(
                    &text_values(df, SUPPLIER)?,
                    &text_values(df, ON_TIME_DELIVERY)?,
                    ON_TIME_YES,
                    self.config.top_n,
                );
                let (labels, values) = top.into_iter().unzip();
                ChartKind::Bar { labels, values }
            }
            ReportView::DefectRateByCategory => {
                let means = views::mean_by_label(
                    &text_values(df, ITEM_CATEGORY)?,
                    &numeric_values(df, DEFECT_RATE)?,
                );
                debug!("{:?}: {} categories", view, means.len());
                let (labels, values) = means.into_iter().unzip();
                ChartKind::Bar { labels, values }
            }
            ReportView::CorrelationHeatmap => {
                let columns = CORRELATION_COLUMNS
                    .iter()
                    .map(|name| numeric_values(df, name))
                    .collect::<PolarsResult<Vec<_>>>()?;
                ChartKind::Heatmap {
                    labels: CORRELATION_COLUMNS.iter().map(|s| s.to_string()).collect(),
                    matrix: StatsCalculator::correlation_matrix(&columns),
                }
            }
        };
        Ok(kind)
    }
}
