use procurement_kpi::charts::ChartKind;
use procurement_kpi::data::columns::*;
use procurement_kpi::data::{DataLoader, LoaderError, ProcessorError};
use procurement_kpi::reports::ReportView;
use procurement_kpi::{run, PipelineConfig, PipelineError, PipelineOutput};
use std::fs;
use std::path::PathBuf;

const HEADER: &str =
    "PO_ID,Supplier,Order_Date,Delivery_Date,Item_Category,Quantity,Unit_Price,Negotiated_Price,Defective_Units";

/// Write `rows` under the standard header into a fresh temp directory.
fn fixture(name: &str, rows: &[&str]) -> PipelineConfig {
    let dir = std::env::temp_dir().join(format!("procurement_kpi_{}_{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let input = dir.join("input.csv");
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    fs::write(&input, text).unwrap();

    PipelineConfig {
        input_path: input,
        cleaned_path: dir.join("cleaned.csv"),
        ..PipelineConfig::default()
    }
}

fn chart(output: &PipelineOutput, view: ReportView) -> &ChartKind {
    &output
        .charts
        .iter()
        .find(|c| c.view == view)
        .expect("view missing")
        .kind
}

fn lead_time_rows() -> Vec<&'static str> {
    vec![
        "PO-1,Alpha,2023-01-01,2023-01-03,Office,10,5.0,4.5,1",
        "PO-2,Beta,2023-01-01,2023-01-05,Office,20,2.5,2.0,0",
        "PO-3,Alpha,2023-02-01,2023-02-07,Metal,4,100.0,110.0,2",
        "PO-4,Gamma,2023-02-10,2023-02-18,Metal,8,12.25,12.0,4",
    ]
}

#[test]
fn median_lead_time_splits_on_time_flags() {
    let config = fixture("median", &lead_time_rows());
    let output = run(&config).unwrap();

    let lead = numeric_values(&output.df, LEAD_TIME_DAYS).unwrap();
    assert_eq!(lead, vec![Some(2.0), Some(4.0), Some(6.0), Some(8.0)]);
    assert_eq!(output.summary.median_lead_time, Some(5.0));

    let flags: Vec<String> = text_values(&output.df, ON_TIME_DELIVERY)
        .unwrap()
        .into_iter()
        .map(|f| f.unwrap())
        .collect();
    assert_eq!(flags, vec!["Yes", "Yes", "No", "No"]);
    assert_eq!(output.summary.on_time_rate, 50.0);
}

#[test]
fn kpi_columns_follow_their_formulas() {
    let config = fixture("formulas", &lead_time_rows());
    let output = run(&config).unwrap();
    let df = &output.df;

    let qty = numeric_values(df, QUANTITY).unwrap();
    let unit = numeric_values(df, UNIT_PRICE).unwrap();
    let negotiated = numeric_values(df, NEGOTIATED_PRICE).unwrap();
    let defective = numeric_values(df, DEFECTIVE_UNITS).unwrap();
    let total = numeric_values(df, TOTAL_COST).unwrap();
    let savings = numeric_values(df, COST_SAVINGS).unwrap();
    let defect_rate = numeric_values(df, DEFECT_RATE).unwrap();

    for i in 0..df.height() {
        let (q, u, n, d) = (
            qty[i].unwrap(),
            unit[i].unwrap(),
            negotiated[i].unwrap(),
            defective[i].unwrap(),
        );
        assert_eq!(total[i], Some(q * u));
        assert_eq!(savings[i], Some((u - n) * q));
        assert_eq!(defect_rate[i], Some(d / q));
    }
    // Negotiated above list price gives negative savings.
    assert!(savings[2].unwrap() < 0.0);
}

#[test]
fn cleaned_file_has_parsed_dates_but_no_kpis() {
    let config = fixture("cleaned", &lead_time_rows());
    let output = run(&config).unwrap();

    let text = fs::read_to_string(&config.cleaned_path).unwrap();
    let mut lines = text.lines();
    let header: Vec<&str> = lines.next().unwrap().split(',').collect();
    assert_eq!(header, HEADER.split(',').collect::<Vec<_>>());
    for derived in DERIVED_COLUMNS {
        assert!(!header.contains(&derived), "{derived} leaked into cleaned file");
    }

    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), output.df.height());
    assert!(rows[0].starts_with("PO-1,Alpha,2023-01-01,2023-01-03,"));

    // The enriched table itself does carry them.
    for derived in DERIVED_COLUMNS {
        assert!(output.df.column(derived).is_ok());
    }
}

#[test]
fn cleaned_file_is_overwritten() {
    let config = fixture("overwrite", &lead_time_rows());
    fs::write(&config.cleaned_path, "stale\ncontent\nwith\nmany\nmore\nlines\n").unwrap();
    run(&config).unwrap();

    let text = fs::read_to_string(&config.cleaned_path).unwrap();
    assert!(!text.contains("stale"));
    assert_eq!(text.lines().count(), 1 + 4);
}

#[test]
fn unparseable_delivery_date_becomes_null() {
    let mut rows = lead_time_rows();
    rows.push("PO-5,Beta,2023-03-01,pending,Office,5,1.0,1.0,0");
    let config = fixture("delivery", &rows);
    let output = run(&config).unwrap();

    let lead = numeric_values(&output.df, LEAD_TIME_DAYS).unwrap();
    assert_eq!(lead[4], None);
    assert_eq!(output.summary.missing_lead_times, 1);
    // Median still over the four known lead times.
    assert_eq!(output.summary.median_lead_time, Some(5.0));

    let flags = text_values(&output.df, ON_TIME_DELIVERY).unwrap();
    assert_eq!(flags[4].as_deref(), Some(ON_TIME_NO));

    match chart(&output, ReportView::LeadTimeDistribution) {
        ChartKind::Histogram { histogram, .. } => {
            assert_eq!(histogram.counts.len(), config.histogram_bins);
            assert_eq!(histogram.total(), 4);
        }
        other => panic!("unexpected chart {other:?}"),
    }
}

#[test]
fn zero_quantity_defect_rate_is_non_finite_and_skipped_in_mean() {
    let rows = [
        "PO-1,Alpha,2023-01-01,2023-01-03,Office,10,5.0,4.5,1",
        "PO-2,Beta,2023-01-02,2023-01-04,Office,0,5.0,4.5,3",
        "PO-3,Beta,2023-01-02,2023-01-04,Metal,4,5.0,4.5,2",
    ];
    let config = fixture("zero_qty", &rows);
    let output = run(&config).unwrap();

    let rates = numeric_values(&output.df, DEFECT_RATE).unwrap();
    assert!(!rates[1].unwrap().is_finite());

    match chart(&output, ReportView::DefectRateByCategory) {
        ChartKind::Bar { labels, values } => {
            assert_eq!(labels, &vec!["Metal".to_string(), "Office".to_string()]);
            assert_eq!(values, &vec![0.5, 0.1]);
        }
        other => panic!("unexpected chart {other:?}"),
    }
}

#[test]
fn top_suppliers_view_keeps_ten_of_fifteen() {
    let mut owned = Vec::new();
    for s in 0..15 {
        for r in 0..=s {
            owned.push(format!(
                "PO-{s}-{r},Supplier{s:02},2023-01-01,2023-01-0{},Office,1,1.0,1.0,0",
                1 + (r % 5)
            ));
        }
    }
    let rows: Vec<&str> = owned.iter().map(String::as_str).collect();
    let config = fixture("top_suppliers", &rows);
    let output = run(&config).unwrap();

    match chart(&output, ReportView::TopSuppliersByOrders) {
        ChartKind::Bar { labels, values } => {
            assert_eq!(labels.len(), 10);
            assert_eq!(labels[0], "Supplier14");
            assert_eq!(values[0], 15.0);
            assert!(values.windows(2).all(|w| w[0] >= w[1]));
        }
        other => panic!("unexpected chart {other:?}"),
    }
    match chart(&output, ReportView::TopSuppliersByOnTimeRate) {
        ChartKind::Bar { labels, values } => {
            assert_eq!(labels.len(), 10);
            assert!(values.iter().all(|v| (0.0..=100.0).contains(v)));
        }
        other => panic!("unexpected chart {other:?}"),
    }
}

#[test]
fn monthly_trend_counts_distinct_orders() {
    let rows = [
        "PO-1,Alpha,2023-01-01,2023-01-03,Office,1,1.0,1.0,0",
        "PO-1,Alpha,2023-01-15,2023-01-18,Office,1,1.0,1.0,0",
        "PO-2,Beta,2023-01-20,2023-01-22,Office,1,1.0,1.0,0",
        "PO-3,Beta,2023-03-02,2023-03-04,Office,1,1.0,1.0,0",
    ];
    let config = fixture("monthly", &rows);
    let output = run(&config).unwrap();

    match chart(&output, ReportView::MonthlyOrderTrend) {
        ChartKind::Line { labels, values } => {
            assert_eq!(labels, &vec!["2023-01".to_string(), "2023-03".to_string()]);
            assert_eq!(values, &vec![2.0, 1.0]);
        }
        other => panic!("unexpected chart {other:?}"),
    }
}

#[test]
fn correlation_heatmap_covers_the_seven_numeric_columns() {
    let config = fixture("correlation", &lead_time_rows());
    let output = run(&config).unwrap();

    match chart(&output, ReportView::CorrelationHeatmap) {
        ChartKind::Heatmap { labels, matrix } => {
            assert_eq!(labels, &CORRELATION_COLUMNS.map(String::from).to_vec());
            assert_eq!(matrix.len(), 7);
            for (i, row) in matrix.iter().enumerate() {
                assert_eq!(row.len(), 7);
                assert!((row[i] - 1.0).abs() < 1e-9);
            }
        }
        other => panic!("unexpected chart {other:?}"),
    }
    assert_eq!(output.charts.len(), ReportView::ALL.len());
}

#[test]
fn unparseable_order_date_aborts() {
    let rows = [
        "PO-1,Alpha,2023-01-01,2023-01-03,Office,1,1.0,1.0,0",
        "PO-2,Alpha,01/15/2023,2023-01-18,Office,1,1.0,1.0,0",
    ];
    let config = fixture("bad_order_date", &rows);
    assert!(matches!(run(&config), Err(PipelineError::Processor(_))));
}

#[test]
fn every_unparseable_order_date_is_counted() {
    let rows = [
        "PO-1,Alpha,2023-01-01,2023-01-03,Office,1,1.0,1.0,0",
        "PO-2,Alpha,01/15/2023,2023-01-18,Office,1,1.0,1.0,0",
        "PO-3,Beta,soon,2023-01-18,Office,1,1.0,1.0,0",
    ];
    let config = fixture("bad_order_dates", &rows);
    match run(&config) {
        Err(PipelineError::Processor(ProcessorError::UnparseableOrderDate { count, first })) => {
            assert_eq!(count, 2);
            assert_eq!(first, "01/15/2023");
        }
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("bad order dates were accepted"),
    }
    // Aborts before the cleaned file is written.
    assert!(!config.cleaned_path.exists());
}

#[test]
fn timestamp_dates_give_truncated_lead_times() {
    let rows = [
        "PO-1,Alpha,2023-01-01 14:30:00,2023-01-03 08:00:00,Office,1,1.0,1.0,0",
        "PO-2,Beta,2023-01-02 00:00:00,2023-01-06 00:00:00,Office,1,1.0,1.0,0",
        "PO-3,Beta,2023-01-05,2023-01-05 12:00:00,Office,1,1.0,1.0,0",
    ];
    let config = fixture("timestamps", &rows);
    let output = run(&config).unwrap();

    let lead = numeric_values(&output.df, LEAD_TIME_DAYS).unwrap();
    assert_eq!(lead, vec![Some(1.0), Some(4.0), Some(0.0)]);
    assert_eq!(output.summary.missing_lead_times, 0);
    assert_eq!(output.summary.median_lead_time, Some(1.0));

    let flags = text_values(&output.df, ON_TIME_DELIVERY).unwrap();
    assert_eq!(
        flags,
        vec![Some("Yes".to_string()), Some("No".to_string()), Some("Yes".to_string())]
    );

    let months = text_values(&output.df, MONTH).unwrap();
    assert!(months.iter().all(|m| m.as_deref() == Some("2023-01")));

    let text = fs::read_to_string(&config.cleaned_path).unwrap();
    let first_row = text.lines().nth(1).unwrap();
    assert!(first_row.starts_with("PO-1,Alpha,2023-01-01"));
    assert!(first_row.contains("14:30:00"));
}

#[test]
fn empty_order_date_is_kept_without_a_month() {
    let mut rows = lead_time_rows();
    rows.push("PO-5,Beta,,2023-03-04,Office,1,1.0,1.0,0");
    let config = fixture("empty_order_date", &rows);
    let output = run(&config).unwrap();
    assert_eq!(output.summary.rows, 5);

    let months = text_values(&output.df, MONTH).unwrap();
    assert_eq!(months[0].as_deref(), Some("2023-01"));
    assert_eq!(months[4], None);

    let lead = numeric_values(&output.df, LEAD_TIME_DAYS).unwrap();
    assert_eq!(lead[4], None);
    assert_eq!(output.summary.missing_lead_times, 1);

    match chart(&output, ReportView::MonthlyOrderTrend) {
        ChartKind::Line { labels, values } => {
            assert_eq!(labels, &vec!["2023-01".to_string(), "2023-02".to_string()]);
            assert_eq!(values, &vec![2.0, 2.0]);
        }
        other => panic!("unexpected chart {other:?}"),
    }
}

#[test]
fn missing_column_aborts() {
    let dir = std::env::temp_dir().join(format!("procurement_kpi_missing_col_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let input = dir.join("input.csv");
    fs::write(&input, "PO_ID,Supplier,Order_Date\nPO-1,Alpha,2023-01-01\n").unwrap();
    let config = PipelineConfig {
        input_path: input,
        cleaned_path: dir.join("cleaned.csv"),
        ..PipelineConfig::default()
    };
    match run(&config) {
        Err(PipelineError::MissingColumns { path, missing }) => {
            assert_eq!(path, config.input_path);
            assert!(missing.contains(&"Delivery_Date".to_string()));
            assert_eq!(missing.len(), 6);
        }
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("incomplete input was accepted"),
    }
    assert!(!config.cleaned_path.exists());
}

#[test]
fn missing_input_file_is_a_load_error() {
    let path = PathBuf::from("definitely/not/here.csv");
    let mut loader = DataLoader::new();
    assert!(matches!(loader.load_csv(&path), Err(LoaderError::CsvError { .. })));
    assert_eq!(loader.get_row_count(), 0);
}

#[test]
fn loader_reports_columns_and_rows() {
    let config = fixture("loader", &lead_time_rows());
    let mut loader = DataLoader::new();
    loader.load_csv(&config.input_path).unwrap();
    assert_eq!(loader.get_row_count(), 4);
    assert_eq!(loader.get_columns(), HEADER.split(',').map(String::from).collect::<Vec<_>>());
    assert_eq!(loader.get_file_path(), Some(&config.input_path));
}
