//! Column names of the procurement table and typed accessors over them.

use polars::prelude::*;

pub const PO_ID: &str = "PO_ID";
pub const SUPPLIER: &str = "Supplier";
pub const ITEM_CATEGORY: &str = "Item_Category";
pub const ORDER_DATE: &str = "Order_Date";
pub const DELIVERY_DATE: &str = "Delivery_Date";
pub const QUANTITY: &str = "Quantity";
pub const UNIT_PRICE: &str = "Unit_Price";
pub const NEGOTIATED_PRICE: &str = "Negotiated_Price";
pub const DEFECTIVE_UNITS: &str = "Defective_Units";

// Derived
pub const LEAD_TIME_DAYS: &str = "Lead_Time_Days";
pub const TOTAL_COST: &str = "Total_Cost";
pub const COST_SAVINGS: &str = "Cost_Savings";
pub const DEFECT_RATE: &str = "Defect_Rate";
pub const ON_TIME_DELIVERY: &str = "On_Time_Delivery";
pub const MONTH: &str = "Month";

/// Columns that only exist after enrichment.
pub const DERIVED_COLUMNS: [&str; 6] = [
    LEAD_TIME_DAYS,
    TOTAL_COST,
    COST_SAVINGS,
    DEFECT_RATE,
    ON_TIME_DELIVERY,
    MONTH,
];

/// Columns of the correlation heatmap, in display order.
pub const CORRELATION_COLUMNS: [&str; 7] = [
    QUANTITY,
    UNIT_PRICE,
    NEGOTIATED_PRICE,
    TOTAL_COST,
    COST_SAVINGS,
    DEFECT_RATE,
    LEAD_TIME_DAYS,
];

/// Columns the input file must provide.
pub const INPUT_COLUMNS: [&str; 9] = [
    PO_ID,
    SUPPLIER,
    ORDER_DATE,
    DELIVERY_DATE,
    ITEM_CATEGORY,
    QUANTITY,
    UNIT_PRICE,
    NEGOTIATED_PRICE,
    DEFECTIVE_UNITS,
];

pub const ON_TIME_YES: &str = "Yes";
pub const ON_TIME_NO: &str = "No";

/// Values of a column as `f64`, nulls kept as `None`.
pub fn numeric_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let value_f64 = df.column(name)?.cast(&DataType::Float64)?;
    let value_ca = value_f64.f64()?;
    Ok(value_ca.into_iter().collect())
}

/// Values of a column rendered as text, nulls kept as `None`.
pub fn text_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let text = df.column(name)?.cast(&DataType::String)?;
    let text_ca = text.str()?;
    Ok(text_ca
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}

/// Date or datetime column as milliseconds since 1970-01-01 00:00:00.
pub fn epoch_millis(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<i64>>> {
    let stamps = df
        .column(name)?
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
        .cast(&DataType::Int64)?;
    let stamps_ca = stamps.i64()?;
    Ok(stamps_ca.into_iter().collect())
}
