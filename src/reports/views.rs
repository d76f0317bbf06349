//! Aggregations behind each report view.
//!
//! Everything here works on plain column vectors so the views can be checked
//! without building a DataFrame.

use crate::stats::StatsCalculator;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Descending by value, NaN last, ties broken by label.
pub fn rank_descending(mut entries: Vec<(String, f64)>) -> Vec<(String, f64)> {
    entries.sort_by(|(la, a), (lb, b)| {
        match (a.is_nan(), b.is_nan()) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => b.partial_cmp(a).unwrap_or(Ordering::Equal),
        }
        .then_with(|| la.cmp(lb))
    });
    entries
}

/// Number of distinct non-null ids per month, in chronological order.
///
/// Months are `YYYY-MM`, so lexical order is chronological.
pub fn distinct_per_month(months: &[Option<String>], ids: &[Option<String>]) -> Vec<(String, f64)> {
    let mut per_month: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for (month, id) in months.iter().zip(ids.iter()) {
        let Some(month) = month else { continue };
        let seen = per_month.entry(month.as_str()).or_default();
        if let Some(id) = id {
            seen.insert(id.as_str());
        }
    }

    per_month
        .into_iter()
        .map(|(month, ids)| (month.to_string(), ids.len() as f64))
        .collect()
}

/// Rows per label, the `n` most frequent.
pub fn top_counts(labels: &[Option<String>], n: usize) -> Vec<(String, f64)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels.iter().flatten() {
        *counts.entry(label.as_str()).or_default() += 1;
    }

    let mut ranked = rank_descending(
        counts
            .into_iter()
            .map(|(label, count)| (label.to_string(), count as f64))
            .collect(),
    );
    ranked.truncate(n);
    ranked
}

/// Percentage of rows per label whose flag equals `hit`, the `n` highest.
pub fn top_rates(
    labels: &[Option<String>],
    flags: &[Option<String>],
    hit: &str,
    n: usize,
) -> Vec<(String, f64)> {
    let mut tally: HashMap<&str, (usize, usize)> = HashMap::new();
    for (label, flag) in labels.iter().zip(flags.iter()) {
        let Some(label) = label else { continue };
        let entry = tally.entry(label.as_str()).or_default();
        entry.1 += 1;
        if flag.as_deref() == Some(hit) {
            entry.0 += 1;
        }
    }

    let mut ranked = rank_descending(
        tally
            .into_iter()
            .map(|(label, (hits, total))| (label.to_string(), hits as f64 / total as f64 * 100.0))
            .collect(),
    );
    ranked.truncate(n);
    ranked
}

/// Mean of the finite values per label, highest first. Every label is kept.
pub fn mean_by_label(labels: &[Option<String>], values: &[Option<f64>]) -> Vec<(String, f64)> {
    let mut groups: HashMap<&str, Vec<f64>> = HashMap::new();
    for (label, value) in labels.iter().zip(values.iter()) {
        let Some(label) = label else { continue };
        let group = groups.entry(label.as_str()).or_default();
        if let Some(v) = value {
            group.push(*v);
        }
    }

    rank_descending(
        groups
            .into_iter()
            .map(|(label, vals)| (label.to_string(), StatsCalculator::finite_mean(&vals)))
            .collect(),
    )
}
