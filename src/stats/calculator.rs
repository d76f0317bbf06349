//! Statistics Calculator Module
//! Descriptive statistics, histogram binning, kernel density and correlation.

use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;

/// Equal-width histogram: `edges.len() == counts.len() + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Stateless statistical helpers.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Median of the values, averaging the middle pair for even lengths.
    pub fn median(values: &[f64]) -> Option<f64> {
        let n = values.len();
        if n == 0 {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };
        Some(median)
    }

    /// Mean over finite values only; NaN when none are finite.
    pub fn finite_mean(values: &[f64]) -> f64 {
        values.iter().filter(|v| v.is_finite()).mean()
    }

    /// Histogram with `bins` equal-width bins spanning the data.
    ///
    /// The last bin is closed on the right. Constant data spans `v - 0.5 .. v + 0.5`.
    pub fn histogram(values: &[f64], bins: usize) -> Histogram {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bins == 0 {
            return Histogram {
                edges: Vec::new(),
                counts: Vec::new(),
            };
        }

        let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + i as f64 * width).collect();
        let mut counts = vec![0usize; bins];
        for v in finite {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Histogram { edges, counts }
    }

    /// Gaussian kernel density estimate over the data range, Scott's rule bandwidth.
    ///
    /// Returns `[x, density]` pairs; empty when fewer than two distinct values exist.
    pub fn gaussian_kde(values: &[f64], points: usize) -> Vec<[f64; 2]> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let n = finite.len();
        if n < 2 || points < 2 {
            return Vec::new();
        }

        let std = finite.iter().std_dev();
        if !(std > 0.0) {
            return Vec::new();
        }
        let bandwidth = std * (n as f64).powf(-0.2);

        let Ok(kernel) = Normal::new(0.0, 1.0) else {
            return Vec::new();
        };

        let lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let step = (hi - lo) / (points - 1) as f64;

        (0..points)
            .map(|i| {
                let x = lo + i as f64 * step;
                let density = finite
                    .iter()
                    .map(|xi| kernel.pdf((x - xi) / bandwidth))
                    .sum::<f64>()
                    / (n as f64 * bandwidth);
                [x, density]
            })
            .collect()
    }

    /// Pearson correlation over rows where both values are present and not NaN.
    ///
    /// Infinite values are kept, so a column holding one correlates as NaN.
    pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
        let (xs, ys): (Vec<f64>, Vec<f64>) = x
            .iter()
            .zip(y.iter())
            .filter_map(|pair| match pair {
                (Some(a), Some(b)) if !a.is_nan() && !b.is_nan() => Some((*a, *b)),
                _ => None,
            })
            .unzip();

        if xs.len() < 2 {
            return f64::NAN;
        }

        let sx = xs.iter().std_dev();
        let sy = ys.iter().std_dev();
        if sx == 0.0 || sy == 0.0 {
            return f64::NAN;
        }

        xs.iter().covariance(ys.iter()) / (sx * sy)
    }

    /// Symmetric correlation matrix of the given columns.
    pub fn correlation_matrix(columns: &[Vec<Option<f64>>]) -> Vec<Vec<f64>> {
        let k = columns.len();
        let mut matrix = vec![vec![f64::NAN; k]; k];
        for i in 0..k {
            for j in i..k {
                let r = Self::pearson(&columns[i], &columns[j]);
                matrix[i][j] = r;
                matrix[j][i] = r;
            }
        }
        matrix
    }
}
