//! Small numeric helpers over popularity time series.
//!
//! Every function is total: degenerate input (empty, constant, zero
//! denominators) yields a defined fallback rather than an error.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::text::{fold, term_set, tokens};

const LOOKBACK: usize = 4;
const DENOM_EPS: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendLabel {
    Up,
    Down,
    Flat,
}

impl TrendLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            TrendLabel::Up => "up",
            TrendLabel::Down => "down",
            TrendLabel::Flat => "flat",
        }
    }
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rescale to `[0, 1]`; all zeros when the series is empty or constant.
pub fn minmax_normalize(series: &[f64]) -> Vec<f64> {
    let lo = series.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if series.is_empty() || hi <= lo {
        return vec![0.0; series.len()];
    }
    series.iter().map(|v| (v - lo) / (hi - lo)).collect()
}

/// Relative change between consecutive points; 0.0 where the previous point is 0.
pub fn pct_change(series: &[f64]) -> Vec<f64> {
    series
        .windows(2)
        .map(|w| if w[0] == 0.0 { 0.0 } else { (w[1] - w[0]) / w[0] })
        .collect()
}

/// `(last - first) / (n - 1)`, or 0.0 for fewer than two points.
pub fn simple_slope(series: &[f64]) -> f64 {
    match series {
        [first, .., last] => (last - first) / (series.len() - 1) as f64,
        _ => 0.0,
    }
}

/// Classify a series by slope plus the change over the last few steps,
/// relative to the second-to-last point.
pub fn label_trend(series: &[f64], flat_eps: f64) -> TrendLabel {
    let n = series.len();
    if n < 2 {
        return TrendLabel::Flat;
    }
    let last_delta = series[n - 1] - series[n.saturating_sub(LOOKBACK)];
    let score = simple_slope(series) + last_delta / (series[n - 2].abs() + DENOM_EPS);

    if score > flat_eps {
        TrendLabel::Up
    } else if score < -flat_eps {
        TrendLabel::Down
    } else {
        TrendLabel::Flat
    }
}

/// Terms not present in `known`, in input order.
pub fn keep_unknown_terms<S: AsRef<str>>(terms: &[S], known: &HashSet<String>) -> Vec<String> {
    terms
        .iter()
        .map(|t| t.as_ref())
        .filter(|t| !known.contains(*t))
        .map(str::to_string)
        .collect()
}

/// Normalised first-to-last movement of a series, in `[-1, 1]`.
pub fn velocity(series: &[f64]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    simple_slope(&minmax_normalize(series)) * (series.len() - 1) as f64
}

/// Share of the phrase's terms not seen in any known phrase.
pub fn novelty<S: AsRef<str>>(phrase: &str, known_phrases: &[S]) -> f64 {
    let terms = tokens(phrase);
    if terms.is_empty() {
        let folded = fold(phrase.trim());
        let seen = known_phrases
            .iter()
            .any(|k| fold(k.as_ref().trim()) == folded);
        return if seen { 0.0 } else { 1.0 };
    }
    let known: HashSet<String> = term_set(known_phrases.iter().map(|k| k.as_ref()))
        .into_iter()
        .collect();
    keep_unknown_terms(&terms, &known).len() as f64 / terms.len() as f64
}
