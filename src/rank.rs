use itertools::Itertools;
use tracing::debug;

use crate::config::ScoringConfig;
use crate::models::{RankedRow, Signal};
use crate::score::{round3, score};

const MAX_EXAMPLES: usize = 3;

fn to_row(s: &Signal, shown_score: f64) -> RankedRow {
    RankedRow {
        phrase: s.phrase.clone(),
        domain: s.domain.clone(),
        count: s.count,
        velocity: round3(s.velocity),
        novelty: round3(s.novelty),
        score: shown_score,
        examples: s.examples.iter().take(MAX_EXAMPLES).join(", "),
    }
}

/// Score every signal and order the rows by score, highest first.
///
/// Ordering uses the score as shown (3 dp); rows that show the same score
/// keep input order.
pub fn rank_signals(signals: &[Signal], cfg: &ScoringConfig) -> Vec<RankedRow> {
    let scored: Vec<(f64, &Signal)> = signals
        .iter()
        .map(|s| (round3(score(s.count, s.velocity, s.novelty, cfg)), s))
        .sorted_by(|a, b| b.0.total_cmp(&a.0))
        .collect();

    debug!(
        "Ranking completed - rows={}, top_score={:.3}",
        scored.len(),
        scored.first().map_or(0.0, |(s, _)| *s)
    );

    scored.into_iter().map(|(sc, s)| to_row(s, sc)).collect()
}

/// The first `n` rows; `n == 0` keeps them all.
pub fn top_n(rows: &[RankedRow], n: usize) -> &[RankedRow] {
    if n == 0 {
        rows
    } else {
        &rows[..n.min(rows.len())]
    }
}
