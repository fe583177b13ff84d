use serde::Serialize;
use tracing::{debug, info};

use crate::cluster::PhraseClusterer;
use crate::config::AppConfig;
use crate::models::{Clustering, RankedRow, Signal};
use crate::rank::{rank_signals, top_n};

/// One recompute of the dashboard view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dashboard {
    /// Ranked rows, truncated to the configured view size.
    pub rows: Vec<RankedRow>,
    /// Clustering of `rows` phrases; `labels[i]` belongs to `rows[i]`.
    pub clustering: Clustering,
    /// Signals considered before truncation.
    pub total_signals: usize,
}

pub fn run(signals: &[Signal], cfg: &AppConfig, clusterer: &dyn PhraseClusterer) -> Dashboard {
    let start = std::time::Instant::now();
    info!("Recompute started - signals={}, top_n={}", signals.len(), cfg.top_n);

    let ranked = rank_signals(signals, &cfg.scoring);
    let rows = top_n(&ranked, cfg.top_n).to_vec();
    debug!("Ranked view - kept={}/{}", rows.len(), ranked.len());

    // shrink k to the view so small sets still cluster
    let k = cfg.clustering.k.min(rows.len());
    let phrases: Vec<String> = rows.iter().map(|r| r.phrase.clone()).collect();
    let clustering = clusterer.cluster(&phrases, k);

    info!(
        "Recompute completed - duration={:.3}s, rows={}, clusters={}",
        start.elapsed().as_secs_f32(),
        rows.len(),
        clustering.k()
    );

    Dashboard {
        rows,
        clustering,
        total_signals: signals.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::TfIdfKMeans;

    struct OneBucket;

    impl PhraseClusterer for OneBucket {
        fn cluster(&self, phrases: &[String], k: usize) -> Clustering {
            if k == 0 {
                return Clustering::default();
            }
            Clustering {
                labels: vec![0; phrases.len()],
                top_terms: vec![Vec::new()],
            }
        }
    }

    fn signals() -> Vec<Signal> {
        vec![
            Signal::new("y", "t").with_metrics(0.0, 0.0, 0.0),
            Signal::new("x", "t").with_metrics(1000.0, 1.0, 1.0),
            Signal::new("z", "t").with_metrics(10.0, 0.5, 0.5),
        ]
    }

    #[test]
    fn view_is_truncated_and_clustered() {
        let cfg = AppConfig {
            top_n: 2,
            ..AppConfig::default()
        };
        let d = run(&signals(), &cfg, &OneBucket);
        assert_eq!(d.total_signals, 3);
        assert_eq!(d.rows.iter().map(|r| r.phrase.as_str()).collect::<Vec<_>>(), vec!["x", "z"]);
        assert_eq!(d.clustering.labels, vec![0, 0]);
    }

    #[test]
    fn empty_input_gives_empty_dashboard() {
        let d = run(&[], &AppConfig::default(), &TfIdfKMeans::default());
        assert!(d.rows.is_empty());
        assert!(d.clustering.is_empty());
    }

    #[test]
    fn k_shrinks_to_row_count() {
        // default k = 5, only three rows
        let d = run(&signals(), &AppConfig::default(), &TfIdfKMeans::default());
        assert_eq!(d.rows.len(), 3);
        assert_eq!(d.clustering.labels.len(), 3);
        assert!(d.clustering.k() <= 3);
    }
}
