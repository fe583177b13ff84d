use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Term weights of the ranking score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub count: f64,    // 0.4
    pub velocity: f64, // 0.8
    pub novelty: f64,  // 0.8
    pub divisor: f64,  // 2.0
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            count: 0.4,
            velocity: 0.8,
            novelty: 0.8,
            divisor: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    /// Count at which the log-normalised volume saturates at 1.0.
    pub volume_cap: f64,
    /// Absolute band around zero labelled "flat".
    pub flat_eps: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            volume_cap: 1000.0,
            flat_eps: 0.02,
        }
    }
}

/// How many k-means restarts to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NInit {
    /// One run, since k-means++ seeding is already spread out.
    Auto,
    Fixed(usize),
}

impl NInit {
    pub fn runs(self) -> usize {
        match self {
            NInit::Auto => 1,
            NInit::Fixed(n) => n.max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    pub k: usize,
    pub seed: u64,
    pub n_init: NInit,
    pub max_iter: usize,
    pub tol: f64,
    pub top_terms: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            k: 5,
            seed: 42,
            n_init: NInit::Auto,
            max_iter: 300,
            tol: 1e-4,
            top_terms: 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scoring: ScoringConfig,
    pub clustering: ClusterConfig,
    /// Rows kept for the dashboard view (0 keeps all).
    pub top_n: usize,
}

/// Read an `AppConfig` from a JSON file. Absent keys take their defaults.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Reading config {}", path.display()))?;
    let cfg: AppConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Decoding JSON config {}", path.display()))?;
    debug!(
        "Config loaded - path={}, volume_cap={}, flat_eps={}, k={}, top_n={}",
        path.display(),
        cfg.scoring.volume_cap,
        cfg.scoring.flat_eps,
        cfg.clustering.k,
        cfg.top_n
    );
    Ok(cfg)
}
