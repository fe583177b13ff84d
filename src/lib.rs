//! Keyword signal scoring, trend labelling, ranking and phrase clustering.

pub mod cluster;
pub mod config;
pub mod hooks;
pub mod ingest;
pub mod kmeans;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod rank;
pub mod render;
pub mod score;
pub mod text;
pub mod tfidf;
pub mod trends;

pub use cluster::{PhraseClusterer, TfIdfKMeans};
pub use config::{AppConfig, ClusterConfig, ScoreWeights, ScoringConfig};
pub use models::{Clustering, RankedRow, Signal, SignalFile};
pub use trends::TrendLabel;
