use tracing::{debug, warn};

use crate::config::ClusterConfig;
use crate::kmeans::kmeans;
use crate::models::Clustering;
use crate::tfidf::build_tfidf_matrix;

/// Vectorise phrases, partition them into `k` groups and name each group by
/// its strongest terms.
pub trait PhraseClusterer {
    fn cluster(&self, phrases: &[String], k: usize) -> Clustering;
}

/// TF-IDF vectors partitioned with seeded k-means.
#[derive(Debug, Clone, Default)]
pub struct TfIdfKMeans {
    pub params: ClusterConfig,
}

impl TfIdfKMeans {
    pub fn new(params: ClusterConfig) -> Self {
        Self { params }
    }
}

impl PhraseClusterer for TfIdfKMeans {
    fn cluster(&self, phrases: &[String], k: usize) -> Clustering {
        if k == 0 || phrases.is_empty() {
            return Clustering::default();
        }
        let k = if k > phrases.len() {
            warn!("Cluster count exceeds phrases - k={}, phrases={}, using k={}", k, phrases.len(), phrases.len());
            phrases.len()
        } else {
            k
        };

        let matrix = build_tfidf_matrix(phrases);
        debug!(
            "Clustering started - phrases={}, vocabulary={}, k={}",
            phrases.len(),
            matrix.dims(),
            k
        );

        let fit = kmeans(&matrix.rows, k, &self.params);

        let top_terms = fit
            .centroids
            .iter()
            .map(|centroid| {
                let mut order: Vec<usize> = (0..centroid.len()).filter(|&t| centroid[t] > 0.0).collect();
                // stable: equal weights stay in vocabulary order
                order.sort_by(|&a, &b| centroid[b].total_cmp(&centroid[a]));
                order
                    .into_iter()
                    .take(self.params.top_terms)
                    .map(|t| matrix.vocabulary[t].clone())
                    .collect()
            })
            .collect();

        debug!(
            "Clustering completed - k={}, iterations={}, inertia={:.4}",
            k, fit.iterations, fit.inertia
        );

        Clustering {
            labels: fit.labels,
            top_terms,
        }
    }
}
