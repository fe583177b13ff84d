use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::config::ClusterConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct KMeansFit {
    pub labels: Vec<usize>,
    pub centroids: Vec<Vec<f64>>,
    pub inertia: f64,
    pub iterations: usize,
}

#[inline]
fn dist2(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn nearest(point: &[f64], centroids: &[Vec<f64>]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (j, c) in centroids.iter().enumerate() {
        let d = dist2(point, c);
        if d < best.1 {
            best = (j, d);
        }
    }
    best
}

fn sample_by_weight(weights: &[f64], total: f64, rng: &mut StdRng) -> usize {
    let mut target = rng.gen::<f64>() * total;
    for (i, w) in weights.iter().enumerate() {
        if target < *w {
            return i;
        }
        target -= w;
    }
    // float drift past the end
    weights.iter().rposition(|&w| w > 0.0).unwrap_or(weights.len() - 1)
}

/// Greedy k-means++ seeding: for each new centre, draw a few candidates with
/// probability proportional to squared distance from the closest chosen centre
/// and keep the one that lowers the total potential most.
fn kmeans_plus_plus(points: &[Vec<f64>], k: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
    let n = points.len();
    let trials = 2 + (k as f64).ln() as usize;
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.gen_range(0..n)].clone());

    let mut min_d2: Vec<f64> = points.iter().map(|p| dist2(p, &centroids[0])).collect();

    while centroids.len() < k {
        let total: f64 = min_d2.iter().sum();
        if total <= 0.0 {
            // every point coincides with a centre already
            centroids.push(points[rng.gen_range(0..n)].clone());
            continue;
        }

        let mut best: Option<(f64, usize, Vec<f64>)> = None;
        for _ in 0..trials {
            let cand = sample_by_weight(&min_d2, total, rng);
            let next_d2: Vec<f64> = min_d2
                .iter()
                .zip(points)
                .map(|(m, p)| m.min(dist2(p, &points[cand])))
                .collect();
            let potential: f64 = next_d2.iter().sum();
            if best.as_ref().map_or(true, |(b, _, _)| potential < *b) {
                best = Some((potential, cand, next_d2));
            }
        }
        if let Some((_, idx, d2)) = best {
            centroids.push(points[idx].clone());
            min_d2 = d2;
        }
    }
    centroids
}

fn mean_variance(points: &[Vec<f64>]) -> f64 {
    let dims = points.first().map_or(0, Vec::len);
    if dims == 0 {
        return 0.0;
    }
    let n = points.len() as f64;
    let mut total = 0.0;
    for d in 0..dims {
        let mean = points.iter().map(|p| p[d]).sum::<f64>() / n;
        total += points.iter().map(|p| (p[d] - mean).powi(2)).sum::<f64>() / n;
    }
    total / dims as f64
}

fn lloyd(points: &[Vec<f64>], mut centroids: Vec<Vec<f64>>, cfg: &ClusterConfig, tol: f64) -> KMeansFit {
    let k = centroids.len();
    let dims = points.first().map_or(0, Vec::len);
    let mut labels = vec![0usize; points.len()];
    let mut iterations = 0;

    for iter in 0..cfg.max_iter.max(1) {
        iterations = iter + 1;
        for (label, p) in labels.iter_mut().zip(points) {
            *label = nearest(p, &centroids).0;
        }

        let mut sums = vec![vec![0.0; dims]; k];
        let mut counts = vec![0usize; k];
        for (p, &c) in points.iter().zip(&labels) {
            counts[c] += 1;
            for (s, x) in sums[c].iter_mut().zip(p) {
                *s += x;
            }
        }

        let mut shift = 0.0;
        for ((sum, count), old) in sums.into_iter().zip(counts).zip(centroids.iter_mut()) {
            // an emptied cluster keeps its previous centre
            if count == 0 {
                continue;
            }
            let new: Vec<f64> = sum.into_iter().map(|s| s / count as f64).collect();
            shift += dist2(&old[..], &new);
            *old = new;
        }

        if shift <= tol {
            break;
        }
    }

    let mut inertia = 0.0;
    for (label, p) in labels.iter_mut().zip(points) {
        let (j, d) = nearest(p, &centroids);
        *label = j;
        inertia += d;
    }

    KMeansFit {
        labels,
        centroids,
        inertia,
        iterations,
    }
}

/// Lloyd's k-means, seeded deterministically from `cfg.seed`; the best of
/// `cfg.n_init` runs by inertia is returned.
///
/// Callers guarantee `1 <= k <= points.len()`.
pub fn kmeans(points: &[Vec<f64>], k: usize, cfg: &ClusterConfig) -> KMeansFit {
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let tol = cfg.tol * mean_variance(points);

    let mut best: Option<KMeansFit> = None;
    for run in 0..cfg.n_init.runs() {
        let init = kmeans_plus_plus(points, k, &mut rng);
        let fit = lloyd(points, init, cfg, tol);
        debug!(
            "k-means run - run={}, k={}, iterations={}, inertia={:.4}",
            run, k, fit.iterations, fit.inertia
        );
        if best.as_ref().map_or(true, |b| fit.inertia < b.inertia) {
            best = Some(fit);
        }
    }
    best.unwrap_or(KMeansFit {
        labels: vec![0; points.len()],
        centroids: Vec::new(),
        inertia: 0.0,
        iterations: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NInit;

    fn blobs() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![0.0, 0.1],
            vec![5.0, 5.0],
            vec![5.1, 5.0],
            vec![5.0, 5.1],
        ]
    }

    #[test]
    fn separates_two_blobs() {
        let fit = kmeans(&blobs(), 2, &ClusterConfig::default());
        assert_eq!(fit.labels[0], fit.labels[1]);
        assert_eq!(fit.labels[0], fit.labels[2]);
        assert_eq!(fit.labels[3], fit.labels[4]);
        assert_eq!(fit.labels[3], fit.labels[5]);
        assert_ne!(fit.labels[0], fit.labels[3]);
        assert!(fit.inertia < 0.1);
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let cfg = ClusterConfig {
            n_init: NInit::Fixed(3),
            ..ClusterConfig::default()
        };
        let a = kmeans(&blobs(), 3, &cfg);
        let b = kmeans(&blobs(), 3, &cfg);
        assert_eq!(a, b);
        assert!(a.labels.iter().all(|&l| l < 3));
    }

    #[test]
    fn k_equal_to_n_gives_zero_inertia() {
        let pts = blobs();
        let fit = kmeans(&pts, pts.len(), &ClusterConfig::default());
        assert!(fit.inertia.abs() < 1e-12);
    }

    #[test]
    fn identical_points_do_not_panic() {
        let pts = vec![vec![1.0, 1.0]; 4];
        let fit = kmeans(&pts, 2, &ClusterConfig::default());
        assert_eq!(fit.labels.len(), 4);
        assert_eq!(fit.inertia, 0.0);
    }
}
