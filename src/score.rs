use crate::config::ScoringConfig;

/// Log-compress a raw volume into `[0, 1]`, saturating at `cap`.
///
/// Negative counts are treated as zero.
pub fn normalize(count: f64, cap: f64) -> f64 {
    let denom = cap.max(0.0).ln_1p();
    if denom <= 0.0 {
        return 0.0;
    }
    (count.max(0.0).ln_1p() / denom).min(1.0)
}

/// Weighted ranking score. Velocity and novelty are used as given.
pub fn score(count: f64, velocity: f64, novelty: f64, cfg: &ScoringConfig) -> f64 {
    let w = cfg.weights;
    (w.count * normalize(count, cfg.volume_cap) + w.velocity * velocity + w.novelty * novelty)
        / w.divisor
}

pub fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAP: f64 = 1000.0;

    #[test]
    fn normalize_is_bounded_and_monotone() {
        let mut prev = normalize(0.0, CAP);
        assert_eq!(prev, 0.0);
        for c in [0.5, 1.0, 3.0, 10.0, 99.0, 500.0, 1000.0, 5000.0, 1e9] {
            let n = normalize(c, CAP);
            assert!((0.0..=1.0).contains(&n), "normalize({c}) = {n}");
            assert!(n >= prev);
            prev = n;
        }
        assert!((normalize(1000.0, CAP) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_clamps_negative_counts() {
        assert_eq!(normalize(-50.0, CAP), 0.0);
    }

    #[test]
    fn normalize_with_degenerate_cap_is_zero() {
        assert_eq!(normalize(10.0, 0.0), 0.0);
    }

    #[test]
    fn score_extremes() {
        let cfg = ScoringConfig::default();
        assert!((score(1000.0, 1.0, 1.0, &cfg) - 1.0).abs() < 1e-12);
        assert_eq!(score(0.0, 0.0, 0.0, &cfg), 0.0);
    }

    #[test]
    fn score_is_monotone_in_each_input() {
        let cfg = ScoringConfig::default();
        let base = score(10.0, 0.2, 0.3, &cfg);
        assert!(score(20.0, 0.2, 0.3, &cfg) >= base);
        assert!(score(10.0, 0.4, 0.3, &cfg) >= base);
        assert!(score(10.0, 0.2, 0.6, &cfg) >= base);
    }

    #[test]
    fn velocity_and_novelty_outweigh_volume() {
        let cfg = ScoringConfig::default();
        // full volume alone vs. half velocity alone
        assert!(score(0.0, 0.5, 0.0, &cfg) >= score(1000.0, 0.0, 0.0, &cfg));
    }

    #[test]
    fn round3_rounds_half_away() {
        assert_eq!(round3(0.12345), 0.123);
        assert_eq!(round3(0.9996), 1.0);
        assert_eq!(round3(-0.0004), 0.0);
    }
}
