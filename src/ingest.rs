//! Raw records handed over by the trend, video and forum collectors, and the
//! policy that turns each into a `Signal`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Signal;
use crate::trends::{novelty, velocity};

const MAX_PHRASE_CHARS: usize = 90;
const TREND_RECENT_POINTS: usize = 3;

// Video and forum hits carry no series; they get fixed heuristic metrics.
const VIDEO_COUNT: f64 = 30.0;
const VIDEO_VELOCITY: f64 = 0.3;
const VIDEO_NOVELTY: f64 = 0.6;
const FORUM_VELOCITY: f64 = 0.25;
const FORUM_NOVELTY: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub term: String,
    #[serde(default)]
    pub series: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoHit {
    pub title: Option<String>,
    pub channel: Option<String>,
    pub published_at: Option<String>,
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForumPost {
    pub title: Option<String>,
    pub subreddit: Option<String>,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub num_comments: u64,
}

/// Everything one refresh brought back; any list may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBatch {
    #[serde(default)]
    pub trends: Vec<TrendSeries>,
    #[serde(default)]
    pub videos: Vec<VideoHit>,
    #[serde(default)]
    pub posts: Vec<ForumPost>,
}

fn clip_phrase(title: Option<&str>) -> Option<String> {
    let t = title?.trim();
    if t.is_empty() {
        return None;
    }
    Some(t.chars().take(MAX_PHRASE_CHARS).collect())
}

/// Velocity from the series, novelty against the phrases already tracked,
/// volume as the sum of the most recent points.
/// Terms keep their full length; only titles are clipped.
pub fn trend_signal<S: AsRef<str>>(t: &TrendSeries, known_phrases: &[S]) -> Option<Signal> {
    let phrase = t.term.trim();
    if phrase.is_empty() {
        return None;
    }
    let recent = t.series.len().saturating_sub(TREND_RECENT_POINTS);
    let count = t.series[recent..].iter().sum::<f64>().max(0.0);
    Some(
        Signal::new(phrase, "trend").with_metrics(
            count,
            velocity(&t.series),
            novelty(&t.term, known_phrases),
        ),
    )
}

pub fn video_signal(v: &VideoHit) -> Option<Signal> {
    let phrase = clip_phrase(v.title.as_deref())?;
    let examples = vec![
        v.channel.clone().unwrap_or_default(),
        v.published_at.clone().unwrap_or_default(),
    ];
    Some(
        Signal::new(phrase, "youtube")
            .with_metrics(VIDEO_COUNT, VIDEO_VELOCITY, VIDEO_NOVELTY)
            .with_examples(examples),
    )
}

/// The raw post score becomes the volume; `normalize` clamps it when scoring.
/// Only a missing subreddit falls back to `"reddit"`.
pub fn forum_signal(p: &ForumPost) -> Option<Signal> {
    let phrase = clip_phrase(p.title.as_deref())?;
    let domain = p.subreddit.as_deref().unwrap_or("reddit");
    Some(
        Signal::new(phrase, domain)
            .with_metrics(p.score, FORUM_VELOCITY, FORUM_NOVELTY)
            .with_examples(vec![p.num_comments.to_string()]),
    )
}

/// Append the batch to `signals`. Each trend's novelty is measured against every
/// phrase tracked so far, including trends merged earlier in the same batch.
/// Records without a title are skipped.
pub fn merge_batch(signals: &mut Vec<Signal>, batch: &RawBatch) {
    let mut known: Vec<String> = signals.iter().map(|s| s.phrase.clone()).collect();
    let before = signals.len();

    for t in &batch.trends {
        if let Some(s) = trend_signal(t, &known) {
            known.push(s.phrase.clone());
            signals.push(s);
        }
    }
    signals.extend(batch.videos.iter().filter_map(video_signal));
    signals.extend(batch.posts.iter().filter_map(forum_signal));

    let raw = batch.trends.len() + batch.videos.len() + batch.posts.len();
    let added = signals.len() - before;
    debug!(
        "Batch merged - trends={}, videos={}, posts={}, added={}, skipped={}",
        batch.trends.len(),
        batch.videos.len(),
        batch.posts.len(),
        added,
        raw - added
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_series_maps_to_signal() {
        let t = TrendSeries {
            term: "ai agent".into(),
            series: vec![10.0, 20.0, 30.0, 40.0, 50.0],
        };
        let s = trend_signal(&t, &["ai tools"]).unwrap();
        assert_eq!(s.domain, "trend");
        assert_eq!(s.count, 120.0);
        assert_eq!(s.velocity, 1.0);
        assert_eq!(s.novelty, 0.5);
        assert!(s.examples.is_empty());
    }

    #[test]
    fn short_series_sums_what_it_has() {
        let t = TrendSeries {
            term: "hdb".into(),
            series: vec![4.0],
        };
        let s = trend_signal(&t, &[] as &[&str]).unwrap();
        assert_eq!(s.count, 4.0);
        assert_eq!(s.velocity, 0.0);
    }

    #[test]
    fn video_title_is_clipped() {
        let v = VideoHit {
            title: Some("x".repeat(200)),
            channel: Some("chan".into()),
            ..VideoHit::default()
        };
        let s = video_signal(&v).unwrap();
        assert_eq!(s.phrase.chars().count(), 90);
        assert_eq!(s.count, 30.0);
        assert_eq!(s.examples, vec!["chan".to_string(), String::new()]);
    }

    #[test]
    fn untitled_records_are_skipped() {
        assert!(video_signal(&VideoHit::default()).is_none());
        let p = ForumPost {
            title: Some("   ".into()),
            ..ForumPost::default()
        };
        assert!(forum_signal(&p).is_none());
    }

    #[test]
    fn forum_post_defaults_domain() {
        let p = ForumPost {
            title: Some("Co living near NUS?".into()),
            score: 17.0,
            num_comments: 4,
            ..ForumPost::default()
        };
        let s = forum_signal(&p).unwrap();
        assert_eq!(s.domain, "reddit");
        assert_eq!(s.count, 17.0);
        assert_eq!(s.examples, vec!["4".to_string()]);
    }

    #[test]
    fn merge_measures_novelty_against_existing() {
        let mut signals = vec![Signal::new("condo launch", "demo")];
        let batch: RawBatch = serde_json::from_str(
            r#"{"trends": [{"term": "condo price", "series": [1, 2]}],
                "videos": [{"title": null}],
                "posts": [{"title": "HDB grant", "subreddit": "singapore", "score": 3}]}"#,
        )
        .unwrap();
        merge_batch(&mut signals, &batch);
        assert_eq!(signals.len(), 3);
        assert_eq!(signals[1].novelty, 0.5);
        assert_eq!(signals[2].domain, "singapore");
    }

    #[test]
    fn repeated_trend_in_one_batch_is_not_novel() {
        let mut signals = Vec::new();
        let batch: RawBatch = serde_json::from_str(
            r#"{"trends": [{"term": "condo price", "series": [1, 2]},
                           {"term": "condo price", "series": [3, 4]}]}"#,
        )
        .unwrap();
        merge_batch(&mut signals, &batch);
        assert_eq!(signals.len(), 2);
        assert_eq!(signals[0].novelty, 1.0);
        assert_eq!(signals[1].novelty, 0.0);
    }

    #[test]
    fn long_trend_term_is_kept_whole() {
        let t = TrendSeries {
            term: "y".repeat(120),
            series: vec![1.0],
        };
        let s = trend_signal(&t, &[] as &[&str]).unwrap();
        assert_eq!(s.phrase.chars().count(), 120);
    }

    #[test]
    fn forum_post_keeps_raw_score_and_empty_subreddit() {
        let p = ForumPost {
            title: Some("Downvoted take".into()),
            subreddit: Some(String::new()),
            score: -5.0,
            num_comments: 0,
        };
        let s = forum_signal(&p).unwrap();
        assert_eq!(s.count, -5.0);
        assert_eq!(s.domain, "");
    }
}
