use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One tracked keyword phrase and its popularity metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub phrase: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub count: f64, // >= 0
    #[serde(default)]
    pub velocity: f64, // roughly [-1.0, 1.0]
    #[serde(default)]
    pub novelty: f64, // [0.0, 1.0]
    #[serde(default, deserialize_with = "de_examples")]
    pub examples: Vec<String>,
}

impl Signal {
    pub fn new(phrase: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            domain: domain.into(),
            count: 0.0,
            velocity: 0.0,
            novelty: 0.0,
            examples: Vec::new(),
        }
    }

    pub fn with_metrics(mut self, count: f64, velocity: f64, novelty: f64) -> Self {
        self.count = count;
        self.velocity = velocity;
        self.novelty = novelty;
        self
    }

    pub fn with_examples(mut self, examples: Vec<String>) -> Self {
        self.examples = examples;
        self
    }
}

/// Forum exports carry comment counts as bare numbers next to string examples.
fn de_examples<'de, D>(de: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(de)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s),
            Value::Null => None,
            other => Some(other.to_string()),
        })
        .collect())
}

/// Top-level shape of a signals document: `{"signals": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalFile {
    #[serde(default)]
    pub signals: Vec<Signal>,
}

/// A display row derived from a `Signal`; numeric columns are rounded to 3 dp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRow {
    pub phrase: String,
    pub domain: String,
    pub count: f64,
    pub velocity: f64,
    pub novelty: f64,
    pub score: f64,
    pub examples: String, // first three, ", "-joined
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Clustering {
    /// Cluster id per input phrase, each in `[0, k)`.
    pub labels: Vec<usize>,
    /// Most representative terms per cluster, indexed by cluster id.
    pub top_terms: Vec<Vec<String>>,
}

impl Clustering {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn k(&self) -> usize {
        self.top_terms.len()
    }

    /// Indices of the phrases assigned to `cluster`, in input order.
    pub fn members(&self, cluster: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == cluster)
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let s: Signal = serde_json::from_str(r#"{"phrase": "condo"}"#).unwrap();
        assert_eq!(s, Signal::new("condo", ""));
    }

    #[test]
    fn numeric_examples_are_stringified() {
        let s: Signal =
            serde_json::from_str(r#"{"phrase": "p", "examples": ["chan", 12, null]}"#).unwrap();
        assert_eq!(s.examples, vec!["chan".to_string(), "12".to_string()]);
    }

    #[test]
    fn clustering_members_preserve_order() {
        let c = Clustering {
            labels: vec![1, 0, 1, 1],
            top_terms: vec![vec![], vec![]],
        };
        assert_eq!(c.members(1), vec![0, 2, 3]);
        assert_eq!(c.k(), 2);
    }
}
