use std::collections::{BTreeMap, BTreeSet};

use crate::text::tokens;

/// Dense TF-IDF matrix: one L2-normalised row per document over a sorted vocabulary.
#[derive(Debug, Clone, Default)]
pub struct TfIdfMatrix {
    pub vocabulary: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl TfIdfMatrix {
    pub fn dims(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Raw term counts, smoothed idf `ln((1 + n) / (1 + df)) + 1`, L2 row norm.
pub fn build_tfidf_matrix<S: AsRef<str>>(docs: &[S]) -> TfIdfMatrix {
    let tokenized: Vec<Vec<String>> = docs.iter().map(|d| tokens(d.as_ref())).collect();

    let vocabulary: Vec<String> = tokenized
        .iter()
        .flatten()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let index: BTreeMap<&str, usize> = vocabulary
        .iter()
        .enumerate()
        .map(|(i, t)| (t.as_str(), i))
        .collect();

    let mut df = vec![0usize; vocabulary.len()];
    for doc in &tokenized {
        let uniq: BTreeSet<&str> = doc.iter().map(String::as_str).collect();
        for t in uniq {
            df[index[t]] += 1;
        }
    }

    let n = docs.len() as f64;
    let idf: Vec<f64> = df
        .iter()
        .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
        .collect();

    let rows = tokenized
        .iter()
        .map(|doc| {
            let mut row = vec![0.0; vocabulary.len()];
            for t in doc {
                row[index[t.as_str()]] += 1.0;
            }
            for (w, i) in row.iter_mut().zip(&idf) {
                *w *= i;
            }
            let norm = row.iter().map(|w| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                row.iter_mut().for_each(|w| *w /= norm);
            }
            row
        })
        .collect();

    TfIdfMatrix { vocabulary, rows }
}
