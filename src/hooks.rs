use serde::{Deserialize, Serialize};

/// Templated ad copy for a keyword phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdHooks {
    pub ad: String,
    pub short: String,
    pub h1: String,
}

/// Uppercase the first letter of every run of letters, lowercase the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

pub fn hooks(phrase: &str) -> AdHooks {
    let t = title_case(phrase);
    AdHooks {
        ad: format!("{t} — Fix It In 24 Hours"),
        short: format!("{t}: The 30-Second Fix No One Told You"),
        h1: format!("{t} • Finally, A Simple Solution"),
    }
}

const EXPANSIONS: [&str; 10] = [
    "{} singapore",
    "best {}",
    "{} near me",
    "{} price",
    "how to {}",
    "{} for smes",
    "{} for students",
    "{} b2b",
    "{} ai",
    "{} automation",
];

/// Search phrases derived from one seed keyword, duplicates dropped.
pub fn expand_keywords(seed: &str) -> Vec<String> {
    let seed = seed.trim().to_lowercase();
    let mut out: Vec<String> = Vec::with_capacity(EXPANSIONS.len());
    for pattern in EXPANSIONS {
        let phrase = pattern.replace("{}", &seed);
        if !out.contains(&phrase) {
            out.push(phrase);
        }
    }
    out
}
