// src/render.rs
use crate::hooks::hooks;
use crate::models::{Clustering, RankedRow};
use crate::score::round3;

/// Shortest form of a 3-dp value, keeping one decimal for whole numbers.
pub fn fmt_num(x: f64) -> String {
    let x = round3(x);
    if x.fract() == 0.0 {
        format!("{:.1}", x)
    } else {
        format!("{}", x)
    }
}

/// Volume as a count: whole numbers print without a decimal point.
pub fn fmt_count(x: f64) -> String {
    if x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{:.0}", x)
    } else {
        fmt_num(x)
    }
}

fn md_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

pub fn render_table_markdown(rows: &[RankedRow]) -> String {
    let mut md = String::new();
    md.push_str("| # | phrase | domain | count | velocity | novelty | score | examples |\n");
    md.push_str("|---|---|---|---|---|---|---|---|\n");
    for (i, r) in rows.iter().enumerate() {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
            i + 1,
            md_cell(&r.phrase),
            md_cell(&r.domain),
            fmt_count(r.count),
            fmt_num(r.velocity),
            fmt_num(r.novelty),
            fmt_num(r.score),
            md_cell(&r.examples)
        ));
    }
    md
}

pub fn render_csv(rows: &[RankedRow]) -> String {
    let mut out = String::from("phrase,domain,count,velocity,novelty,score,examples\n");
    for r in rows {
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            csv_field(&r.phrase),
            csv_field(&r.domain),
            fmt_count(r.count),
            fmt_num(r.velocity),
            fmt_num(r.novelty),
            fmt_num(r.score),
            csv_field(&r.examples)
        ));
    }
    out
}

const BLUEPRINT_TITLE: &str = "Leviathan Weekly Blueprint";

/// Weekly blueprint: one section per row with its ad, hook and headline copy.
pub fn render_blueprint(rows: &[RankedRow], date: &str) -> String {
    let mut lines = vec![format!("# {} — {}", BLUEPRINT_TITLE, date), String::new()];
    for (i, r) in rows.iter().enumerate() {
        let h = hooks(&r.phrase);
        lines.push(format!("## {}. {} (score {})", i + 1, r.phrase, fmt_num(r.score)));
        lines.push(format!("- Domain: {}", r.domain));
        lines.push(format!(
            "- Velocity: {} • Novelty: {} • Volume: {}",
            fmt_num(r.velocity),
            fmt_num(r.novelty),
            fmt_count(r.count)
        ));
        lines.push(format!("- **Ad**: {}", h.ad));
        lines.push(format!("- **Short Hook**: {}", h.short));
        lines.push(format!("- **Landing H1**: {}", h.h1));
        lines.push(String::new());
    }
    lines.join("\n")
}

/// Rows grouped by cluster id, at most `per_cluster` rows each.
pub fn render_clusters(rows: &[RankedRow], clustering: &Clustering, per_cluster: usize) -> String {
    let mut md = String::new();
    for (id, terms) in clustering.top_terms.iter().enumerate() {
        let members = clustering.members(id);
        if members.is_empty() {
            continue;
        }
        md.push_str(&format!("**Cluster {}** — top terms: `{}`\n\n", id, terms.join(", ")));
        md.push_str("| phrase | score | velocity | novelty | domain |\n");
        md.push_str("|---|---|---|---|---|\n");
        for &i in members.iter().take(per_cluster) {
            let Some(r) = rows.get(i) else { continue };
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                md_cell(&r.phrase),
                fmt_num(r.score),
                fmt_num(r.velocity),
                fmt_num(r.novelty),
                md_cell(&r.domain)
            ));
        }
        md.push('\n');
    }
    md
}
