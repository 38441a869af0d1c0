//! Terminal preview of location reports
//!
//! Listings are printed as tables; the same placeholders as the exported
//! document are used when a listing is empty.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::document::builder::{
    competitor_count_line, format_budget, format_score, NO_COMPETITORS, NO_METRICS, NO_REVENUE,
    REPORT_TITLE,
};
use crate::models::{AnalysisFile, Competitor, Metric, ReportInput, RevenueScenario};

const WIDTH: usize = 72;

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    label: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "")]
    bar: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
}

#[derive(Tabled)]
struct CompetitorRow {
    #[tabled(rename = "Competitor")]
    name: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Distance")]
    distance: String,
    #[tabled(rename = "Weakness")]
    weakness: String,
}

#[derive(Tabled)]
struct RevenueRow {
    #[tabled(rename = "Scenario")]
    scenario: String,
    #[tabled(rename = "Monthly")]
    monthly: String,
    #[tabled(rename = "Annual")]
    annual: String,
    #[tabled(rename = "Margin")]
    margin: String,
}

#[derive(Tabled)]
struct LocationRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Location")]
    name: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
}

fn table<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Metrics as a table, or the placeholder
pub fn format_metrics(metrics: &[Metric]) -> String {
    if metrics.is_empty() {
        return NO_METRICS.to_string();
    }
    table(
        metrics
            .iter()
            .map(|m| MetricRow {
                label: m.label.clone(),
                score: format_score(m.score),
                bar: format_bar(f64::from(m.score), 100.0, 20),
                confidence: m.confidence.as_upper(),
            })
            .collect(),
    )
}

/// Competitors as a table with a count line, or the placeholder
pub fn format_competitors(competitors: &[Competitor]) -> String {
    if competitors.is_empty() {
        return NO_COMPETITORS.to_string();
    }
    let rows = competitors
        .iter()
        .map(|c| CompetitorRow {
            name: truncate(&c.name, 28),
            rating: c
                .display_rating()
                .map(|r| format!("{}★", r))
                .unwrap_or_else(|| "-".to_string()),
            distance: c.distance.clone(),
            weakness: truncate(&c.weakness, 32),
        })
        .collect();
    format!("{}\n{}", competitor_count_line(competitors.len()), table(rows))
}

/// Revenue scenarios as a table, or the placeholder
pub fn format_revenue(revenue: &[RevenueScenario]) -> String {
    if revenue.is_empty() {
        return NO_REVENUE.to_string();
    }
    table(
        revenue
            .iter()
            .map(|r| RevenueRow {
                scenario: r.scenario.clone(),
                monthly: r.monthly.clone(),
                annual: r.annual.clone(),
                margin: r.margin.clone(),
            })
            .collect(),
    )
}

/// Full terminal preview of one report
pub fn format_report_preview(input: &ReportInput, currency_symbol: &str) -> String {
    let location = &input.location;
    let mut out = String::new();

    out.push_str(&double_separator(WIDTH));
    out.push('\n');
    out.push_str(&format_header(REPORT_TITLE, WIDTH));
    out.push('\n');
    out.push_str(&format_header(&format!("Generated: {}", input.generated_at), WIDTH));
    out.push('\n');
    out.push_str(&double_separator(WIDTH));
    out.push_str("\n\n");

    if input.has_business_profile() {
        out.push_str("BUSINESS PROFILE\n");
        if let Some(business_type) = input.business_type() {
            out.push_str(&format!("  Business Type: {}\n", business_type));
        }
        if let Some(target) = input.target_demo() {
            out.push_str(&format!("  Target Demographic: {}\n", target));
        }
        if let Some(budget) = input.budget() {
            out.push_str(&format!("  Budget: {}\n", format_budget(budget, currency_symbol)));
        }
        out.push('\n');
    }

    out.push_str("#1 RECOMMENDATION\n");
    out.push_str(&format!(
        "  {}  {}  [{} CONFIDENCE]\n\n",
        location.name,
        format_score(location.score),
        location.confidence.as_upper()
    ));

    for (title, body) in [
        ("SCORE BREAKDOWN", format_metrics(&location.metrics)),
        ("COMPETITOR ANALYSIS", format_competitors(&location.competitors)),
        ("REVENUE PROJECTION", format_revenue(&location.revenue)),
    ] {
        out.push_str(title);
        out.push('\n');
        out.push_str(&separator(WIDTH));
        out.push('\n');
        out.push_str(&body);
        out.push_str("\n\n");
    }

    out
}

/// Ranked table of every location in an analysis
pub fn format_location_list(analysis: &AnalysisFile) -> String {
    if analysis.locations.is_empty() {
        return "No locations found.".to_string();
    }
    table(
        analysis
            .ranked()
            .into_iter()
            .enumerate()
            .map(|(i, l)| LocationRow {
                rank: i + 1,
                id: l.id,
                name: l.summary.name.clone(),
                score: format_score(l.summary.score),
                confidence: l.summary.confidence.as_upper(),
            })
            .collect(),
    )
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Center a title in a field of `width`
pub fn format_header(title: &str, width: usize) -> String {
    let len = title.chars().count();
    let padding = width.saturating_sub(len) / 2;
    format!("{}{}", " ".repeat(padding), title)
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate to `max_len` characters with an ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
