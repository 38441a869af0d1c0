//! Report tree builder
//!
//! Every section is a pure function of the data it shows. Sections are
//! independent: each one resolves to its own listing or its own fallback text.

use super::{Document, Inline, Node, Role, SectionKind};
use crate::models::{Competitor, LocationSummary, Metric, Money, ReportInput, RevenueScenario};

pub const REPORT_TITLE: &str = "VANTAGE LOCATION INTELLIGENCE REPORT";
pub const NO_METRICS: &str = "No metrics available";
pub const NO_COMPETITORS: &str =
    "No competitors found in the immediate area. This location offers a unique market opportunity.";
pub const NO_REVENUE: &str = "Revenue projections not available";
pub const ATTRIBUTION: &str = "Generated by Vantage | Location Intelligence Platform";

/// Radius the competitor scan covers, as shown in the report
const COMPETITOR_RADIUS: &str = "0.5 miles";

const DATA_SOURCES: [&str; 3] = [
    "• Foot traffic: NYC Open Data, Business Licenses 2024",
    "• Competitors: Google Places API (live data)",
    "• Demographics: Census ACS 2023",
];

/// Build the full report tree in its fixed section order
pub fn render_report(input: &ReportInput, currency_symbol: &str) -> Document {
    let mut nodes = vec![header(&input.generated_at)];
    nodes.extend(business_profile(input, currency_symbol));
    nodes.push(recommendation(&input.location));
    nodes.push(score_breakdown(&input.location.metrics));
    nodes.push(competitor_analysis(&input.location.competitors));
    nodes.push(revenue_projection(&input.location.revenue));
    nodes.push(data_sources());
    nodes.push(attribution());

    Document {
        title: format!("{} - {}", REPORT_TITLE, input.location.name),
        nodes,
    }
}

pub fn header(generated_at: &str) -> Node {
    Node::Block {
        role: Role::Header,
        children: vec![
            Node::Heading {
                level: 1,
                text: REPORT_TITLE.to_string(),
            },
            Node::text(format!("Generated: {}", generated_at)),
        ],
    }
}

/// Business profile, present only when at least one field is set
pub fn business_profile(input: &ReportInput, currency_symbol: &str) -> Option<Node> {
    if !input.has_business_profile() {
        return None;
    }

    let field = |label: &str, value: String| {
        Node::paragraph(vec![
            Inline::Strong(format!("{}:", label)),
            Inline::Text(format!(" {}", value)),
        ])
    };

    let mut children = Vec::new();
    if let Some(business_type) = input.business_type() {
        children.push(field("Business Type", business_type.to_string()));
    }
    if let Some(target_demo) = input.target_demo() {
        children.push(field("Target Demographic", target_demo.to_string()));
    }
    if let Some(budget) = input.budget() {
        children.push(field("Monthly Budget", format_budget(budget, currency_symbol)));
    }

    Some(Node::Section {
        kind: SectionKind::BusinessProfile,
        title: "BUSINESS PROFILE".to_string(),
        children,
    })
}

pub fn format_budget(budget: Money, currency_symbol: &str) -> String {
    budget.format_grouped(currency_symbol)
}

pub fn recommendation(location: &LocationSummary) -> Node {
    Node::Section {
        kind: SectionKind::Recommendation,
        title: "#1 RECOMMENDATION".to_string(),
        children: vec![Node::Block {
            role: Role::Highlight,
            children: vec![
                Node::Heading {
                    level: 2,
                    text: location.name.clone(),
                },
                Node::Score {
                    text: format_score(location.score),
                },
                Node::Badge {
                    text: format!("{} CONFIDENCE", location.confidence.as_upper()),
                },
            ],
        }],
    }
}

pub fn format_score(score: u8) -> String {
    format!("{}/100", score)
}

pub fn score_breakdown(metrics: &[Metric]) -> Node {
    let children = if metrics.is_empty() {
        vec![Node::text(NO_METRICS)]
    } else {
        metrics.iter().map(|m| Node::line(metric_line(m))).collect()
    };

    listing_section(SectionKind::ScoreBreakdown, "SCORE BREAKDOWN", children)
}

pub fn metric_line(metric: &Metric) -> String {
    format!(
        "• {}: {} ({})",
        metric.label,
        format_score(metric.score),
        metric.confidence
    )
}

pub fn competitor_analysis(competitors: &[Competitor]) -> Node {
    let children = if competitors.is_empty() {
        vec![Node::text(NO_COMPETITORS)]
    } else {
        let mut children = vec![Node::paragraph(vec![Inline::Strong(competitor_count_line(
            competitors.len(),
        ))])];
        children.extend(competitors.iter().map(|c| Node::line(competitor_line(c))));
        children
    };

    listing_section(SectionKind::Competitors, "COMPETITOR ANALYSIS", children)
}

pub fn competitor_count_line(count: usize) -> String {
    let noun = if count == 1 { "competitor" } else { "competitors" };
    format!("Found {} {} within {}:", count, noun, COMPETITOR_RADIUS)
}

pub fn competitor_line(competitor: &Competitor) -> String {
    let rating = competitor
        .display_rating()
        .map(|r| format!(" ({}★)", r))
        .unwrap_or_default();
    format!(
        "• {}{}, {} - {}",
        competitor.name, rating, competitor.distance, competitor.weakness
    )
}

pub fn revenue_projection(revenue: &[RevenueScenario]) -> Node {
    let children = if revenue.is_empty() {
        vec![Node::text(NO_REVENUE)]
    } else {
        revenue.iter().map(|r| Node::line(revenue_line(r))).collect()
    };

    listing_section(SectionKind::Revenue, "REVENUE PROJECTION", children)
}

pub fn revenue_line(revenue: &RevenueScenario) -> String {
    format!(
        "{}: {}/mo ({}/yr) - {} margin",
        revenue.scenario, revenue.monthly, revenue.annual, revenue.margin
    )
}

pub fn data_sources() -> Node {
    let mut children = vec![Node::paragraph(vec![Inline::Strong(
        "Data Sources:".to_string(),
    )])];
    children.extend(DATA_SOURCES.iter().map(|s| Node::text(*s)));

    Node::Block {
        role: Role::DataSource,
        children,
    }
}

pub fn attribution() -> Node {
    Node::Block {
        role: Role::Footer,
        children: vec![Node::text(ATTRIBUTION)],
    }
}

fn listing_section(kind: SectionKind, title: &str, children: Vec<Node>) -> Node {
    Node::Section {
        kind,
        title: title.to_string(),
        children: vec![Node::Block {
            role: Role::Listing,
            children,
        }],
    }
}
