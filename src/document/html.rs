//! HTML serialization of report documents
//!
//! All text goes through maud's escaping, so location names or competitor
//! notes can never inject markup into the report.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::style::STYLESHEET;
use super::{Document, Inline, Node, Role};

fn role_class(role: Role) -> &'static str {
    match role {
        Role::Header => "header",
        Role::Highlight => "highlight-box",
        Role::Listing => "listing",
        Role::DataSource => "data-source",
        Role::Footer => "footer",
    }
}

fn render_inlines(inlines: &[Inline]) -> Markup {
    html! {
        @for inline in inlines {
            @match inline {
                Inline::Strong(text) => { strong { (text) } },
                Inline::Text(text) => { (text) },
            }
        }
    }
}

/// Render one node and its descendants
pub fn render_node(node: &Node) -> Markup {
    html! {
        @match node {
            Node::Heading { level, text } => {
                @if *level <= 1 {
                    h1 { (text) }
                } @else {
                    h2 { (text) }
                }
            },
            Node::Paragraph { inlines } => { p { (render_inlines(inlines)) } },
            Node::Line { text } => { span.line { (text) } br; },
            Node::Score { text } => { div.score { (text) } },
            Node::Badge { text } => { span.confidence { (text) } },
            Node::Block { role, children } => {
                div class=(role_class(*role)) {
                    @for child in children { (render_node(child)) }
                }
            },
            Node::Section { title, children, .. } => {
                div.section {
                    div.section-title { (title) }
                    @for child in children { (render_node(child)) }
                }
            },
        }
    }
}

/// Render the document body without the surrounding page
pub fn render_body(document: &Document) -> Markup {
    html! {
        @for node in &document.nodes {
            (render_node(node))
        }
    }
}

/// Render a complete, self-contained HTML page
pub fn to_html(document: &Document) -> String {
    let page = html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (document.title) }
                style { (PreEscaped(STYLESHEET)) }
            }
            body { (render_body(document)) }
        }
    };
    page.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::render_report;
    use crate::models::report::fixtures::input;

    #[test]
    fn test_page_contains_sections() {
        let html = to_html(&render_report(&input("SoHo"), "$"));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<div class=\"section-title\">SCORE BREAKDOWN</div>"));
        assert!(html.contains("<div class=\"score\">87/100</div>"));
        assert!(html.contains("<span class=\"confidence\">HIGH CONFIDENCE</span>"));
        assert!(html.contains("<strong>Monthly Budget:</strong> $15,000"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut report = input("<script>alert(1)</script> & Co");
        report.location.competitors[0].weakness = "\"quoted\" <b>".into();
        let html = to_html(&render_report(&report, "$"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; Co"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_listing_lines_are_broken() {
        let html = render_node(&Node::line("one")).into_string();
        assert_eq!(html, "<span class=\"line\">one</span><br>");
    }
}
