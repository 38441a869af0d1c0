//! Structured report documents
//!
//! Reports are built as a small tree of [`Node`]s owned by the caller. The
//! tree is the single source for every output: HTML for staging and preview,
//! paginated PDF, and plain text for the terminal.

pub mod builder;
pub mod html;
pub mod style;

use serde::Serialize;

pub use builder::render_report;

/// Inline text run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    Strong(String),
}

impl Inline {
    pub fn text(&self) -> &str {
        match self {
            Inline::Text(t) | Inline::Strong(t) => t,
        }
    }

    pub fn is_strong(&self) -> bool {
        matches!(self, Inline::Strong(_))
    }
}

/// Visual role of a container block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Title banner
    Header,
    /// Shaded box around the headline recommendation
    Highlight,
    /// Bordered box holding a data listing or its fallback
    Listing,
    /// Data provenance notes
    DataSource,
    /// Attribution line
    Footer,
}

/// Which report section a [`Node::Section`] is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    BusinessProfile,
    Recommendation,
    ScoreBreakdown,
    Competitors,
    Revenue,
}

/// A node of the report tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    Heading { level: u8, text: String },
    Paragraph { inlines: Vec<Inline> },
    /// One line of a listing; consecutive lines are separated by line breaks
    Line { text: String },
    /// Large headline score
    Score { text: String },
    /// Confidence badge
    Badge { text: String },
    Block { role: Role, children: Vec<Node> },
    Section {
        kind: SectionKind,
        title: String,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn paragraph(inlines: Vec<Inline>) -> Self {
        Node::Paragraph { inlines }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Paragraph {
            inlines: vec![Inline::Text(text.into())],
        }
    }

    pub fn line(text: impl Into<String>) -> Self {
        Node::Line { text: text.into() }
    }

    /// Children of a container node; leaves have none
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Block { children, .. } | Node::Section { children, .. } => children,
            _ => &[],
        }
    }

    /// Append this node's text, one entry per visual line
    fn collect_lines(&self, out: &mut Vec<String>) {
        match self {
            Node::Heading { text, .. }
            | Node::Line { text }
            | Node::Score { text }
            | Node::Badge { text } => out.push(text.clone()),
            Node::Paragraph { inlines } => {
                out.push(inlines.iter().map(Inline::text).collect::<String>())
            }
            Node::Block { children, .. } => {
                for child in children {
                    child.collect_lines(out);
                }
            }
            Node::Section {
                title, children, ..
            } => {
                out.push(title.clone());
                for child in children {
                    child.collect_lines(out);
                }
            }
        }
    }

    /// Text lines of this node and its descendants
    pub fn lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_lines(&mut out);
        out
    }
}

/// A complete report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Document title, used for metadata
    pub title: String,
    /// Top-level nodes in display order
    pub nodes: Vec<Node>,
}

impl Document {
    /// Find a section by kind
    pub fn section(&self, kind: SectionKind) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|n| matches!(n, Node::Section { kind: k, .. } if *k == kind))
    }

    /// Kinds of the sections present, in order
    pub fn section_kinds(&self) -> Vec<SectionKind> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                Node::Section { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect()
    }

    /// The whole document as plain text lines
    pub fn plain_text(&self) -> String {
        self.nodes
            .iter()
            .flat_map(Node::lines)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_flatten_nested_nodes() {
        let node = Node::Section {
            kind: SectionKind::Revenue,
            title: "REVENUE PROJECTION".into(),
            children: vec![Node::Block {
                role: Role::Listing,
                children: vec![Node::line("a"), Node::line("b")],
            }],
        };
        assert_eq!(node.lines(), vec!["REVENUE PROJECTION", "a", "b"]);
    }

    #[test]
    fn test_paragraph_joins_inlines() {
        let node = Node::paragraph(vec![
            Inline::Strong("Business Type:".into()),
            Inline::Text(" cafe".into()),
        ]);
        assert_eq!(node.lines(), vec!["Business Type: cafe"]);
    }
}
