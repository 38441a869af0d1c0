//! Page layout for report documents
//!
//! The document tree is flattened into one block per top-level node, text is
//! wrapped to the printable width with Helvetica-like metrics, and blocks are
//! placed onto pages. With `avoid_all`, a block that does not fit in the
//! space left on a page moves to the next page whole; only blocks taller
//! than a full page are split.

use crate::document::style::{self, Rgb};
use crate::document::{Document, Inline, Node, Role};

/// Points per inch
pub const PT_PER_INCH: f32 = 72.0;

/// CSS pixels to points
fn px(v: f32) -> f32 {
    v * 0.75
}

/// Horizontal alignment of a text line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// A run of text sharing one weight
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
}

/// One wrapped line of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub runs: Vec<Run>,
    pub size_pt: f32,
    pub color: Rgb,
    pub indent_pt: f32,
    pub align: Align,
}

impl TextLine {
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Something placed in a block, with the vertical space it consumes
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Text { line: TextLine, advance_pt: f32 },
    Rule { color: Rgb, thickness_pt: f32, advance_pt: f32 },
    Gap { advance_pt: f32 },
}

impl Item {
    pub fn advance(&self) -> f32 {
        match self {
            Item::Text { advance_pt, .. }
            | Item::Rule { advance_pt, .. }
            | Item::Gap { advance_pt } => *advance_pt,
        }
    }
}

/// Items that belong together on a page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub items: Vec<Item>,
}

impl Block {
    pub fn height(&self) -> f32 {
        self.items.iter().map(Item::advance).sum()
    }
}

/// An item placed at a vertical offset from the top of the printable area
#[derive(Debug, Clone, PartialEq)]
pub struct Placed {
    pub item: Item,
    pub top_pt: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<Placed>,
}

/// Approximate advance width of text in Helvetica
pub fn text_width(text: &str, size_pt: f32, bold: bool) -> f32 {
    let em = if bold { 0.58 } else { 0.52 };
    text.chars()
        .map(|c| if c == ' ' { 0.28 } else { em })
        .sum::<f32>()
        * size_pt
}

/// Turns nodes into blocks at a fixed content width
pub struct Layouter {
    content_width_pt: f32,
}

/// Line spacing relative to font size
const LINE_HEIGHT: f32 = 1.45;

impl Layouter {
    pub fn new(content_width_pt: f32) -> Self {
        Self { content_width_pt }
    }

    /// One block per top-level node
    pub fn blocks(&self, document: &Document) -> Vec<Block> {
        document
            .nodes
            .iter()
            .map(|node| {
                let mut block = Block::default();
                self.push_node(node, &mut block, 0.0);
                block
            })
            .collect()
    }

    fn push_node(&self, node: &Node, block: &mut Block, indent: f32) {
        match node {
            Node::Heading { level, text } => {
                let (size, gap) = if *level <= 1 { (px(32.0), px(10.0)) } else { (px(24.0), px(10.0)) };
                self.push_text(block, &[Inline::Strong(text.clone())], size, style::AMBER_DARK, indent, Align::Left);
                block.items.push(Item::Gap { advance_pt: gap });
            }
            Node::Paragraph { inlines } => {
                self.push_text(block, inlines, px(14.0), style::INK, indent, Align::Left);
            }
            Node::Line { text } => {
                self.push_text(block, &[Inline::Text(text.clone())], px(14.0), style::INK, indent, Align::Left);
            }
            Node::Score { text } => {
                self.push_text(block, &[Inline::Strong(text.clone())], px(48.0), style::AMBER_SCORE, indent, Align::Left);
            }
            Node::Badge { text } => {
                self.push_text(block, &[Inline::Strong(text.clone())], px(12.0), style::BADGE_GREEN, indent, Align::Left);
            }
            Node::Section { title, children, .. } => {
                self.push_text(block, &[Inline::Strong(title.clone())], px(18.0), style::AMBER_DARK, indent + px(14.0), Align::Left);
                block.items.push(Item::Gap { advance_pt: px(8.0) });
                for child in children {
                    self.push_node(child, block, indent);
                }
                block.items.push(Item::Gap { advance_pt: px(30.0) });
            }
            Node::Block { role, children } => self.push_block(*role, children, block, indent),
        }
    }

    fn push_block(&self, role: Role, children: &[Node], block: &mut Block, indent: f32) {
        match role {
            Role::Header => {
                for child in children {
                    self.push_node(child, block, indent);
                }
                block.items.push(Item::Gap { advance_pt: px(20.0) });
                block.items.push(Item::Rule { color: style::AMBER, thickness_pt: px(3.0), advance_pt: px(30.0) });
            }
            Role::Highlight | Role::Listing => {
                let inner = indent + px(15.0);
                block.items.push(Item::Gap { advance_pt: px(10.0) });
                for child in children {
                    self.push_node(child, block, inner);
                }
                block.items.push(Item::Gap { advance_pt: px(10.0) });
            }
            Role::DataSource => {
                block.items.push(Item::Rule { color: style::RULE, thickness_pt: px(1.0), advance_pt: px(15.0) });
                for child in children {
                    if let Node::Paragraph { inlines } = child {
                        self.push_text(block, inlines, px(11.0), style::FAINT, indent, Align::Left);
                    } else {
                        self.push_node(child, block, indent);
                    }
                }
            }
            Role::Footer => {
                block.items.push(Item::Gap { advance_pt: px(40.0) });
                block.items.push(Item::Rule { color: style::RULE, thickness_pt: px(1.0), advance_pt: px(20.0) });
                for child in children {
                    if let Node::Paragraph { inlines } = child {
                        self.push_text(block, inlines, px(12.0), style::MUTED, indent, Align::Center);
                    } else {
                        self.push_node(child, block, indent);
                    }
                }
            }
        }
    }

    fn push_text(
        &self,
        block: &mut Block,
        inlines: &[Inline],
        size_pt: f32,
        color: Rgb,
        indent_pt: f32,
        align: Align,
    ) {
        let width = (self.content_width_pt - indent_pt).max(size_pt);
        for runs in wrap(inlines, size_pt, width) {
            block.items.push(Item::Text {
                line: TextLine {
                    runs,
                    size_pt,
                    color,
                    indent_pt,
                    align,
                },
                advance_pt: size_pt * LINE_HEIGHT,
            });
        }
    }
}

/// Greedy word wrap that keeps per-word weight
fn wrap(inlines: &[Inline], size_pt: f32, width_pt: f32) -> Vec<Vec<Run>> {
    let words: Vec<(&str, bool)> = inlines
        .iter()
        .flat_map(|inline| {
            let bold = inline.is_strong();
            inline.text().split_whitespace().map(move |w| (w, bold))
        })
        .collect();

    let mut lines: Vec<Vec<(&str, bool)>> = Vec::new();
    let mut current: Vec<(&str, bool)> = Vec::new();
    let mut current_width = 0.0;

    for (word, bold) in words {
        let word_width = text_width(word, size_pt, bold);
        let space = if current.is_empty() { 0.0 } else { text_width(" ", size_pt, false) };
        if !current.is_empty() && current_width + space + word_width > width_pt {
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
            current.push((word, bold));
            current_width += word_width;
        } else {
            current.push((word, bold));
            current_width += space + word_width;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.into_iter().map(merge_runs).collect()
}

/// Join consecutive words of the same weight into runs
fn merge_runs(words: Vec<(&str, bool)>) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for (word, bold) in words {
        match runs.last_mut() {
            Some(run) if run.bold == bold => {
                run.text.push(' ');
                run.text.push_str(word);
            }
            Some(_) => runs.push(Run {
                text: format!(" {}", word),
                bold,
            }),
            None => runs.push(Run {
                text: word.to_string(),
                bold,
            }),
        }
    }
    runs
}

/// Place blocks onto pages of `page_height_pt`
pub fn paginate(blocks: &[Block], page_height_pt: f32, avoid_all: bool) -> Vec<Page> {
    let mut pages = vec![Page::default()];
    let mut cursor = 0.0_f32;

    for block in blocks {
        let height = block.height();
        if avoid_all && cursor > 0.0 && cursor + height > page_height_pt && height <= page_height_pt {
            pages.push(Page::default());
            cursor = 0.0;
        }

        for item in &block.items {
            let advance = item.advance();
            if cursor > 0.0 && cursor + advance > page_height_pt {
                // Gaps are dropped at a page break rather than carried over
                if matches!(item, Item::Gap { .. }) {
                    continue;
                }
                pages.push(Page::default());
                cursor = 0.0;
            }
            if let Some(page) = pages.last_mut() {
                page.items.push(Placed {
                    item: item.clone(),
                    top_pt: cursor,
                });
            }
            cursor += advance;
        }
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::render_report;
    use crate::models::report::fixtures::input;

    fn text_block(lines: usize, size: f32) -> Block {
        Block {
            items: (0..lines)
                .map(|i| Item::Text {
                    line: TextLine {
                        runs: vec![Run {
                            text: format!("line {}", i),
                            bold: false,
                        }],
                        size_pt: size,
                        color: style::INK,
                        indent_pt: 0.0,
                        align: Align::Left,
                    },
                    advance_pt: size,
                })
                .collect(),
        }
    }

    #[test]
    fn test_one_block_per_top_level_node() {
        let doc = render_report(&input("SoHo"), "$");
        let blocks = Layouter::new(480.0).blocks(&doc);
        assert_eq!(blocks.len(), doc.nodes.len());
        assert!(blocks.iter().all(|b| b.height() > 0.0));
    }

    #[test]
    fn test_wrap_respects_width() {
        let inlines = vec![Inline::Text("word ".repeat(60))];
        let lines = wrap(&inlines, 10.0, 100.0);
        assert!(lines.len() > 1);
        for runs in &lines {
            let text: String = runs.iter().map(|r| r.text.as_str()).collect();
            assert!(text_width(&text, 10.0, false) <= 100.0 + 0.01);
        }
    }

    #[test]
    fn test_wrap_keeps_weight() {
        let inlines = vec![
            Inline::Strong("Business Type:".into()),
            Inline::Text(" coffee shop".into()),
        ];
        let lines = wrap(&inlines, 10.0, 1000.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0],
            vec![
                Run { text: "Business Type:".into(), bold: true },
                Run { text: " coffee shop".into(), bold: false },
            ]
        );
    }

    #[test]
    fn test_block_moves_whole_when_avoiding_breaks() {
        let blocks = vec![text_block(7, 10.0), text_block(5, 10.0)];
        let pages = paginate(&blocks, 100.0, true);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].items.len(), 7);
        assert_eq!(pages[1].items.len(), 5);
        assert_eq!(pages[1].items[0].top_pt, 0.0);
    }

    #[test]
    fn test_block_splits_without_avoidance() {
        let blocks = vec![text_block(7, 10.0), text_block(5, 10.0)];
        let pages = paginate(&blocks, 100.0, false);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].items.len(), 10);
        assert_eq!(pages[1].items.len(), 2);
    }

    #[test]
    fn test_oversized_block_is_split() {
        let blocks = vec![text_block(25, 10.0)];
        let pages = paginate(&blocks, 100.0, true);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages.iter().map(|p| p.items.len()).sum::<usize>(), 25);
    }

    #[test]
    fn test_report_fits_on_letter_page() {
        let doc = render_report(&input("SoHo"), "$");
        let blocks = Layouter::new(480.0).blocks(&doc);
        let pages = paginate(&blocks, 720.0, true);
        assert!(!pages.is_empty());
        assert!(pages.iter().all(|p| !p.items.is_empty()));
    }
}
