//! PDF backend built on printpdf
//!
//! Text is drawn as vector text with the builtin Helvetica faces, so the
//! pixel scale and image quality options are accepted but have no effect on
//! the output.

use std::io::BufWriter;

use async_trait::async_trait;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb as PdfRgb,
};
use tracing::debug;

use super::layout::{paginate, text_width, Align, Item, Layouter, Page, PT_PER_INCH};
use super::rasterizer::{RasterError, Rasterizer, RenderOptions, RenderedDocument};
use super::stage::{PageFrame, StagedNode};
use crate::document::style::Rgb;
use crate::document::Document;

/// Points per CSS pixel
const PT_PER_PX: f32 = 0.75;

fn mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / PT_PER_INCH)
}

fn color(rgb: Rgb) -> Color {
    let (r, g, b) = rgb.unit();
    Color::Rgb(PdfRgb::new(r, g, b, None))
}

/// Replace characters the builtin fonts cannot encode
pub fn builtin_safe(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '•' => '-',
            '★' => '*',
            '–' | '—' => '-',
            '‘' | '’' => '\'',
            '“' | '”' => '"',
            c if c.is_ascii() => c,
            _ => '?',
        })
        .collect()
}

/// Renders staged reports to PDF bytes
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfRasterizer;

impl PdfRasterizer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Rasterizer for PdfRasterizer {
    async fn render(
        &self,
        node: &StagedNode,
        options: &RenderOptions,
    ) -> Result<RenderedDocument, RasterError> {
        options.validate()?;
        debug!(
            node = node.id(),
            scale = options.scale,
            quality = options.image.quality,
            avoid_all = options.page_break.avoid_all,
            "Rendering staged node to PDF"
        );

        let document = node.shared_document();
        let frame = node.frame().clone();
        let options = options.clone();
        tokio::task::spawn_blocking(move || render_pdf(&document, &frame, &options))
            .await
            .map_err(|e| RasterError::Task(e.to_string()))?
    }
}

/// Lay out and encode a document synchronously
pub fn render_pdf(
    document: &Document,
    frame: &PageFrame,
    options: &RenderOptions,
) -> Result<RenderedDocument, RasterError> {
    let padding = frame.padding_px as f32 * PT_PER_PX;
    let (width_in, height_in) = options.page.dimensions_in();
    let [top, right, bottom, left] = options.margin_in;
    let page_width = width_in * PT_PER_INCH;
    let page_height = height_in * PT_PER_INCH;
    let printable_height = (height_in - top - bottom) * PT_PER_INCH - 2.0 * padding;
    let content_width = (width_in - left - right) * PT_PER_INCH - 2.0 * padding;
    if printable_height <= 0.0 || content_width <= 0.0 {
        return Err(RasterError::Layout("page frame leaves no room for content".into()));
    }

    let blocks = Layouter::new(content_width).blocks(document);
    let pages = paginate(&blocks, printable_height, options.page_break.avoid_all);

    let origin_x = left * PT_PER_INCH + padding;
    let origin_top = page_height - top * PT_PER_INCH - padding;

    let doc = PdfDocument::empty(&document.title);
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RasterError::Encode(format!("{:?}", e)))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RasterError::Encode(format!("{:?}", e)))?;

    let fonts = Fonts { regular, bold };
    let area = ContentArea {
        origin_x,
        origin_top,
        content_width,
    };
    for (index, page) in pages.iter().enumerate() {
        let (page_index, layer_index) =
            doc.add_page(mm(page_width), mm(page_height), format!("Page {}", index + 1));
        let layer = doc.get_page(page_index).get_layer(layer_index);
        draw_page(&layer, page, &fonts, &area);
    }

    let page_count = pages.len();
    let bytes = encode(doc)?;
    debug!(pages = page_count, bytes = bytes.len(), "Encoded PDF");
    Ok(RenderedDocument { bytes, page_count })
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

struct ContentArea {
    origin_x: f32,
    origin_top: f32,
    content_width: f32,
}

fn draw_page(layer: &PdfLayerReference, page: &Page, fonts: &Fonts, area: &ContentArea) {
    for placed in &page.items {
        let top = area.origin_top - placed.top_pt;
        match &placed.item {
            Item::Text { line, .. } => {
                let line_width: f32 = line
                    .runs
                    .iter()
                    .map(|r| text_width(&r.text, line.size_pt, r.bold))
                    .sum();
                let mut x = match line.align {
                    Align::Left => area.origin_x + line.indent_pt,
                    Align::Center => {
                        area.origin_x + ((area.content_width - line_width) / 2.0).max(0.0)
                    }
                };
                let baseline = top - line.size_pt;
                layer.set_fill_color(color(line.color));
                for run in &line.runs {
                    let font = if run.bold { &fonts.bold } else { &fonts.regular };
                    layer.use_text(builtin_safe(&run.text), line.size_pt, mm(x), mm(baseline), font);
                    x += text_width(&run.text, line.size_pt, run.bold);
                }
            }
            Item::Rule {
                color: rule_color,
                thickness_pt,
                advance_pt,
            } => {
                let y = top - advance_pt / 2.0;
                layer.set_outline_color(color(*rule_color));
                layer.set_outline_thickness(*thickness_pt);
                layer.add_line(Line {
                    points: vec![
                        (Point::new(mm(area.origin_x), mm(y)), false),
                        (Point::new(mm(area.origin_x + area.content_width), mm(y)), false),
                    ],
                    is_closed: false,
                });
            }
            Item::Gap { .. } => {}
        }
    }
}

fn encode(doc: PdfDocumentReference) -> Result<Vec<u8>, RasterError> {
    let mut writer = BufWriter::new(Vec::new());
    doc.save(&mut writer)
        .map_err(|e| RasterError::Encode(format!("{:?}", e)))?;
    writer
        .into_inner()
        .map_err(|e| RasterError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::document::render_report;
    use crate::models::report::fixtures::input;

    #[test]
    fn test_builtin_safe_maps_symbols() {
        assert_eq!(builtin_safe("• Kung Fu Tea (4.5★)"), "- Kung Fu Tea (4.5*)");
        assert_eq!(builtin_safe("Café"), "Caf?");
    }

    #[test]
    fn test_render_produces_pdf() {
        let doc = render_report(&input("SoHo"), "$");
        let rendered = render_pdf(&doc, &PageFrame::letter(), &RenderOptions::default()).unwrap();
        assert!(rendered.bytes.starts_with(b"%PDF"));
        assert!(rendered.page_count >= 1);
    }

    #[test]
    fn test_markup_break_hints_do_not_change_pages() {
        let doc = render_report(&input("SoHo"), "$");
        let mut options = RenderOptions::default();
        let baseline = render_pdf(&doc, &PageFrame::letter(), &options).unwrap();

        options.page_break.css = false;
        options.page_break.legacy = false;
        let without_hints = render_pdf(&doc, &PageFrame::letter(), &options).unwrap();

        assert_eq!(baseline.page_count, without_hints.page_count);
    }

    #[tokio::test]
    async fn test_rasterizer_renders_staged_node() {
        let doc = Arc::new(render_report(&input("SoHo"), "$"));
        let node = StagedNode::new(doc, PageFrame::letter());
        let rendered = PdfRasterizer::new()
            .render(&node, &RenderOptions::default())
            .await
            .unwrap();
        assert!(rendered.bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_invalid_options_fail_before_rendering() {
        let doc = Arc::new(render_report(&input("SoHo"), "$"));
        let node = StagedNode::new(doc, PageFrame::letter());
        let options = RenderOptions {
            scale: 1,
            ..RenderOptions::default()
        };
        let result = PdfRasterizer::new().render(&node, &options).await;
        assert!(matches!(result, Err(RasterError::InvalidOptions(_))));
    }
}
