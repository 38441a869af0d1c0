//! Document rendering collaborator
//!
//! A [`Rasterizer`] turns a staged node into a paginated document. The
//! exporter treats it as opaque: options in, bytes or an error out.

use async_trait::async_trait;
use thiserror::Error;

use super::stage::StagedNode;

/// Errors raised while rendering a staged node
///
/// These stay inside the export boundary; callers only ever see
/// [`crate::error::VantageError::ExportFailed`].
#[derive(Error, Debug)]
pub enum RasterError {
    #[error("invalid render options: {0}")]
    InvalidOptions(String),

    #[error("layout failed: {0}")]
    Layout(String),

    #[error("encoding failed: {0}")]
    Encode(String),

    #[error("render task failed: {0}")]
    Task(String),
}

/// Encoding of embedded page imagery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
}

/// Image settings for captured content
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageOptions {
    pub format: ImageFormat,
    /// Compression quality in (0, 1]
    pub quality: f32,
}

/// Paper size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperSize {
    Letter,
}

impl PaperSize {
    /// Width and height in inches, portrait
    pub fn dimensions_in(&self) -> (f32, f32) {
        match self {
            PaperSize::Letter => (8.5, 11.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Page format handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageFormat {
    pub size: PaperSize,
    pub orientation: Orientation,
}

impl PageFormat {
    /// Page width and height in inches, honoring orientation
    pub fn dimensions_in(&self) -> (f32, f32) {
        let (w, h) = self.size.dimensions_in();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// Where pages may break
///
/// [`super::pdf::PdfRasterizer`] only reads `avoid_all`; its content carries
/// no break hints and it never splits between arbitrary lines unless a block
/// outgrows a page. `css` and `legacy` are passed through for rasterizers
/// that capture markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBreakPolicy {
    /// Never split a section across pages unless it is taller than a page
    pub avoid_all: bool,
    /// Honor explicit break hints in the content
    pub css: bool,
    /// Allow breaks between any two lines as a last resort
    pub legacy: bool,
}

impl Default for PageBreakPolicy {
    fn default() -> Self {
        Self {
            avoid_all: true,
            css: true,
            legacy: true,
        }
    }
}

/// Everything the renderer needs besides the content
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Margins in inches: top, right, bottom, left
    pub margin_in: [f32; 4],
    pub image: ImageOptions,
    /// Pixel density multiplier for captured content
    pub scale: u32,
    pub page: PageFormat,
    pub page_break: PageBreakPolicy,
    pub compress: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            margin_in: [0.5; 4],
            image: ImageOptions {
                format: ImageFormat::Jpeg,
                quality: 0.98,
            },
            scale: 2,
            page: PageFormat {
                size: PaperSize::Letter,
                orientation: Orientation::Portrait,
            },
            page_break: PageBreakPolicy::default(),
            compress: true,
        }
    }
}

impl RenderOptions {
    /// Options with uniform margins, quality and scale taken from settings
    pub fn from_settings(settings: &crate::config::Settings) -> Self {
        Self {
            margin_in: [settings.page_margin_in; 4],
            image: ImageOptions {
                format: ImageFormat::Jpeg,
                quality: settings.image_quality,
            },
            scale: settings.pixel_scale,
            ..Self::default()
        }
    }

    /// Reject options no renderer could honor
    pub fn validate(&self) -> Result<(), RasterError> {
        if self.scale < 2 {
            return Err(RasterError::InvalidOptions(format!(
                "pixel scale must be at least 2, got {}",
                self.scale
            )));
        }

        let quality = self.image.quality;
        if !(quality > 0.0 && quality <= 1.0) {
            return Err(RasterError::InvalidOptions(format!(
                "image quality must be in (0, 1], got {}",
                quality
            )));
        }

        let (width, height) = self.page.dimensions_in();
        let [top, right, bottom, left] = self.margin_in;
        if self.margin_in.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return Err(RasterError::InvalidOptions(
                "margins must be non-negative".into(),
            ));
        }
        if left + right >= width || top + bottom >= height {
            return Err(RasterError::InvalidOptions(
                "margins leave no printable area".into(),
            ));
        }

        Ok(())
    }
}

/// A rendered, encoded document
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Turns a staged node into a paginated document
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn render(
        &self,
        node: &StagedNode,
        options: &RenderOptions,
    ) -> Result<RenderedDocument, RasterError>;
}
