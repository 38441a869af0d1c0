//! Report palette and stylesheet
//!
//! Colors are fully opaque so captured pages look the same whatever theme
//! the surrounding surface uses.

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// Components scaled to 0.0..=1.0
    pub fn unit(&self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);
pub const INK: Rgb = Rgb(0x11, 0x18, 0x27);
pub const AMBER_DARK: Rgb = Rgb(0x92, 0x40, 0x0E);
pub const AMBER: Rgb = Rgb(0xF5, 0x9E, 0x0B);
pub const AMBER_SCORE: Rgb = Rgb(0xD9, 0x77, 0x06);
pub const AMBER_LIGHT: Rgb = Rgb(0xFE, 0xF3, 0xC7);
pub const BADGE_GREEN: Rgb = Rgb(0x10, 0xB9, 0x81);
pub const MUTED: Rgb = Rgb(0x6B, 0x72, 0x80);
pub const FAINT: Rgb = Rgb(0x9C, 0xA3, 0xAF);
pub const PANEL: Rgb = Rgb(0xF9, 0xFA, 0xFB);
pub const RULE: Rgb = Rgb(0xE5, 0xE7, 0xEB);

/// Stylesheet embedded in HTML output
pub const STYLESHEET: &str = r#"
body { font-family: 'Inter', sans-serif; color: #111827; line-height: 1.6; padding: 40px; margin: 0; }
* { box-sizing: border-box; }
p, div, span, h1, h2 { overflow-wrap: break-word; }
.header { border-bottom: 3px solid #F59E0B; padding-bottom: 20px; margin-bottom: 30px; }
.header h1 { color: #92400E; font-size: 32px; font-weight: 900; margin: 0 0 10px 0; }
.header p { color: #6B7280; font-size: 14px; margin: 0; }
.section { margin-bottom: 30px; page-break-inside: avoid; }
.section-title { color: #92400E; font-size: 18px; font-weight: 700; margin-bottom: 15px; border-left: 4px solid #F59E0B; padding-left: 10px; }
.highlight-box { background: #FEF3C7; border: 2px solid #F59E0B; border-radius: 8px; padding: 20px; margin-bottom: 20px; }
.highlight-box h2 { margin: 0 0 10px 0; color: #92400E; font-size: 24px; }
.score { font-size: 48px; font-weight: 900; color: #D97706; margin: 10px 0; }
.confidence { display: inline-block; background: #10B981; color: #FFFFFF; padding: 4px 12px; border-radius: 4px; font-size: 12px; font-weight: 700; text-transform: uppercase; }
.listing { background: #F9FAFB; border-left: 3px solid #F59E0B; padding: 15px; margin: 10px 0; border-radius: 4px; }
.footer { margin-top: 40px; padding-top: 20px; border-top: 1px solid #E5E7EB; text-align: center; color: #6B7280; font-size: 12px; }
.data-source { font-size: 11px; color: #9CA3AF; margin-top: 20px; padding-top: 15px; border-top: 1px solid #E5E7EB; }
"#;
