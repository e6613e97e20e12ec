use super::face::{FaceMetrics, FontFace, GlyphBitmap};
use super::fixed::{Fixed, FixedPoint, FixedRect};
use super::REPLACEMENT_CHAR;
use crate::error::{Error, Result};
use fontdue::{Font, FontSettings, Metrics};

/// Size of a face built from font data.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FaceOptions {
    /// Size in points.
    pub size: f32,
    /// Resolution used to convert points into pixels.
    pub dpi: f32,
}

impl Default for FaceOptions {
    fn default() -> Self {
        Self {
            size: 12.0,
            dpi: 72.0,
        }
    }
}

impl FaceOptions {
    pub fn pixel_size(&self) -> f32 {
        self.size * self.dpi / 72.0
    }
}

/// [`FontFace`] backed by a TrueType/OpenType font parsed with [`fontdue`].
pub struct FontdueFace {
    font: Font,
    px: f32,
    metrics: FaceMetrics,
}

impl FontdueFace {
    pub fn from_bytes(data: &[u8], options: FaceOptions) -> Result<Self> {
        let px = options.pixel_size();
        if !(px.is_finite() && px > 0.0) {
            return Err(Error::InvalidConfig(format!("invalid font size {options:?}")));
        }
        let settings = FontSettings {
            scale: px,
            ..FontSettings::default()
        };
        let font = Font::from_bytes(data, settings).map_err(|e| Error::FontParse(e.to_string()))?;
        let metrics = match font.horizontal_line_metrics(px) {
            Some(line) => FaceMetrics {
                ascent: Fixed::from_f32(line.ascent),
                descent: Fixed::from_f32(-line.descent),
                height: Fixed::from_f32(line.new_line_size),
            },
            None => {
                log::warn!("font has no horizontal line metrics, estimating them from size {px}");
                FaceMetrics {
                    ascent: Fixed::from_f32(px * 0.8),
                    descent: Fixed::from_f32(px * 0.2),
                    height: Fixed::from_f32(px),
                }
            }
        };
        Ok(Self { font, px, metrics })
    }

    pub fn pixel_size(&self) -> f32 {
        self.px
    }

    // The replacement character falls back to `.notdef` (glyph 0).
    fn glyph_index(&self, ch: char) -> Option<u16> {
        match self.font.lookup_glyph_index(ch) {
            0 if ch != REPLACEMENT_CHAR => None,
            index => Some(index),
        }
    }
}

fn ink_bounds(m: &Metrics) -> FixedRect {
    let top = -(m.ymin + m.height as i32);
    FixedRect::new(
        FixedPoint::from_int(m.xmin, top),
        FixedPoint::from_int(m.xmin + m.width as i32, -m.ymin),
    )
}

impl FontFace for FontdueFace {
    fn metrics(&self) -> FaceMetrics {
        self.metrics
    }

    fn has_glyph(&self, ch: char) -> bool {
        self.font.lookup_glyph_index(ch) != 0
    }

    fn glyph_bounds(&self, ch: char) -> Option<(FixedRect, Fixed)> {
        let index = self.glyph_index(ch)?;
        let m = self.font.metrics_indexed(index, self.px);
        Some((ink_bounds(&m), Fixed::from_f32(m.advance_width)))
    }

    fn kern(&self, left: char, right: char) -> Fixed {
        self.font
            .horizontal_kern(left, right, self.px)
            .map_or(Fixed::ZERO, Fixed::from_f32)
    }

    fn render_glyph(&self, ch: char) -> Option<GlyphBitmap> {
        let index = self.glyph_index(ch)?;
        let (m, coverage) = self.font.rasterize_indexed(index, self.px);
        let bounds = ink_bounds(&m);
        Some(GlyphBitmap {
            width: m.width as u32,
            height: m.height as u32,
            left: bounds.min.x.floor(),
            top: bounds.min.y.floor(),
            coverage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_data_is_parse_error() {
        let err = FontdueFace::from_bytes(b"definitely not a font", FaceOptions::default());
        assert!(matches!(err, Err(Error::FontParse(_))));
    }

    #[test]
    fn invalid_size_is_config_error() {
        let options = FaceOptions { size: 0.0, dpi: 72.0 };
        let err = FontdueFace::from_bytes(&[], options);
        assert!(matches!(err, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn ink_bounds_flip_to_y_down() {
        let m = Metrics {
            xmin: 1,
            ymin: -3,
            width: 6,
            height: 12,
            ..Metrics::default()
        };
        let b = ink_bounds(&m);
        assert_eq!(b.min, FixedPoint::from_int(1, -9));
        assert_eq!(b.max, FixedPoint::from_int(7, 3));
    }

    #[test]
    fn pixel_size_scales_with_dpi() {
        let options = FaceOptions { size: 12.0, dpi: 144.0 };
        assert_eq!(options.pixel_size(), 24.0);
    }
}
