use super::fixed::{Fixed, FixedRect};

/// Vertical metrics of a face, in 26.6 pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FaceMetrics {
    /// Distance from the top of a line to its baseline.
    pub ascent: Fixed,
    /// Distance from the baseline to the bottom of a line, positive.
    pub descent: Fixed,
    /// Recommended distance between two baselines.
    pub height: Fixed,
}

/// Coverage bitmap of a single glyph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    /// Offset of the left column from the glyph origin.
    pub left: i32,
    /// Offset of the top row from the baseline, y down (negative above).
    pub top: i32,
    /// `width * height` coverage values, row by row.
    pub coverage: Vec<u8>,
}

/// A font at a fixed size, as seen by the atlas builder.
///
/// Coordinates use 26.6 fixed point pixels with y pointing down and the
/// origin at the glyph origin on the baseline.
pub trait FontFace {
    fn metrics(&self) -> FaceMetrics;

    /// True when the face has a real glyph (not `.notdef`) for `ch`.
    fn has_glyph(&self, ch: char) -> bool;

    /// Ink bounds and advance of the glyph for `ch`.
    fn glyph_bounds(&self, ch: char) -> Option<(FixedRect, Fixed)>;

    /// Horizontal adjustment between `left` and `right`. Positive values move
    /// the glyphs apart.
    fn kern(&self, left: char, right: char) -> Fixed;

    /// Rasterizes `ch`. The bitmap covers the pixel aligned glyph bounds.
    fn render_glyph(&self, ch: char) -> Option<GlyphBitmap>;
}
