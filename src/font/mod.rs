//! Font faces, glyph atlases and the per family font registry.
//!
//! A [`FontAtlas`] rasterizes every glyph of a [`FontFace`] into a single
//! RGBA image, white with coverage in alpha, and keeps the placement of each
//! glyph for [`DrawList::add_text`](crate::DrawList::add_text).
mod atlas;
mod face;
mod fixed;
mod fontdue_face;
mod manager;

pub use atlas::{AtlasState, FontAtlas, GlyphInfo};
pub use face::{FaceMetrics, FontFace, GlyphBitmap};
pub use fixed::{Fixed, FixedPoint, FixedRect};
pub use fontdue_face::{FaceOptions, FontdueFace};
pub use manager::{FontFamily, FontManager};

#[cfg(test)]
pub(crate) use face::mock;

/// Drawn for code points missing from an atlas.
pub const REPLACEMENT_CHAR: char = '\u{FFFD}';

/// Printable ASCII, space to tilde.
pub fn ascii_runes() -> Vec<char> {
    (' '..='~').collect()
}

/// Printable Latin-1: ASCII plus U+00A0 to U+00FF.
pub fn latin1_runes() -> Vec<char> {
    (' '..='~').chain('\u{A0}'..='\u{FF}').collect()
}

/// Every code point of an inclusive range.
pub fn rune_range(first: char, last: char) -> Vec<char> {
    (first..=last).collect()
}
