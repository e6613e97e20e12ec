//! Glyph quads for text drawn from a [`FontAtlas`].
use crate::color::Rgba;
use crate::draw_list::{DrawList, Vertex};
use crate::font::FontAtlas;
use crate::math::{vec2, Vec2};

/// Which line of the first text row `origin` refers to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VAlign {
    /// Top of the line, glyphs are moved down by the ascent.
    Top,
    /// Baseline.
    #[default]
    Base,
    /// Bottom of the line, glyphs are moved up by the descent.
    Bottom,
}

impl DrawList {
    /// Draws `text` starting at `origin` and returns the pen position after
    /// the last glyph.
    ///
    /// Every glyph is a separate command using the atlas texture. Code points
    /// missing from the atlas are drawn with the replacement glyph, `'\n'`
    /// starts a new line at `origin.x`.
    pub fn add_text(&mut self, atlas: &FontAtlas, origin: Vec2, col: Rgba, align: VAlign, text: &str) -> Vec2 {
        self.add_glyphs(atlas, origin, col, align, text.chars())
    }

    /// [`DrawList::add_text`] for text already decoded to code points.
    pub fn add_text_chars(&mut self, atlas: &FontAtlas, origin: Vec2, col: Rgba, align: VAlign, text: &[char]) -> Vec2 {
        self.add_glyphs(atlas, origin, col, align, text.iter().copied())
    }

    fn add_glyphs(
        &mut self,
        atlas: &FontAtlas,
        origin: Vec2,
        col: Rgba,
        align: VAlign,
        chars: impl Iterator<Item = char>,
    ) -> Vec2 {
        let shift = match align {
            VAlign::Top => atlas.ascent(),
            VAlign::Base => 0.0,
            VAlign::Bottom => -atlas.descent(),
        };
        let mut pen = vec2(origin.x, origin.y + shift);
        if col.is_transparent() {
            return pen;
        }
        let texture = atlas.texture_id();

        let mut prev = None;
        for ch in chars {
            if ch == '\n' {
                pen.x = origin.x;
                pen.y += atlas.line_height();
                prev = None;
                continue;
            }
            let Some(glyph) = atlas.glyph_or_replacement(ch) else {
                continue;
            };
            if let Some(p) = prev {
                pen.x += atlas.kern(p, ch);
            }
            prev = Some(ch);

            let min = pen + glyph.bounds.min;
            let max = pen + glyph.bounds.max;
            let mut r = self.reserve_command(6, 4);
            r.cmd.texture_id = texture;
            r.write_quad(
                0,
                0,
                [
                    Vertex::new(min, glyph.uv[0], col),
                    Vertex::new(vec2(min.x, max.y), glyph.uv[1], col),
                    Vertex::new(max, glyph.uv[2], col),
                    Vertex::new(vec2(max.x, min.y), glyph.uv[3], col),
                ],
            );
            pen.x += glyph.advance;
        }
        pen
    }
}
