#![allow(dead_code)]

use immediate_drawing::font::{FaceMetrics, Fixed, FixedPoint, FixedRect, FontFace, GlyphBitmap, REPLACEMENT_CHAR};
use immediate_drawing::{vec2, DrawFlags, DrawList, Rgba};

/// One primitive of each kind, covering every stroke and fill path a frame
/// goes through.
pub fn draw_scene(list: &mut DrawList) {
    list.add_rect_filled(vec2(10.0, 10.0), vec2(200.0, 120.0), Rgba::from_rgba8(40, 40, 60, 255), 8.0, DrawFlags::ROUND_CORNERS_ALL);
    list.add_rect(vec2(10.0, 10.0), vec2(200.0, 120.0), Rgba::WHITE, 8.0, DrawFlags::ROUND_CORNERS_ALL, 1.0);
    list.add_circle(vec2(400.0, 300.0), 50.0, Rgba::from_rgba8(255, 0, 0, 255), 0, 3.0);
    list.add_circle_filled(vec2(600.0, 300.0), 30.0, Rgba::from_rgba8(0, 255, 0, 255), 0);
    list.add_line(vec2(0.0, 590.0), vec2(800.0, 590.0), Rgba::BLACK, 2.0);
    list.add_bezier_cubic(
        vec2(100.0, 400.0),
        vec2(200.0, 300.0),
        vec2(300.0, 500.0),
        vec2(400.0, 400.0),
        Rgba::WHITE,
        4.0,
        0,
    );
    list.add_triangle_filled(vec2(700.0, 50.0), vec2(780.0, 150.0), vec2(620.0, 150.0), Rgba::WHITE);
}

/// Face whose glyphs are opaque boxes. The box of a lowercase letter is one
/// pixel wider than the previous letter's, every other glyph is 6x9.
pub struct StepFace;

impl StepFace {
    fn size(ch: char) -> (i32, i32) {
        match ch {
            'a'..='z' => (2 + (ch as i32 - 'a' as i32), 9),
            _ => (6, 9),
        }
    }
}

impl FontFace for StepFace {
    fn metrics(&self) -> FaceMetrics {
        FaceMetrics {
            ascent: Fixed::from_int(8),
            descent: Fixed::from_int(2),
            height: Fixed::from_int(12),
        }
    }

    fn has_glyph(&self, ch: char) -> bool {
        ch.is_ascii_graphic() || ch == ' ' || ch == REPLACEMENT_CHAR
    }

    fn glyph_bounds(&self, ch: char) -> Option<(FixedRect, Fixed)> {
        if !self.has_glyph(ch) {
            return None;
        }
        let (w, h) = Self::size(ch);
        // fractional bounds, pixel alignment must round them outwards
        let bounds = FixedRect::new(
            FixedPoint::new(Fixed(16), Fixed::from_int(-7) + Fixed(16)),
            FixedPoint::new(Fixed::from_int(w) - Fixed(16), Fixed::from_int(h - 7) - Fixed(16)),
        );
        Some((bounds, Fixed::from_int(w + 1)))
    }

    fn kern(&self, _: char, _: char) -> Fixed {
        Fixed::ZERO
    }

    fn render_glyph(&self, ch: char) -> Option<GlyphBitmap> {
        if !self.has_glyph(ch) {
            return None;
        }
        let (w, h) = Self::size(ch);
        Some(GlyphBitmap {
            width: w as u32,
            height: h as u32,
            left: 0,
            top: -7,
            coverage: vec![255; (w * h) as usize],
        })
    }
}
