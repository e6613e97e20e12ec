use crate::color::Rgba;
use crate::config::DrawFlags;
use crate::draw_list::{DrawList, TextureId, Vertex};
use crate::math::{vec2, Vec2};
use crate::path::{circle_auto_segment_count, CIRCLE_SEGMENT_MAX};
use std::f32::consts::PI;

impl DrawList {
    /// Draws a line segment. Endpoints are offset by half a pixel so that
    /// odd-width lines land on pixel centers.
    pub fn add_line(&mut self, p1: Vec2, p2: Vec2, col: Rgba, thickness: f32) {
        if col.is_transparent() {
            return;
        }
        self.path_line_to(p1 + Vec2::splat(0.5));
        self.path_line_to(p2 + Vec2::splat(0.5));
        self.path_stroke(col, DrawFlags::empty(), thickness);
    }

    /// Draws the outline of a rectangle between `min` and `max`. Corners
    /// selected in `flags` are rounded by `rounding`.
    pub fn add_rect(&mut self, min: Vec2, max: Vec2, col: Rgba, rounding: f32, flags: DrawFlags, thickness: f32) {
        if col.is_transparent() {
            return;
        }
        self.path_rect(min + Vec2::splat(0.5), max - Vec2::splat(0.5), rounding, flags);
        self.path_stroke(col, DrawFlags::CLOSED, thickness);
    }

    /// Fills a rectangle. Without rounding this is a single quad with indices
    /// `0, 1, 2, 2, 3, 0` over the corners `min, (max.x, min.y), max, (min.x, max.y)`.
    pub fn add_rect_filled(&mut self, min: Vec2, max: Vec2, col: Rgba, rounding: f32, flags: DrawFlags) {
        if col.is_transparent() {
            return;
        }
        if rounding < 0.5 || !flags.intersects(DrawFlags::ROUND_CORNERS_ALL) {
            let mut r = self.reserve_command(6, 4);
            r.write_quad(
                0,
                0,
                [
                    Vertex::new(min, Vec2::ZERO, col),
                    Vertex::new(vec2(max.x, min.y), Vec2::ZERO, col),
                    Vertex::new(max, Vec2::ZERO, col),
                    Vertex::new(vec2(min.x, max.y), Vec2::ZERO, col),
                ],
            );
        } else {
            self.path_rect(min, max, rounding, flags);
            self.path_fill_convex(col);
        }
    }

    pub fn add_triangle(&mut self, p1: Vec2, p2: Vec2, p3: Vec2, col: Rgba, thickness: f32) {
        if col.is_transparent() {
            return;
        }
        self.path_line_to(p1);
        self.path_line_to(p2);
        self.path_line_to(p3);
        self.path_stroke(col, DrawFlags::CLOSED, thickness);
    }

    pub fn add_triangle_filled(&mut self, p1: Vec2, p2: Vec2, p3: Vec2, col: Rgba) {
        if col.is_transparent() {
            return;
        }
        self.path_line_to(p1);
        self.path_line_to(p2);
        self.path_line_to(p3);
        self.path_fill_convex(col);
    }

    /// Draws a circle outline. `num_segments == 0` picks a count from the
    /// configured maximum error; other values are clamped to `3..=512`.
    pub fn add_circle(&mut self, center: Vec2, radius: f32, col: Rgba, num_segments: usize, thickness: f32) {
        if col.is_transparent() || radius < 0.5 {
            return;
        }
        self.path_circle(center, radius, num_segments);
        self.path_stroke(col, DrawFlags::CLOSED, thickness);
    }

    /// Fills a circle. See [`DrawList::add_circle`] for `num_segments`.
    pub fn add_circle_filled(&mut self, center: Vec2, radius: f32, col: Rgba, num_segments: usize) {
        if col.is_transparent() || radius < 0.5 {
            return;
        }
        self.path_circle(center, radius, num_segments);
        self.path_fill_convex(col);
    }

    // Leaves out the closing point: strokes wrap with CLOSED and fills wrap
    // around the fan.
    fn path_circle(&mut self, center: Vec2, radius: f32, num_segments: usize) {
        let n = if num_segments == 0 {
            circle_auto_segment_count(radius, self.config.circle_segment_max_error)
        } else {
            num_segments.clamp(3, CIRCLE_SEGMENT_MAX)
        };
        let a_max = PI * 2.0 * (n - 1) as f32 / n as f32;
        self.path_arc_to(center, radius, 0.0, a_max, n - 1);
    }

    /// Strokes a quadratic bezier curve. See [`DrawList::path_bezier_quadratic_to`].
    pub fn add_bezier_quadratic(&mut self, p1: Vec2, p2: Vec2, p3: Vec2, col: Rgba, thickness: f32, num_segments: usize) {
        if col.is_transparent() {
            return;
        }
        self.path_line_to(p1);
        self.path_bezier_quadratic_to(p2, p3, num_segments);
        self.path_stroke(col, DrawFlags::empty(), thickness);
    }

    /// Strokes a cubic bezier curve. See [`DrawList::path_bezier_cubic_to`].
    pub fn add_bezier_cubic(
        &mut self,
        p1: Vec2,
        p2: Vec2,
        p3: Vec2,
        p4: Vec2,
        col: Rgba,
        thickness: f32,
        num_segments: usize,
    ) {
        if col.is_transparent() {
            return;
        }
        self.path_line_to(p1);
        self.path_bezier_cubic_to(p2, p3, p4, num_segments);
        self.path_stroke(col, DrawFlags::empty(), thickness);
    }

    /// Draws a textured quad tinted by `col`.
    pub fn add_image(&mut self, texture: TextureId, min: Vec2, max: Vec2, uv_min: Vec2, uv_max: Vec2, col: Rgba) {
        if col.is_transparent() {
            return;
        }
        let mut r = self.reserve_command(6, 4);
        r.cmd.texture_id = texture;
        r.write_quad(
            0,
            0,
            [
                Vertex::new(min, uv_min, col),
                Vertex::new(vec2(max.x, min.y), vec2(uv_max.x, uv_min.y), col),
                Vertex::new(max, uv_max, col),
                Vertex::new(vec2(min.x, max.y), vec2(uv_min.x, uv_max.y), col),
            ],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DrawConfig, DrawListFlags};
    use approx::assert_relative_eq;

    fn solid_list() -> DrawList {
        DrawList::new(DrawConfig::default().with_flags(DrawListFlags::empty()))
    }

    #[test]
    fn rect_filled_is_one_quad() {
        let mut list = DrawList::default();
        list.add_rect_filled(vec2(0.0, 0.0), vec2(800.0, 600.0), Rgba::WHITE, 0.0, DrawFlags::empty());
        assert_eq!(list.commands().len(), 1);
        assert_eq!(list.indices(), &[0, 1, 2, 2, 3, 0]);
        let positions: Vec<Vec2> = list.vertices().iter().map(|v| v.pos).collect();
        assert_eq!(
            positions,
            [vec2(0.0, 0.0), vec2(800.0, 0.0), vec2(800.0, 600.0), vec2(0.0, 600.0)]
        );
        assert!(list.vertices().iter().all(|v| v.col == Rgba(0xFFFF_FFFF)));
    }

    #[test]
    fn rounded_rect_filled_uses_path() {
        let mut list = solid_list();
        list.add_rect_filled(vec2(0.0, 0.0), vec2(100.0, 100.0), Rgba::WHITE, 10.0, DrawFlags::ROUND_CORNERS_ALL);
        let n = 17 * 4;
        assert_eq!(list.vertices().len(), n);
        assert_eq!(list.indices().len(), (n - 2) * 3);
        assert!(list.path().is_empty());
    }

    #[test]
    fn circle_segments_are_clamped() {
        let mut list = solid_list();
        list.add_circle_filled(vec2(50.0, 50.0), 20.0, Rgba::WHITE, 1);
        // clamped to 3 segments
        assert_eq!(list.vertices().len(), 3);
        list.clear();
        list.add_circle_filled(vec2(50.0, 50.0), 20.0, Rgba::WHITE, 10_000);
        assert_eq!(list.vertices().len(), CIRCLE_SEGMENT_MAX);
    }

    #[test]
    fn circle_points_lie_on_circle() {
        let mut list = solid_list();
        let center = vec2(50.0, 50.0);
        list.add_circle_filled(center, 20.0, Rgba::WHITE, 12);
        assert_eq!(list.vertices().len(), 12);
        for v in list.vertices() {
            assert_relative_eq!((v.pos - center).length(), 20.0, epsilon = 1e-4);
        }
        // first and last sampled points are one segment apart, not duplicates
        let first = list.vertices()[0].pos;
        let last = list.vertices()[11].pos;
        assert!((first - last).length() > 1.0);
    }

    #[test]
    fn circle_outline_is_closed_stroke() {
        let mut list = solid_list();
        list.add_circle(vec2(50.0, 50.0), 20.0, Rgba::WHITE, 8, 1.0);
        // one quad per segment including the closing one
        assert_eq!(list.vertices().len(), 8 * 4);
    }

    #[test]
    fn huge_circle_uses_segment_limit() {
        let mut list = solid_list();
        list.add_circle_filled(vec2(0.0, 0.0), 2.0e7, Rgba::WHITE, 0);
        assert_eq!(list.vertices().len(), CIRCLE_SEGMENT_MAX);
        list.clear();
        list.add_circle(vec2(0.0, 0.0), 2.0e7, Rgba::WHITE, 0, 1.0);
        assert_eq!(list.vertices().len(), CIRCLE_SEGMENT_MAX * 4);
    }

    #[test]
    fn degenerate_circles_draw_nothing() {
        let mut list = DrawList::default();
        list.add_circle(vec2(0.0, 0.0), 0.4, Rgba::WHITE, 0, 1.0);
        list.add_circle_filled(vec2(0.0, 0.0), 10.0, Rgba::TRANSPARENT, 0);
        list.add_line(vec2(0.0, 0.0), vec2(1.0, 1.0), Rgba::TRANSPARENT, 1.0);
        assert!(list.commands().is_empty());
    }

    #[test]
    fn line_is_offset_by_half_pixel() {
        let mut list = solid_list();
        list.add_line(vec2(0.0, 0.0), vec2(10.0, 0.0), Rgba::WHITE, 2.0);
        assert_eq!(list.vertices()[0].pos, vec2(0.5, -0.5));
        assert_eq!(list.vertices()[2].pos, vec2(10.5, 1.5));
    }

    #[test]
    fn rect_outline_is_closed() {
        let mut list = solid_list();
        list.add_rect(vec2(0.0, 0.0), vec2(10.0, 10.0), Rgba::WHITE, 0.0, DrawFlags::empty(), 1.0);
        assert_eq!(list.vertices().len(), 4 * 4);
        assert_eq!(list.vertices()[0].pos, vec2(0.5, 0.0));
    }

    #[test]
    fn triangles() {
        let mut list = solid_list();
        list.add_triangle_filled(vec2(0.0, 0.0), vec2(10.0, 0.0), vec2(0.0, 10.0), Rgba::WHITE);
        list.add_triangle(vec2(0.0, 0.0), vec2(10.0, 0.0), vec2(0.0, 10.0), Rgba::WHITE, 1.0);
        assert_eq!(list.commands().len(), 2);
        assert_eq!(list.commands()[0].elem_count, 3);
        assert_eq!(list.commands()[1].elem_count, 3 * 6);
    }

    #[test]
    fn bezier_strokes() {
        let mut list = solid_list();
        list.add_bezier_cubic(
            vec2(0.0, 0.0),
            vec2(0.0, 50.0),
            vec2(50.0, 50.0),
            vec2(50.0, 0.0),
            Rgba::WHITE,
            1.0,
            10,
        );
        // 11 points, 10 segments
        assert_eq!(list.vertices().len(), 10 * 4);
        list.add_bezier_quadratic(vec2(0.0, 0.0), vec2(5.0, 5.0), vec2(10.0, 10.0), Rgba::WHITE, 1.0, 0);
        assert_eq!(list.commands().len(), 2);
        assert_eq!(list.commands()[1].elem_count, 6);
    }

    #[test]
    fn image_quad() {
        let mut list = DrawList::default();
        list.add_image(
            TextureId(9),
            vec2(10.0, 10.0),
            vec2(20.0, 30.0),
            vec2(0.0, 0.0),
            vec2(1.0, 0.5),
            Rgba::WHITE,
        );
        let cmd = list.commands()[0];
        assert_eq!(cmd.texture_id, TextureId(9));
        assert_eq!(list.vertices()[1].uv, vec2(1.0, 0.0));
        assert_eq!(list.vertices()[3].uv, vec2(0.0, 0.5));
        assert_eq!(list.vertices()[3].pos, vec2(10.0, 30.0));
    }
}
