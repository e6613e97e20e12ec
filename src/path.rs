//! Path construction.
//!
//! The free functions append to any `Vec<Vec2>`; the [`DrawList`] methods
//! append to the list's own path, which is consumed by
//! [`DrawList::path_stroke`] or [`DrawList::path_fill_convex`].
use crate::bezier;
use crate::color::Rgba;
use crate::config::{DrawConfig, DrawFlags};
use crate::draw_list::DrawList;
use crate::math::{vec2, Vec2};
use std::f32::consts::PI;
use std::mem::take;

/// Upper bound for segments of a circle.
pub const CIRCLE_SEGMENT_MAX: usize = 512;

/// Number of segments for a circle of `radius` so that no point of the polygon
/// is further than `max_error` from the true circle. Always even.
pub fn circle_auto_segment_count(radius: f32, max_error: f32) -> usize {
    if radius <= 0.0 {
        return 4;
    }
    let n = (PI / (1.0 - max_error.min(radius) / radius).acos()).ceil();
    // Huge radii make the cosine round to 1 and the count infinite.
    if n.is_nan() || n >= CIRCLE_SEGMENT_MAX as f32 {
        return CIRCLE_SEGMENT_MAX;
    }
    ((n as usize + 1) / 2 * 2).clamp(4, CIRCLE_SEGMENT_MAX)
}

/// Adds `num_segments + 1` points of an arc between `a_min` and `a_max`
/// (inclusive). A radius below half a pixel degenerates into the center.
pub fn arc_to(
    out: &mut Vec<Vec2>,
    center: Vec2,
    radius: f32,
    a_min: f32,
    a_max: f32,
    num_segments: usize,
) {
    if radius < 0.5 {
        out.push(center);
        return;
    }
    let num_segments = num_segments.max(1);
    out.reserve(num_segments + 1);
    for i in 0..=num_segments {
        let a = a_min + (i as f32 / num_segments as f32) * (a_max - a_min);
        out.push(center + vec2(a.cos(), a.sin()) * radius);
    }
}

/// Adds the outline of a rectangle, clockwise on screen starting at the top
/// left corner. Corners selected in `flags` are rounded with
/// `corner_segments` segments each.
pub fn rect(
    out: &mut Vec<Vec2>,
    a: Vec2,
    b: Vec2,
    rounding: f32,
    flags: DrawFlags,
    corner_segments: usize,
) {
    let corners = flags & DrawFlags::ROUND_CORNERS_ALL;
    let rounding = clamp_rounding(a, b, rounding, corners);
    if rounding < 0.5 || corners.is_empty() {
        out.reserve(4);
        out.push(a);
        out.push(vec2(b.x, a.y));
        out.push(b);
        out.push(vec2(a.x, b.y));
        return;
    }

    let radius = |corner: DrawFlags| if corners.contains(corner) { rounding } else { 0.0 };
    let tl = radius(DrawFlags::ROUND_CORNERS_TOP_LEFT);
    let tr = radius(DrawFlags::ROUND_CORNERS_TOP_RIGHT);
    let br = radius(DrawFlags::ROUND_CORNERS_BOTTOM_RIGHT);
    let bl = radius(DrawFlags::ROUND_CORNERS_BOTTOM_LEFT);

    out.reserve((corner_segments + 1) * 4);
    arc_to(out, vec2(a.x + tl, a.y + tl), tl, PI, PI * 1.5, corner_segments);
    arc_to(out, vec2(b.x - tr, a.y + tr), tr, PI * 1.5, PI * 2.0, corner_segments);
    arc_to(out, vec2(b.x - br, b.y - br), br, 0.0, PI * 0.5, corner_segments);
    arc_to(out, vec2(a.x + bl, b.y - bl), bl, PI * 0.5, PI, corner_segments);
}

// Rounding may not exceed what fits between the corners sharing a side.
fn clamp_rounding(a: Vec2, b: Vec2, rounding: f32, corners: DrawFlags) -> f32 {
    let both = |pair: DrawFlags| -> f32 { if corners.contains(pair) { 0.5 } else { 1.0 } };
    let x_scale = both(DrawFlags::ROUND_CORNERS_TOP).min(both(DrawFlags::ROUND_CORNERS_BOTTOM));
    let y_scale = both(DrawFlags::ROUND_CORNERS_LEFT).min(both(DrawFlags::ROUND_CORNERS_RIGHT));
    rounding
        .min((b.x - a.x).abs() * x_scale - 1.0)
        .min((b.y - a.y).abs() * y_scale - 1.0)
}

pub(crate) fn arc_auto_segments(config: &DrawConfig, radius: f32, a_min: f32, a_max: f32) -> usize {
    let full = circle_auto_segment_count(radius, config.circle_segment_max_error) as f32;
    let sweep = (a_max - a_min).abs() / (PI * 2.0);
    ((full * sweep).ceil() as usize).max(1)
}

impl DrawList {
    pub fn path_clear(&mut self) {
        self.path.clear();
    }

    pub fn path_line_to(&mut self, p: Vec2) {
        self.path.push(p);
    }

    /// Adds points of an arc to the path. `num_segments == 0` picks a count
    /// from [`DrawConfig::circle_segment_max_error`].
    pub fn path_arc_to(&mut self, center: Vec2, radius: f32, a_min: f32, a_max: f32, num_segments: usize) {
        let num_segments = if num_segments == 0 {
            arc_auto_segments(&self.config, radius, a_min, a_max)
        } else {
            num_segments
        };
        arc_to(&mut self.path, center, radius, a_min, a_max, num_segments);
    }

    /// Adds a rectangle outline to the path, optionally with rounded corners.
    pub fn path_rect(&mut self, a: Vec2, b: Vec2, rounding: f32, flags: DrawFlags) {
        let segments = self.config.rect_corner_segments;
        rect(&mut self.path, a, b, rounding, flags, segments);
    }

    /// Adds a quadratic bezier from the last path point. `num_segments == 0`
    /// flattens adaptively using [`DrawConfig::curve_tessellation_tol`].
    pub fn path_bezier_quadratic_to(&mut self, p2: Vec2, p3: Vec2, num_segments: usize) {
        let Some(&p1) = self.path.last() else {
            debug_assert!(false, "bezier requires a starting point");
            self.path.push(p3);
            return;
        };
        if num_segments == 0 {
            let tol = self.config.curve_tessellation_tol;
            bezier::flatten_quadratic(&mut self.path, p1, p2, p3, tol);
        } else {
            let step = 1.0 / num_segments as f32;
            for i in 1..=num_segments {
                self.path.push(bezier::quadratic_point(p1, p2, p3, step * i as f32));
            }
        }
    }

    /// Adds a cubic bezier from the last path point. `num_segments == 0`
    /// flattens adaptively using [`DrawConfig::curve_tessellation_tol`].
    pub fn path_bezier_cubic_to(&mut self, p2: Vec2, p3: Vec2, p4: Vec2, num_segments: usize) {
        let Some(&p1) = self.path.last() else {
            debug_assert!(false, "bezier requires a starting point");
            self.path.push(p4);
            return;
        };
        if num_segments == 0 {
            let tol = self.config.curve_tessellation_tol;
            bezier::flatten_cubic(&mut self.path, p1, p2, p3, p4, tol);
        } else {
            let step = 1.0 / num_segments as f32;
            for i in 1..=num_segments {
                self.path.push(bezier::cubic_point(p1, p2, p3, p4, step * i as f32));
            }
        }
    }

    /// Strokes the path and clears it.
    pub fn path_stroke(&mut self, col: Rgba, flags: DrawFlags, thickness: f32) {
        let path = take(&mut self.path);
        self.add_polyline(&path, col, flags, thickness);
        self.path = path;
        self.path.clear();
    }

    /// Fills the path as a convex polygon and clears it.
    pub fn path_fill_convex(&mut self, col: Rgba) {
        let path = take(&mut self.path);
        self.add_convex_poly_filled(&path, col);
        self.path = path;
        self.path.clear();
    }
}
