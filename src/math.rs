//! Geometry helpers shared by the tessellators.
pub use glam::{vec2, vec4, Affine2, Mat2, Vec2, Vec4};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle given by its minimum and maximum corner.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle that starts at the origin and spans `size`.
    pub fn from_size(size: Vec2) -> Self {
        Self {
            min: Vec2::ZERO,
            max: size,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.y >= self.min.y && p.x < self.max.x && p.y < self.max.y
    }
}

/// Normalizes a direction. Vectors with zero length are returned unchanged.
#[inline]
pub fn normalize2f(v: Vec2) -> Vec2 {
    let d2 = v.length_squared();
    if d2 > 0.0 {
        v * (1.0 / d2.sqrt())
    } else {
        v
    }
}

/// Scales an averaged normal by its inverse squared length so that the offset
/// keeps a constant distance from both adjacent edges. The scale is capped to
/// avoid spikes on very sharp corners.
#[inline]
pub fn fix_normal(v: Vec2) -> Vec2 {
    const MAX_INV_LEN2: f32 = 100.0;
    let d2 = v.length_squared();
    if d2 > 0.000001 {
        v * (1.0 / d2).min(MAX_INV_LEN2)
    } else {
        v
    }
}

/// Twice the signed area of a polygon. Positive for polygons that are
/// clockwise on screen (y axis pointing down).
pub(crate) fn signed_area2(points: &[Vec2]) -> f32 {
    let n = points.len();
    let mut area = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        area += a.x * b.y - b.x * a.y;
    }
    area
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normalize_keeps_zero_vector() {
        assert_eq!(normalize2f(Vec2::ZERO), Vec2::ZERO);
        let n = normalize2f(vec2(3.0, 4.0));
        assert_relative_eq!(n.x, 0.6);
        assert_relative_eq!(n.y, 0.8);
    }

    #[test]
    fn fix_normal_caps_sharp_corners() {
        // unit vector is left as is
        let n = fix_normal(vec2(1.0, 0.0));
        assert_relative_eq!(n.x, 1.0);
        // length 0.05 would scale by 400, capped at 100
        let n = fix_normal(vec2(0.05, 0.0));
        assert_relative_eq!(n.x, 5.0, epsilon = 1e-5);
        // right angle: average of two unit normals has length sqrt(0.5)
        let n = fix_normal(vec2(0.5, 0.5));
        assert_relative_eq!(n.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(n.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn signed_area_follows_screen_winding() {
        let cw = [vec2(0.0, 0.0), vec2(10.0, 0.0), vec2(10.0, 10.0), vec2(0.0, 10.0)];
        assert!(signed_area2(&cw) > 0.0);
        let ccw: Vec<Vec2> = cw.iter().rev().copied().collect();
        assert!(signed_area2(&ccw) < 0.0);
    }

    #[test]
    fn rect_metrics() {
        let r = Rect::new(vec2(10.0, 20.0), vec2(30.0, 60.0));
        assert_eq!(r.size(), vec2(20.0, 40.0));
        assert!(r.contains(vec2(10.0, 20.0)));
        assert!(!r.contains(vec2(30.0, 20.0)));
        assert_eq!(r.translate(vec2(1.0, 1.0)).min, vec2(11.0, 21.0));
    }
}
