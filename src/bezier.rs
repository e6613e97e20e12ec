//! Bezier evaluation and adaptive flattening.
//!
//! Adaptive flattening subdivides the curve with De Casteljau's algorithm until
//! the control points are close enough to the chord, up to a depth of 10.
use crate::math::Vec2;

const MAX_LEVEL: u32 = 10;

pub fn quadratic_point(p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    let w1 = u * u;
    let w2 = 2.0 * u * t;
    let w3 = t * t;
    p1 * w1 + p2 * w2 + p3 * w3
}

pub fn cubic_point(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    let w1 = u * u * u;
    let w2 = 3.0 * u * u * t;
    let w3 = 3.0 * u * t * t;
    let w4 = t * t * t;
    p1 * w1 + p2 * w2 + p3 * w3 + p4 * w4
}

/// Appends points of the quadratic curve, excluding `p1`, to `path`.
pub fn flatten_quadratic(path: &mut Vec<Vec2>, p1: Vec2, p2: Vec2, p3: Vec2, tol: f32) {
    quadratic_casteljau(path, p1, p2, p3, tol, 0);
}

/// Appends points of the cubic curve, excluding `p1`, to `path`.
pub fn flatten_cubic(path: &mut Vec<Vec2>, p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2, tol: f32) {
    cubic_casteljau(path, p1, p2, p3, p4, tol, 0);
}

fn quadratic_casteljau(path: &mut Vec<Vec2>, p1: Vec2, p2: Vec2, p3: Vec2, tol: f32, level: u32) {
    let d = p3 - p1;
    let det = (p2.x - p3.x) * d.y - (p2.y - p3.y) * d.x;
    if det * det * 4.0 < tol * d.length_squared() {
        path.push(p3);
    } else if level < MAX_LEVEL {
        let p12 = (p1 + p2) * 0.5;
        let p23 = (p2 + p3) * 0.5;
        let p123 = (p12 + p23) * 0.5;
        quadratic_casteljau(path, p1, p12, p123, tol, level + 1);
        quadratic_casteljau(path, p123, p23, p3, tol, level + 1);
    }
}

fn cubic_casteljau(path: &mut Vec<Vec2>, p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2, tol: f32, level: u32) {
    let d = p4 - p1;
    let d2 = ((p2.x - p4.x) * d.y - (p2.y - p4.y) * d.x).abs();
    let d3 = ((p3.x - p4.x) * d.y - (p3.y - p4.y) * d.x).abs();
    if (d2 + d3) * (d2 + d3) < tol * d.length_squared() {
        path.push(p4);
    } else if level < MAX_LEVEL {
        let p12 = (p1 + p2) * 0.5;
        let p23 = (p2 + p3) * 0.5;
        let p34 = (p3 + p4) * 0.5;
        let p123 = (p12 + p23) * 0.5;
        let p234 = (p23 + p34) * 0.5;
        let p1234 = (p123 + p234) * 0.5;
        cubic_casteljau(path, p1, p12, p123, p1234, tol, level + 1);
        cubic_casteljau(path, p1234, p234, p34, p4, tol, level + 1);
    }
}
