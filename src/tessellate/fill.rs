use crate::color::Rgba;
use crate::config::DrawListFlags;
use crate::draw_list::{DrawList, IndexType, Vertex};
use crate::math::{fix_normal, normalize2f, signed_area2, vec2, Vec2};
use std::mem::take;

impl DrawList {
    /// Fills a convex polygon.
    ///
    /// With [`DrawListFlags::ANTI_ALIASED_FILL`] the polygon gets a fringe of
    /// `fringe_scale` width fading to transparent. Both windings are accepted.
    /// Fewer than 3 points or a transparent color draw nothing.
    pub fn add_convex_poly_filled(&mut self, points: &[Vec2], col: Rgba) {
        if points.len() < 3 || col.is_transparent() {
            return;
        }
        if self.config.flags.contains(DrawListFlags::ANTI_ALIASED_FILL) {
            self.fill_convex_polygon_aa(points, col);
        } else {
            self.fill_convex_polygon(points, col);
        }
    }

    fn fill_convex_polygon(&mut self, points: &[Vec2], col: Rgba) {
        let n = points.len();
        let r = self.reserve_command((n - 2) * 3, n);
        for (dest, &pos) in r.vertices.iter_mut().zip(points) {
            *dest = Vertex::new(pos, Vec2::ZERO, col);
        }
        for i in 2..n {
            let k = (i - 2) * 3;
            r.indices[k] = r.base;
            r.indices[k + 1] = r.base + (i - 1) as IndexType;
            r.indices[k + 2] = r.base + i as IndexType;
        }
    }

    fn fill_convex_polygon_aa(&mut self, points: &[Vec2], col: Rgba) {
        let mut normals = take(&mut self.temp_normals);
        let n = points.len();
        let half_fringe = self.config.fringe_scale * 0.5;
        let col_trans = col.with_alpha_zeroed();

        // (dy, -dx) points outwards for polygons that are clockwise on screen
        let outward = if signed_area2(points) < 0.0 { -1.0 } else { 1.0 };
        normals.clear();
        for i0 in 0..n {
            let d = normalize2f(points[(i0 + 1) % n] - points[i0]);
            normals.push(vec2(d.y, -d.x) * outward);
        }

        let fan_count = (n - 2) * 3;
        let r = self.reserve_command(fan_count + n * 6, n * 2);
        let base = r.base;

        // inner fill, using inner ring vertices
        for i in 2..n {
            let k = (i - 2) * 3;
            r.indices[k] = base;
            r.indices[k + 1] = base + ((i - 1) << 1) as IndexType;
            r.indices[k + 2] = base + (i << 1) as IndexType;
        }

        for i1 in 0..n {
            let i0 = (i1 + n - 1) % n;
            let dm = fix_normal((normals[i0] + normals[i1]) * 0.5) * half_fringe;

            // inner vertex followed by outer vertex
            r.vertices[i1 * 2] = Vertex::new(points[i1] - dm, Vec2::ZERO, col);
            r.vertices[i1 * 2 + 1] = Vertex::new(points[i1] + dm, Vec2::ZERO, col_trans);

            // quad between the edge i0..i1 of both rings
            let inner0 = base + (i0 << 1) as IndexType;
            let inner1 = base + (i1 << 1) as IndexType;
            let k = fan_count + i1 * 6;
            r.indices[k..k + 6].copy_from_slice(&[
                inner1,
                inner0,
                inner0 + 1,
                inner0 + 1,
                inner1 + 1,
                inner1,
            ]);
        }

        self.temp_normals = normals;
    }
}
