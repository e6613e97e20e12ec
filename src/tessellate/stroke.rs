use crate::color::Rgba;
use crate::config::{DrawFlags, DrawListFlags};
use crate::draw_list::{DrawList, IndexType, TextureId, Vertex};
use crate::math::{fix_normal, normalize2f, vec2, Vec2, Vec4};
use std::mem::take;

// Normal of each segment, stored at the index of its first point. Open paths
// reuse the last segment normal for the final point.
fn segment_normals(normals: &mut Vec<Vec2>, points: &[Vec2], closed: bool) {
    let count = points.len();
    let segments = if closed { count } else { count - 1 };
    normals.clear();
    normals.resize(count, Vec2::ZERO);
    for i1 in 0..segments {
        let i2 = if i1 + 1 == count { 0 } else { i1 + 1 };
        let d = normalize2f(points[i2] - points[i1]);
        normals[i1] = vec2(d.y, -d.x);
    }
    if !closed {
        normals[count - 1] = normals[count - 2];
    }
}

impl DrawList {
    /// Strokes a polyline of `thickness` (at least 1).
    ///
    /// The technique is picked from [`DrawListFlags`]:
    /// - textured strip, when a line texture is installed and the line is
    ///   thinner than `tex_lines_width_max`;
    /// - geometric antialiasing with a one-fringe border;
    /// - plain quads per segment when antialiasing of lines is off.
    ///
    /// Fewer than 2 points or a transparent color draw nothing.
    pub fn add_polyline(&mut self, points: &[Vec2], col: Rgba, flags: DrawFlags, thickness: f32) {
        if points.len() < 2 || col.is_transparent() {
            return;
        }
        let closed = flags.contains(DrawFlags::CLOSED);
        let thickness = thickness.max(1.0);
        let list_flags = self.config.flags;

        if !list_flags.contains(DrawListFlags::ANTI_ALIASED_LINES) {
            self.stroke_polyline(points, col, closed, thickness);
            return;
        }
        if list_flags.contains(DrawListFlags::ANTI_ALIASED_LINES_USE_TEX)
            && thickness < self.config.tex_lines_width_max as f32
        {
            let row = thickness as usize;
            let lines = self.textures.lines.as_ref();
            if let Some((id, uv)) = lines.and_then(|l| l.uvs.get(row).map(|uv| (l.id, *uv))) {
                self.stroke_polyline_textured(points, col, closed, thickness, id, uv);
                return;
            }
        }
        self.stroke_polyline_aa(points, col, closed, thickness);
    }

    // 2 vertices per point, 6 indices per segment. The texture row supplies the
    // antialiased edge.
    fn stroke_polyline_textured(
        &mut self,
        points: &[Vec2],
        col: Rgba,
        closed: bool,
        thickness: f32,
        texture: TextureId,
        uv: Vec4,
    ) {
        let count = points.len();
        let segments = if closed { count } else { count - 1 };
        let mut normals = take(&mut self.temp_normals);
        let mut temp = take(&mut self.temp_points);
        segment_normals(&mut normals, points, closed);
        temp.clear();
        temp.resize(count * 2, Vec2::ZERO);

        let half = thickness * 0.5 + 1.0;
        if !closed {
            let last = count - 1;
            temp[0] = points[0] + normals[0] * half;
            temp[1] = points[0] - normals[0] * half;
            temp[last * 2] = points[last] + normals[last] * half;
            temp[last * 2 + 1] = points[last] - normals[last] * half;
        }

        let r = self.reserve_command(segments * 6, count * 2);
        r.cmd.texture_id = texture;
        let base = r.base;
        let mut idx1: IndexType = 0;
        for i1 in 0..segments {
            let i2 = if i1 + 1 == count { 0 } else { i1 + 1 };
            let idx2 = if i1 + 1 == count { 0 } else { idx1 + 2 };

            let dm = fix_normal((normals[i1] + normals[i2]) * 0.5) * half;
            temp[i2 * 2] = points[i2] + dm;
            temp[i2 * 2 + 1] = points[i2] - dm;

            let (a, b) = (base + idx1, base + idx2);
            r.indices[i1 * 6..i1 * 6 + 6].copy_from_slice(&[b, a, a + 1, b + 1, a + 1, b]);
            idx1 = idx2;
        }

        let (uv0, uv1) = (vec2(uv.x, uv.y), vec2(uv.z, uv.w));
        for i in 0..count {
            r.vertices[i * 2] = Vertex::new(temp[i * 2], uv0, col);
            r.vertices[i * 2 + 1] = Vertex::new(temp[i * 2 + 1], uv1, col);
        }

        self.temp_normals = normals;
        self.temp_points = temp;
    }

    // Thin lines: 3 vertices per point (center, fringe on each side), 12
    // indices per segment. Thick lines: 4 vertices per point (outer fringe,
    // inner edge on each side), 18 indices per segment.
    fn stroke_polyline_aa(&mut self, points: &[Vec2], col: Rgba, closed: bool, thickness: f32) {
        let count = points.len();
        let segments = if closed { count } else { count - 1 };
        let fringe = self.config.fringe_scale;
        let col_trans = col.with_alpha_zeroed();
        let thick = thickness > fringe;

        let mut normals = take(&mut self.temp_normals);
        let mut temp = take(&mut self.temp_points);
        segment_normals(&mut normals, points, closed);

        if !thick {
            temp.clear();
            temp.resize(count * 2, Vec2::ZERO);
            let half = fringe;
            if !closed {
                let last = count - 1;
                temp[0] = points[0] + normals[0] * half;
                temp[1] = points[0] - normals[0] * half;
                temp[last * 2] = points[last] + normals[last] * half;
                temp[last * 2 + 1] = points[last] - normals[last] * half;
            }

            let r = self.reserve_command(segments * 12, count * 3);
            let base = r.base;
            let mut idx1: IndexType = 0;
            for i1 in 0..segments {
                let i2 = if i1 + 1 == count { 0 } else { i1 + 1 };
                let idx2 = if i1 + 1 == count { 0 } else { idx1 + 3 };

                let dm = fix_normal((normals[i1] + normals[i2]) * 0.5) * half;
                temp[i2 * 2] = points[i2] + dm;
                temp[i2 * 2 + 1] = points[i2] - dm;

                let (a, b) = (base + idx1, base + idx2);
                r.indices[i1 * 12..i1 * 12 + 12].copy_from_slice(&[
                    b, a, a + 2, a + 2, b + 2, b, //
                    b + 1, a + 1, a, a, b, b + 1,
                ]);
                idx1 = idx2;
            }

            for i in 0..count {
                r.vertices[i * 3] = Vertex::new(points[i], Vec2::ZERO, col);
                r.vertices[i * 3 + 1] = Vertex::new(temp[i * 2], Vec2::ZERO, col_trans);
                r.vertices[i * 3 + 2] = Vertex::new(temp[i * 2 + 1], Vec2::ZERO, col_trans);
            }
        } else {
            temp.clear();
            temp.resize(count * 4, Vec2::ZERO);
            let half_inner = (thickness - fringe) * 0.5;
            let half_outer = half_inner + fringe;
            let edge = |p: Vec2, n: Vec2| {
                [p + n * half_outer, p + n * half_inner, p - n * half_inner, p - n * half_outer]
            };
            if !closed {
                let last = count - 1;
                temp[0..4].copy_from_slice(&edge(points[0], normals[0]));
                temp[last * 4..last * 4 + 4].copy_from_slice(&edge(points[last], normals[last]));
            }

            let r = self.reserve_command(segments * 18, count * 4);
            let base = r.base;
            let mut idx1: IndexType = 0;
            for i1 in 0..segments {
                let i2 = if i1 + 1 == count { 0 } else { i1 + 1 };
                let idx2 = if i1 + 1 == count { 0 } else { idx1 + 4 };

                let dm = fix_normal((normals[i1] + normals[i2]) * 0.5);
                temp[i2 * 4..i2 * 4 + 4].copy_from_slice(&edge(points[i2], dm));

                let (a, b) = (base + idx1, base + idx2);
                r.indices[i1 * 18..i1 * 18 + 18].copy_from_slice(&[
                    b + 1, a + 1, a + 2, a + 2, b + 2, b + 1, //
                    b + 1, a + 1, a, a, b, b + 1, //
                    b + 2, a + 2, a + 3, a + 3, b + 3, b + 2,
                ]);
                idx1 = idx2;
            }

            for i in 0..count {
                r.vertices[i * 4] = Vertex::new(temp[i * 4], Vec2::ZERO, col_trans);
                r.vertices[i * 4 + 1] = Vertex::new(temp[i * 4 + 1], Vec2::ZERO, col);
                r.vertices[i * 4 + 2] = Vertex::new(temp[i * 4 + 2], Vec2::ZERO, col);
                r.vertices[i * 4 + 3] = Vertex::new(temp[i * 4 + 3], Vec2::ZERO, col_trans);
            }
        }

        self.temp_normals = normals;
        self.temp_points = temp;
    }

    // Unblended line: an independent quad per segment.
    fn stroke_polyline(&mut self, points: &[Vec2], col: Rgba, closed: bool, thickness: f32) {
        let count = points.len();
        let segments = if closed { count } else { count - 1 };
        let half = thickness * 0.5;
        let mut r = self.reserve_command(segments * 6, segments * 4);
        for i1 in 0..segments {
            let i2 = if i1 + 1 == count { 0 } else { i1 + 1 };
            let (p1, p2) = (points[i1], points[i2]);
            let d = normalize2f(p2 - p1) * half;
            let n = vec2(d.y, -d.x);
            r.write_quad(
                i1 * 4,
                i1 * 6,
                [
                    Vertex::new(p1 + n, Vec2::ZERO, col),
                    Vertex::new(p2 + n, Vec2::ZERO, col),
                    Vertex::new(p2 - n, Vec2::ZERO, col),
                    Vertex::new(p1 - n, Vec2::ZERO, col),
                ],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::color::Rgba;
    use crate::config::{DrawConfig, DrawFlags, DrawListFlags};
    use crate::draw_list::{DrawList, DrawTextures, TextureId};
    use crate::math::{vec2, Vec2};
    use crate::tex_lines::LinesImage;
    use approx::assert_relative_eq;

    const LINE: [Vec2; 2] = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)];
    const SQUARE: [Vec2; 4] = [
        Vec2::new(0.0, 0.0),
        Vec2::new(10.0, 0.0),
        Vec2::new(10.0, 10.0),
        Vec2::new(0.0, 10.0),
    ];

    fn textured_list() -> DrawList {
        let textures = DrawTextures {
            white: TextureId(1),
            lines: Some(LinesImage::build(63).into_texture(TextureId(2))),
        };
        DrawList::with_textures(DrawConfig::default(), textures)
    }

    fn geometry_list(flags: DrawListFlags) -> DrawList {
        DrawList::new(DrawConfig::default().with_flags(flags))
    }

    #[test]
    fn degenerate_input_draws_nothing() {
        let mut list = textured_list();
        list.add_polyline(&[], Rgba::WHITE, DrawFlags::empty(), 2.0);
        list.add_polyline(&LINE[..1], Rgba::WHITE, DrawFlags::empty(), 2.0);
        list.add_polyline(&LINE, Rgba::TRANSPARENT, DrawFlags::empty(), 2.0);
        assert!(list.commands().is_empty());
    }

    #[test]
    fn textured_strip() {
        let mut list = textured_list();
        list.add_polyline(&LINE, Rgba::WHITE, DrawFlags::empty(), 2.0);
        assert_eq!(list.commands().len(), 1);
        assert_eq!(list.commands()[0].texture_id, TextureId(2));
        assert_eq!(list.indices(), &[2, 0, 1, 3, 1, 2]);

        let positions: Vec<Vec2> = list.vertices().iter().map(|v| v.pos).collect();
        assert_eq!(positions, [vec2(0.0, -2.0), vec2(0.0, 2.0), vec2(10.0, -2.0), vec2(10.0, 2.0)]);

        let uv = list.textures().lines.as_ref().unwrap().uvs[2];
        assert_eq!(list.vertices()[0].uv, vec2(uv.x, uv.y));
        assert_eq!(list.vertices()[1].uv, vec2(uv.z, uv.w));
    }

    #[test]
    fn textured_closed_path_wraps() {
        let mut list = textured_list();
        list.add_polyline(&SQUARE, Rgba::WHITE, DrawFlags::CLOSED, 1.0);
        assert_eq!(list.vertices().len(), 8);
        assert_eq!(list.indices().len(), 24);
        assert_eq!(&list.indices()[18..], &[0, 6, 7, 1, 7, 0]);
        // corner vertex sits on the bisector
        let p = list.vertices()[0].pos;
        assert_relative_eq!(p.x, -1.5, epsilon = 1e-5);
        assert_relative_eq!(p.y, -1.5, epsilon = 1e-5);
    }

    #[test]
    fn thick_lines_skip_texture() {
        let mut list = textured_list();
        list.add_polyline(&LINE, Rgba::WHITE, DrawFlags::empty(), 63.0);
        assert_eq!(list.commands()[0].texture_id, TextureId(1));
        assert_eq!(list.vertices().len(), 8);
        assert_eq!(list.indices().len(), 18);
    }

    #[test]
    fn thin_aa_line() {
        let mut list = geometry_list(DrawListFlags::ANTI_ALIASED_LINES);
        let col = Rgba::from_rgba8(255, 0, 0, 255);
        list.add_polyline(&LINE, col, DrawFlags::empty(), 0.5);
        assert_eq!(list.vertices().len(), 6);
        assert_eq!(list.indices(), &[3, 0, 2, 2, 5, 3, 4, 1, 0, 0, 3, 4]);
        let v = list.vertices();
        assert_eq!((v[0].pos, v[0].col), (vec2(0.0, 0.0), col));
        assert_eq!((v[1].pos, v[1].col), (vec2(0.0, -1.0), col.with_alpha_zeroed()));
        assert_eq!((v[2].pos, v[2].col), (vec2(0.0, 1.0), col.with_alpha_zeroed()));
    }

    #[test]
    fn thick_aa_line() {
        let mut list = geometry_list(DrawListFlags::ANTI_ALIASED_LINES);
        list.add_polyline(&LINE, Rgba::WHITE, DrawFlags::empty(), 4.0);
        assert_eq!(list.vertices().len(), 8);
        assert_eq!(list.indices().len(), 18);
        let ys: Vec<f32> = list.vertices()[..4].iter().map(|v| v.pos.y).collect();
        assert_eq!(ys, [-2.5, -1.5, 1.5, 2.5]);
        let alphas: Vec<u8> = list.vertices()[..4].iter().map(|v| v.col.a()).collect();
        assert_eq!(alphas, [0, 255, 255, 0]);
        assert_eq!(&list.indices()[..6], &[5, 1, 2, 2, 6, 5]);
    }

    #[test]
    fn aa_closed_counts() {
        let mut list = geometry_list(DrawListFlags::ANTI_ALIASED_LINES);
        list.add_polyline(&SQUARE, Rgba::WHITE, DrawFlags::CLOSED, 3.0);
        assert_eq!(list.vertices().len(), 16);
        assert_eq!(list.indices().len(), 4 * 18);
        assert!(list.indices().iter().all(|&i| i < 16));
    }

    #[test]
    fn solid_quads_without_aa() {
        let mut list = geometry_list(DrawListFlags::empty());
        list.add_polyline(&SQUARE, Rgba::WHITE, DrawFlags::empty(), 2.0);
        assert_eq!(list.vertices().len(), 12);
        assert_eq!(list.indices().len(), 18);
        assert_eq!(list.vertices()[0].pos, vec2(0.0, -1.0));
        assert_eq!(list.vertices()[2].pos, vec2(10.0, 1.0));
        assert_eq!(&list.indices()[6..12], &[4, 5, 6, 6, 7, 4]);
    }
}
