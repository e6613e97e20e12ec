//! Alpha ramp texture used to stroke thin lines with a single quad strip.
//!
//! Row `n` holds a run of `n` opaque white texels centered between transparent
//! white texels:
//!
//! ```text
//! width  texels
//! 0      TTTTTTTTTTT
//! 1      TTTTTOTTTTT
//! 2      TTTTOOTTTTT
//! 3      TTTTOOOTTTT
//! 4      TTTOOOOTTTT
//! ...
//! ```
//!
//! Sampling a row across `[padding - 1, padding + n + 1]` gives a line of
//! width `n` with a one texel fade on each side.
use crate::draw_list::TextureId;
use crate::math::{vec2, vec4, Vec4};

/// CPU side image of the line texture together with its UV table.
#[derive(Clone, Debug, PartialEq)]
pub struct LinesImage {
    pub width: u32,
    pub height: u32,
    /// RGBA8 texels, row by row.
    pub pixels: Vec<u8>,
    /// For each line width: `(u0, v, u1, v)`, where `u0` maps to the positive
    /// side of the stroke normal.
    pub uvs: Vec<Vec4>,
}

/// Uploaded line texture as referenced by a draw list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinesTexture {
    pub id: TextureId,
    pub uvs: Vec<Vec4>,
}

impl LinesImage {
    /// Builds rows for line widths `0..=width_max`.
    pub fn build(width_max: usize) -> Self {
        const OPAQUE: [u8; 4] = [255, 255, 255, 255];
        const CLEAR: [u8; 4] = [255, 255, 255, 0];

        let width = width_max + 2;
        let height = width_max + 1;
        let mut pixels = Vec::with_capacity(width * height * 4);
        let mut uvs = Vec::with_capacity(height);
        let uv_scale = vec2(1.0 / width as f32, 1.0 / height as f32);

        for n in 0..height {
            let line_width = n;
            let pad_left = (width - line_width) / 2;
            let pad_right = width - (pad_left + line_width);

            for _ in 0..pad_left {
                pixels.extend_from_slice(&CLEAR);
            }
            for _ in 0..line_width {
                pixels.extend_from_slice(&OPAQUE);
            }
            for _ in 0..pad_right {
                pixels.extend_from_slice(&CLEAR);
            }

            let uv0 = vec2((pad_left - 1) as f32, n as f32) * uv_scale;
            let uv1 = vec2((pad_left + line_width + 1) as f32, (n + 1) as f32) * uv_scale;
            // constant v in the middle of the row to avoid bleeding from neighbours
            let half_v = (uv0.y + uv1.y) * 0.5;
            uvs.push(vec4(uv0.x, half_v, uv1.x, half_v));
        }

        Self {
            width: width as u32,
            height: height as u32,
            pixels,
            uvs,
        }
    }

    pub fn into_texture(self, id: TextureId) -> LinesTexture {
        LinesTexture { id, uvs: self.uvs }
    }
}
