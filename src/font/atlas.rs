use super::face::{FaceMetrics, FontFace, GlyphBitmap};
use super::fixed::{Fixed, FixedPoint, FixedRect};
use super::REPLACEMENT_CHAR;
use crate::backend::GraphicsBackend;
use crate::draw_list::TextureId;
use crate::error::{Error, Result};
use crate::math::{vec2, Rect, Vec2};
use image::{ImageFormat, Rgba as Pixel, RgbaImage};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Space kept between glyphs in the atlas image.
const ATLAS_PADDING: Fixed = Fixed::from_int(2);
/// Widths tried when searching for a square layout.
const MAX_ATLAS_WIDTH: Fixed = Fixed::from_int(1024 * 1024);

/// Placement of a glyph for text layout.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GlyphInfo {
    /// Distance from this glyph origin to the next one.
    pub advance: f32,
    /// Quad relative to the glyph origin on the baseline, y down.
    pub bounds: Rect,
    /// Texture coordinates of the quad corners: top left, bottom left,
    /// bottom right, top right.
    pub uv: [Vec2; 4],
}

/// Lifecycle of a [`FontAtlas`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AtlasState {
    /// Image built, glyphs mapped.
    Packed,
    TextureUploaded,
    /// CPU image dropped after upload.
    ImageReleased,
    Destroyed,
}

#[derive(Copy, Clone, Debug)]
struct GlyphSource {
    ch: char,
    bounds: FixedRect,
    advance: Fixed,
}

#[derive(Copy, Clone, Debug)]
struct MappedGlyph {
    ch: char,
    dot: FixedPoint,
    frame: FixedRect,
    advance: Fixed,
}

/// Glyphs of one face at one size packed into a single texture.
///
/// # Example
///
/// ```no_run
/// use immediate_drawing::font::{ascii_runes, FaceOptions, FontAtlas, FontdueFace};
/// use immediate_drawing::HeadlessBackend;
///
/// # fn main() -> immediate_drawing::Result<()> {
/// let data = std::fs::read("DejaVuSans.ttf")?;
/// let face = FontdueFace::from_bytes(&data, FaceOptions { size: 14.0, dpi: 72.0 })?;
/// let mut atlas = FontAtlas::new(face, &[ascii_runes()]);
/// atlas.save_png("atlas.png")?;
///
/// let mut backend = HeadlessBackend::new(800.0, 600.0);
/// atlas.create_texture(&mut backend)?;
/// atlas.release_image()?;
/// # Ok(())
/// # }
/// ```
pub struct FontAtlas {
    face: Box<dyn FontFace>,
    glyphs: HashMap<char, GlyphInfo>,
    image: Option<RgbaImage>,
    width: u32,
    height: u32,
    ascent: f32,
    descent: f32,
    line_height: f32,
    texture_id: TextureId,
    state: AtlasState,
}

impl std::fmt::Debug for FontAtlas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontAtlas")
            .field("glyphs", &self.glyphs.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("texture_id", &self.texture_id)
            .field("state", &self.state)
            .finish()
    }
}

impl FontAtlas {
    /// Packs glyphs for every code point of `rune_sets` that `face` covers,
    /// plus the replacement character.
    pub fn new<F: FontFace + 'static>(face: F, rune_sets: &[impl AsRef<[char]>]) -> Self {
        Self::from_boxed(Box::new(face), rune_sets)
    }

    pub fn from_boxed(face: Box<dyn FontFace>, rune_sets: &[impl AsRef<[char]>]) -> Self {
        let metrics = face.metrics();

        let mut seen = HashSet::new();
        seen.insert(REPLACEMENT_CHAR);
        let mut runes = vec![REPLACEMENT_CHAR];
        for set in rune_sets {
            for &ch in set.as_ref() {
                if face.has_glyph(ch) && seen.insert(ch) {
                    runes.push(ch);
                }
            }
        }
        let sources: Vec<GlyphSource> = runes
            .iter()
            .filter_map(|&ch| {
                face.glyph_bounds(ch)
                    .map(|(bounds, advance)| GlyphSource { ch, bounds, advance })
            })
            .collect();

        let mut mapped = Vec::with_capacity(sources.len());
        let bounds = make_square_mapping(&sources, &metrics, ATLAS_PADDING, &mut mapped);
        let (image, origin) = render_image(face.as_ref(), &mapped, &bounds);
        let (width, height) = image.dimensions();

        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        let glyphs = mapped
            .iter()
            .map(|g| {
                let u0 = (g.frame.min.x.floor() - origin.0) as f32 / w;
                let v0 = (g.frame.min.y.floor() - origin.1) as f32 / h;
                let u1 = (g.frame.max.x.floor() - origin.0) as f32 / w;
                let v1 = (g.frame.max.y.floor() - origin.1) as f32 / h;
                let info = GlyphInfo {
                    advance: g.advance.to_f32_floor(),
                    bounds: Rect::new(
                        vec2(
                            (g.frame.min.x - g.dot.x).to_f32_floor(),
                            (g.frame.min.y - g.dot.y).to_f32_floor(),
                        ),
                        vec2(
                            (g.frame.max.x - g.dot.x).to_f32_floor(),
                            (g.frame.max.y - g.dot.y).to_f32_floor(),
                        ),
                    ),
                    uv: [vec2(u0, v0), vec2(u0, v1), vec2(u1, v1), vec2(u1, v0)],
                };
                (g.ch, info)
            })
            .collect();

        log::info!(
            "packed font atlas: {} glyphs into {}x{} pixels",
            mapped.len(),
            width,
            height
        );

        Self {
            face,
            glyphs,
            image: Some(image),
            width,
            height,
            ascent: metrics.ascent.to_f32_floor(),
            descent: metrics.descent.to_f32_floor(),
            line_height: metrics.height.to_f32_floor(),
            texture_id: TextureId::NONE,
            state: AtlasState::Packed,
        }
    }

    pub fn face(&self) -> &dyn FontFace {
        self.face.as_ref()
    }

    pub fn glyph(&self, ch: char) -> Option<&GlyphInfo> {
        self.glyphs.get(&ch)
    }

    /// Glyph for `ch`, or the replacement glyph when the face lacks it.
    pub fn glyph_or_replacement(&self, ch: char) -> Option<&GlyphInfo> {
        self.glyphs.get(&ch).or_else(|| self.glyphs.get(&REPLACEMENT_CHAR))
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn ascent(&self) -> f32 {
        self.ascent
    }

    pub fn descent(&self) -> f32 {
        self.descent
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Horizontal adjustment between two code points, 0 without kerning data.
    pub fn kern(&self, left: char, right: char) -> f32 {
        self.face.kern(left, right).to_f32_floor()
    }

    /// Size of the atlas image in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn texture_id(&self) -> TextureId {
        self.texture_id
    }

    pub fn state(&self) -> AtlasState {
        self.state
    }

    /// CPU side image, available until [`FontAtlas::release_image`].
    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    /// Size of `text` laid out as by [`DrawList::add_text`](crate::DrawList::add_text):
    /// width of the widest line and height of all lines.
    pub fn measure_text(&self, text: &str) -> Vec2 {
        let mut width: f32 = 0.0;
        let mut line_width = 0.0;
        let mut lines = 1;
        let mut prev = None;
        for ch in text.chars() {
            if ch == '\n' {
                width = width.max(line_width);
                line_width = 0.0;
                lines += 1;
                prev = None;
                continue;
            }
            let Some(glyph) = self.glyph_or_replacement(ch) else {
                continue;
            };
            if let Some(p) = prev {
                line_width += self.kern(p, ch);
            }
            line_width += glyph.advance;
            prev = Some(ch);
        }
        vec2(width.max(line_width), lines as f32 * self.line_height)
    }

    /// Uploads the image as a texture.
    pub fn create_texture(&mut self, backend: &mut dyn GraphicsBackend) -> Result<TextureId> {
        let image = match (&self.image, self.state) {
            (Some(image), AtlasState::Packed) => image,
            _ => {
                return Err(Error::AtlasState {
                    state: self.state,
                    operation: "create texture",
                })
            }
        };
        let id = backend.create_texture(self.width, self.height, image.as_raw())?;
        self.texture_id = id;
        self.state = AtlasState::TextureUploaded;
        log::info!("uploaded font atlas texture {id:?}");
        Ok(id)
    }

    /// Drops the CPU side image once the texture exists.
    pub fn release_image(&mut self) -> Result<()> {
        if self.state != AtlasState::TextureUploaded {
            return Err(Error::AtlasState {
                state: self.state,
                operation: "release image",
            });
        }
        self.image = None;
        self.state = AtlasState::ImageReleased;
        Ok(())
    }

    /// Writes the atlas image as PNG, for inspection.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let image = self.image.as_ref().ok_or(Error::ImageReleased)?;
        image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    /// Deletes the texture. Safe to call more than once.
    pub fn destroy(&mut self, backend: &mut dyn GraphicsBackend) {
        if self.texture_id != TextureId::NONE {
            backend.delete_texture(self.texture_id);
            self.texture_id = TextureId::NONE;
        }
        self.image = None;
        self.state = AtlasState::Destroyed;
    }
}

/// Smallest `i` in `0..n` for which `pred` holds, or `n`. `pred` must be
/// false up to some point and true afterwards.
fn search(n: i32, mut pred: impl FnMut(i32) -> bool) -> i32 {
    let (mut lo, mut hi) = (0, n);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(mid) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

// Finds the narrowest row width for which the packed glyphs are at least as
// wide as they are tall.
fn make_square_mapping(
    glyphs: &[GlyphSource],
    metrics: &FaceMetrics,
    padding: Fixed,
    out: &mut Vec<MappedGlyph>,
) -> FixedRect {
    let width = search(MAX_ATLAS_WIDTH.0, |w| {
        let bounds = make_mapping(glyphs, metrics, padding, Fixed(w), None);
        bounds.width() >= bounds.height()
    });
    log::debug!("square mapping of {} glyphs: row width {}", glyphs.len(), Fixed(width).ceil());
    make_mapping(glyphs, metrics, padding, Fixed(width), Some(out))
}

// Places glyphs left to right and starts a new row after a glyph reaching
// `width`. Rows are `ascent + descent + padding` apart. Returns the union of
// all glyph frames.
fn make_mapping(
    glyphs: &[GlyphSource],
    metrics: &FaceMetrics,
    padding: Fixed,
    width: Fixed,
    mut out: Option<&mut Vec<MappedGlyph>>,
) -> FixedRect {
    let mut bounds = FixedRect::default();
    let mut dot = FixedPoint::default();

    for g in glyphs {
        // whole pixel frames, sampling artifacts appear otherwise
        let mut frame = g.bounds.pixel_aligned();
        dot.x -= frame.min.x;
        frame = frame.translate(dot);

        if let Some(out) = out.as_deref_mut() {
            out.push(MappedGlyph {
                ch: g.ch,
                dot,
                frame,
                advance: g.advance,
            });
        }
        bounds = bounds.union(&frame);

        dot.x = Fixed::from_int((frame.max.x + padding).ceil());
        if frame.max.x >= width {
            dot.x = Fixed::ZERO;
            dot.y = Fixed::from_int((dot.y + metrics.ascent + metrics.descent + padding).ceil());
        }
    }
    bounds
}

// Returns the image and the pixel position of its top left corner in mapping
// coordinates.
fn render_image(face: &dyn FontFace, mapped: &[MappedGlyph], bounds: &FixedRect) -> (RgbaImage, (i32, i32)) {
    let aligned = bounds.pixel_aligned();
    let origin = (aligned.min.x.floor(), aligned.min.y.floor());
    let width = (aligned.max.x.floor() - origin.0).max(0) as u32;
    let height = (aligned.max.y.floor() - origin.1).max(0) as u32;
    let mut image = RgbaImage::new(width, height);

    for g in mapped {
        if let Some(bitmap) = face.render_glyph(g.ch) {
            let x = g.dot.x.floor() + bitmap.left - origin.0;
            let y = g.dot.y.floor() + bitmap.top - origin.1;
            blit(&mut image, &bitmap, x, y);
        }
    }
    (image, origin)
}

fn blit(image: &mut RgbaImage, bitmap: &GlyphBitmap, x0: i32, y0: i32) {
    let (w, h) = (image.width() as i32, image.height() as i32);
    for row in 0..bitmap.height as i32 {
        let y = y0 + row;
        if y < 0 || y >= h {
            continue;
        }
        for col in 0..bitmap.width as i32 {
            let x = x0 + col;
            if x < 0 || x >= w {
                continue;
            }
            let coverage = bitmap.coverage[(row * bitmap.width as i32 + col) as usize];
            image.put_pixel(x as u32, y as u32, Pixel([255, 255, 255, coverage]));
        }
    }
}
