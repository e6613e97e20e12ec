use crate::color::Rgba;
use crate::config::DrawConfig;
use crate::math::{Affine2, Rect, Vec2};
use crate::tex_lines::LinesTexture;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Element type of the index buffer.
pub type IndexType = u32;

/// Opaque texture handle issued by a [`GraphicsBackend`](crate::GraphicsBackend).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextureId(pub u64);

impl TextureId {
    /// No texture. Backends are expected to never hand this value out.
    pub const NONE: TextureId = TextureId(0);
}

/// Vertex written into the vertex buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vertex {
    pub pos: Vec2,
    pub uv: Vec2,
    pub col: Rgba,
}

impl Vertex {
    pub fn new(pos: Vec2, uv: Vec2, col: Rgba) -> Self {
        Self { pos, uv, col }
    }
}

/// A single indexed triangle list draw call.
///
/// Indices in `idx_offset..idx_offset + elem_count` are absolute positions in
/// the vertex buffer; `vtx_offset` marks the first vertex written for this
/// command.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DrawCmd {
    pub clip_rect: Rect,
    pub texture_id: TextureId,
    pub idx_offset: usize,
    pub vtx_offset: usize,
    pub elem_count: usize,
}

/// Textures referenced by tessellated geometry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawTextures {
    /// 1x1 opaque white texture used by untextured commands.
    pub white: TextureId,
    /// Line texture enabling the textured stroke fast path.
    pub lines: Option<LinesTexture>,
}

/// Exclusive write access to the slots appended by [`DrawList::reserve_command`].
///
/// Indices must be written as `base + local_vertex_index`.
pub struct Reservation<'a> {
    pub cmd: &'a mut DrawCmd,
    pub indices: &'a mut [IndexType],
    pub vertices: &'a mut [Vertex],
    /// Position of `vertices[0]` in the shared vertex buffer.
    pub base: IndexType,
}

impl<'a> Reservation<'a> {
    /// Writes a quad `[a, b, c, d]` as triangles `0,1,2` and `2,3,0` starting
    /// at vertex slot `vtx` and index slot `idx`.
    #[inline]
    pub fn write_quad(&mut self, vtx: usize, idx: usize, quad: [Vertex; 4]) {
        self.vertices[vtx..vtx + 4].copy_from_slice(&quad);
        let first = self.base + vtx as IndexType;
        self.indices[idx..idx + 6].copy_from_slice(&[
            first,
            first + 1,
            first + 2,
            first + 2,
            first + 3,
            first,
        ]);
    }
}

/// Accumulates tessellated geometry for one frame.
///
/// `add_*` methods append primitives, `path_*` methods build a path that is
/// consumed by [`DrawList::path_stroke`] or [`DrawList::path_fill_convex`].
///
/// # Example
///
/// ```
/// use immediate_drawing::{vec2, DrawConfig, DrawList, Rgba};
///
/// let mut list = DrawList::new(DrawConfig::default());
/// list.add_rect_filled(vec2(0.0, 0.0), vec2(100.0, 50.0), Rgba::WHITE, 0.0, Default::default());
/// list.add_circle(vec2(50.0, 25.0), 20.0, Rgba::BLACK, 0, 2.0);
///
/// // upload list.vertices()/indices() and draw each of list.commands()
/// assert_eq!(list.commands().len(), 2);
///
/// list.clear();
/// ```
///
/// # Internals
/// Buffers only grow: [`DrawList::clear`] resets lengths and keeps capacity, so
/// once the first frame has warmed them up, drawing the same content again
/// does not allocate.
#[derive(Clone, Debug)]
pub struct DrawList {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) indices: Vec<IndexType>,
    pub(crate) commands: Vec<DrawCmd>,
    pub(crate) path: Vec<Vec2>,

    pub(crate) config: DrawConfig,
    pub(crate) textures: DrawTextures,
    pub(crate) clip_rect: Rect,

    // temporary buffers to avoid allocations during tessellation
    pub(crate) temp_normals: Vec<Vec2>,
    pub(crate) temp_points: Vec<Vec2>,
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new(DrawConfig::default())
    }
}

impl DrawList {
    /// Creates an empty list without textures. Strokes use geometric
    /// antialiasing until a line texture is installed.
    pub fn new(config: DrawConfig) -> Self {
        Self::with_textures(config, DrawTextures::default())
    }

    pub fn with_textures(config: DrawConfig, textures: DrawTextures) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            commands: Vec::new(),
            path: Vec::new(),
            config,
            textures,
            clip_rect: Rect::new(Vec2::splat(-8192.0), Vec2::splat(8192.0)),
            temp_normals: Vec::new(),
            temp_points: Vec::new(),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[IndexType] {
        &self.indices
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// Points of the path under construction.
    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut DrawConfig {
        &mut self.config
    }

    pub fn textures(&self) -> &DrawTextures {
        &self.textures
    }

    pub fn set_textures(&mut self, textures: DrawTextures) {
        self.textures = textures;
    }

    pub fn clip_rect(&self) -> Rect {
        self.clip_rect
    }

    /// Clip rectangle recorded in commands created from now on.
    pub fn set_clip_rect(&mut self, clip_rect: Rect) {
        self.clip_rect = clip_rect;
    }

    /// Base method for implementing primitives.
    ///
    /// Appends `idx_count` zeroed indices, `vtx_count` zeroed vertices and a
    /// command covering them. The command uses the white texture and the
    /// current clip rectangle; both can be overridden through the returned
    /// reservation.
    pub fn reserve_command(&mut self, idx_count: usize, vtx_count: usize) -> Reservation<'_> {
        let idx_offset = self.indices.len();
        let vtx_offset = self.vertices.len();
        debug_assert!(vtx_offset + vtx_count <= IndexType::MAX as usize);
        self.indices.resize(idx_offset + idx_count, 0);
        self.vertices.resize(vtx_offset + vtx_count, Vertex::default());
        self.commands.push(DrawCmd {
            clip_rect: self.clip_rect,
            texture_id: self.textures.white,
            idx_offset,
            vtx_offset,
            elem_count: idx_count,
        });
        let last = self.commands.len() - 1;
        Reservation {
            cmd: &mut self.commands[last],
            indices: &mut self.indices[idx_offset..],
            vertices: &mut self.vertices[vtx_offset..],
            base: vtx_offset as IndexType,
        }
    }

    /// Appends a prebuilt mesh as one command. `indices` refer to `vertices`.
    pub fn add_cmd(
        &mut self,
        clip_rect: Rect,
        texture_id: TextureId,
        indices: &[IndexType],
        vertices: &[Vertex],
    ) {
        let r = self.reserve_command(indices.len(), vertices.len());
        r.cmd.clip_rect = clip_rect;
        r.cmd.texture_id = texture_id;
        r.vertices.copy_from_slice(vertices);
        for (dest, index) in r.indices.iter_mut().zip(indices) {
            *dest = r.base + index;
        }
    }

    /// Appends all commands of `other`, rebasing their offsets and indices.
    ///
    /// When `transform` is given, copied vertex positions are transformed by it,
    /// which allows stamping a prebuilt shape at many places without
    /// tessellating it again.
    pub fn add_list(&mut self, other: &DrawList, transform: Option<&Affine2>) {
        let idx_base = self.indices.len();
        let vtx_base = self.vertices.len();
        let rebase = vtx_base as IndexType;

        self.indices.extend(other.indices.iter().map(|i| i + rebase));
        match transform {
            Some(t) => self.vertices.extend(other.vertices.iter().map(|v| Vertex {
                pos: t.transform_point2(v.pos),
                ..*v
            })),
            None => self.vertices.extend_from_slice(&other.vertices),
        }
        self.commands.extend(other.commands.iter().map(|cmd| DrawCmd {
            idx_offset: cmd.idx_offset + idx_base,
            vtx_offset: cmd.vtx_offset + vtx_base,
            ..*cmd
        }));
    }

    /// Transforms positions of every vertex in the list.
    pub fn transform(&mut self, transform: &Affine2) {
        for v in &mut self.vertices {
            v.pos = transform.transform_point2(v.pos);
        }
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.transform(&Affine2::from_translation(offset));
    }

    pub fn scale(&mut self, scale: Vec2) {
        self.transform(&Affine2::from_scale(scale));
    }

    /// Rotates all vertices by `angle` radians around `center`.
    pub fn rotate(&mut self, center: Vec2, angle: f32) {
        let t = Affine2::from_translation(center)
            * Affine2::from_angle(angle)
            * Affine2::from_translation(-center);
        self.transform(&t);
    }

    /// Clears vertex, index buffers, command list and the path.
    /// Allocated capacity is kept.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.commands.clear();
        self.path.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
