//! Immediate-mode 2D drawing: shapes, paths and text tessellated into indexed
//! triangle lists, ready to be uploaded to the GPU every frame.
//!
//! # Features
//! - Optimized for dynamically generated content: buffers are reused between
//!   frames, drawing the same content again does not allocate.
//! - Antialiasing of fills and strokes using blended fringes.
//! - Textured fast path for thin antialiased lines.
//! - Rounded rectangles, circles, arcs, quadratic and cubic beziers.
//! - Font atlases packed into a near square texture, text layout with kerning.
//! - Backend-agnostic. Rendering goes through the [`GraphicsBackend`] trait;
//!   [`HeadlessBackend`] runs without a GPU.
//! - Pure rust, no unsafe code.
//!
//! Individual drawing operations such as [`DrawList::add_circle_filled`] or
//! [`DrawList::add_polyline`] are available in the [`DrawList`] implementation.
//! A [`Context`] owns the backend, the textures tessellation relies on and the
//! draw list of the current frame.
//!
//! Tessellation follows the algorithms of [Dear ImGui](https://github.com/ocornut/imgui).
#![forbid(unsafe_code)]

mod backend;
pub mod bezier;
mod color;
mod config;
mod context;
mod draw_list;
mod error;
pub mod font;
pub mod math;
pub mod path;
mod tessellate;
mod tex_lines;
mod text;

pub use backend::{FrameInfo, FrameParams, FrameStats, GraphicsBackend, HeadlessBackend, HeadlessTexture};
pub use color::Rgba;
pub use config::{DrawConfig, DrawFlags, DrawListFlags};
pub use context::Context;
pub use draw_list::{DrawCmd, DrawList, DrawTextures, IndexType, Reservation, TextureId, Vertex};
pub use error::{Error, Result};
pub use font::{FontAtlas, FontFamily, FontManager, GlyphInfo};
pub use math::{vec2, Affine2, Rect, Vec2, Vec4};
pub use path::{circle_auto_segment_count, CIRCLE_SEGMENT_MAX};
pub use tex_lines::{LinesImage, LinesTexture};
pub use text::VAlign;
