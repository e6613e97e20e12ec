//! Owner of a backend, its shared textures and the frame draw list.
use crate::backend::{FrameInfo, FrameParams, GraphicsBackend};
use crate::config::DrawConfig;
use crate::draw_list::{DrawList, DrawTextures, TextureId};
use crate::error::Result;
use crate::font::{FontAtlas, FontFamily, FontManager};
use crate::math::{Affine2, Rect, Vec2, Vec4};
use crate::tex_lines::LinesImage;

/// Drives one window: creates the textures geometry depends on, hands out
/// draw lists and submits them once per frame.
///
/// ```
/// use immediate_drawing::{vec2, Context, DrawConfig, HeadlessBackend, Rgba};
///
/// # fn main() -> immediate_drawing::Result<()> {
/// let mut ctx = Context::new(HeadlessBackend::new(800.0, 600.0).close_after(3), DrawConfig::default())?;
/// while !ctx.start_frame() {
///     ctx.draw_list_mut().add_circle_filled(vec2(400.0, 300.0), 100.0, Rgba::WHITE, 0);
///     ctx.render_frame();
/// }
/// let backend = ctx.destroy();
/// assert_eq!(backend.frames_rendered(), 2);
/// # Ok(())
/// # }
/// ```
pub struct Context<B: GraphicsBackend> {
    backend: B,
    draw_list: DrawList,
    textures: DrawTextures,
    frame_params: FrameParams,
    frame_info: FrameInfo,
    fonts: Option<FontManager>,
}

impl<B: GraphicsBackend> Context<B> {
    pub fn new(mut backend: B, config: DrawConfig) -> Result<Self> {
        config.validate()?;

        let white = backend.create_texture(1, 1, &[255; 4])?;
        let lines = LinesImage::build(config.tex_lines_width_max);
        let lines_id = match backend.create_texture(lines.width, lines.height, &lines.pixels) {
            Ok(id) => id,
            Err(e) => {
                backend.delete_texture(white);
                return Err(e);
            }
        };
        log::info!(
            "drawing context ready: white texture {white:?}, {}x{} line texture {lines_id:?}",
            lines.width,
            lines.height
        );

        let textures = DrawTextures {
            white,
            lines: Some(lines.into_texture(lines_id)),
        };
        Ok(Self {
            backend,
            draw_list: DrawList::with_textures(config, textures.clone()),
            textures,
            frame_params: FrameParams::default(),
            frame_info: FrameInfo::default(),
            fonts: None,
        })
    }

    /// Clears the frame draw list, starts a backend frame and clips the list
    /// to the window. Returns true when the window asked to close.
    pub fn start_frame(&mut self) -> bool {
        self.draw_list.clear();
        self.frame_info = self.backend.start_frame(&self.frame_params);
        self.draw_list
            .set_clip_rect(Rect::new(Vec2::ZERO, self.frame_info.win_size));
        self.frame_info.win_close
    }

    /// Submits the frame draw list.
    pub fn render_frame(&mut self) {
        self.backend.render_frame(&self.draw_list);
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    pub fn draw_list_mut(&mut self) -> &mut DrawList {
        &mut self.draw_list
    }

    /// Frame draw list together with the fonts, for drawing text.
    pub fn draw_list_with_fonts(&mut self) -> (&mut DrawList, Option<&FontManager>) {
        (&mut self.draw_list, self.fonts.as_ref())
    }

    /// Empty list sharing this context's textures and configuration, to be
    /// merged with [`Context::add_list`].
    pub fn new_draw_list(&self) -> DrawList {
        DrawList::with_textures(*self.draw_list.config(), self.textures.clone())
    }

    /// Appends `list` to the frame draw list.
    pub fn add_list(&mut self, list: &DrawList, transform: Option<&Affine2>) {
        self.draw_list.add_list(list, transform);
    }

    pub fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<TextureId> {
        self.backend.create_texture(width, height, rgba)
    }

    pub fn delete_texture(&mut self, id: TextureId) {
        self.backend.delete_texture(id);
    }

    /// Replaces the font manager, deleting the textures of the previous one.
    pub fn set_font_manager(&mut self, fonts: FontManager) {
        if let Some(mut old) = self.fonts.replace(fonts) {
            old.destroy(&mut self.backend);
        }
    }

    pub fn font_manager(&self) -> Option<&FontManager> {
        self.fonts.as_ref()
    }

    pub fn font_manager_mut(&mut self) -> Option<&mut FontManager> {
        self.fonts.as_mut()
    }

    /// Builds the atlases of the installed font manager. Does nothing
    /// without one.
    pub fn build_fonts(&mut self) -> Result<()> {
        match self.fonts.as_mut() {
            Some(fonts) => fonts.build(&mut self.backend),
            None => Ok(()),
        }
    }

    /// Atlas of `family` at relative size `rel`, see [`FontManager::font`].
    pub fn font(&self, family: FontFamily, rel: i32) -> Option<&FontAtlas> {
        self.fonts.as_ref()?.font(family, rel).ok()
    }

    pub fn set_clear_color(&mut self, color: Vec4) {
        self.frame_params.clear_color = color;
    }

    pub fn set_ev_timeout(&mut self, timeout: f32) {
        self.frame_params.ev_timeout = timeout;
    }

    /// Window size reported by the last started frame.
    pub fn size(&self) -> Vec2 {
        self.frame_info.win_size
    }

    pub fn frame_info(&self) -> FrameInfo {
        self.frame_info
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Deletes every texture the context created and returns the backend.
    pub fn destroy(mut self) -> B {
        if let Some(mut fonts) = self.fonts.take() {
            fonts.destroy(&mut self.backend);
        }
        self.backend.delete_texture(self.textures.white);
        if let Some(lines) = self.textures.lines.take() {
            self.backend.delete_texture(lines.id);
        }
        self.backend
    }
}
