//! Seam between the drawing core and a platform graphics layer.
use crate::draw_list::{DrawList, TextureId};
use crate::error::{Error, Result};
use crate::math::{Vec2, Vec4};
use std::collections::HashMap;

/// Per frame settings handed to the backend.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameParams {
    pub clear_color: Vec4,
    /// Seconds to wait for input events, 0 to poll.
    pub ev_timeout: f32,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            clear_color: Vec4::ONE,
            ev_timeout: 0.0,
        }
    }
}

/// State reported by the backend at the start of a frame.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameInfo {
    pub win_close: bool,
    pub win_size: Vec2,
}

/// Platform graphics layer: owns the window, GPU textures and submission.
///
/// Commands of a submitted [`DrawList`] hold absolute vertex indices, so the
/// whole vertex buffer can be bound once and each command drawn with a base
/// vertex of zero.
pub trait GraphicsBackend {
    /// Creates a texture from RGBA8 pixels, row by row.
    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<TextureId>;

    fn delete_texture(&mut self, id: TextureId);

    fn start_frame(&mut self, params: &FrameParams) -> FrameInfo;

    fn render_frame(&mut self, draw_list: &DrawList);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadlessTexture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Counters of the last submitted frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub commands: usize,
    pub vertices: usize,
    pub indices: usize,
}

/// Backend without a GPU. Keeps textures in memory and records what was
/// submitted, for tests and offline tools.
#[derive(Debug)]
pub struct HeadlessBackend {
    size: Vec2,
    textures: HashMap<TextureId, HeadlessTexture>,
    next_id: u64,
    frames_started: u64,
    frames_rendered: u64,
    last_frame: FrameStats,
    close_after: Option<u64>,
    last_params: FrameParams,
}

impl HeadlessBackend {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            textures: HashMap::new(),
            next_id: 1,
            frames_started: 0,
            frames_rendered: 0,
            last_frame: FrameStats::default(),
            close_after: None,
            last_params: FrameParams::default(),
        }
    }

    /// Reports a close request once `frames` frames have been started.
    pub fn close_after(mut self, frames: u64) -> Self {
        self.close_after = Some(frames);
        self
    }

    pub fn texture(&self, id: TextureId) -> Option<&HeadlessTexture> {
        self.textures.get(&id)
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn last_frame(&self) -> FrameStats {
        self.last_frame
    }

    pub fn last_params(&self) -> FrameParams {
        self.last_params
    }
}

impl GraphicsBackend for HeadlessBackend {
    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Result<TextureId> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(Error::Backend(format!(
                "texture {width}x{height} needs {expected} bytes, got {}",
                rgba.len()
            )));
        }
        let id = TextureId(self.next_id);
        self.next_id += 1;
        self.textures.insert(
            id,
            HeadlessTexture {
                width,
                height,
                pixels: rgba.to_vec(),
            },
        );
        log::debug!("created texture {id:?} ({width}x{height})");
        Ok(id)
    }

    fn delete_texture(&mut self, id: TextureId) {
        if self.textures.remove(&id).is_none() {
            log::warn!("deleting unknown texture {id:?}");
        }
    }

    fn start_frame(&mut self, params: &FrameParams) -> FrameInfo {
        self.frames_started += 1;
        self.last_params = *params;
        FrameInfo {
            win_close: self.close_after.map_or(false, |n| self.frames_started >= n),
            win_size: self.size,
        }
    }

    fn render_frame(&mut self, draw_list: &DrawList) {
        self.frames_rendered += 1;
        self.last_frame = FrameStats {
            commands: draw_list.commands().len(),
            vertices: draw_list.vertices().len(),
            indices: draw_list.indices().len(),
        };
        log::debug!(
            "rendered frame {}: {} commands, {} vertices, {} indices",
            self.frames_rendered,
            self.last_frame.commands,
            self.last_frame.vertices,
            self.last_frame.indices
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    #[test]
    fn textures_round_trip() {
        let mut backend = HeadlessBackend::new(640.0, 480.0);
        let a = backend.create_texture(1, 1, &[255; 4]).unwrap();
        let b = backend.create_texture(2, 1, &[0; 8]).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, TextureId::NONE);
        assert_eq!(backend.texture(b).unwrap().width, 2);
        backend.delete_texture(a);
        assert!(backend.texture(a).is_none());
        assert_eq!(backend.texture_count(), 1);
    }

    #[test]
    fn rejects_wrong_pixel_count() {
        let mut backend = HeadlessBackend::new(640.0, 480.0);
        assert!(matches!(backend.create_texture(2, 2, &[0; 4]), Err(Error::Backend(_))));
    }

    #[test]
    fn reports_close_request() {
        let mut backend = HeadlessBackend::new(640.0, 480.0).close_after(2);
        let params = FrameParams::default();
        assert!(!backend.start_frame(&params).win_close);
        let info = backend.start_frame(&params);
        assert!(info.win_close);
        assert_eq!(info.win_size, Vec2::new(640.0, 480.0));
    }

    #[test]
    fn render_frame_records_stats() {
        let mut backend = HeadlessBackend::new(640.0, 480.0);
        let mut list = DrawList::default();
        list.add_triangle_filled(Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0), Rgba::WHITE);
        list.add_triangle_filled(Vec2::ZERO, Vec2::new(-10.0, 0.0), Vec2::new(0.0, -10.0), Rgba::BLACK);
        backend.render_frame(&list);
        backend.render_frame(&list);
        assert_eq!(backend.frames_rendered(), 2);
        let stats = backend.last_frame();
        assert_eq!(stats.commands, list.commands().len());
        assert_eq!(stats.vertices, list.vertices().len());
        assert_eq!(stats.indices, list.indices().len());
    }
}
