use crate::error::{Error, Result};
use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// Per-call drawing flags.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct DrawFlags: u32 {
        /// Connects the last point of a polyline back to the first one.
        const CLOSED = 1 << 0;
        const ROUND_CORNERS_TOP_LEFT = 1 << 4;
        const ROUND_CORNERS_TOP_RIGHT = 1 << 5;
        const ROUND_CORNERS_BOTTOM_LEFT = 1 << 6;
        const ROUND_CORNERS_BOTTOM_RIGHT = 1 << 7;
        const ROUND_CORNERS_TOP = Self::ROUND_CORNERS_TOP_LEFT.bits() | Self::ROUND_CORNERS_TOP_RIGHT.bits();
        const ROUND_CORNERS_BOTTOM = Self::ROUND_CORNERS_BOTTOM_LEFT.bits() | Self::ROUND_CORNERS_BOTTOM_RIGHT.bits();
        const ROUND_CORNERS_LEFT = Self::ROUND_CORNERS_TOP_LEFT.bits() | Self::ROUND_CORNERS_BOTTOM_LEFT.bits();
        const ROUND_CORNERS_RIGHT = Self::ROUND_CORNERS_TOP_RIGHT.bits() | Self::ROUND_CORNERS_BOTTOM_RIGHT.bits();
        const ROUND_CORNERS_ALL = Self::ROUND_CORNERS_TOP.bits() | Self::ROUND_CORNERS_BOTTOM.bits();
    }
}

bitflags! {
    /// Quality switches applied to every primitive of a draw list.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct DrawListFlags: u32 {
        /// Strokes get a transparent fringe.
        const ANTI_ALIASED_LINES = 1 << 0;
        /// Thin strokes sample the line texture instead of generating fringe geometry.
        const ANTI_ALIASED_LINES_USE_TEX = 1 << 1;
        /// Convex fills get a transparent fringe.
        const ANTI_ALIASED_FILL = 1 << 2;
    }
}

/// Tessellation settings of a [`DrawList`](crate::DrawList).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DrawConfig {
    pub flags: DrawListFlags,
    /// Width of antialiasing fringe in position units. Raise it when drawing
    /// into a scaled-down coordinate system.
    pub fringe_scale: f32,
    /// Maximum distance between a flattened bezier and the exact curve.
    /// Lower values give smoother curves at the cost of more vertices.
    pub curve_tessellation_tol: f32,
    /// Maximum error, in pixels, between a circle and its polygon when the
    /// segment count is picked automatically.
    pub circle_segment_max_error: f32,
    /// Segments per rounded rectangle corner.
    pub rect_corner_segments: usize,
    /// Strokes thinner than this use the textured fast path. Also the number of
    /// rows (minus one) of the line texture.
    pub tex_lines_width_max: usize,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            flags: DrawListFlags::all(),
            fringe_scale: 1.0,
            curve_tessellation_tol: 1.25,
            circle_segment_max_error: 0.30,
            rect_corner_segments: 16,
            tex_lines_width_max: 63,
        }
    }
}

impl DrawConfig {
    pub const TEX_LINES_WIDTH_LIMIT: usize = 255;

    pub fn with_flags(mut self, flags: DrawListFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_fringe_scale(mut self, fringe_scale: f32) -> Self {
        self.fringe_scale = fringe_scale;
        self
    }

    pub fn with_curve_tessellation_tol(mut self, tol: f32) -> Self {
        self.curve_tessellation_tol = tol;
        self
    }

    pub fn with_circle_segment_max_error(mut self, max_error: f32) -> Self {
        self.circle_segment_max_error = max_error;
        self
    }

    pub fn with_rect_corner_segments(mut self, segments: usize) -> Self {
        self.rect_corner_segments = segments;
        self
    }

    pub fn with_tex_lines_width_max(mut self, width: usize) -> Self {
        self.tex_lines_width_max = width;
        self
    }

    /// Checks that every setting is usable by the tessellators.
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, v: f32) -> Result<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig(format!("{name} must be positive, got {v}")))
            }
        }
        positive("fringe_scale", self.fringe_scale)?;
        positive("curve_tessellation_tol", self.curve_tessellation_tol)?;
        positive("circle_segment_max_error", self.circle_segment_max_error)?;
        if self.rect_corner_segments == 0 {
            return Err(Error::InvalidConfig(
                "rect_corner_segments must be at least 1".into(),
            ));
        }
        if self.tex_lines_width_max == 0 || self.tex_lines_width_max > Self::TEX_LINES_WIDTH_LIMIT {
            return Err(Error::InvalidConfig(format!(
                "tex_lines_width_max must be in 1..={}, got {}",
                Self::TEX_LINES_WIDTH_LIMIT,
                self.tex_lines_width_max
            )));
        }
        Ok(())
    }
}
