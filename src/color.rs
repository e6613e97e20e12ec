#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Color packed into 32 bits, red in the lowest byte and alpha in the highest.
///
/// In memory (little endian) the bytes are laid out as `[r, g, b, a]`, which is
/// what backends expect for `RGBA8` vertex attributes.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgba(pub u32);

impl Rgba {
    pub const MASK_A: u32 = 0xFF00_0000;
    pub const SHIFT_R: u32 = 0;
    pub const SHIFT_G: u32 = 8;
    pub const SHIFT_B: u32 = 16;
    pub const SHIFT_A: u32 = 24;

    pub const WHITE: Rgba = Rgba(0xFFFF_FFFF);
    pub const BLACK: Rgba = Rgba(0xFF00_0000);
    pub const TRANSPARENT: Rgba = Rgba(0);

    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba(
            (r as u32) << Self::SHIFT_R
                | (g as u32) << Self::SHIFT_G
                | (b as u32) << Self::SHIFT_B
                | (a as u32) << Self::SHIFT_A,
        )
    }

    /// Converts normalized float channels, clamping each into `0..=1`.
    pub fn from_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        Self::from_rgba8(c(r), c(g), c(b), c(a))
    }

    pub const fn r(self) -> u8 {
        (self.0 >> Self::SHIFT_R) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> Self::SHIFT_G) as u8
    }

    pub const fn b(self) -> u8 {
        (self.0 >> Self::SHIFT_B) as u8
    }

    pub const fn a(self) -> u8 {
        (self.0 >> Self::SHIFT_A) as u8
    }

    /// True when the alpha byte is zero. Drawing calls skip such colors.
    pub const fn is_transparent(self) -> bool {
        self.0 & Self::MASK_A == 0
    }

    /// Same color with the alpha byte cleared, used for antialiasing fringes.
    pub const fn with_alpha_zeroed(self) -> Self {
        Rgba(self.0 & !Self::MASK_A)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Rgba(self.0 & !Self::MASK_A | (a as u32) << Self::SHIFT_A)
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r(), self.g(), self.b(), self.a()]
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(c: [u8; 4]) -> Self {
        Rgba::from_rgba8(c[0], c[1], c[2], c[3])
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(c: Rgba) -> Self {
        c.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_layout_is_bit_exact() {
        let c = Rgba::from_rgba8(0x11, 0x22, 0x33, 0x44);
        assert_eq!(c.0, 0x4433_2211);
        assert_eq!(c.to_array(), [0x11, 0x22, 0x33, 0x44]);
        assert_eq!(c.0.to_le_bytes(), [0x11, 0x22, 0x33, 0x44]);
    }

    #[test]
    fn alpha_masking() {
        let c = Rgba::from_rgba8(10, 20, 30, 200);
        assert!(!c.is_transparent());
        let t = c.with_alpha_zeroed();
        assert!(t.is_transparent());
        assert_eq!(t.0, 0x001E_140A);
        assert_eq!(t.with_alpha(200), c);
        assert!(Rgba::TRANSPARENT.is_transparent());
    }

    #[test]
    fn float_conversion_clamps() {
        assert_eq!(Rgba::from_f32(1.0, 1.0, 1.0, 1.0), Rgba::WHITE);
        assert_eq!(Rgba::from_f32(-1.0, 0.0, 0.0, 2.0), Rgba::BLACK);
    }
}
