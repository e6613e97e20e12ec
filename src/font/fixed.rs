//! 26.6 fixed point numbers used by glyph metrics.
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Signed 26.6 fixed point value: 26 integer bits and 6 fractional bits.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(pub i32);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(64);

    /// Integer value as fixed point.
    pub const fn from_int(i: i32) -> Self {
        Fixed(i << 6)
    }

    /// Nearest fixed point value.
    pub fn from_f32(f: f32) -> Self {
        Fixed((f * 64.0).round() as i32)
    }

    /// Greatest integer less than or equal to the value.
    pub const fn floor(self) -> i32 {
        self.0 >> 6
    }

    /// Least integer greater than or equal to the value.
    pub const fn ceil(self) -> i32 {
        (self.0 + 63) >> 6
    }

    pub const fn round(self) -> i32 {
        (self.0 + 32) >> 6
    }

    /// Conversion used for all layout values: the floor as float.
    pub fn to_f32_floor(self) -> f32 {
        self.floor() as f32
    }

    pub fn to_f32(self) -> f32 {
        self.0 as f32 / 64.0
    }
}

impl Add for Fixed {
    type Output = Fixed;
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 + rhs.0)
    }
}

impl Sub for Fixed {
    type Output = Fixed;
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 - rhs.0)
    }
}

impl Neg for Fixed {
    type Output = Fixed;
    fn neg(self) -> Fixed {
        Fixed(-self.0)
    }
}

impl AddAssign for Fixed {
    fn add_assign(&mut self, rhs: Fixed) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Fixed {
    fn sub_assign(&mut self, rhs: Fixed) {
        self.0 -= rhs.0;
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FixedPoint {
    pub x: Fixed,
    pub y: Fixed,
}

impl FixedPoint {
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    pub const fn from_int(x: i32, y: i32) -> Self {
        Self {
            x: Fixed::from_int(x),
            y: Fixed::from_int(y),
        }
    }
}

impl Add for FixedPoint {
    type Output = FixedPoint;
    fn add(self, rhs: FixedPoint) -> FixedPoint {
        FixedPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Rectangle in 26.6 coordinates, y pointing down. Empty when `min` is not
/// strictly less than `max` on both axes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FixedRect {
    pub min: FixedPoint,
    pub max: FixedPoint,
}

impl FixedRect {
    pub const fn new(min: FixedPoint, max: FixedPoint) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    pub fn width(&self) -> Fixed {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> Fixed {
        self.max.y - self.min.y
    }

    pub fn translate(&self, p: FixedPoint) -> Self {
        Self::new(self.min + p, self.max + p)
    }

    /// Smallest rectangle holding both. Empty rectangles are ignored.
    pub fn union(&self, other: &FixedRect) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self::new(
            FixedPoint::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            FixedPoint::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        )
    }

    /// Expands to whole pixels: floor of `min`, ceil of `max`.
    pub fn pixel_aligned(&self) -> Self {
        Self::new(
            FixedPoint::from_int(self.min.x.floor(), self.min.y.floor()),
            FixedPoint::from_int(self.max.x.ceil(), self.max.y.ceil()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_directions() {
        let v = Fixed(64 * 3 + 10);
        assert_eq!(v.floor(), 3);
        assert_eq!(v.ceil(), 4);
        assert_eq!(Fixed::from_int(3).ceil(), 3);
        let n = Fixed(-(64 * 3 + 10));
        assert_eq!(n.floor(), -4);
        assert_eq!(n.ceil(), -3);
        assert_eq!(n.to_f32_floor(), -4.0);
        assert_eq!(Fixed::from_f32(1.5), Fixed(96));
        assert_eq!(Fixed(96).round(), 2);
    }

    #[test]
    fn union_ignores_empty() {
        let a = FixedRect::new(FixedPoint::from_int(0, 0), FixedPoint::from_int(4, 4));
        let b = FixedRect::new(FixedPoint::from_int(2, -3), FixedPoint::from_int(9, 1));
        let u = a.union(&b);
        assert_eq!(u.min, FixedPoint::from_int(0, -3));
        assert_eq!(u.max, FixedPoint::from_int(9, 4));
        assert_eq!(FixedRect::default().union(&b), b);
        assert_eq!(b.union(&FixedRect::default()), b);
    }

    #[test]
    fn pixel_alignment() {
        let r = FixedRect::new(
            FixedPoint::new(Fixed(-10), Fixed(70)),
            FixedPoint::new(Fixed(130), Fixed(128)),
        );
        let a = r.pixel_aligned();
        assert_eq!(a.min, FixedPoint::from_int(-1, 1));
        assert_eq!(a.max, FixedPoint::from_int(3, 2));
    }
}
