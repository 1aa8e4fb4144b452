//! Module implementing the sub-pixel fixed-point number type.

use std::fmt;
use std::ops::{Div, Mul};

use rusttype::{self, point};


/// Number of fractional bits in a `Fixed` value.
const FRACTION_BITS: u32 = 6;
/// Raw value corresponding to a single pixel.
const ONE: i32 = 1 << FRACTION_BITS;


macro_attr! {
    /// Signed 26.6 fixed-point number, used for sub-pixel text positioning.
    ///
    /// The smallest representable step is 1/64 of a pixel.
    #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
             NewtypeAdd!, NewtypeSub!, NewtypeNeg!)]
    pub struct Fixed(i32);
}

impl Fixed {
    /// Zero pixels.
    pub const ZERO: Fixed = Fixed(0);

    /// Create the value from its raw 26.6 representation.
    #[inline]
    pub fn from_bits(bits: i32) -> Self {
        Fixed(bits)
    }

    /// Create the value for a whole number of pixels.
    #[inline]
    pub fn from_int(px: i32) -> Self {
        Fixed(px << FRACTION_BITS)
    }

    /// Create the value for a fractional number of pixels,
    /// rounding to the nearest 1/64.
    #[inline]
    pub fn from_f32(px: f32) -> Self {
        Fixed((px * ONE as f32).round() as i32)
    }

    /// Raw 26.6 representation.
    #[inline]
    pub fn to_bits(self) -> i32 {
        self.0
    }

    #[inline]
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / ONE as f32
    }

    /// Whole pixels, rounded towards negative infinity.
    #[inline]
    pub fn floor(self) -> i32 {
        self.0 >> FRACTION_BITS
    }

    /// Whole pixels, rounded to the nearest integer.
    #[inline]
    pub fn round(self) -> i32 {
        (self.0 + ONE / 2) >> FRACTION_BITS
    }
}

impl Div<i32> for Fixed {
    type Output = Fixed;
    fn div(self, rhs: i32) -> Fixed {
        Fixed(self.0 / rhs)
    }
}

/// Multiplication of two fixed-point numbers, rounding to the nearest 1/64.
impl Mul for Fixed {
    type Output = Fixed;
    fn mul(self, rhs: Fixed) -> Fixed {
        let product = self.0 as i64 * rhs.0 as i64;
        Fixed(((product + (ONE as i64 / 2)) >> FRACTION_BITS) as i32)
    }
}

impl From<i32> for Fixed {
    fn from(input: i32) -> Self {
        Fixed::from_int(input)
    }
}

impl fmt::Debug for Fixed {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self)
    }
}

impl fmt::Display for Fixed {
    /// Formats the value as `<whole>:<64ths>`.
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(fmt, "{}{}:{:02}", sign, abs >> FRACTION_BITS, abs & (ONE - 1))
    }
}


/// A point in fixed-point pixel coordinates.
///
/// X grows to the right, Y grows downward.
pub type Point = rusttype::Point<Fixed>;

/// Axis-aligned bounding box in fixed-point pixel coordinates.
pub type Bounds = rusttype::Rect<Fixed>;

/// Convenience function for creating a `Point` from whole pixels.
#[inline]
pub fn pixel_point(x: i32, y: i32) -> Point {
    point(Fixed::from_int(x), Fixed::from_int(y))
}

/// Bounding box of nothing at all, located at the origin.
#[inline]
pub fn empty_bounds() -> Bounds {
    Bounds{min: pixel_point(0, 0), max: pixel_point(0, 0)}
}

/// Convert a fixed-point `Point` into the floating-point one used by rusttype.
#[inline]
pub fn to_rusttype_point(p: Point) -> rusttype::Point<f32> {
    point(p.x.to_f32(), p.y.to_f32())
}


#[cfg(test)]
mod tests {
    use spectral::prelude::*;
    use super::{Fixed, pixel_point};

    #[test]
    fn whole_pixels() {
        assert_eq!(Fixed::from_bits(64), Fixed::from_int(1));
        assert_eq!(5, Fixed::from_int(5).floor());
        assert_eq!(-3, Fixed::from_int(-3).floor());
        assert_eq!(7.0, Fixed::from_int(7).to_f32());
    }

    #[test]
    fn fractions() {
        assert_eq!(Fixed::from_bits(32), Fixed::from_f32(0.5));
        assert_eq!(Fixed::from_bits(-96), Fixed::from_f32(-1.5));
        assert_eq!(2, Fixed::from_f32(1.5).round());
        assert_eq!(1, Fixed::from_f32(1.49).round());
        assert_eq!(1, Fixed::from_f32(1.99).floor());
    }

    #[test]
    fn arithmetic() {
        let a = Fixed::from_int(10);
        let b = Fixed::from_f32(2.5);
        assert_eq!(Fixed::from_f32(12.5), a + b);
        assert_eq!(Fixed::from_f32(7.5), a - b);
        assert_eq!(Fixed::from_f32(-2.5), -b);
        assert_eq!(Fixed::from_int(5), a / 2);
        assert_eq!(Fixed::from_int(25), a * b);
        assert_eq!(Fixed::from_f32(1.25), b * Fixed::from_f32(0.5));
    }

    #[test]
    fn halving_truncates_towards_zero() {
        assert_eq!(Fixed::from_bits(1), Fixed::from_bits(3) / 2);
        assert_eq!(Fixed::from_bits(-1), Fixed::from_bits(-3) / 2);
    }

    #[test]
    fn display() {
        assert_eq!("12:32", format!("{}", Fixed::from_f32(12.5)));
        assert_eq!("-0:16", format!("{}", Fixed::from_f32(-0.25)));
        assert_eq!("3:00", format!("{:?}", Fixed::from_int(3)));
    }

    #[test]
    fn points() {
        let p = pixel_point(3, 4);
        assert_that!(p.x).is_equal_to(Fixed::from_int(3));
        assert_that!(p.y).is_equal_to(Fixed::from_int(4));
    }
}
