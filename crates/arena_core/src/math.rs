//! Fixed-point math utilities for deterministic generation.
//!
//! World positions, obstacle heights and color gradients are all computed
//! in fixed-point so a seed produces bit-identical maps on every platform.
//! Configuration is authored in `f32` and converted once at generation
//! start.

use fixed::types::I32F32;
use serde::{Deserialize, Serialize};

/// Fixed-point number type for all world-space math.
///
/// Uses 32 bits for integer part and 32 bits for fractional part.
pub type Fixed = I32F32;

/// Convert an authored `f32` into [`Fixed`].
///
/// Returns `None` for NaN, infinities and values outside the fixed range.
#[must_use]
pub fn fixed_from_f32(value: f32) -> Option<Fixed> {
    Fixed::checked_from_num(value)
}

/// Linear interpolation between two fixed values.
#[must_use]
pub fn lerp(min: Fixed, max: Fixed, t: Fixed) -> Fixed {
    min + (max - min) * t
}

/// Fixed-point 3D world position. `y` is the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vec3Fixed {
    /// X coordinate (grid columns).
    #[serde(with = "fixed_serde")]
    pub x: Fixed,
    /// Y coordinate (height above the floor).
    #[serde(with = "fixed_serde")]
    pub y: Fixed,
    /// Z coordinate (grid rows).
    #[serde(with = "fixed_serde")]
    pub z: Fixed,
}

/// Serde support for fixed-point numbers.
///
/// Serializes fixed-point numbers as their raw bit representation (i64)
/// to preserve exact precision across serialization boundaries.
pub mod fixed_serde {
    use super::Fixed;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a fixed-point number as its raw bit representation.
    pub fn serialize<S>(value: &Fixed, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.to_bits().serialize(serializer)
    }

    /// Deserialize a fixed-point number from its raw bit representation.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Fixed, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = i64::deserialize(deserializer)?;
        Ok(Fixed::from_bits(bits))
    }
}

impl Vec3Fixed {
    /// Create a new fixed-point vector.
    #[must_use]
    pub const fn new(x: Fixed, y: Fixed, z: Fixed) -> Self {
        Self { x, y, z }
    }

    /// Zero vector.
    pub const ZERO: Self = Self {
        x: Fixed::ZERO,
        y: Fixed::ZERO,
        z: Fixed::ZERO,
    };

    /// Point on the floor plane (`y = 0`).
    #[must_use]
    pub const fn on_floor(x: Fixed, z: Fixed) -> Self {
        Self { x, y: Fixed::ZERO, z }
    }

    /// Same point raised by `dy` along the vertical axis.
    #[must_use]
    pub fn raised(self, dy: Fixed) -> Self {
        Self {
            y: self.y + dy,
            ..self
        }
    }
}

/// RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Create a color from channel values.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Interpolate from `self` towards `other`; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: Fixed) -> Self {
        let t = t.clamp(Fixed::ZERO, Fixed::ONE);
        let channel = |a: u8, b: u8| -> u8 {
            let value = lerp(Fixed::from_num(a), Fixed::from_num(b), t).round();
            value.clamp(Fixed::ZERO, Fixed::from_num(u8::MAX)).to_num::<u8>()
        };
        Self {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }
}
