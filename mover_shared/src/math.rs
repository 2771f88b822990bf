//! Math types.
//!
//! This module intentionally stays small and deterministic.
//! It avoids SIMD/unsafe and focuses on stable semantics: the same inputs
//! always produce the same bits, which command replay depends on.
//!
//! Conventions: right-handed, Z up, X forward, angles in degrees.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Squared-length tolerance below which a vector cannot be normalized.
const SMALL_NUMBER: f32 = 1.0e-8;

/// 2D vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Clamps each component into `[min, max]`.
    pub fn clamp_axes(self, min: f32, max: f32) -> Self {
        Self::new(self.x.clamp(min, max), self.y.clamp(min, max))
    }
}

/// 3D vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const UP: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    pub fn len_sq(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.len_sq().sqrt()
    }

    /// Exact zero test, no tolerance.
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    pub fn distance(self, rhs: Self) -> f32 {
        (self - rhs).length()
    }

    /// Clamps each component into `[min, max]`.
    pub fn clamp_axes(self, min: f32, max: f32) -> Self {
        Self::new(
            self.x.clamp(min, max),
            self.y.clamp(min, max),
            self.z.clamp(min, max),
        )
    }

    /// Unit vector in the same direction, or zero if too short to normalize.
    pub fn safe_normal(self) -> Self {
        let sq = self.len_sq();
        if sq == 1.0 {
            self
        } else if sq < SMALL_NUMBER {
            Self::ZERO
        } else {
            self * (1.0 / sq.sqrt())
        }
    }

    /// Drops Z and normalizes in the XY plane, or zero if nothing is left.
    pub fn safe_normal_2d(self) -> Self {
        Self::new(self.x, self.y, 0.0).safe_normal()
    }

    /// Removes the component along `plane_normal` (expected to be unit length).
    pub fn plane_project(self, plane_normal: Self) -> Self {
        self - plane_normal * self.dot(plane_normal)
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Euler rotation in degrees.
///
/// Pitch rotates about Y (positive looks up), yaw about Z (positive turns
/// from +X toward +Y), roll about X.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotator {
    pub const ZERO: Self = Self {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Rotation that points +X along `dir`, with no roll.
    ///
    /// A zero vector yields [`Rotator::ZERO`].
    pub fn from_direction(dir: Vec3) -> Self {
        let yaw = dir.y.atan2(dir.x).to_degrees();
        let pitch = dir
            .z
            .atan2((dir.x * dir.x + dir.y * dir.y).sqrt())
            .to_degrees();
        Self::new(pitch, yaw, 0.0)
    }

    /// Wraps an angle into `(-180, 180]`.
    pub fn normalize_axis(angle: f32) -> f32 {
        let mut a = angle % 360.0;
        if a > 180.0 {
            a -= 360.0;
        } else if a <= -180.0 {
            a += 360.0;
        }
        a
    }

    /// Unit forward vector (+X rotated by this rotation).
    pub fn forward(self) -> Vec3 {
        self.axes()[0]
    }

    /// Rotates a local-space vector into the frame described by this rotation.
    pub fn rotate_vector(self, v: Vec3) -> Vec3 {
        let [x, y, z] = self.axes();
        x * v.x + y * v.y + z * v.z
    }

    /// Inverse of [`Rotator::rotate_vector`].
    pub fn unrotate_vector(self, v: Vec3) -> Vec3 {
        let [x, y, z] = self.axes();
        Vec3::new(x.dot(v), y.dot(v), z.dot(v))
    }

    /// Rotated X, Y and Z axes.
    fn axes(self) -> [Vec3; 3] {
        let (sp, cp) = self.pitch.to_radians().sin_cos();
        let (sy, cy) = self.yaw.to_radians().sin_cos();
        let (sr, cr) = self.roll.to_radians().sin_cos();

        [
            Vec3::new(cp * cy, cp * sy, sp),
            Vec3::new(sr * sp * cy - cr * sy, sr * sp * sy + cr * cy, -sr * cp),
            Vec3::new(-(cr * sp * cy + sr * sy), cy * sr - cr * sp * sy, cr * cp),
        ]
    }
}
