//! Spatial types

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A column-major 4x4 matrix (`m[col][row]`)
pub type Mat4 = [[f32; 4]; 4];

pub const MAT4_IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two column-major 4x4 matrices (`a * b`)
pub fn mat4_mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut out = [[0.0f32; 4]; 4];
    for col in 0..4 {
        for row in 0..4 {
            out[col][row] = (0..4).map(|k| a[k][row] * b[col][k]).sum();
        }
    }
    out
}

/// A 2D vector, used for side-scroller velocities (x = horizontal, y = vertical)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A 3D vector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
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
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn from_array(arr: [f32; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Component-wise linear interpolation, `t` is not clamped
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

/// Object-level transform: position, rotation (Euler degrees), and scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Rotation in degrees (Euler angles: pitch, yaw, roll)
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Interpolate position, rotation and scale independently
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(&other.position, t),
            rotation: self.rotation.lerp(&other.rotation, t),
            scale: self.scale.lerp(&other.scale, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let v1 = Vec3::new(1.0, 2.0, 3.0);
        let v2 = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(v1 + v2, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(v2 - v1, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(v1 * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(v1.lerp(&v2, 0.5), Vec3::new(2.5, 3.5, 4.5));
    }

    #[test]
    fn transform_lerp_interpolates_each_triple() {
        let a = Transform::IDENTITY;
        let b = Transform::from_position(Vec3::new(10.0, 0.0, 0.0))
            .with_rotation(Vec3::new(0.0, 90.0, 0.0))
            .with_scale(Vec3::new(3.0, 3.0, 3.0));
        let mid = a.lerp(&b, 0.5);
        assert_eq!(mid.position, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(mid.rotation, Vec3::new(0.0, 45.0, 0.0));
        assert_eq!(mid.scale, Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn mat4_identity_is_neutral() {
        let mut m = MAT4_IDENTITY;
        m[3] = [1.0, 2.0, 3.0, 1.0];
        assert_eq!(mat4_mul(&MAT4_IDENTITY, &m), m);
        assert_eq!(mat4_mul(&m, &MAT4_IDENTITY), m);
    }

    #[test]
    fn mat4_translations_accumulate() {
        let mut a = MAT4_IDENTITY;
        a[3] = [1.0, 0.0, 0.0, 1.0];
        let mut b = MAT4_IDENTITY;
        b[3] = [0.0, 2.0, 0.0, 1.0];
        let c = mat4_mul(&a, &b);
        assert_eq!(c[3], [1.0, 2.0, 0.0, 1.0]);
    }
}
