use std::{
    cmp::PartialEq,
    convert::From,
    f32,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
};

/// A 2D point or offset in scene units (points, not pixels).
#[repr(C)]
#[derive(Copy, Clone, Default, Debug)]
pub struct Vector2(pub [f32; 2]);

unsafe impl bytemuck::Zeroable for Vector2 {}

unsafe impl bytemuck::Pod for Vector2 {}

impl Vector2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Vector2 {
        Vector2([x, y])
    }

    #[inline]
    pub const fn zero() -> Vector2 {
        Vector2([0.0, 0.0])
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.0[0]
    }

    #[inline]
    pub fn set_x(&mut self, x: f32) {
        self.0[0] = x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.0[1]
    }

    #[inline]
    pub fn set_y(&mut self, y: f32) {
        self.0[1] = y
    }
}

impl PartialEq for Vector2 {
    #[inline]
    fn eq(&self, rhs: &Vector2) -> bool {
        (self.0[0] - rhs.0[0]).abs() <= f32::EPSILON && (self.0[1] - rhs.0[1]).abs() <= f32::EPSILON
    }
}

impl Add for Vector2 {
    type Output = Vector2;
    #[inline]
    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2([self.0[0] + rhs.0[0], self.0[1] + rhs.0[1]])
    }
}

impl AddAssign for Vector2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vector2) {
        self.0[0] += rhs.0[0];
        self.0[1] += rhs.0[1];
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    #[inline]
    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2([self.0[0] - rhs.0[0], self.0[1] - rhs.0[1]])
    }
}

impl SubAssign for Vector2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vector2) {
        self.0[0] -= rhs.0[0];
        self.0[1] -= rhs.0[1];
    }
}

impl Mul<f32> for Vector2 {
    type Output = Vector2;
    #[inline]
    fn mul(self, rhs: f32) -> Vector2 {
        Vector2([self.0[0] * rhs, self.0[1] * rhs])
    }
}

impl Neg for Vector2 {
    type Output = Vector2;
    #[inline]
    fn neg(self) -> Vector2 {
        Vector2([-self.0[0], -self.0[1]])
    }
}

impl From<(f32, f32)> for Vector2 {
    #[inline]
    fn from(value: (f32, f32)) -> Vector2 {
        Vector2([value.0, value.1])
    }
}

impl From<(i32, i32)> for Vector2 {
    #[inline]
    fn from(value: (i32, i32)) -> Vector2 {
        Vector2([value.0 as f32, value.1 as f32])
    }
}
