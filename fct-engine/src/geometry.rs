//! # Geometry 模块
//!
//! 二维点与单帧视觉状态。

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// 二维点（屏幕像素坐标，y 轴向下）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    /// 创建新的点
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// 原点
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// 线性插值
    ///
    /// 使用 `a * (1 - t) + b * t` 形式，保证 `t == 0` 精确返回 `self`、
    /// `t == 1` 精确返回 `other`。
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: lerp_scalar(self.x, other.x, t),
            y: lerp_scalar(self.y, other.y, t),
        }
    }

    /// 两点中点
    pub fn midpoint(self, other: Self) -> Self {
        self.lerp(other, 0.5)
    }

    /// 向量长度
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// 到另一点的距离
    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    /// 在容差内是否相等
    pub fn approx_eq(self, other: Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

/// 标量插值（端点精确）
pub fn lerp_scalar(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

impl Add for Point2D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point2D {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f32, f32)> for Point2D {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<Point2D> for (f32, f32) {
    fn from(p: Point2D) -> Self {
        (p.x, p.y)
    }
}

/// 单帧视觉状态
///
/// 动画每次更新产出一帧，推送到绑定的视觉项上。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    /// 位置（轨迹输出 + 抖动偏移）
    pub position: Point2D,
    /// 透明度 (0.0 - 1.0)
    pub opacity: f32,
    /// 缩放因子
    pub scale: f32,
}

impl Frame {
    /// 在指定位置、完全不透明、无缩放的帧
    pub fn at(position: Point2D) -> Self {
        Self {
            position,
            opacity: 1.0,
            scale: 1.0,
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::at(Point2D::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints_exact() {
        let a = Point2D::new(0.1, 0.7);
        let b = Point2D::new(0.3, -123.456);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn test_lerp_mid() {
        let v1 = Point2D::new(0.0, 0.0);
        let v2 = Point2D::new(10.0, 20.0);
        let mid = v1.lerp(v2, 0.5);
        assert_eq!(mid.x, 5.0);
        assert_eq!(mid.y, 10.0);
    }

    #[test]
    fn test_ops_and_length() {
        let p = Point2D::new(3.0, 4.0);
        assert_eq!(p.length(), 5.0);
        assert_eq!(p + Point2D::new(1.0, 1.0), Point2D::new(4.0, 5.0));
        assert_eq!(p - Point2D::new(3.0, 4.0), Point2D::zero());
        assert_eq!(p * 2.0, Point2D::new(6.0, 8.0));
        assert_eq!(Point2D::zero().distance(p), 5.0);
    }

    #[test]
    fn test_frame_default() {
        let frame = Frame::default();
        assert_eq!(frame.opacity, 1.0);
        assert_eq!(frame.scale, 1.0);
        assert_eq!(frame.position, Point2D::zero());
    }
}
