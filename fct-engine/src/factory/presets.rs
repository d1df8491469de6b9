//! # Presets 模块
//!
//! 配置中可用的命名枚举及其数值映射：
//!
//! - **ScreenPosition**：九宫格站位（归一化坐标，按 [`SurfaceLayout`] 换算为像素）
//! - **Direction**：八个方向的单位向量（y 轴向下，`Up` 为 `(0, -1)`）
//! - **JiggleIntensity**：抖动强度 → 每次迭代的毫秒数
//!
//! 名称匹配不区分大小写，并忽略 `-`、`_` 与空格。

use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_1_SQRT_2;
use std::fmt;

use crate::geometry::Point2D;
use crate::names::normalize;

/// 覆盖层尺寸
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceLayout {
    /// 宽度（像素）
    pub width: f32,
    /// 高度（像素）
    pub height: f32,
    /// 边缘站位距屏幕边界的比例
    pub margin: f32,
}

impl Default for SurfaceLayout {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
            margin: 0.15,
        }
    }
}

impl SurfaceLayout {
    /// 归一化坐标 → 像素坐标
    pub fn to_pixels(&self, normalized: Point2D) -> Point2D {
        Point2D::new(normalized.x * self.width, normalized.y * self.height)
    }
}

/// 九宫格站位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenPosition {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    #[default]
    Center,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl ScreenPosition {
    pub const ALL: [ScreenPosition; 9] = [
        ScreenPosition::TopLeft,
        ScreenPosition::TopCenter,
        ScreenPosition::TopRight,
        ScreenPosition::MiddleLeft,
        ScreenPosition::Center,
        ScreenPosition::MiddleRight,
        ScreenPosition::BottomLeft,
        ScreenPosition::BottomCenter,
        ScreenPosition::BottomRight,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScreenPosition::TopLeft => "Top-Left",
            ScreenPosition::TopCenter => "Top-Center",
            ScreenPosition::TopRight => "Top-Right",
            ScreenPosition::MiddleLeft => "Middle-Left",
            ScreenPosition::Center => "Center",
            ScreenPosition::MiddleRight => "Middle-Right",
            ScreenPosition::BottomLeft => "Bottom-Left",
            ScreenPosition::BottomCenter => "Bottom-Center",
            ScreenPosition::BottomRight => "Bottom-Right",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let position = match normalize(name).as_str() {
            "topleft" => ScreenPosition::TopLeft,
            "topcenter" | "top" => ScreenPosition::TopCenter,
            "topright" => ScreenPosition::TopRight,
            "middleleft" | "centerleft" | "left" => ScreenPosition::MiddleLeft,
            "center" | "middle" | "middlecenter" => ScreenPosition::Center,
            "middleright" | "centerright" | "right" => ScreenPosition::MiddleRight,
            "bottomleft" => ScreenPosition::BottomLeft,
            "bottomcenter" | "bottom" => ScreenPosition::BottomCenter,
            "bottomright" => ScreenPosition::BottomRight,
            _ => return None,
        };
        Some(position)
    }

    /// 归一化坐标（0.0 - 1.0）
    pub fn anchor(&self, margin: f32) -> Point2D {
        let near = margin;
        let far = 1.0 - margin;
        let (x, y) = match self {
            ScreenPosition::TopLeft => (near, near),
            ScreenPosition::TopCenter => (0.5, near),
            ScreenPosition::TopRight => (far, near),
            ScreenPosition::MiddleLeft => (near, 0.5),
            ScreenPosition::Center => (0.5, 0.5),
            ScreenPosition::MiddleRight => (far, 0.5),
            ScreenPosition::BottomLeft => (near, far),
            ScreenPosition::BottomCenter => (0.5, far),
            ScreenPosition::BottomRight => (far, far),
        };
        Point2D::new(x, y)
    }

    /// 像素坐标
    pub fn to_point(&self, layout: &SurfaceLayout) -> Point2D {
        layout.to_pixels(self.anchor(layout.margin))
    }
}

impl fmt::Display for ScreenPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 移动方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub fn name(&self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
            Direction::UpLeft => "Up-Left",
            Direction::UpRight => "Up-Right",
            Direction::DownLeft => "Down-Left",
            Direction::DownRight => "Down-Right",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let direction = match normalize(name).as_str() {
            "up" | "north" => Direction::Up,
            "down" | "south" => Direction::Down,
            "left" | "west" => Direction::Left,
            "right" | "east" => Direction::Right,
            "upleft" | "leftup" | "northwest" => Direction::UpLeft,
            "upright" | "rightup" | "northeast" => Direction::UpRight,
            "downleft" | "leftdown" | "southwest" => Direction::DownLeft,
            "downright" | "rightdown" | "southeast" => Direction::DownRight,
            _ => return None,
        };
        Some(direction)
    }

    /// 单位向量（屏幕坐标，y 轴向下）
    pub fn unit(&self) -> Point2D {
        let d = FRAC_1_SQRT_2;
        match self {
            Direction::Up => Point2D::new(0.0, -1.0),
            Direction::Down => Point2D::new(0.0, 1.0),
            Direction::Left => Point2D::new(-1.0, 0.0),
            Direction::Right => Point2D::new(1.0, 0.0),
            Direction::UpLeft => Point2D::new(-d, -d),
            Direction::UpRight => Point2D::new(d, -d),
            Direction::DownLeft => Point2D::new(-d, d),
            Direction::DownRight => Point2D::new(d, d),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 抖动强度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JiggleIntensity {
    Low,
    #[default]
    Medium,
    High,
}

impl JiggleIntensity {
    pub fn name(&self) -> &'static str {
        match self {
            JiggleIntensity::Low => "Low",
            JiggleIntensity::Medium => "Medium",
            JiggleIntensity::High => "High",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match normalize(name).as_str() {
            "low" => Some(JiggleIntensity::Low),
            "medium" | "mid" => Some(JiggleIntensity::Medium),
            "high" => Some(JiggleIntensity::High),
            _ => None,
        }
    }

    /// 每次迭代的时长（毫秒）
    pub fn period_ms(&self) -> f32 {
        match self {
            JiggleIntensity::Low => 100.0,
            JiggleIntensity::Medium => 50.0,
            JiggleIntensity::High => 25.0,
        }
    }
}

impl fmt::Display for JiggleIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
