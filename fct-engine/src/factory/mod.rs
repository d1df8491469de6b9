//! # Factory 模块
//!
//! 把声明式的 [`SpawnConfig`] 解析为全数值化的 [`AnimationSpec`]，
//! 并构造对应的 [`Animation`]。
//!
//! ## 解析策略
//!
//! | 情况 | 处理 |
//! |------|------|
//! | 缺少 `type` / `duration` | `BuildError::MissingField` |
//! | 未知 `type` / `subtype` | `BuildError::UnknownType` / `UnknownSubtype` |
//! | 非正的 `duration` | `BuildError::InvalidDuration` |
//! | 未知的站位/方向/缓动/强度名称 | 降级为默认值并记录警告 |
//! | 越界的百分比 | 降级为默认值并记录警告 |
//!
//! ## 派生数值
//!
//! - 未给出 `ending_position` 时：终点 = 起点 + 方向 × 移动距离
//! - Parabola 顶点：起终点的 x 中点，沿子类型方向偏离 `arc_height`
//! - Swivel 转折点：`lerp(start, end, p1)` 沿 `swivel_direction` 偏移 `swivel_distance`
//! - 阶段时长：`duration × p`，`p` 限制在开区间 (0, 1)

mod config;
pub mod presets;

pub use config::SpawnConfig;
pub use presets::{Direction, JiggleIntensity, ScreenPosition, SurfaceLayout};

use serde::{Deserialize, Serialize};

use crate::animation::{Animation, AnimationId};
use crate::easing::{self, EasingCurve};
use crate::error::{BuildError, BuildResult};
use crate::geometry::Point2D;
use crate::modifiers::{Fade, Jiggle, ScalePulse};
use crate::sound::SoundRef;
use crate::spec::{AnimationKind, AnimationSpec};
use crate::trajectory::Trajectory;

/// 工厂默认参数
///
/// 这些常量是缺省配置的**唯一来源**。
pub mod defaults {
    /// 单次抖动采样的最大位移（像素）
    pub const JIGGLE_AMOUNT: f32 = 4.0;
    /// 未指定终点时的移动距离（像素）
    pub const TRAVEL_DISTANCE: f32 = 200.0;
    /// Parabola 顶点高度（像素）
    pub const ARC_HEIGHT: f32 = 100.0;
    /// Swivel 转折点偏移（像素）
    pub const SWIVEL_DISTANCE: f32 = 50.0;
    /// 阶段比例
    pub const PHASE_PERCENTAGE: f32 = 0.5;
    /// 淡入占总时长的比例
    pub const FADE_IN_PERCENTAGE: f32 = 0.2;
    /// 淡出占总时长的比例
    pub const FADE_OUT_PERCENTAGE: f32 = 0.3;
    /// Pow 峰值缩放
    pub const SCALE_PERCENTAGE: f32 = 1.5;
}

/// 阶段比例之和的容差
const PHASE_SUM_EPSILON: f32 = 1e-3;

/// 可配置的工厂数值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactoryDefaults {
    #[serde(default = "default_jiggle_amount")]
    pub jiggle_amount: f32,
    #[serde(default = "default_travel_distance")]
    pub travel_distance: f32,
    #[serde(default = "default_arc_height")]
    pub arc_height: f32,
    #[serde(default = "default_swivel_distance")]
    pub swivel_distance: f32,
}

fn default_jiggle_amount() -> f32 {
    defaults::JIGGLE_AMOUNT
}

fn default_travel_distance() -> f32 {
    defaults::TRAVEL_DISTANCE
}

fn default_arc_height() -> f32 {
    defaults::ARC_HEIGHT
}

fn default_swivel_distance() -> f32 {
    defaults::SWIVEL_DISTANCE
}

impl Default for FactoryDefaults {
    fn default() -> Self {
        Self {
            jiggle_amount: defaults::JIGGLE_AMOUNT,
            travel_distance: defaults::TRAVEL_DISTANCE,
            arc_height: defaults::ARC_HEIGHT,
            swivel_distance: defaults::SWIVEL_DISTANCE,
        }
    }
}

/// Parabola 子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArcSide {
    Up,
    Down,
}

/// 动画工厂
#[derive(Debug, Clone, Default)]
pub struct AnimationFactory {
    layout: SurfaceLayout,
    defaults: FactoryDefaults,
}

impl AnimationFactory {
    pub fn new(layout: SurfaceLayout, defaults: FactoryDefaults) -> Self {
        Self { layout, defaults }
    }

    pub fn layout(&self) -> &SurfaceLayout {
        &self.layout
    }

    pub fn defaults(&self) -> &FactoryDefaults {
        &self.defaults
    }

    /// 构造动画实例
    pub fn build_animation(&self, id: AnimationId, config: &SpawnConfig) -> BuildResult<Animation> {
        let spec = self.build_spec(config)?;
        Ok(Animation::new(id, spec))
    }

    /// 解析配置为动画参数
    pub fn build_spec(&self, config: &SpawnConfig) -> BuildResult<AnimationSpec> {
        let type_name = config
            .kind
            .as_deref()
            .ok_or(BuildError::MissingField { field: "type" })?;
        let kind = AnimationKind::from_name(type_name).ok_or_else(|| BuildError::UnknownType {
            name: type_name.to_string(),
        })?;
        let arc_side = resolve_subtype(kind, config.subtype.as_deref())?;

        let seconds = config
            .duration
            .ok_or(BuildError::MissingField { field: "duration" })?;
        if !(seconds > 0.0) || !seconds.is_finite() {
            return Err(BuildError::InvalidDuration { seconds });
        }
        let duration = seconds * 1000.0;

        let start = self.position_or(config.starting_position.as_deref(), ScreenPosition::Center);
        let direction = direction_or(config.direction.as_deref(), default_direction(kind), "direction");
        let travel = config.travel_distance.unwrap_or(self.defaults.travel_distance);
        let derived_end = start + direction.unit() * travel;
        let end = match config.ending_position.as_deref() {
            Some(name) => match ScreenPosition::from_name(name) {
                Some(position) => position.to_point(&self.layout),
                None => {
                    tracing::warn!(field = "ending_position", name = %name, "未知站位，降级为按方向推导的终点");
                    derived_end
                }
            },
            None => derived_end,
        };
        let easing = easing_or(config.easing_style.as_deref(), EasingCurve::Linear);

        let mut spec = match kind {
            AnimationKind::Directional => AnimationSpec::directional(start, end, duration, easing),
            AnimationKind::Parabola => {
                let arc_height = config.arc_height.unwrap_or(self.defaults.arc_height);
                let vertex = parabola_vertex(start, end, arc_height, arc_side);
                AnimationSpec::parabola(start, vertex, end, duration, easing)
            }
            AnimationKind::Swivel => {
                let (p1, _) = phase_split(config);
                let (phase_1_duration, phase_2_duration) = split_duration(duration, p1);
                let swivel_direction =
                    direction_or(config.swivel_direction.as_deref(), Direction::Up, "swivel_direction");
                let swivel_distance = config.swivel_distance.unwrap_or(self.defaults.swivel_distance);
                let swivel = start.lerp(end, p1) + swivel_direction.unit() * swivel_distance;

                AnimationSpec::new(
                    kind,
                    duration,
                    Trajectory::Swivel {
                        start,
                        swivel,
                        end,
                        phase_1_duration,
                        phase_2_duration,
                        phase_1_easing: easing_or(config.phase_1_easing_style.as_deref(), EasingCurve::Linear),
                        phase_2_easing: easing_or(config.phase_2_easing_style.as_deref(), EasingCurve::Linear),
                    },
                )
            }
            AnimationKind::Stationary => AnimationSpec::stationary(start, duration),
            AnimationKind::Pow => {
                let (p1, _) = phase_split(config);
                let (phase_1_duration, phase_2_duration) = split_duration(duration, p1);
                let peak = match config.scale_percentage {
                    Some(peak) if peak > 0.0 && peak.is_finite() => peak,
                    Some(peak) => {
                        tracing::warn!(field = "scale_percentage", value = peak, "缩放比例无效，降级为默认值");
                        defaults::SCALE_PERCENTAGE
                    }
                    None => defaults::SCALE_PERCENTAGE,
                };
                AnimationSpec::pow(
                    start,
                    duration,
                    ScalePulse {
                        peak,
                        phase_1_duration,
                        phase_2_duration,
                        phase_1_easing: easing_or(config.phase_1_easing_style.as_deref(), EasingCurve::Linear),
                        phase_2_easing: easing_or(config.phase_2_easing_style.as_deref(), EasingCurve::Linear),
                    },
                )
            }
        };

        // ========== 修饰器 ==========

        if config.fade_in.unwrap_or(false) {
            let fraction = fade_fraction(config.fade_in_percentage, defaults::FADE_IN_PERCENTAGE, "fade_in_percentage");
            spec.modifiers.fade_in = Some(Fade::fade_in(
                duration * fraction,
                easing_or(config.fade_in_easing_style.as_deref(), EasingCurve::Linear),
            ));
        }

        if config.fade_out.unwrap_or(false) {
            let fraction =
                fade_fraction(config.fade_out_percentage, defaults::FADE_OUT_PERCENTAGE, "fade_out_percentage");
            let fade = duration * fraction;
            spec.modifiers.fade_out = Some(Fade::fade_out(
                duration - fade,
                fade,
                easing_or(config.fade_out_easing_style.as_deref(), EasingCurve::Linear),
            ));
        }

        if config.jiggle.unwrap_or(false) {
            let intensity = match config.jiggle_intensity.as_deref() {
                Some(name) => JiggleIntensity::from_name(name).unwrap_or_else(|| {
                    tracing::warn!(field = "jiggle_intensity", name = %name, "未知抖动强度，降级为 Medium");
                    JiggleIntensity::Medium
                }),
                None => JiggleIntensity::default(),
            };
            spec.modifiers.jiggle = Some(Jiggle::new(intensity.period_ms(), self.defaults.jiggle_amount));
        }

        spec.sound = config.sound.as_deref().and_then(SoundRef::from_config);

        spec.validate()?;

        tracing::debug!(
            kind = %spec.kind,
            duration_ms = spec.duration,
            start = ?spec.trajectory.start(),
            end = ?spec.trajectory.end(),
            "动画参数解析完成"
        );
        Ok(spec)
    }

    fn position_or(&self, name: Option<&str>, fallback: ScreenPosition) -> Point2D {
        let position = match name {
            Some(name) => ScreenPosition::from_name(name).unwrap_or_else(|| {
                tracing::warn!(field = "starting_position", name = %name, fallback = %fallback, "未知站位，降级为默认站位");
                fallback
            }),
            None => fallback,
        };
        position.to_point(&self.layout)
    }
}

/// 各类型未指定方向时的默认方向
fn default_direction(kind: AnimationKind) -> Direction {
    match kind {
        AnimationKind::Parabola | AnimationKind::Swivel => Direction::Right,
        _ => Direction::Up,
    }
}

fn resolve_subtype(kind: AnimationKind, subtype: Option<&str>) -> BuildResult<ArcSide> {
    let subtype = subtype.map(str::trim).filter(|s| !s.is_empty());
    match (kind, subtype) {
        (_, None) => Ok(ArcSide::Up),
        (AnimationKind::Parabola, Some(name)) if name.eq_ignore_ascii_case("up") => Ok(ArcSide::Up),
        (AnimationKind::Parabola, Some(name)) if name.eq_ignore_ascii_case("down") => Ok(ArcSide::Down),
        (_, Some(name)) => Err(BuildError::UnknownSubtype {
            kind: kind.name().to_string(),
            subtype: name.to_string(),
        }),
    }
}

fn direction_or(name: Option<&str>, fallback: Direction, field: &'static str) -> Direction {
    match name {
        Some(name) => Direction::from_name(name).unwrap_or_else(|| {
            tracing::warn!(field, name = %name, fallback = %fallback, "未知方向，降级为默认方向");
            fallback
        }),
        None => fallback,
    }
}

/// 未指定时用 `fallback`，未知名称由缓动目录降级为 Linear
fn easing_or(name: Option<&str>, fallback: EasingCurve) -> EasingCurve {
    name.map_or(fallback, easing::resolve)
}

/// 顶点：x 取中点，y 在较高（或较低）端点之外偏移 `arc_height`
fn parabola_vertex(start: Point2D, end: Point2D, arc_height: f32, side: ArcSide) -> Point2D {
    let x = start.midpoint(end).x;
    let y = match side {
        ArcSide::Up => start.y.min(end.y) - arc_height,
        ArcSide::Down => start.y.max(end.y) + arc_height,
    };
    Point2D::new(x, y)
}

/// 解析两阶段比例
///
/// 每个比例都必须在 (0, 1) 内，越界值视为缺省。`p1` 优先；只给出 `p2` 时
/// `p1 = 1 - p2`；都缺省时各占一半。两者之和不为 1 时以 `p1` 为准。
fn phase_split(config: &SpawnConfig) -> (f32, f32) {
    let p1 = phase_fraction(config.phase_1_percentage, "phase_1_percentage");
    let p2 = phase_fraction(config.phase_2_percentage, "phase_2_percentage");

    let p1 = match (p1, p2) {
        (Some(p1), Some(p2)) => {
            if (p1 + p2 - 1.0).abs() > PHASE_SUM_EPSILON {
                tracing::warn!(phase_1 = p1, phase_2 = p2, "阶段比例之和不为 1，第二阶段按 1 - phase_1 计算");
            }
            p1
        }
        (Some(p1), None) => p1,
        (None, Some(p2)) => 1.0 - p2,
        (None, None) => defaults::PHASE_PERCENTAGE,
    };
    (p1, 1.0 - p1)
}

fn phase_fraction(value: Option<f32>, field: &'static str) -> Option<f32> {
    match value {
        Some(p) if p > 0.0 && p < 1.0 => Some(p),
        Some(p) => {
            tracing::warn!(field, value = p, "阶段比例越界，忽略");
            None
        }
        None => None,
    }
}

/// 按比例切分总时长，保证两段之和精确等于总时长
fn split_duration(duration: f32, p1: f32) -> (f32, f32) {
    let first = duration * p1;
    (first, duration - first)
}

fn fade_fraction(value: Option<f32>, fallback: f32, field: &'static str) -> f32 {
    match value {
        Some(v) if v > 0.0 && v <= 1.0 => v,
        Some(v) => {
            tracing::warn!(field, value = v, fallback, "渐变比例越界，降级为默认值");
            fallback
        }
        None => fallback,
    }
}
