//! # Trajectory 模块
//!
//! 轨迹描述：把已过时间映射为二维位置的纯函数。
//!
//! 轨迹是一个封闭的带标签联合，每个变体携带自己的控制点与缓动，
//! 通过唯一的 [`Trajectory::position_at`] 分发：
//!
//! | 变体 | 关键帧 | 说明 |
//! |------|--------|------|
//! | `Directional` | start@0, end@1 | 单段缓动插值 |
//! | `Parabola` | start@0, vertex@0.5, end@1 | 两半段各自按曲线插值，中点精确落在顶点 |
//! | `Swivel` | start→swivel, swivel→end | 两段独立计时、独立缓动 |
//! | `Stationary` | start | 恒定位置，仅与修饰器组合使用 |

use crate::easing::EasingCurve;
use crate::geometry::Point2D;

/// Swivel 轨迹的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwivelPhase {
    /// start → swivel
    First,
    /// swivel → end
    Second,
}

/// 轨迹描述
#[derive(Debug, Clone, PartialEq)]
pub enum Trajectory {
    /// 直线移动
    Directional {
        start: Point2D,
        end: Point2D,
        easing: EasingCurve,
    },
    /// 经过顶点的两段移动
    Parabola {
        start: Point2D,
        vertex: Point2D,
        end: Point2D,
        easing: EasingCurve,
    },
    /// 两阶段折线移动
    Swivel {
        start: Point2D,
        swivel: Point2D,
        end: Point2D,
        /// 第一阶段时长（毫秒）
        phase_1_duration: f32,
        /// 第二阶段时长（毫秒）
        phase_2_duration: f32,
        phase_1_easing: EasingCurve,
        phase_2_easing: EasingCurve,
    },
    /// 原地不动
    Stationary { position: Point2D },
}

impl Trajectory {
    /// 计算 `elapsed` 毫秒时的位置
    ///
    /// `elapsed` 会被限制在 `[0, duration]` 内。
    pub fn position_at(&self, elapsed: f32, duration: f32) -> Point2D {
        let elapsed = elapsed.clamp(0.0, duration.max(0.0));

        match self {
            Trajectory::Directional { start, end, easing } => {
                if duration <= 0.0 {
                    return *end;
                }
                start.lerp(*end, easing.apply(elapsed / duration))
            }
            Trajectory::Parabola {
                start,
                vertex,
                end,
                easing,
            } => {
                if duration <= 0.0 {
                    return *end;
                }
                let half = duration / 2.0;
                if elapsed < half {
                    start.lerp(*vertex, easing.apply(elapsed / half))
                } else {
                    let rest = duration - half;
                    vertex.lerp(*end, easing.apply((elapsed - half) / rest))
                }
            }
            Trajectory::Swivel {
                phase_1_duration, ..
            } => {
                let sampled = if elapsed < *phase_1_duration {
                    self.swivel_phase_position(SwivelPhase::First, elapsed)
                } else {
                    self.swivel_phase_position(SwivelPhase::Second, elapsed - phase_1_duration)
                };
                sampled.unwrap_or_else(|| self.start())
            }
            Trajectory::Stationary { position } => *position,
        }
    }

    /// 计算 Swivel 某一阶段内的位置
    ///
    /// `phase_elapsed` 是相对该阶段起点的时间。非 Swivel 轨迹返回 `None`。
    pub fn swivel_phase_position(&self, phase: SwivelPhase, phase_elapsed: f32) -> Option<Point2D> {
        let Trajectory::Swivel {
            start,
            swivel,
            end,
            phase_1_duration,
            phase_2_duration,
            phase_1_easing,
            phase_2_easing,
        } = self
        else {
            return None;
        };

        let position = match phase {
            SwivelPhase::First => {
                segment(*start, *swivel, phase_elapsed, *phase_1_duration, *phase_1_easing)
            }
            SwivelPhase::Second => {
                segment(*swivel, *end, phase_elapsed, *phase_2_duration, *phase_2_easing)
            }
        };
        Some(position)
    }

    /// 起点
    pub fn start(&self) -> Point2D {
        match self {
            Trajectory::Directional { start, .. }
            | Trajectory::Parabola { start, .. }
            | Trajectory::Swivel { start, .. } => *start,
            Trajectory::Stationary { position } => *position,
        }
    }

    /// 终点
    pub fn end(&self) -> Point2D {
        match self {
            Trajectory::Directional { end, .. }
            | Trajectory::Parabola { end, .. }
            | Trajectory::Swivel { end, .. } => *end,
            Trajectory::Stationary { position } => *position,
        }
    }

    /// 是否为静止轨迹
    pub fn is_stationary(&self) -> bool {
        matches!(self, Trajectory::Stationary { .. })
    }
}

/// 单段插值，时长非正时直接落在终点
fn segment(from: Point2D, to: Point2D, elapsed: f32, duration: f32, easing: EasingCurve) -> Point2D {
    if duration <= 0.0 {
        return to;
    }
    from.lerp(to, easing.apply(elapsed / duration))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swivel() -> Trajectory {
        Trajectory::Swivel {
            start: Point2D::new(0.0, 0.0),
            swivel: Point2D::new(100.0, 50.0),
            end: Point2D::new(200.0, 0.0),
            phase_1_duration: 500.0,
            phase_2_duration: 500.0,
            phase_1_easing: EasingCurve::Linear,
            phase_2_easing: EasingCurve::Linear,
        }
    }

    #[test]
    fn test_directional_linear_midpoint() {
        let t = Trajectory::Directional {
            start: Point2D::new(0.0, 0.0),
            end: Point2D::new(100.0, 0.0),
            easing: EasingCurve::Linear,
        };
        assert_eq!(t.position_at(500.0, 1000.0), Point2D::new(50.0, 0.0));
    }

    #[test]
    fn test_directional_endpoints_exact_for_every_curve() {
        let start = Point2D::new(13.7, 901.3);
        let end = Point2D::new(-42.1, 0.3);
        for easing in EasingCurve::ALL {
            let t = Trajectory::Directional { start, end, easing };
            assert_eq!(t.position_at(0.0, 1234.0), start, "{easing}");
            assert_eq!(t.position_at(1234.0, 1234.0), end, "{easing}");
        }
    }

    #[test]
    fn test_directional_clamps_elapsed() {
        let t = Trajectory::Directional {
            start: Point2D::new(0.0, 0.0),
            end: Point2D::new(10.0, 10.0),
            easing: EasingCurve::InOutQuad,
        };
        assert_eq!(t.position_at(-5.0, 100.0), Point2D::new(0.0, 0.0));
        assert_eq!(t.position_at(500.0, 100.0), Point2D::new(10.0, 10.0));
    }

    #[test]
    fn test_parabola_vertex_at_half_for_every_curve() {
        let start = Point2D::new(0.0, 100.0);
        let vertex = Point2D::new(100.0, 0.0);
        let end = Point2D::new(200.0, 100.0);
        for easing in EasingCurve::ALL {
            let t = Trajectory::Parabola {
                start,
                vertex,
                end,
                easing,
            };
            assert!(t.position_at(500.0, 1000.0).approx_eq(vertex, 1e-4), "{easing}");
            assert_eq!(t.position_at(0.0, 1000.0), start);
            assert_eq!(t.position_at(1000.0, 1000.0), end);
        }
    }

    #[test]
    fn test_parabola_linear_quarter() {
        let t = Trajectory::Parabola {
            start: Point2D::new(0.0, 100.0),
            vertex: Point2D::new(100.0, 0.0),
            end: Point2D::new(200.0, 100.0),
            easing: EasingCurve::Linear,
        };
        assert_eq!(t.position_at(250.0, 1000.0), Point2D::new(50.0, 50.0));
        assert_eq!(t.position_at(750.0, 1000.0), Point2D::new(150.0, 50.0));
    }

    #[test]
    fn test_swivel_phases() {
        let t = swivel();
        assert_eq!(t.position_at(250.0, 1000.0), Point2D::new(50.0, 25.0));
        assert_eq!(t.position_at(750.0, 1000.0), Point2D::new(150.0, 25.0));
        assert_eq!(t.position_at(1000.0, 1000.0), Point2D::new(200.0, 0.0));
    }

    #[test]
    fn test_swivel_continuity_at_boundary() {
        let t = swivel();
        let from_first = t.swivel_phase_position(SwivelPhase::First, 500.0).unwrap();
        let from_second = t.swivel_phase_position(SwivelPhase::Second, 0.0).unwrap();
        assert_eq!(from_first, from_second);
        assert_eq!(from_first, Point2D::new(100.0, 50.0));
        assert_eq!(t.position_at(500.0, 1000.0), Point2D::new(100.0, 50.0));
    }

    #[test]
    fn test_swivel_phase_position_on_other_variants() {
        let t = Trajectory::Stationary {
            position: Point2D::new(1.0, 2.0),
        };
        assert!(t.swivel_phase_position(SwivelPhase::First, 0.0).is_none());
    }

    #[test]
    fn test_stationary() {
        let t = Trajectory::Stationary {
            position: Point2D::new(7.0, 8.0),
        };
        for elapsed in [0.0, 100.0, 999.0, 1000.0] {
            assert_eq!(t.position_at(elapsed, 1000.0), Point2D::new(7.0, 8.0));
        }
        assert!(t.is_stationary());
        assert_eq!(t.start(), t.end());
    }
}
