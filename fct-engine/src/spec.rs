//! # Spec 模块
//!
//! 已解析、全数值化的单个动画参数。
//!
//! `AnimationSpec` 由 [`AnimationFactory`](crate::factory::AnimationFactory) 从命名配置
//! 生成，也可以在代码中直接用 `with_*` 构建。所有时间单位为毫秒。

use std::fmt;

use crate::easing::EasingCurve;
use crate::error::SpecError;
use crate::geometry::{Frame, Point2D};
use crate::modifiers::{Fade, Jiggle, Modifiers, ScalePulse};
use crate::sound::SoundRef;
use crate::trajectory::Trajectory;

/// 时长比较容差（毫秒）
const DURATION_EPSILON: f32 = 1e-2;

/// 动画类型，同时作为活跃注册表的分类键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnimationKind {
    Directional,
    Parabola,
    Swivel,
    Stationary,
    Pow,
}

impl AnimationKind {
    pub const ALL: [AnimationKind; 5] = [
        AnimationKind::Directional,
        AnimationKind::Parabola,
        AnimationKind::Swivel,
        AnimationKind::Stationary,
        AnimationKind::Pow,
    ];

    /// 按名称查找（大小写不敏感）
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// 配置中使用的名称
    pub fn name(&self) -> &'static str {
        match self {
            AnimationKind::Directional => "Directional",
            AnimationKind::Parabola => "Parabola",
            AnimationKind::Swivel => "Swivel",
            AnimationKind::Stationary => "Stationary",
            AnimationKind::Pow => "Pow",
        }
    }

    /// 注册表分类名
    pub fn category(&self) -> &'static str {
        match self {
            AnimationKind::Directional => "directional",
            AnimationKind::Parabola => "parabola",
            AnimationKind::Swivel => "swivel",
            AnimationKind::Stationary => "stationary",
            AnimationKind::Pow => "pow",
        }
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 单个动画的完整参数
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSpec {
    /// 动画类型
    pub kind: AnimationKind,
    /// 总时长（毫秒）
    pub duration: f32,
    /// 位置轨迹
    pub trajectory: Trajectory,
    /// 修饰器
    pub modifiers: Modifiers,
    /// 开始播放时触发一次的音效
    pub sound: Option<SoundRef>,
}

impl AnimationSpec {
    /// 创建无修饰器的动画参数
    pub fn new(kind: AnimationKind, duration: f32, trajectory: Trajectory) -> Self {
        Self {
            kind,
            duration,
            trajectory,
            modifiers: Modifiers::default(),
            sound: None,
        }
    }

    /// 直线移动
    pub fn directional(start: Point2D, end: Point2D, duration: f32, easing: EasingCurve) -> Self {
        Self::new(
            AnimationKind::Directional,
            duration,
            Trajectory::Directional { start, end, easing },
        )
    }

    /// 经过顶点的移动
    pub fn parabola(
        start: Point2D,
        vertex: Point2D,
        end: Point2D,
        duration: f32,
        easing: EasingCurve,
    ) -> Self {
        Self::new(
            AnimationKind::Parabola,
            duration,
            Trajectory::Parabola {
                start,
                vertex,
                end,
                easing,
            },
        )
    }

    /// 两阶段折线移动（两段均为线性）
    pub fn swivel(
        start: Point2D,
        swivel: Point2D,
        end: Point2D,
        phase_1_duration: f32,
        phase_2_duration: f32,
    ) -> Self {
        Self::new(
            AnimationKind::Swivel,
            phase_1_duration + phase_2_duration,
            Trajectory::Swivel {
                start,
                swivel,
                end,
                phase_1_duration,
                phase_2_duration,
                phase_1_easing: EasingCurve::Linear,
                phase_2_easing: EasingCurve::Linear,
            },
        )
    }

    /// 原地不动
    pub fn stationary(position: Point2D, duration: f32) -> Self {
        Self::new(
            AnimationKind::Stationary,
            duration,
            Trajectory::Stationary { position },
        )
    }

    /// 原地缩放脉冲
    pub fn pow(position: Point2D, duration: f32, pulse: ScalePulse) -> Self {
        let mut spec = Self::new(
            AnimationKind::Pow,
            duration,
            Trajectory::Stationary { position },
        );
        spec.modifiers.scale_pulse = Some(pulse);
        spec
    }

    /// 设置淡入
    pub fn with_fade_in(mut self, duration: f32, easing: EasingCurve) -> Self {
        self.modifiers.fade_in = Some(Fade::fade_in(duration, easing));
        self
    }

    /// 设置淡出（`delay` 之后开始）
    pub fn with_fade_out(mut self, delay: f32, duration: f32, easing: EasingCurve) -> Self {
        self.modifiers.fade_out = Some(Fade::fade_out(delay, duration, easing));
        self
    }

    /// 设置抖动
    pub fn with_jiggle(mut self, jiggle: Jiggle) -> Self {
        self.modifiers.jiggle = Some(jiggle);
        self
    }

    /// 设置音效
    pub fn with_sound(mut self, sound: SoundRef) -> Self {
        self.sound = Some(sound);
        self
    }

    /// 检查参数不变量
    pub fn validate(&self) -> Result<(), SpecError> {
        if !(self.duration > 0.0) || !self.duration.is_finite() {
            return Err(SpecError::NonPositiveDuration {
                duration: self.duration,
            });
        }

        if let Some(fade) = &self.modifiers.fade_in {
            if !(fade.duration > 0.0) {
                return Err(SpecError::InvalidFade {
                    fade: fade.duration,
                });
            }
        }

        if let Some(fade) = &self.modifiers.fade_out {
            if !(fade.duration > 0.0) {
                return Err(SpecError::InvalidFade {
                    fade: fade.duration,
                });
            }
            if fade.delay < 0.0 || fade.end() > self.duration + DURATION_EPSILON {
                return Err(SpecError::FadeOutOverrun {
                    delay: fade.delay,
                    fade: fade.duration,
                    duration: self.duration,
                });
            }
        }

        if let Trajectory::Swivel {
            phase_1_duration,
            phase_2_duration,
            ..
        } = &self.trajectory
        {
            self.check_phases(*phase_1_duration, *phase_2_duration)?;
        }

        if let Some(pulse) = &self.modifiers.scale_pulse {
            if !(pulse.peak > 0.0) {
                return Err(SpecError::InvalidScale { peak: pulse.peak });
            }
            self.check_phases(pulse.phase_1_duration, pulse.phase_2_duration)?;
        }

        if let Some(jiggle) = &self.modifiers.jiggle {
            if !(jiggle.intensity > 0.0) {
                return Err(SpecError::InvalidJiggle {
                    intensity: jiggle.intensity,
                });
            }
        }

        Ok(())
    }

    fn check_phases(&self, phase_1: f32, phase_2: f32) -> Result<(), SpecError> {
        if phase_1 < 0.0 || phase_2 < 0.0 || (phase_1 + phase_2 - self.duration).abs() > DURATION_EPSILON
        {
            return Err(SpecError::PhaseMismatch {
                phase_1,
                phase_2,
                duration: self.duration,
            });
        }
        Ok(())
    }

    /// 不含抖动的位置
    pub fn position_at(&self, elapsed: f32) -> Point2D {
        self.trajectory.position_at(elapsed, self.duration)
    }

    /// 透明度
    pub fn opacity_at(&self, elapsed: f32) -> f32 {
        self.modifiers.opacity_at(elapsed)
    }

    /// 缩放
    pub fn scale_at(&self, elapsed: f32) -> f32 {
        self.modifiers.scale_at(elapsed)
    }

    /// 不含抖动的整帧
    pub fn frame_at(&self, elapsed: f32) -> Frame {
        Frame {
            position: self.position_at(elapsed),
            opacity: self.opacity_at(elapsed),
            scale: self.scale_at(elapsed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(AnimationKind::from_name("parabola"), Some(AnimationKind::Parabola));
        assert_eq!(AnimationKind::from_name(" POW "), Some(AnimationKind::Pow));
        assert_eq!(AnimationKind::from_name("Unknown"), None);
        for kind in AnimationKind::ALL {
            assert_eq!(AnimationKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn test_validate_ok() {
        let spec = AnimationSpec::directional(
            Point2D::zero(),
            Point2D::new(100.0, 0.0),
            1000.0,
            EasingCurve::Linear,
        )
        .with_fade_in(200.0, EasingCurve::Linear)
        .with_fade_out(700.0, 300.0, EasingCurve::Linear);
        assert_eq!(spec.validate(), Ok(()));
    }

    #[test]
    fn test_validate_non_positive_duration() {
        let spec = AnimationSpec::stationary(Point2D::zero(), 0.0);
        assert!(matches!(
            spec.validate(),
            Err(SpecError::NonPositiveDuration { .. })
        ));
        let spec = AnimationSpec::stationary(Point2D::zero(), f32::NAN);
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_validate_fade_out_overrun() {
        let spec = AnimationSpec::stationary(Point2D::zero(), 1000.0).with_fade_out(
            800.0,
            300.0,
            EasingCurve::Linear,
        );
        assert!(matches!(
            spec.validate(),
            Err(SpecError::FadeOutOverrun { .. })
        ));
    }

    #[test]
    fn test_validate_phase_mismatch() {
        let mut spec = AnimationSpec::swivel(
            Point2D::zero(),
            Point2D::new(1.0, 1.0),
            Point2D::new(2.0, 0.0),
            500.0,
            500.0,
        );
        assert_eq!(spec.duration, 1000.0);
        assert_eq!(spec.validate(), Ok(()));

        spec.duration = 1200.0;
        assert!(matches!(
            spec.validate(),
            Err(SpecError::PhaseMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_jiggle_intensity() {
        let spec = AnimationSpec::stationary(Point2D::zero(), 1000.0)
            .with_jiggle(Jiggle::new(0.0, 4.0));
        assert!(matches!(
            spec.validate(),
            Err(SpecError::InvalidJiggle { .. })
        ));
    }

    #[test]
    fn test_frame_at_combines_profiles() {
        let spec = AnimationSpec::directional(
            Point2D::zero(),
            Point2D::new(100.0, 0.0),
            1000.0,
            EasingCurve::Linear,
        )
        .with_fade_in(1000.0, EasingCurve::Linear);
        let frame = spec.frame_at(500.0);
        assert_eq!(frame.position, Point2D::new(50.0, 0.0));
        assert_eq!(frame.opacity, 0.5);
        assert_eq!(frame.scale, 1.0);
    }
}
