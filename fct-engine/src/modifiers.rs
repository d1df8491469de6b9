//! # Modifiers 模块
//!
//! 叠加在轨迹之上的时间驱动修饰器：
//!
//! - **Fade-In / Fade-Out**：透明度
//! - **Jiggle**：位置上的有界随机游走（叠加，不替换轨迹输出）
//! - **Scale-Pulse**：缩放的两阶段脉冲（仅 Pow）
//!
//! 各修饰器作用于互不相同的属性，彼此之间无需协调。

use rand::{Rng, RngCore};
use std::f32::consts::TAU;

use crate::easing::EasingCurve;
use crate::geometry::{Point2D, lerp_scalar};

/// 透明度渐变
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    /// 开始前的延迟（毫秒），淡入恒为 0
    pub delay: f32,
    /// 渐变时长（毫秒）
    pub duration: f32,
    /// 缓动曲线
    pub easing: EasingCurve,
}

impl Fade {
    /// 从 0 开始的淡入
    pub fn fade_in(duration: f32, easing: EasingCurve) -> Self {
        Self {
            delay: 0.0,
            duration,
            easing,
        }
    }

    /// 延迟 `delay` 后开始的淡出
    pub fn fade_out(delay: f32, duration: f32, easing: EasingCurve) -> Self {
        Self {
            delay,
            duration,
            easing,
        }
    }

    /// 渐变结束时刻
    pub fn end(&self) -> f32 {
        self.delay + self.duration
    }

    /// 渐变窗口内的缓动进度（窗口前为 0，窗口后为 1）
    pub fn progress_at(&self, elapsed: f32) -> f32 {
        if elapsed <= self.delay {
            return 0.0;
        }
        if self.duration <= 0.0 || elapsed >= self.end() {
            return 1.0;
        }
        self.easing.apply((elapsed - self.delay) / self.duration)
    }
}

/// 抖动参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jiggle {
    /// 每次迭代的时长（毫秒），越小越剧烈
    pub intensity: f32,
    /// 单次采样偏移的最大长度（像素）
    pub amount: f32,
}

impl Jiggle {
    pub fn new(intensity: f32, amount: f32) -> Self {
        Self { intensity, amount }
    }
}

/// 缩放脉冲：1.0 → peak → 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalePulse {
    /// 峰值缩放（1.5 表示 150%）
    pub peak: f32,
    pub phase_1_duration: f32,
    pub phase_2_duration: f32,
    pub phase_1_easing: EasingCurve,
    pub phase_2_easing: EasingCurve,
}

impl ScalePulse {
    /// 计算 `elapsed` 时的缩放
    pub fn scale_at(&self, elapsed: f32) -> f32 {
        if elapsed < self.phase_1_duration {
            let t = elapsed.max(0.0) / self.phase_1_duration;
            lerp_scalar(1.0, self.peak, self.phase_1_easing.apply(t))
        } else if self.phase_2_duration <= 0.0 {
            1.0
        } else {
            let t = (elapsed - self.phase_1_duration) / self.phase_2_duration;
            lerp_scalar(self.peak, 1.0, self.phase_2_easing.apply(t))
        }
    }
}

/// 一个动画上挂载的全部修饰器
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Modifiers {
    pub fade_in: Option<Fade>,
    pub fade_out: Option<Fade>,
    pub jiggle: Option<Jiggle>,
    pub scale_pulse: Option<ScalePulse>,
}

impl Modifiers {
    /// 计算 `elapsed` 时的透明度
    ///
    /// 淡入与淡出相乘：淡出窗口之前由淡入决定，淡入结束之后由淡出决定。
    pub fn opacity_at(&self, elapsed: f32) -> f32 {
        let fade_in = self
            .fade_in
            .filter(|fade| fade.duration > 0.0)
            .map_or(1.0, |fade| fade.progress_at(elapsed));
        let fade_out = self.fade_out.map_or(1.0, |fade| 1.0 - fade.progress_at(elapsed));
        (fade_in * fade_out).clamp(0.0, 1.0)
    }

    /// 计算 `elapsed` 时的缩放
    pub fn scale_at(&self, elapsed: f32) -> f32 {
        self.scale_pulse.map_or(1.0, |pulse| pulse.scale_at(elapsed))
    }
}

/// 抖动的运行时状态
///
/// 迭代 `k` 在 `k * intensity` 时刻开始：以当前渲染偏移为起点采样一个新目标，
/// 在本次迭代内线性移动过去。粗粒度 tick 跳过的迭代会按顺序补采样，
/// 因此迭代次数只取决于动画时长。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JiggleState {
    iterations: u32,
    from: Point2D,
    to: Point2D,
    last_sample: Point2D,
}

impl JiggleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已开始的迭代次数
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// 最近一次采样的相对位移
    pub fn last_sample(&self) -> Point2D {
        self.last_sample
    }

    /// 推进到 `elapsed` 并返回当前偏移
    pub fn offset_at(
        &mut self,
        jiggle: &Jiggle,
        elapsed: f32,
        duration: f32,
        rng: &mut dyn RngCore,
    ) -> Point2D {
        if jiggle.intensity <= 0.0 {
            return Point2D::zero();
        }

        loop {
            let next_start = self.iterations as f32 * jiggle.intensity;
            if next_start > elapsed || next_start >= duration {
                break;
            }
            self.begin_iteration(jiggle.amount, rng);
        }

        if self.iterations == 0 {
            return Point2D::zero();
        }

        let started_at = (self.iterations - 1) as f32 * jiggle.intensity;
        let t = ((elapsed - started_at) / jiggle.intensity).clamp(0.0, 1.0);
        self.from.lerp(self.to, t)
    }

    fn begin_iteration(&mut self, amount: f32, rng: &mut dyn RngCore) {
        let sample = sample_offset(amount, rng);
        self.from = self.to;
        self.to = self.from + sample;
        self.last_sample = sample;
        self.iterations += 1;
    }
}

/// 采样一个长度不超过 `amount` 的随机位移
pub fn sample_offset(amount: f32, rng: &mut dyn RngCore) -> Point2D {
    if amount <= 0.0 {
        return Point2D::zero();
    }
    let angle: f32 = rng.gen_range(0.0..TAU);
    let radius: f32 = rng.gen_range(0.0..=amount);
    Point2D::new(radius * angle.cos(), radius * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_no_fades_is_opaque() {
        let modifiers = Modifiers::default();
        for elapsed in [0.0, 10.0, 500.0, 1000.0] {
            assert_eq!(modifiers.opacity_at(elapsed), 1.0);
        }
    }

    #[test]
    fn test_fade_in() {
        let modifiers = Modifiers {
            fade_in: Some(Fade::fade_in(200.0, EasingCurve::Linear)),
            ..Default::default()
        };
        assert_eq!(modifiers.opacity_at(0.0), 0.0);
        assert_eq!(modifiers.opacity_at(100.0), 0.5);
        assert_eq!(modifiers.opacity_at(200.0), 1.0);
        assert_eq!(modifiers.opacity_at(900.0), 1.0);
    }

    #[test]
    fn test_fade_out() {
        let modifiers = Modifiers {
            fade_out: Some(Fade::fade_out(700.0, 300.0, EasingCurve::Linear)),
            ..Default::default()
        };
        assert_eq!(modifiers.opacity_at(0.0), 1.0);
        assert_eq!(modifiers.opacity_at(700.0), 1.0);
        assert!((modifiers.opacity_at(850.0) - 0.5).abs() < 1e-5);
        assert_eq!(modifiers.opacity_at(1000.0), 0.0);
    }

    #[test]
    fn test_fade_in_governs_before_fade_out_window() {
        let modifiers = Modifiers {
            fade_in: Some(Fade::fade_in(200.0, EasingCurve::Linear)),
            fade_out: Some(Fade::fade_out(700.0, 300.0, EasingCurve::Linear)),
            ..Default::default()
        };
        assert_eq!(modifiers.opacity_at(0.0), 0.0);
        assert_eq!(modifiers.opacity_at(50.0), 0.25);
        assert_eq!(modifiers.opacity_at(400.0), 1.0);
        assert_eq!(modifiers.opacity_at(1000.0), 0.0);
    }

    #[test]
    fn test_overshooting_fade_is_clamped() {
        let modifiers = Modifiers {
            fade_in: Some(Fade::fade_in(100.0, EasingCurve::OutBack)),
            ..Default::default()
        };
        for step in 0..=100 {
            let opacity = modifiers.opacity_at(step as f32);
            assert!((0.0..=1.0).contains(&opacity));
        }
    }

    #[test]
    fn test_scale_pulse() {
        let pulse = ScalePulse {
            peak: 2.0,
            phase_1_duration: 400.0,
            phase_2_duration: 600.0,
            phase_1_easing: EasingCurve::Linear,
            phase_2_easing: EasingCurve::Linear,
        };
        assert_eq!(pulse.scale_at(0.0), 1.0);
        assert_eq!(pulse.scale_at(200.0), 1.5);
        assert_eq!(pulse.scale_at(400.0), 2.0);
        assert_eq!(pulse.scale_at(700.0), 1.5);
        assert_eq!(pulse.scale_at(1000.0), 1.0);
    }

    #[test]
    fn test_sample_offset_bounded() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let sample = sample_offset(4.0, &mut rng);
            assert!(sample.length() <= 4.0 + 1e-4);
        }
        assert_eq!(sample_offset(0.0, &mut rng), Point2D::zero());
    }

    #[test]
    fn test_jiggle_iteration_count() {
        let jiggle = Jiggle::new(50.0, 4.0);
        let mut state = JiggleState::new();
        let mut rng = StdRng::seed_from_u64(7);

        let mut elapsed = 0.0;
        while elapsed <= 1000.0 {
            state.offset_at(&jiggle, elapsed, 1000.0, &mut rng);
            elapsed += 10.0;
        }
        assert_eq!(state.iterations(), 20);
    }

    #[test]
    fn test_jiggle_coarse_tick_samples_skipped_iterations() {
        let jiggle = Jiggle::new(50.0, 4.0);
        let mut state = JiggleState::new();
        let mut rng = StdRng::seed_from_u64(7);

        state.offset_at(&jiggle, 0.0, 1000.0, &mut rng);
        state.offset_at(&jiggle, 1000.0, 1000.0, &mut rng);
        assert_eq!(state.iterations(), 20);
    }

    #[test]
    fn test_jiggle_moves_toward_sample() {
        let jiggle = Jiggle::new(100.0, 4.0);
        let mut state = JiggleState::new();
        let mut rng = StdRng::seed_from_u64(3);

        let at_start = state.offset_at(&jiggle, 0.0, 1000.0, &mut rng);
        assert_eq!(at_start, Point2D::zero());
        let target = state.last_sample();
        let at_end = state.offset_at(&jiggle, 99.999, 1000.0, &mut rng);
        assert!(at_end.approx_eq(target, 1e-3));
    }
}
