//! # Easing 模块
//!
//! 缓动曲线目录，用于动画的时间插值。
//!
//! 目录是封闭的：`Linear` 加上十种曲线族各自的 `In` / `Out` / `InOut` / `OutIn`
//! 四种模式，共 41 条曲线。所有曲线都满足 `apply(0) == 0`、`apply(1) == 1`，
//! 中间值允许越界（Back / Elastic 会过冲）。
//!
//! 名称解析大小写不敏感，忽略 `-`、`_`、空格以及 `ease` 前缀：
//! `"InOutQuad"`、`"in_out_quad"`、`"Ease-In-Out-Quad"` 都解析为同一条曲线。

use std::f32::consts::PI;
use std::fmt;

use crate::names;

/// 缓动曲线
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EasingCurve {
    /// 线性（匀速）
    #[default]
    Linear,
    // 二次
    InQuad,
    OutQuad,
    InOutQuad,
    OutInQuad,
    // 三次
    InCubic,
    OutCubic,
    InOutCubic,
    OutInCubic,
    // 四次
    InQuart,
    OutQuart,
    InOutQuart,
    OutInQuart,
    // 五次
    InQuint,
    OutQuint,
    InOutQuint,
    OutInQuint,
    // 正弦
    InSine,
    OutSine,
    InOutSine,
    OutInSine,
    // 指数
    InExpo,
    OutExpo,
    InOutExpo,
    OutInExpo,
    // 圆形
    InCirc,
    OutCirc,
    InOutCirc,
    OutInCirc,
    /// 弹性（会振荡越界）
    InElastic,
    OutElastic,
    InOutElastic,
    OutInElastic,
    /// 回拉（会过冲）
    InBack,
    OutBack,
    InOutBack,
    OutInBack,
    /// 弹跳
    InBounce,
    OutBounce,
    InOutBounce,
    OutInBounce,
}

/// 曲线族（只定义 "In" 形式，其余模式由组合得到）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Quad,
    Cubic,
    Quart,
    Quint,
    Sine,
    Expo,
    Circ,
    Elastic,
    Back,
    Bounce,
}

/// 组合模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    In,
    Out,
    InOut,
    OutIn,
}

impl EasingCurve {
    /// 完整目录（顺序即文档顺序）
    pub const ALL: [EasingCurve; 41] = [
        EasingCurve::Linear,
        EasingCurve::InQuad,
        EasingCurve::OutQuad,
        EasingCurve::InOutQuad,
        EasingCurve::OutInQuad,
        EasingCurve::InCubic,
        EasingCurve::OutCubic,
        EasingCurve::InOutCubic,
        EasingCurve::OutInCubic,
        EasingCurve::InQuart,
        EasingCurve::OutQuart,
        EasingCurve::InOutQuart,
        EasingCurve::OutInQuart,
        EasingCurve::InQuint,
        EasingCurve::OutQuint,
        EasingCurve::InOutQuint,
        EasingCurve::OutInQuint,
        EasingCurve::InSine,
        EasingCurve::OutSine,
        EasingCurve::InOutSine,
        EasingCurve::OutInSine,
        EasingCurve::InExpo,
        EasingCurve::OutExpo,
        EasingCurve::InOutExpo,
        EasingCurve::OutInExpo,
        EasingCurve::InCirc,
        EasingCurve::OutCirc,
        EasingCurve::InOutCirc,
        EasingCurve::OutInCirc,
        EasingCurve::InElastic,
        EasingCurve::OutElastic,
        EasingCurve::InOutElastic,
        EasingCurve::OutInElastic,
        EasingCurve::InBack,
        EasingCurve::OutBack,
        EasingCurve::InOutBack,
        EasingCurve::OutInBack,
        EasingCurve::InBounce,
        EasingCurve::OutBounce,
        EasingCurve::InOutBounce,
        EasingCurve::OutInBounce,
    ];

    /// 计算缓动值
    ///
    /// # 参数
    /// - `t`: 时间进度，超出 [0, 1] 会被限制
    ///
    /// # 返回
    /// - 缓动后的进度值；端点精确为 0.0 / 1.0
    pub fn apply(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match self.parts() {
            None => t,
            Some((family, Mode::In)) => family.ease_in(t),
            Some((family, Mode::Out)) => family.ease_out(t),
            Some((family, Mode::InOut)) => {
                if t < 0.5 {
                    family.ease_in(2.0 * t) / 2.0
                } else {
                    1.0 - family.ease_in(2.0 - 2.0 * t) / 2.0
                }
            }
            Some((family, Mode::OutIn)) => {
                if t < 0.5 {
                    family.ease_out(2.0 * t) / 2.0
                } else {
                    0.5 + family.ease_in(2.0 * t - 1.0) / 2.0
                }
            }
        }
    }

    /// 是否为振荡/过冲曲线（不保证单调）
    pub fn is_oscillating(&self) -> bool {
        matches!(
            self.parts(),
            Some((Family::Elastic | Family::Back | Family::Bounce, _))
        )
    }

    /// 标准名称
    pub fn name(&self) -> &'static str {
        match self {
            EasingCurve::Linear => "Linear",
            EasingCurve::InQuad => "InQuad",
            EasingCurve::OutQuad => "OutQuad",
            EasingCurve::InOutQuad => "InOutQuad",
            EasingCurve::OutInQuad => "OutInQuad",
            EasingCurve::InCubic => "InCubic",
            EasingCurve::OutCubic => "OutCubic",
            EasingCurve::InOutCubic => "InOutCubic",
            EasingCurve::OutInCubic => "OutInCubic",
            EasingCurve::InQuart => "InQuart",
            EasingCurve::OutQuart => "OutQuart",
            EasingCurve::InOutQuart => "InOutQuart",
            EasingCurve::OutInQuart => "OutInQuart",
            EasingCurve::InQuint => "InQuint",
            EasingCurve::OutQuint => "OutQuint",
            EasingCurve::InOutQuint => "InOutQuint",
            EasingCurve::OutInQuint => "OutInQuint",
            EasingCurve::InSine => "InSine",
            EasingCurve::OutSine => "OutSine",
            EasingCurve::InOutSine => "InOutSine",
            EasingCurve::OutInSine => "OutInSine",
            EasingCurve::InExpo => "InExpo",
            EasingCurve::OutExpo => "OutExpo",
            EasingCurve::InOutExpo => "InOutExpo",
            EasingCurve::OutInExpo => "OutInExpo",
            EasingCurve::InCirc => "InCirc",
            EasingCurve::OutCirc => "OutCirc",
            EasingCurve::InOutCirc => "InOutCirc",
            EasingCurve::OutInCirc => "OutInCirc",
            EasingCurve::InElastic => "InElastic",
            EasingCurve::OutElastic => "OutElastic",
            EasingCurve::InOutElastic => "InOutElastic",
            EasingCurve::OutInElastic => "OutInElastic",
            EasingCurve::InBack => "InBack",
            EasingCurve::OutBack => "OutBack",
            EasingCurve::InOutBack => "InOutBack",
            EasingCurve::OutInBack => "OutInBack",
            EasingCurve::InBounce => "InBounce",
            EasingCurve::OutBounce => "OutBounce",
            EasingCurve::InOutBounce => "InOutBounce",
            EasingCurve::OutInBounce => "OutInBounce",
        }
    }

    /// 按名称查找曲线，未知名称返回 `None`
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = normalize(name);
        if wanted.is_empty() {
            return None;
        }
        Self::ALL
            .iter()
            .copied()
            .find(|curve| normalize(curve.name()) == wanted)
    }

    fn parts(&self) -> Option<(Family, Mode)> {
        use EasingCurve::*;
        let parts = match self {
            Linear => return None,
            InQuad => (Family::Quad, Mode::In),
            OutQuad => (Family::Quad, Mode::Out),
            InOutQuad => (Family::Quad, Mode::InOut),
            OutInQuad => (Family::Quad, Mode::OutIn),
            InCubic => (Family::Cubic, Mode::In),
            OutCubic => (Family::Cubic, Mode::Out),
            InOutCubic => (Family::Cubic, Mode::InOut),
            OutInCubic => (Family::Cubic, Mode::OutIn),
            InQuart => (Family::Quart, Mode::In),
            OutQuart => (Family::Quart, Mode::Out),
            InOutQuart => (Family::Quart, Mode::InOut),
            OutInQuart => (Family::Quart, Mode::OutIn),
            InQuint => (Family::Quint, Mode::In),
            OutQuint => (Family::Quint, Mode::Out),
            InOutQuint => (Family::Quint, Mode::InOut),
            OutInQuint => (Family::Quint, Mode::OutIn),
            InSine => (Family::Sine, Mode::In),
            OutSine => (Family::Sine, Mode::Out),
            InOutSine => (Family::Sine, Mode::InOut),
            OutInSine => (Family::Sine, Mode::OutIn),
            InExpo => (Family::Expo, Mode::In),
            OutExpo => (Family::Expo, Mode::Out),
            InOutExpo => (Family::Expo, Mode::InOut),
            OutInExpo => (Family::Expo, Mode::OutIn),
            InCirc => (Family::Circ, Mode::In),
            OutCirc => (Family::Circ, Mode::Out),
            InOutCirc => (Family::Circ, Mode::InOut),
            OutInCirc => (Family::Circ, Mode::OutIn),
            InElastic => (Family::Elastic, Mode::In),
            OutElastic => (Family::Elastic, Mode::Out),
            InOutElastic => (Family::Elastic, Mode::InOut),
            OutInElastic => (Family::Elastic, Mode::OutIn),
            InBack => (Family::Back, Mode::In),
            OutBack => (Family::Back, Mode::Out),
            InOutBack => (Family::Back, Mode::InOut),
            OutInBack => (Family::Back, Mode::OutIn),
            InBounce => (Family::Bounce, Mode::In),
            OutBounce => (Family::Bounce, Mode::Out),
            InOutBounce => (Family::Bounce, Mode::InOut),
            OutInBounce => (Family::Bounce, Mode::OutIn),
        };
        Some(parts)
    }
}

impl fmt::Display for EasingCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 按名称解析曲线
///
/// 未知名称降级为 `Linear` 并输出警告，从不让调用方失败。
pub fn resolve(name: &str) -> EasingCurve {
    match EasingCurve::from_name(name) {
        Some(curve) => curve,
        None => {
            tracing::warn!(name = %name, "未知缓动曲线，降级为 Linear");
            EasingCurve::Linear
        }
    }
}

/// 在通用归一化之外再去掉 `ease` 前缀
fn normalize(name: &str) -> String {
    let lowered = names::normalize(name);
    match lowered.strip_prefix("ease") {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => lowered,
    }
}

const BACK_C1: f32 = 1.70158;
const BACK_C3: f32 = BACK_C1 + 1.0;
const ELASTIC_C4: f32 = (2.0 * PI) / 3.0;
const BOUNCE_N1: f32 = 7.5625;
const BOUNCE_D1: f32 = 2.75;

impl Family {
    fn ease_in(self, t: f32) -> f32 {
        match self {
            Family::Quad => t * t,
            Family::Cubic => t * t * t,
            Family::Quart => t * t * t * t,
            Family::Quint => t * t * t * t * t,
            Family::Sine => 1.0 - (t * PI / 2.0).cos(),
            Family::Expo => {
                if t == 0.0 {
                    0.0
                } else {
                    2.0_f32.powf(10.0 * t - 10.0)
                }
            }
            Family::Circ => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            Family::Elastic => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    -2.0_f32.powf(10.0 * t - 10.0) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
                }
            }
            Family::Back => BACK_C3 * t * t * t - BACK_C1 * t * t,
            Family::Bounce => 1.0 - bounce_out(1.0 - t),
        }
    }

    fn ease_out(self, t: f32) -> f32 {
        1.0 - self.ease_in(1.0 - t)
    }
}

/// 弹跳缓出
fn bounce_out(t: f32) -> f32 {
    if t < 1.0 / BOUNCE_D1 {
        BOUNCE_N1 * t * t
    } else if t < 2.0 / BOUNCE_D1 {
        let t = t - 1.5 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.75
    } else if t < 2.5 / BOUNCE_D1 {
        let t = t - 2.25 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.984375
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size_and_unique_names() {
        assert_eq!(EasingCurve::ALL.len(), 41);
        let mut names: Vec<&str> = EasingCurve::ALL.iter().map(|c| c.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 41);
    }

    #[test]
    fn test_endpoints_exact_for_every_curve() {
        for curve in EasingCurve::ALL {
            assert_eq!(curve.apply(0.0), 0.0, "{curve} 起点");
            assert_eq!(curve.apply(1.0), 1.0, "{curve} 终点");
        }
    }

    #[test]
    fn test_clamp() {
        let easing = EasingCurve::Linear;
        assert_eq!(easing.apply(-0.5), 0.0);
        assert_eq!(easing.apply(1.5), 1.0);
    }

    #[test]
    fn test_linear() {
        let easing = EasingCurve::Linear;
        assert_eq!(easing.apply(0.25), 0.25);
        assert_eq!(easing.apply(0.5), 0.5);
    }

    #[test]
    fn test_in_out_midpoint() {
        for curve in [
            EasingCurve::InOutQuad,
            EasingCurve::InOutCubic,
            EasingCurve::InOutSine,
            EasingCurve::OutInQuad,
            EasingCurve::OutInCirc,
        ] {
            assert!((curve.apply(0.5) - 0.5).abs() < 1e-5, "{curve}");
        }
    }

    #[test]
    fn test_non_oscillating_curves_are_monotonic() {
        for curve in EasingCurve::ALL.iter().filter(|c| !c.is_oscillating()) {
            let mut previous = 0.0;
            for step in 1..=100 {
                let value = curve.apply(step as f32 / 100.0);
                assert!(value + 1e-5 >= previous, "{curve} 在 {step} 处回退");
                previous = value;
            }
        }
    }

    #[test]
    fn test_back_overshoots() {
        // InBack 起步会先向反方向拉
        assert!(EasingCurve::InBack.apply(0.2) < 0.0);
        assert!(EasingCurve::OutBack.apply(0.8) > 1.0);
    }

    #[test]
    fn test_from_name_variants() {
        assert_eq!(EasingCurve::from_name("InOutQuad"), Some(EasingCurve::InOutQuad));
        assert_eq!(EasingCurve::from_name("in_out_quad"), Some(EasingCurve::InOutQuad));
        assert_eq!(EasingCurve::from_name("Ease-In-Out-Quad"), Some(EasingCurve::InOutQuad));
        assert_eq!(EasingCurve::from_name("linear"), Some(EasingCurve::Linear));
        assert_eq!(EasingCurve::from_name("OUTINBOUNCE"), Some(EasingCurve::OutInBounce));
        assert_eq!(EasingCurve::from_name("wobble"), None);
        assert_eq!(EasingCurve::from_name(""), None);
    }

    #[test]
    fn test_resolve_falls_back_to_linear() {
        assert_eq!(resolve("OutBounce"), EasingCurve::OutBounce);
        assert_eq!(resolve("not-a-curve"), EasingCurve::Linear);
    }

    #[test]
    fn test_name_round_trip() {
        for curve in EasingCurve::ALL {
            assert_eq!(EasingCurve::from_name(curve.name()), Some(curve));
        }
    }
}
