//! # Error 模块
//!
//! 定义 fct-engine 中使用的错误类型。
//!
//! - 配置错误（未知类型/子类型、缺字段、非法时长）→ [`BuildError`]
//! - 已解析参数不满足不变量 → [`SpecError`]
//! - 音效播放失败 → [`SoundError`]（只记录日志，不中断动画）
//!
//! 未知的命名取值（位置、方向、缓动、强度）不是错误，由工厂降级并记录警告。

use thiserror::Error;

/// 动画参数不满足不变量
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpecError {
    /// 时长必须为正
    #[error("动画时长必须为正数，实际为 {duration} ms")]
    NonPositiveDuration { duration: f32 },

    /// 淡出窗口超出动画时长
    #[error("淡出窗口 {delay} + {fade} ms 超出动画时长 {duration} ms")]
    FadeOutOverrun { delay: f32, fade: f32, duration: f32 },

    /// 渐变时长非法
    #[error("渐变时长必须为正数，实际为 {fade} ms")]
    InvalidFade { fade: f32 },

    /// 两阶段时长之和不等于总时长
    #[error("阶段时长 {phase_1} + {phase_2} ms 与总时长 {duration} ms 不一致")]
    PhaseMismatch {
        phase_1: f32,
        phase_2: f32,
        duration: f32,
    },

    /// 抖动周期必须为正
    #[error("抖动周期必须为正数，实际为 {intensity} ms")]
    InvalidJiggle { intensity: f32 },

    /// 缩放峰值必须为正
    #[error("缩放峰值必须为正数，实际为 {peak}")]
    InvalidScale { peak: f32 },
}

/// 动画构建失败
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    /// 缺少必需字段
    #[error("缺少必需字段 '{field}'")]
    MissingField { field: &'static str },

    /// 未知动画类型
    #[error("未知动画类型 '{name}'")]
    UnknownType { name: String },

    /// 未知动画子类型
    #[error("动画类型 '{kind}' 不支持子类型 '{subtype}'")]
    UnknownSubtype { kind: String, subtype: String },

    /// 时长非法（秒）
    #[error("动画时长必须为正数，实际为 {seconds} 秒")]
    InvalidDuration { seconds: f32 },

    /// 配置映射无法反序列化
    #[error("无效的动画配置: {message}")]
    InvalidConfig { message: String },

    /// 解析后的参数不满足不变量
    #[error("动画参数无效: {0}")]
    InvalidSpec(#[from] SpecError),
}

/// 音效播放失败
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SoundError {
    /// 音效文件不存在
    #[error("音效未找到: {path}")]
    NotFound { path: String },

    /// 解码或播放失败
    #[error("播放音效失败: {path} - {message}")]
    Playback { path: String, message: String },

    /// 音频设备不可用
    #[error("音频设备不可用: {message}")]
    Unavailable { message: String },
}

/// 构建结果类型别名
pub type BuildResult<T> = Result<T, BuildError>;
