//! # Config 模块
//!
//! 运行时配置管理，集中管理所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）
//!
//! ## 结构
//!
//! | 段 | 内容 |
//! |----|------|
//! | `surface` | 覆盖层尺寸与边距 |
//! | `engine` | 工厂默认数值、巡检间隔、随机种子 |
//! | `audio` | 音效开关、音效根目录、音量 |
//! | `profiles` | 事件分类 → 动画生成配置 |

use fct_engine::{
    AnimationController, AnimationFactory, FactoryDefaults, SpawnConfig, SurfaceLayout,
    factory::defaults,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::audio;

/// 应用配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 覆盖层配置
    #[serde(default)]
    pub surface: SurfaceConfig,

    /// 引擎配置
    #[serde(default)]
    pub engine: EngineConfig,

    /// 音频配置
    #[serde(default)]
    pub audio: AudioConfig,

    /// 事件分类 → 动画配置
    #[serde(default = "default_profiles")]
    pub profiles: BTreeMap<String, SpawnConfig>,
}

/// 覆盖层配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// 宽度（像素）
    #[serde(default = "default_surface_width")]
    pub width: f32,

    /// 高度（像素）
    #[serde(default = "default_surface_height")]
    pub height: f32,

    /// 九宫格边缘站位距屏幕边界的比例
    #[serde(default = "default_surface_margin")]
    pub margin: f32,
}

/// 引擎配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 单次抖动的最大位移（像素）
    #[serde(default = "default_jiggle_amount")]
    pub jiggle_amount: f32,

    /// 未指定终点时的移动距离（像素）
    #[serde(default = "default_travel_distance")]
    pub travel_distance: f32,

    /// Parabola 顶点高度（像素）
    #[serde(default = "default_arc_height")]
    pub arc_height: f32,

    /// Swivel 转折点偏移（像素）
    #[serde(default = "default_swivel_distance")]
    pub swivel_distance: f32,

    /// 碰撞巡检间隔（毫秒），0 表示关闭
    #[serde(default = "default_sweep_interval_ms")]
    pub sweep_interval_ms: f32,

    /// 抖动随机种子，缺省时使用系统熵
    #[serde(default)]
    pub seed: Option<u64>,
}

/// 音频配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// 是否播放音效
    #[serde(default = "default_audio_enabled")]
    pub enabled: bool,

    /// 音效根目录
    #[serde(default = "default_sounds_root")]
    pub sounds_root: PathBuf,

    /// 音量 (0.0 - 1.0)
    #[serde(default = "default_volume")]
    pub volume: f32,
}

// 默认值函数
fn default_surface_width() -> f32 {
    1920.0
}

fn default_surface_height() -> f32 {
    1080.0
}

fn default_surface_margin() -> f32 {
    0.15
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

fn default_sweep_interval_ms() -> f32 {
    fct_engine::controller::DEFAULT_SWEEP_INTERVAL_MS
}

fn default_audio_enabled() -> bool {
    true
}

fn default_sounds_root() -> PathBuf {
    PathBuf::from("sounds")
}

fn default_volume() -> f32 {
    0.8
}

/// 内置的事件分类
fn default_profiles() -> BTreeMap<String, SpawnConfig> {
    let mut profiles = BTreeMap::new();

    profiles.insert(
        "damage".to_string(),
        SpawnConfig {
            subtype: Some("Up".to_string()),
            direction: Some("Right".to_string()),
            easing_style: Some("OutQuad".to_string()),
            fade_out: Some(true),
            fade_out_percentage: Some(0.3),
            ..SpawnConfig::of_type("Parabola", 1.2)
        },
    );
    profiles.insert(
        "heal".to_string(),
        SpawnConfig {
            starting_position: Some("Bottom-Center".to_string()),
            direction: Some("Up".to_string()),
            easing_style: Some("OutCubic".to_string()),
            fade_in: Some(true),
            fade_in_percentage: Some(0.15),
            fade_out: Some(true),
            ..SpawnConfig::of_type("Directional", 1.5)
        },
    );
    profiles.insert(
        "crit".to_string(),
        SpawnConfig {
            scale_percentage: Some(1.8),
            phase_1_percentage: Some(0.3),
            phase_1_easing_style: Some("OutBack".to_string()),
            phase_2_easing_style: Some("InQuad".to_string()),
            jiggle: Some(true),
            jiggle_intensity: Some("High".to_string()),
            fade_out: Some(true),
            sound: Some("crit.wav".to_string()),
            ..SpawnConfig::of_type("Pow", 0.8)
        },
    );
    profiles.insert(
        "dodge".to_string(),
        SpawnConfig {
            starting_position: Some("Middle-Left".to_string()),
            direction: Some("Right".to_string()),
            swivel_direction: Some("Up".to_string()),
            phase_1_percentage: Some(0.4),
            fade_out: Some(true),
            ..SpawnConfig::of_type("Swivel", 1.0)
        },
    );
    profiles.insert(
        "status".to_string(),
        SpawnConfig {
            starting_position: Some("Top-Center".to_string()),
            jiggle: Some(true),
            jiggle_intensity: Some("Low".to_string()),
            fade_in: Some(true),
            fade_out: Some(true),
            ..SpawnConfig::of_type("Stationary", 2.0)
        },
    );

    profiles
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceConfig::default(),
            engine: EngineConfig::default(),
            audio: AudioConfig::default(),
            profiles: default_profiles(),
        }
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_surface_width(),
            height: default_surface_height(),
            margin: default_surface_margin(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            jiggle_amount: default_jiggle_amount(),
            travel_distance: default_travel_distance(),
            arc_height: default_arc_height(),
            swivel_distance: default_swivel_distance(),
            sweep_interval_ms: default_sweep_interval_ms(),
            seed: None,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: default_audio_enabled(),
            sounds_root: default_sounds_root(),
            volume: default_volume(),
        }
    }
}

impl SurfaceConfig {
    pub fn to_layout(&self) -> SurfaceLayout {
        SurfaceLayout {
            width: self.width,
            height: self.height,
            margin: self.margin,
        }
    }
}

impl EngineConfig {
    pub fn to_factory_defaults(&self) -> FactoryDefaults {
        FactoryDefaults {
            jiggle_amount: self.jiggle_amount,
            travel_distance: self.travel_distance,
            arc_height: self.arc_height,
            swivel_distance: self.swivel_distance,
        }
    }
}

impl AppConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并输出警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(path = ?path, "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match Self::load_strict(path) {
            Ok(config) => {
                tracing::info!(path = ?path, profiles = config.profiles.len(), "配置文件加载成功");
                config
            }
            Err(e) => {
                tracing::warn!(error = %e, "配置文件加载失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 加载配置文件，失败时返回错误
    pub fn load_strict(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.surface.width > 0.0) || !(self.surface.height > 0.0) {
            return Err(ConfigError::ValidationFailed(format!(
                "覆盖层尺寸必须为正数: {}x{}",
                self.surface.width, self.surface.height
            )));
        }

        if !(0.0..0.5).contains(&self.surface.margin) {
            return Err(ConfigError::ValidationFailed(
                "覆盖层边距必须在 0.0 - 0.5 之间".to_string(),
            ));
        }

        let engine_values = [
            ("jiggle_amount", self.engine.jiggle_amount),
            ("travel_distance", self.engine.travel_distance),
            ("arc_height", self.engine.arc_height),
            ("swivel_distance", self.engine.swivel_distance),
            ("sweep_interval_ms", self.engine.sweep_interval_ms),
        ];
        for (name, value) in engine_values {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(ConfigError::ValidationFailed(format!(
                    "engine.{} 必须为非负数，实际为 {}",
                    name, value
                )));
            }
        }

        if self.audio.volume < 0.0 || self.audio.volume > 1.0 {
            return Err(ConfigError::ValidationFailed(
                "音量必须在 0.0 - 1.0 之间".to_string(),
            ));
        }

        Ok(())
    }

    /// 按配置创建工厂
    pub fn build_factory(&self) -> AnimationFactory {
        AnimationFactory::new(self.surface.to_layout(), self.engine.to_factory_defaults())
    }

    /// 按配置创建控制器（随机源、巡检间隔、音效）
    pub fn build_controller(&self) -> AnimationController {
        let controller = AnimationController::new(self.build_factory())
            .with_sweep_interval(self.engine.sweep_interval_ms)
            .with_sound_player(audio::build_sound_player(&self.audio));

        match self.engine.seed {
            Some(seed) => controller.with_rng(StdRng::seed_from_u64(seed)),
            None => controller,
        }
    }
}

/// 配置错误
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// 读写失败
    #[error("配置 IO 错误: {path:?} - {message}")]
    Io { path: PathBuf, message: String },

    /// 解析失败
    #[error("配置解析失败: {path:?} - {message}")]
    Parse { path: PathBuf, message: String },

    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    SerializationFailed(String),

    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}
