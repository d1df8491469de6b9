//! # Host 层
//!
//! 浮动战斗文字的宿主层实现。
//!
//! ## 架构说明
//!
//! Host 层负责：
//! - 配置加载与校验（覆盖层尺寸、引擎默认值、事件分类）
//! - 外部事件到视觉项的转换
//! - 音效播放
//! - 无渲染模拟（CLI）
//!
//! Host 层不包含动画逻辑，轨迹与生命周期全部由 `fct-engine` 完成。

pub mod audio;
pub mod config;
pub mod headless;
pub mod overlay;
pub mod simulate;

pub use audio::{DryRunSoundPlayer, build_sound_player};
pub use config::{AppConfig, AudioConfig, ConfigError, EngineConfig, SurfaceConfig};
pub use headless::HeadlessItemFactory;
pub use overlay::{FloatingTextOverlay, ItemFactory, OverlayStats, TextEvent};
pub use simulate::{
    ProfileCheck, SimEvent, SimulationError, SimulationOptions, SimulationReport,
};
