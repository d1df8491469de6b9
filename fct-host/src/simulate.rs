//! # Simulate 模块
//!
//! 无渲染模拟：按时间轴回放一组文字事件，以固定步长驱动覆盖层，
//! 最后汇总生成、结束、停止与视觉项释放情况。
//!
//! 事件文件格式（JSON 数组）：
//!
//! ```json
//! [
//!   { "at_ms": 0,   "category": "damage", "text": "-120" },
//!   { "at_ms": 250, "category": "status", "text": "Stunned", "icon": "icons/stun.png" }
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::AppConfig;
use crate::headless::HeadlessItemFactory;
use crate::overlay::{FloatingTextOverlay, TextEvent};

/// 默认模拟步长（毫秒，约 60 FPS）
pub const DEFAULT_STEP_MS: f32 = 16.0;

/// 最后一个事件之后允许继续运行的最长时间（毫秒）
pub const DEFAULT_TAIL_MS: f32 = 30_000.0;

/// 时间轴上的一条事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimEvent {
    /// 触发时间（毫秒）
    #[serde(default)]
    pub at_ms: f32,
    #[serde(flatten)]
    pub event: TextEvent,
}

impl SimEvent {
    pub fn new(at_ms: f32, event: TextEvent) -> Self {
        Self { at_ms, event }
    }
}

/// 模拟参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationOptions {
    pub step_ms: f32,
    pub tail_ms: f32,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            step_ms: DEFAULT_STEP_MS,
            tail_ms: DEFAULT_TAIL_MS,
        }
    }
}

/// 模拟报告
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationReport {
    pub events: usize,
    pub spawned: u64,
    pub unknown_category: u64,
    pub rejected: u64,
    pub finished: u64,
    pub stopped: u64,
    pub ticks: u64,
    pub sweeps: u64,
    pub final_clock_ms: f64,
    pub peak_active: usize,
    /// 模拟结束后仍未释放的视觉项
    pub leaked: usize,
    /// 被释放超过一次的视觉项
    pub double_disposed: usize,
}

impl SimulationReport {
    /// 所有视觉项恰好释放一次
    pub fn is_clean(&self) -> bool {
        self.leaked == 0 && self.double_disposed == 0
    }
}

/// 单个分类配置的检查结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileCheck {
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProfileCheck {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// 模拟错误
#[derive(Debug, Clone, Error)]
pub enum SimulationError {
    #[error("事件文件读取失败: {path:?} - {message}")]
    Io { path: PathBuf, message: String },

    #[error("事件文件解析失败: {path:?} - {message}")]
    Parse { path: PathBuf, message: String },

    #[error("模拟参数无效: {0}")]
    InvalidOptions(String),
}

/// 读取事件文件
pub fn load_events(path: impl AsRef<Path>) -> Result<Vec<SimEvent>, SimulationError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| SimulationError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| SimulationError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// 运行模拟
///
/// 事件按 `at_ms` 排序（同一时刻保持原顺序），在到达对应时刻的那一步生成。
/// 所有事件生成且没有活动动画时结束；超过最后一个事件 `tail_ms` 后仍未结束的动画被停止。
pub fn run(
    config: &AppConfig,
    events: &[SimEvent],
    options: SimulationOptions,
) -> Result<SimulationReport, SimulationError> {
    if !(options.step_ms > 0.0) || !options.step_ms.is_finite() {
        return Err(SimulationError::InvalidOptions(format!(
            "步长必须为正数，实际为 {}",
            options.step_ms
        )));
    }
    if !(options.tail_ms >= 0.0) {
        return Err(SimulationError::InvalidOptions(format!(
            "收尾时长必须为非负数，实际为 {}",
            options.tail_ms
        )));
    }

    let mut timeline: Vec<&SimEvent> = events.iter().collect();
    timeline.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
    let last_at = timeline.last().map_or(0.0, |e| e.at_ms.max(0.0));
    let deadline = f64::from(last_at) + f64::from(options.tail_ms);

    let mut overlay = FloatingTextOverlay::from_config(config, HeadlessItemFactory::new());
    let mut report = SimulationReport {
        events: timeline.len(),
        ..Default::default()
    };
    let mut next = 0;

    tracing::info!(events = timeline.len(), step_ms = options.step_ms, "开始模拟");

    loop {
        let now = overlay.controller().clock();
        while next < timeline.len() && f64::from(timeline[next].at_ms) <= now {
            overlay.show(&timeline[next].event);
            next += 1;
        }
        report.peak_active = report.peak_active.max(overlay.controller().active_count());

        if next >= timeline.len() && overlay.controller().active_count() == 0 {
            break;
        }
        if now >= deadline {
            tracing::warn!(
                clock = now,
                active = overlay.controller().active_count(),
                "模拟超时，停止剩余动画"
            );
            overlay.teardown();
            break;
        }

        overlay.tick(options.step_ms);
        report.ticks += 1;
    }

    let stats = overlay.stats();
    report.spawned = stats.spawned;
    report.unknown_category = stats.unknown_category;
    report.rejected = stats.rejected;
    report.finished = stats.finished;
    report.stopped = stats.stopped;
    report.sweeps = overlay.controller().sweeps_run();
    report.final_clock_ms = overlay.controller().clock();
    report.leaked = overlay.items().live_count();
    report.double_disposed = overlay.items().double_disposed();

    tracing::info!(
        spawned = report.spawned,
        finished = report.finished,
        stopped = report.stopped,
        leaked = report.leaked,
        "模拟结束"
    );
    Ok(report)
}

/// 检查所有分类配置能否构建
pub fn check_profiles(config: &AppConfig) -> Vec<ProfileCheck> {
    let factory = config.build_factory();
    config
        .profiles
        .iter()
        .map(|(category, profile)| match factory.build_spec(profile) {
            Ok(spec) => ProfileCheck {
                category: category.clone(),
                kind: Some(spec.kind.name().to_string()),
                duration_ms: Some(spec.duration),
                error: None,
            },
            Err(e) => ProfileCheck {
                category: category.clone(),
                kind: None,
                duration_ms: None,
                error: Some(e.to_string()),
            },
        })
        .collect()
}
