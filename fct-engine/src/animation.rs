//! # Animation 模块
//!
//! 单个动画实例与其状态机。
//!
//! ```text
//! Idle ──play()──► Playing ──elapsed ≥ duration──► Finished
//!   │                 │
//!   └──────stop()─────┴──────────────────────────► Stopped
//! ```
//!
//! `Finished` 与 `Stopped` 都是终止状态，完成通知通过
//! [`Animation::take_completion`] 恰好取出一次。动画本身不持有视觉项，
//! 每次更新只返回一帧 [`Frame`]。

use std::fmt;

use rand::RngCore;

use crate::geometry::Frame;
use crate::modifiers::JiggleState;
use crate::sound::SoundPlayer;
use crate::spec::{AnimationKind, AnimationSpec};

/// 动画 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub u64);

impl AnimationId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// 获取内部 ID 值
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnimationId({})", self.0)
    }
}

/// 动画状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// 已创建，尚未开始
    #[default]
    Idle,
    /// 正在播放
    Playing,
    /// 自然结束
    Finished,
    /// 被显式停止
    Stopped,
}

impl AnimationState {
    /// 是否需要每帧更新
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// 是否已结束
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Stopped)
    }
}

/// 结束原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionReason {
    Finished,
    Stopped,
}

/// 动画事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    /// 动画开始播放
    Started(AnimationId),
    /// 动画自然结束
    Finished(AnimationId),
    /// 动画被停止
    Stopped(AnimationId),
}

impl AnimationEvent {
    pub fn id(&self) -> AnimationId {
        match self {
            Self::Started(id) | Self::Finished(id) | Self::Stopped(id) => *id,
        }
    }

    /// 由结束原因生成终止事件
    pub fn completed(id: AnimationId, reason: CompletionReason) -> Self {
        match reason {
            CompletionReason::Finished => Self::Finished(id),
            CompletionReason::Stopped => Self::Stopped(id),
        }
    }
}

/// 动画实例
#[derive(Debug, Clone)]
pub struct Animation {
    id: AnimationId,
    spec: AnimationSpec,
    state: AnimationState,
    /// 开始播放时的时钟值（毫秒）
    started_at: f64,
    /// 已经过的时间（毫秒，不超过 duration）
    elapsed: f32,
    jiggle: Option<JiggleState>,
    last_frame: Option<Frame>,
    completion_taken: bool,
}

impl Animation {
    /// 创建新的动画
    ///
    /// 调用方负责事先通过 [`AnimationSpec::validate`] 校验参数。
    pub fn new(id: AnimationId, spec: AnimationSpec) -> Self {
        let jiggle = spec.modifiers.jiggle.map(|_| JiggleState::new());
        Self {
            id,
            spec,
            state: AnimationState::Idle,
            started_at: 0.0,
            elapsed: 0.0,
            jiggle,
            last_frame: None,
            completion_taken: false,
        }
    }

    pub fn id(&self) -> AnimationId {
        self.id
    }

    pub fn kind(&self) -> AnimationKind {
        self.spec.kind
    }

    pub fn spec(&self) -> &AnimationSpec {
        &self.spec
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// 线性进度（0.0 - 1.0）
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.spec.duration).clamp(0.0, 1.0)
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_active()
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// 最近一次更新产出的帧
    pub fn last_frame(&self) -> Option<Frame> {
        self.last_frame
    }

    /// 已开始的抖动迭代次数
    pub fn jiggle_iterations(&self) -> u32 {
        self.jiggle.as_ref().map_or(0, JiggleState::iterations)
    }

    // ========== 生命周期 ==========

    /// 开始播放
    ///
    /// 仅在 Idle 状态有效，返回是否真正开始。音效失败只记录警告。
    pub fn play(&mut self, now: f64, sound: &mut dyn SoundPlayer) -> bool {
        if self.state != AnimationState::Idle {
            tracing::debug!(id = %self.id, state = ?self.state, "动画不处于 Idle 状态，忽略 play");
            return false;
        }

        self.state = AnimationState::Playing;
        self.started_at = now;
        self.elapsed = 0.0;

        if let Some(sound_ref) = &self.spec.sound {
            if let Err(e) = sound.play(sound_ref) {
                tracing::warn!(id = %self.id, sound = %sound_ref, error = %e, "音效播放失败，动画继续");
            }
        }

        true
    }

    /// 推进到时钟 `now` 并计算当前帧
    ///
    /// 非 Playing 状态返回 `None`。到达 duration 时转入 Finished，
    /// 并返回终点帧。
    pub fn update(&mut self, now: f64, rng: &mut dyn RngCore) -> Option<Frame> {
        if !self.state.is_active() {
            return None;
        }

        let duration = self.spec.duration;
        // 绝对时钟用 f64，只有相对时间转成 f32
        self.elapsed = ((now - self.started_at).max(0.0) as f32).min(duration);

        let mut frame = self.spec.frame_at(self.elapsed);
        if let (Some(jiggle), Some(state)) = (&self.spec.modifiers.jiggle, self.jiggle.as_mut()) {
            frame.position = frame.position + state.offset_at(jiggle, self.elapsed, duration, rng);
        }

        if self.elapsed >= duration {
            self.state = AnimationState::Finished;
        }

        self.last_frame = Some(frame);
        Some(frame)
    }

    /// 停止动画
    ///
    /// 在 Idle 或 Playing 状态有效，返回是否真正停止。重复调用是安全的空操作。
    pub fn stop(&mut self) -> bool {
        if self.state.is_terminal() {
            tracing::debug!(id = %self.id, state = ?self.state, "动画已结束，忽略 stop");
            return false;
        }
        self.state = AnimationState::Stopped;
        true
    }

    /// 取出完成通知
    ///
    /// 进入终止状态后第一次调用返回结束原因，之后恒为 `None`。
    pub fn take_completion(&mut self) -> Option<CompletionReason> {
        if self.completion_taken {
            return None;
        }
        let reason = match self.state {
            AnimationState::Finished => CompletionReason::Finished,
            AnimationState::Stopped => CompletionReason::Stopped,
            AnimationState::Idle | AnimationState::Playing => return None,
        };
        self.completion_taken = true;
        Some(reason)
    }
}
