//! # Controller 模块
//!
//! 管理所有并发播放的动画：接收生成请求、推进时钟、释放结束的视觉项。
//!
//! ## 时钟模型
//!
//! 控制器持有自己的时钟（毫秒）。宿主每帧调用 [`AnimationController::tick`]
//! 传入帧间隔，或调用 [`AnimationController::advance_to`] 传入绝对时间。
//! 时钟只会前进：负的间隔与回退的绝对时间被视为 0 并记录警告。
//!
//! ## 完成处理
//!
//! 同一次 `tick` 内：先更新所有 Playing 动画并写入视觉项，
//! 再对进入终止状态的动画执行「移除 → 释放视觉项 → 发出通知」，
//! 最后按巡检间隔运行碰撞策略。通知在 `tick` 返回前同步送达。
//!
//! ```rust,ignore
//! let mut controller = AnimationController::new(AnimationFactory::default());
//! let id = controller.setup_animation(&config, item.boxed());
//! loop {
//!     for event in controller.tick(16.0) {
//!         // ...
//!     }
//! }
//! ```

mod collision;
mod registry;

pub use collision::{CollisionPolicy, ItemSnapshot, NoCollisionPolicy};
pub use registry::{ActiveAnimation, AnimationRegistry};

use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::animation::{Animation, AnimationEvent, AnimationId, CompletionReason};
use crate::error::{BuildError, BuildResult};
use crate::factory::{AnimationFactory, SpawnConfig};
use crate::item::{AnimatedItem, ItemHandle};
use crate::sound::{NullSoundPlayer, SoundPlayer};
use crate::spec::{AnimationKind, AnimationSpec};

/// 默认巡检间隔（毫秒）
pub const DEFAULT_SWEEP_INTERVAL_MS: f32 = 1000.0;

/// 完成通知
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionNotice {
    pub id: AnimationId,
    /// 所属类型
    pub kind: AnimationKind,
    pub reason: CompletionReason,
}

impl CompletionNotice {
    /// 注册表分类名
    pub fn category(&self) -> &'static str {
        self.kind.category()
    }
}

type Subscriber = Box<dyn FnMut(&CompletionNotice)>;

/// 动画控制器
pub struct AnimationController {
    factory: AnimationFactory,
    registry: AnimationRegistry,
    /// 当前时钟（毫秒）
    clock: f64,
    next_id: u64,
    rng: Box<dyn RngCore>,
    sound: Box<dyn SoundPlayer>,
    collision: Box<dyn CollisionPolicy>,
    subscribers: Vec<Subscriber>,
    /// 待返回的事件队列
    events: Vec<AnimationEvent>,
    sweep_interval: f32,
    since_sweep: f32,
    sweeps_run: u64,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self::new(AnimationFactory::default())
    }
}

impl std::fmt::Debug for AnimationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationController")
            .field("clock", &self.clock)
            .field("active", &self.registry.len())
            .field("subscribers", &self.subscribers.len())
            .field("sweep_interval", &self.sweep_interval)
            .field("sweeps_run", &self.sweeps_run)
            .finish()
    }
}

impl AnimationController {
    /// 创建控制器（系统熵随机源、静音播放器、不处理碰撞）
    pub fn new(factory: AnimationFactory) -> Self {
        Self {
            factory,
            registry: AnimationRegistry::new(),
            clock: 0.0,
            next_id: 1,
            rng: Box::new(StdRng::from_entropy()),
            sound: Box::new(NullSoundPlayer),
            collision: Box::new(NoCollisionPolicy),
            subscribers: Vec::new(),
            events: Vec::new(),
            sweep_interval: DEFAULT_SWEEP_INTERVAL_MS,
            since_sweep: 0.0,
            sweeps_run: 0,
        }
    }

    /// 替换随机源（测试中使用固定种子）
    pub fn with_rng(mut self, rng: impl RngCore + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_sound_player(mut self, player: impl SoundPlayer + 'static) -> Self {
        self.sound = Box::new(player);
        self
    }

    pub fn with_collision_policy(mut self, policy: impl CollisionPolicy + 'static) -> Self {
        self.collision = Box::new(policy);
        self
    }

    /// 设置巡检间隔（毫秒），非正值关闭巡检
    pub fn with_sweep_interval(mut self, interval_ms: f32) -> Self {
        self.sweep_interval = interval_ms;
        self
    }

    /// 订阅完成通知
    pub fn subscribe(&mut self, subscriber: impl FnMut(&CompletionNotice) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    // ========== 生成 ==========

    /// 按配置生成动画
    ///
    /// 构建失败时记录警告、立即释放视觉项并返回 `None`。
    pub fn setup_animation(
        &mut self,
        config: &SpawnConfig,
        item: Box<dyn AnimatedItem>,
    ) -> Option<AnimationId> {
        match self.try_setup_animation(config, item) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(
                    kind = config.kind.as_deref().unwrap_or("<missing>"),
                    error = %e,
                    "动画构建失败，未生成"
                );
                None
            }
        }
    }

    /// 按配置生成动画，返回构建错误
    pub fn try_setup_animation(
        &mut self,
        config: &SpawnConfig,
        item: Box<dyn AnimatedItem>,
    ) -> BuildResult<AnimationId> {
        let mut handle = ItemHandle::new(item);
        match self.factory.build_spec(config) {
            Ok(spec) => Ok(self.start(spec, handle)),
            Err(e) => {
                handle.release();
                Err(e)
            }
        }
    }

    /// 生成已解析好的动画
    pub fn spawn(&mut self, spec: AnimationSpec, item: Box<dyn AnimatedItem>) -> BuildResult<AnimationId> {
        let mut handle = ItemHandle::new(item);
        if let Err(e) = spec.validate() {
            handle.release();
            return Err(BuildError::InvalidSpec(e));
        }
        Ok(self.start(spec, handle))
    }

    fn start(&mut self, spec: AnimationSpec, mut item: ItemHandle) -> AnimationId {
        let id = AnimationId::new(self.next_id);
        self.next_id += 1;

        let mut animation = Animation::new(id, spec);
        animation.play(self.clock, self.sound.as_mut());
        if let Some(frame) = animation.update(self.clock, self.rng.as_mut()) {
            item.apply(&frame);
        }

        tracing::debug!(id = %id, kind = %animation.kind(), clock = self.clock, "动画开始");
        self.events.push(AnimationEvent::Started(id));

        if let Err(rejected) = self.registry.insert(ActiveAnimation::new(animation, item)) {
            tracing::warn!(id = %rejected.id(), "动画 ID 重复，丢弃");
        }
        id
    }

    // ========== 时钟 ==========

    /// 推进 `dt_ms` 毫秒
    pub fn tick(&mut self, dt_ms: f32) -> Vec<AnimationEvent> {
        let dt = if dt_ms >= 0.0 && dt_ms.is_finite() {
            dt_ms
        } else {
            tracing::warn!(dt_ms, "帧间隔无效，按 0 处理");
            0.0
        };
        self.clock += f64::from(dt);
        self.step(dt)
    }

    /// 推进到绝对时间 `now_ms`
    pub fn advance_to(&mut self, now_ms: f64) -> Vec<AnimationEvent> {
        if !(now_ms >= self.clock) || !now_ms.is_finite() {
            tracing::warn!(now_ms, clock = self.clock, "时钟不能回退，忽略");
            return self.step(0.0);
        }
        let dt = (now_ms - self.clock) as f32;
        self.clock = now_ms;
        self.step(dt)
    }

    fn step(&mut self, dt: f32) -> Vec<AnimationEvent> {
        let now = self.clock;
        let mut terminal = Vec::new();

        for entry in self.registry.iter_mut() {
            if let Some(frame) = entry.animation.update(now, self.rng.as_mut()) {
                entry.item.apply(&frame);
            }
            if entry.animation.is_terminal() {
                terminal.push(entry.id());
            }
        }

        for id in terminal {
            self.retire(id);
        }

        if self.sweep_interval > 0.0 {
            self.since_sweep += dt;
            if self.since_sweep >= self.sweep_interval {
                self.since_sweep %= self.sweep_interval;
                self.run_sweep();
            }
        }

        std::mem::take(&mut self.events)
    }

    // ========== 停止与清理 ==========

    /// 强制停止动画
    ///
    /// 视觉项立即释放，通知同步送达。未知或已移除的 ID 返回 `false`。
    pub fn stop_animation(&mut self, id: AnimationId) -> bool {
        let Some(entry) = self.registry.get_mut(id) else {
            tracing::debug!(id = %id, "动画不存在或已移除，忽略 stop");
            return false;
        };
        if !entry.animation.stop() {
            return false;
        }
        self.retire(id);
        true
    }

    /// 停止所有动画，返回停止的数量
    pub fn stop_all(&mut self) -> usize {
        let ids = self.registry.ids();
        let stopped = ids.into_iter().filter(|id| self.stop_animation(*id)).count();
        if stopped > 0 {
            tracing::debug!(stopped, "已停止所有动画");
        }
        stopped
    }

    /// 移除并释放一个已结束的动画
    fn retire(&mut self, id: AnimationId) {
        let Some(mut entry) = self.registry.remove(id) else {
            tracing::debug!(id = %id, "动画已被移除");
            return;
        };

        let kind = entry.animation.kind();
        let reason = entry.animation.take_completion();
        entry.item.release();

        let Some(reason) = reason else {
            return;
        };

        self.events.push(AnimationEvent::completed(id, reason));
        let notice = CompletionNotice { id, kind, reason };
        for subscriber in &mut self.subscribers {
            subscriber(&notice);
        }
        tracing::debug!(id = %id, reason = ?reason, "动画结束");
    }

    fn run_sweep(&mut self) {
        let snapshots: Vec<ItemSnapshot> = self
            .registry
            .iter()
            .map(|entry| ItemSnapshot {
                id: entry.id(),
                kind: entry.animation.kind(),
                position: entry
                    .item
                    .position()
                    .unwrap_or_else(|| entry.animation.spec().trajectory.start()),
                elapsed: entry.animation.elapsed(),
            })
            .collect();

        self.sweeps_run += 1;
        let to_stop = self.collision.sweep(self.clock, &snapshots);
        for id in to_stop {
            self.stop_animation(id);
        }
    }

    // ========== 查询方法 ==========

    pub fn factory(&self) -> &AnimationFactory {
        &self.factory
    }

    pub fn registry(&self) -> &AnimationRegistry {
        &self.registry
    }

    /// 活跃动画数量
    pub fn active_count(&self) -> usize {
        self.registry.len()
    }

    /// 某一类型的活跃动画数量
    pub fn category_count(&self, kind: AnimationKind) -> usize {
        self.registry.category_len(kind)
    }

    pub fn active_ids(&self) -> Vec<AnimationId> {
        self.registry.ids()
    }

    pub fn is_active(&self, id: AnimationId) -> bool {
        self.registry.contains(id)
    }

    /// 当前时钟（毫秒）
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// 已运行的巡检次数
    pub fn sweeps_run(&self) -> u64 {
        self.sweeps_run
    }
}
