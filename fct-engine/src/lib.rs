//! # FCT Engine
//!
//! 浮动战斗文字（floating combat text）的动画引擎核心库。
//!
//! ## 架构概述
//!
//! `fct-engine` 是纯逻辑核心，不依赖任何渲染或窗口系统。
//! 它只修改宿主交给它的视觉项的位置、透明度与缩放：
//!
//! ```text
//! Host                              Engine
//!   │                                  │
//!   │── setup_animation(config, item) ─►│ Factory → AnimationSpec → Animation
//!   │                                  │
//!   │── tick(dt) ──────────────────────►│ 更新所有动画，写入视觉项
//!   │◄─ Vec<AnimationEvent> ───────────│ 结束的动画已移除并释放视觉项
//! ```
//!
//! ## 核心类型
//!
//! - [`EasingCurve`]：缓动曲线目录
//! - [`Trajectory`]：位置轨迹（Directional / Parabola / Swivel / Stationary）
//! - [`Modifiers`]：淡入、淡出、抖动、缩放脉冲
//! - [`AnimationSpec`]：全数值化的动画参数
//! - [`Animation`]：单个动画的状态机
//! - [`AnimationFactory`]：声明式配置 → 动画参数
//! - [`AnimationController`]：并发动画的生命周期管理
//!
//! ## 使用示例
//!
//! ```ignore
//! use fct_engine::{AnimationController, SharedItem, SpawnConfig};
//!
//! let mut controller = AnimationController::default();
//! let item = SharedItem::new("-120", Default::default());
//! controller.setup_animation(&SpawnConfig::of_type("Parabola", 1.2), item.boxed());
//!
//! loop {
//!     let events = controller.tick(16.0);
//!     // ...
//! }
//! ```

pub mod animation;
pub mod controller;
pub mod easing;
pub mod error;
pub mod factory;
pub mod geometry;
pub mod item;
pub mod modifiers;
mod names;
pub mod sound;
pub mod spec;
pub mod trajectory;

pub use animation::{Animation, AnimationEvent, AnimationId, AnimationState, CompletionReason};
pub use controller::{
    ActiveAnimation, AnimationController, AnimationRegistry, CollisionPolicy, CompletionNotice,
    ItemSnapshot, NoCollisionPolicy,
};
pub use easing::EasingCurve;
pub use error::{BuildError, BuildResult, SoundError, SpecError};
pub use factory::{
    AnimationFactory, Direction, FactoryDefaults, JiggleIntensity, ScreenPosition, SpawnConfig,
    SurfaceLayout,
};
pub use geometry::{Frame, Point2D};
pub use item::{AnimatedItem, ItemHandle, ItemState, SharedItem};
pub use modifiers::{Fade, Jiggle, JiggleState, Modifiers, ScalePulse};
pub use sound::{NullSoundPlayer, SoundPlayer, SoundRef};
pub use spec::{AnimationKind, AnimationSpec};
pub use trajectory::{SwivelPhase, Trajectory};
