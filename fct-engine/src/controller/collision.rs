//! # Collision 模块
//!
//! 控制器低频巡检的扩展点。
//!
//! 控制器每隔 `sweep_interval` 毫秒把所有活跃动画的快照交给
//! [`CollisionPolicy`]。默认策略 [`NoCollisionPolicy`] 什么也不做。

use crate::animation::AnimationId;
use crate::geometry::Point2D;
use crate::spec::AnimationKind;

/// 巡检时单个活跃动画的快照
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemSnapshot {
    pub id: AnimationId,
    pub kind: AnimationKind,
    /// 视觉项当前位置
    pub position: Point2D,
    /// 已播放时间（毫秒）
    pub elapsed: f32,
}

/// 碰撞处理策略
pub trait CollisionPolicy {
    /// 处理一次巡检
    ///
    /// 返回需要强制停止的动画。
    fn sweep(&mut self, now: f64, items: &[ItemSnapshot]) -> Vec<AnimationId>;
}

/// 不处理碰撞
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCollisionPolicy;

impl CollisionPolicy for NoCollisionPolicy {
    fn sweep(&mut self, now: f64, items: &[ItemSnapshot]) -> Vec<AnimationId> {
        tracing::trace!(now, active = items.len(), "碰撞巡检");
        Vec::new()
    }
}
