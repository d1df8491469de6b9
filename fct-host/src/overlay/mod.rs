//! # Overlay 模块
//!
//! 浮动文字覆盖层：外部事件 → 视觉项 → 动画。
//!
//! 覆盖层持有控制器与分类配置。收到 [`TextEvent`] 时按分类查找动画配置，
//! 向 [`ItemFactory`] 申请一个视觉项，再交给控制器生成动画。
//! 视觉项的渲染由 `ItemFactory` 的实现负责，覆盖层只关心生命周期。

use fct_engine::{AnimatedItem, AnimationController, AnimationEvent, AnimationId, SpawnConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::AppConfig;

/// 文字事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextEvent {
    /// 事件分类（对应配置中的 profile 名）
    pub category: String,
    /// 显示文本
    pub text: String,
    /// 图标路径
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl TextEvent {
    pub fn new(category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            text: text.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// 视觉项工厂（由渲染层实现）
pub trait ItemFactory {
    /// 为事件创建一个新的视觉项
    fn create_item(&mut self, event: &TextEvent) -> Box<dyn AnimatedItem>;
}

/// 覆盖层统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverlayStats {
    /// 成功生成的动画数
    pub spawned: u64,
    /// 分类未知而被忽略的事件数
    pub unknown_category: u64,
    /// 配置构建失败的事件数
    pub rejected: u64,
    /// 自然结束的动画数
    pub finished: u64,
    /// 被停止的动画数
    pub stopped: u64,
}

/// 浮动文字覆盖层
pub struct FloatingTextOverlay<F: ItemFactory> {
    controller: AnimationController,
    profiles: BTreeMap<String, SpawnConfig>,
    items: F,
    stats: OverlayStats,
}

impl<F: ItemFactory> FloatingTextOverlay<F> {
    pub fn new(
        controller: AnimationController,
        profiles: BTreeMap<String, SpawnConfig>,
        items: F,
    ) -> Self {
        Self {
            controller,
            profiles,
            items,
            stats: OverlayStats::default(),
        }
    }

    /// 按应用配置创建
    pub fn from_config(config: &AppConfig, items: F) -> Self {
        Self::new(config.build_controller(), config.profiles.clone(), items)
    }

    /// 显示一条事件
    ///
    /// 分类未知或配置无效时不生成任何东西，只记录警告。
    pub fn show(&mut self, event: &TextEvent) -> Option<AnimationId> {
        let Some(profile) = find_profile(&self.profiles, &event.category) else {
            tracing::warn!(category = %event.category, text = %event.text, "未知事件分类，忽略");
            self.stats.unknown_category += 1;
            return None;
        };

        let item = self.items.create_item(event);
        match self.controller.setup_animation(profile, item) {
            Some(id) => {
                self.stats.spawned += 1;
                Some(id)
            }
            None => {
                self.stats.rejected += 1;
                None
            }
        }
    }

    /// 推进 `dt_ms` 毫秒
    pub fn tick(&mut self, dt_ms: f32) -> Vec<AnimationEvent> {
        let events = self.controller.tick(dt_ms);
        self.record(&events);
        events
    }

    /// 关闭覆盖层：停止并释放所有动画
    pub fn teardown(&mut self) -> usize {
        let stopped = self.controller.stop_all();
        let events = self.controller.tick(0.0);
        self.record(&events);
        tracing::info!(stopped, "覆盖层已关闭");
        stopped
    }

    pub fn controller(&self) -> &AnimationController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut AnimationController {
        &mut self.controller
    }

    pub fn items(&self) -> &F {
        &self.items
    }

    pub fn stats(&self) -> OverlayStats {
        self.stats
    }

    /// 按分类查找动画配置（精确匹配优先，其次大小写不敏感）
    pub fn profile(&self, category: &str) -> Option<&SpawnConfig> {
        find_profile(&self.profiles, category)
    }

    fn record(&mut self, events: &[AnimationEvent]) {
        for event in events {
            match event {
                AnimationEvent::Started(_) => {}
                AnimationEvent::Finished(_) => self.stats.finished += 1,
                AnimationEvent::Stopped(_) => self.stats.stopped += 1,
            }
        }
    }
}

fn find_profile<'a>(
    profiles: &'a BTreeMap<String, SpawnConfig>,
    category: &str,
) -> Option<&'a SpawnConfig> {
    profiles.get(category).or_else(|| {
        profiles
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(category))
            .map(|(_, profile)| profile)
    })
}

impl<F: ItemFactory> Drop for FloatingTextOverlay<F> {
    fn drop(&mut self) {
        if self.controller.active_count() > 0 {
            self.controller.stop_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessItemFactory;

    fn overlay() -> FloatingTextOverlay<HeadlessItemFactory> {
        let mut config = AppConfig::default();
        config.engine.seed = Some(3);
        config.audio.enabled = false;
        FloatingTextOverlay::from_config(&config, HeadlessItemFactory::new())
    }

    #[test]
    fn test_show_and_finish() {
        let mut overlay = overlay();
        let id = overlay.show(&TextEvent::new("damage", "-120"));
        assert!(id.is_some());
        assert_eq!(overlay.controller().active_count(), 1);

        for _ in 0..100 {
            overlay.tick(16.0);
        }
        assert_eq!(overlay.controller().active_count(), 0);
        assert_eq!(overlay.stats().finished, 1);
        assert_eq!(overlay.items().live_count(), 0);
    }

    #[test]
    fn test_unknown_category() {
        let mut overlay = overlay();
        assert_eq!(overlay.show(&TextEvent::new("lightning", "zap")), None);
        assert_eq!(overlay.stats().unknown_category, 1);
        assert_eq!(overlay.items().created(), 0);
    }

    #[test]
    fn test_category_lookup_ignores_case() {
        let mut overlay = overlay();
        assert!(overlay.profile("damage").is_some());
        assert!(overlay.profile("DAMAGE").is_some());
        assert!(overlay.profile("unknown").is_none());

        assert!(overlay.show(&TextEvent::new("Heal", "+5")).is_some());
        assert_eq!(overlay.stats().spawned, 1);
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let mut profiles = BTreeMap::new();
        profiles.insert("broken".to_string(), SpawnConfig::of_type("Spiral", 1.0));
        let mut overlay = FloatingTextOverlay::new(
            AnimationController::default(),
            profiles,
            HeadlessItemFactory::new(),
        );

        assert_eq!(overlay.show(&TextEvent::new("broken", "??")), None);
        assert_eq!(overlay.stats().rejected, 1);
        assert_eq!(overlay.items().created(), 1);
        assert_eq!(overlay.items().live_count(), 0);
    }

    #[test]
    fn test_teardown_releases_everything() {
        let mut overlay = overlay();
        overlay.show(&TextEvent::new("heal", "+40"));
        overlay.show(&TextEvent::new("status", "Stunned").with_icon("icons/stun.png"));
        overlay.tick(16.0);

        assert_eq!(overlay.teardown(), 2);
        assert_eq!(overlay.stats().stopped, 2);
        assert_eq!(overlay.items().live_count(), 0);
        assert!(overlay.items().items().iter().all(|item| item.dispose_count() == 1));
    }
}
