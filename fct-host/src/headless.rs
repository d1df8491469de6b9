//! # Headless 模块
//!
//! 无渲染的视觉项实现，用于模拟运行与测试。
//! 视觉项基于共享状态的 [`SharedItem`]，创建后仍可在外部读取位置与释放状态。

use fct_engine::{AnimatedItem, Point2D, SharedItem};

use crate::overlay::{ItemFactory, TextEvent};

/// 无渲染视觉项工厂
#[derive(Debug, Default)]
pub struct HeadlessItemFactory {
    items: Vec<SharedItem>,
}

impl HeadlessItemFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已创建的所有视觉项（按创建顺序）
    pub fn items(&self) -> &[SharedItem] {
        &self.items
    }

    pub fn created(&self) -> usize {
        self.items.len()
    }

    /// 尚未释放的视觉项数量
    pub fn live_count(&self) -> usize {
        self.items.iter().filter(|item| !item.is_disposed()).count()
    }

    /// 被释放超过一次的视觉项数量
    pub fn double_disposed(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.dispose_count() > 1)
            .count()
    }
}

impl ItemFactory for HeadlessItemFactory {
    fn create_item(&mut self, event: &TextEvent) -> Box<dyn AnimatedItem> {
        let label = match &event.icon {
            Some(icon) => format!("[{}] {}", icon, event.text),
            None => event.text.clone(),
        };
        let item = SharedItem::new(label, Point2D::zero());
        self.items.push(item.clone());
        item.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_factory_tracks_items() {
        let mut factory = HeadlessItemFactory::new();
        let mut first = factory.create_item(&TextEvent::new("damage", "-5"));
        let _second = factory.create_item(&TextEvent::new("status", "Slow").with_icon("slow.png"));

        assert_eq!(factory.created(), 2);
        assert_eq!(factory.items()[1].label(), "[slow.png] Slow");

        first.dispose();
        assert_eq!(factory.live_count(), 1);
        assert_eq!(factory.double_disposed(), 0);
    }
}
