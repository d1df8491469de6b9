//! # Registry
//!
//! 活跃动画注册表：按类型分组，组内保持插入顺序，同一 ID 不会重复登记。
//!
//! `index` 记录每个 ID 所在的类型，查找只扫描该类型的分组。

use std::collections::{BTreeMap, HashMap};

use crate::animation::{Animation, AnimationId};
use crate::item::ItemHandle;
use crate::spec::AnimationKind;

/// 一个活跃动画及其独占的视觉项
#[derive(Debug)]
pub struct ActiveAnimation {
    pub animation: Animation,
    pub item: ItemHandle,
}

impl ActiveAnimation {
    pub fn new(animation: Animation, item: ItemHandle) -> Self {
        Self { animation, item }
    }

    pub fn id(&self) -> AnimationId {
        self.animation.id()
    }
}

/// 活跃动画注册表
#[derive(Debug, Default)]
pub struct AnimationRegistry {
    categories: BTreeMap<AnimationKind, Vec<ActiveAnimation>>,
    index: HashMap<AnimationId, AnimationKind>,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记动画
    ///
    /// ID 已存在时拒绝并原样返回条目。
    pub fn insert(&mut self, entry: ActiveAnimation) -> Result<(), ActiveAnimation> {
        if self.contains(entry.id()) {
            return Err(entry);
        }
        let kind = entry.animation.kind();
        self.index.insert(entry.id(), kind);
        self.categories.entry(kind).or_default().push(entry);
        Ok(())
    }

    /// 移除动画，不存在时返回 `None`
    pub fn remove(&mut self, id: AnimationId) -> Option<ActiveAnimation> {
        let (kind, index) = self.locate(id)?;
        let list = self.categories.get_mut(&kind)?;
        let entry = list.remove(index);
        if list.is_empty() {
            self.categories.remove(&kind);
        }
        self.index.remove(&id);
        Some(entry)
    }

    pub fn contains(&self, id: AnimationId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: AnimationId) -> Option<&ActiveAnimation> {
        let (kind, index) = self.locate(id)?;
        self.categories.get(&kind).and_then(|list| list.get(index))
    }

    pub fn get_mut(&mut self, id: AnimationId) -> Option<&mut ActiveAnimation> {
        let (kind, index) = self.locate(id)?;
        self.categories
            .get_mut(&kind)
            .and_then(|list| list.get_mut(index))
    }

    /// 按类型顺序、组内插入顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &ActiveAnimation> {
        self.categories.values().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ActiveAnimation> {
        self.categories.values_mut().flatten()
    }

    /// 某一类型的活跃动画（插入顺序）
    pub fn category(&self, kind: AnimationKind) -> &[ActiveAnimation] {
        self.categories.get(&kind).map_or(&[], Vec::as_slice)
    }

    /// 当前有活跃动画的类型
    pub fn categories(&self) -> impl Iterator<Item = AnimationKind> + '_ {
        self.categories.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category_len(&self, kind: AnimationKind) -> usize {
        self.category(kind).len()
    }

    pub fn ids(&self) -> Vec<AnimationId> {
        self.iter().map(ActiveAnimation::id).collect()
    }

    fn locate(&self, id: AnimationId) -> Option<(AnimationKind, usize)> {
        let kind = *self.index.get(&id)?;
        let index = self
            .categories
            .get(&kind)?
            .iter()
            .position(|entry| entry.id() == id)?;
        Some((kind, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point2D;
    use crate::item::SharedItem;
    use crate::spec::AnimationSpec;

    fn entry(id: u64, spec: AnimationSpec) -> (ActiveAnimation, SharedItem) {
        let item = SharedItem::new(format!("#{id}"), Point2D::zero());
        let entry = ActiveAnimation::new(
            Animation::new(AnimationId::new(id), spec),
            ItemHandle::new(item.boxed()),
        );
        (entry, item)
    }

    fn stationary() -> AnimationSpec {
        AnimationSpec::stationary(Point2D::zero(), 1000.0)
    }

    fn directional() -> AnimationSpec {
        AnimationSpec::directional(
            Point2D::zero(),
            Point2D::new(1.0, 0.0),
            1000.0,
            crate::easing::EasingCurve::Linear,
        )
    }

    #[test]
    fn test_insert_groups_by_kind_in_order() {
        let mut registry = AnimationRegistry::new();
        registry.insert(entry(1, stationary()).0).unwrap();
        registry.insert(entry(2, directional()).0).unwrap();
        registry.insert(entry(3, stationary()).0).unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.category_len(AnimationKind::Stationary), 2);
        assert_eq!(registry.category_len(AnimationKind::Pow), 0);
        let ids: Vec<_> = registry
            .category(AnimationKind::Stationary)
            .iter()
            .map(ActiveAnimation::id)
            .collect();
        assert_eq!(ids, vec![AnimationId::new(1), AnimationId::new(3)]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = AnimationRegistry::new();
        registry.insert(entry(1, stationary()).0).unwrap();
        let (duplicate, item) = entry(1, directional());
        let rejected = registry.insert(duplicate).unwrap_err();
        assert_eq!(rejected.id(), AnimationId::new(1));
        assert_eq!(registry.len(), 1);

        drop(rejected);
        assert_eq!(item.dispose_count(), 1);
    }

    #[test]
    fn test_remove_tolerates_missing() {
        let mut registry = AnimationRegistry::new();
        registry.insert(entry(1, stationary()).0).unwrap();

        assert!(registry.remove(AnimationId::new(1)).is_some());
        assert!(registry.remove(AnimationId::new(1)).is_none());
        assert!(registry.is_empty());
        assert_eq!(registry.categories().count(), 0);
    }

    #[test]
    fn test_lookup_after_mixed_removals() {
        let mut registry = AnimationRegistry::new();
        for id in 1..=6 {
            let spec = if id % 2 == 0 { directional() } else { stationary() };
            registry.insert(entry(id, spec).0).unwrap();
        }

        assert!(registry.remove(AnimationId::new(3)).is_some());
        assert!(registry.remove(AnimationId::new(4)).is_some());

        assert_eq!(registry.len(), 4);
        assert!(!registry.contains(AnimationId::new(3)));
        assert_eq!(
            registry.get(AnimationId::new(5)).map(|e| e.animation.kind()),
            Some(AnimationKind::Stationary)
        );
        assert_eq!(
            registry.get_mut(AnimationId::new(6)).map(|e| e.id()),
            Some(AnimationId::new(6))
        );
        assert_eq!(registry.ids().len(), registry.len());
    }
}
