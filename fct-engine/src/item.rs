//! # Item 模块
//!
//! 视觉项接口与所有权句柄。
//!
//! ## 核心概念
//!
//! - [`AnimatedItem`]：外部渲染层提供的可设置位置/透明度/缩放的对象
//! - [`ItemHandle`]：独占持有一个视觉项，保证 `dispose` 恰好调用一次
//! - [`SharedItem`]：基于 `Rc<RefCell<T>>` 的内存实现，宿主外部仍可读取其状态
//!
//! 动画的运动计算与视觉项生命周期分离：动画只产出 [`Frame`]，
//! 由持有 `ItemHandle` 的控制器负责写入与释放。

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::geometry::{Frame, Point2D};

/// 可动画的视觉项
pub trait AnimatedItem {
    /// 当前位置
    fn position(&self) -> Point2D;

    fn set_position(&mut self, position: Point2D);

    fn set_opacity(&mut self, opacity: f32);

    fn set_scale(&mut self, scale: f32);

    /// 释放视觉资源
    ///
    /// 由 [`ItemHandle`] 保证只调用一次。
    fn dispose(&mut self);

    /// 一次性写入整帧
    fn apply_frame(&mut self, frame: &Frame) {
        self.set_position(frame.position);
        self.set_opacity(frame.opacity);
        self.set_scale(frame.scale);
    }
}

/// 视觉项的独占句柄
///
/// 释放后内部为空，后续写入被忽略。丢弃未释放的句柄时自动释放。
pub struct ItemHandle {
    item: Option<Box<dyn AnimatedItem>>,
}

impl ItemHandle {
    pub fn new(item: Box<dyn AnimatedItem>) -> Self {
        Self { item: Some(item) }
    }

    /// 写入一帧，已释放时返回 `false`
    pub fn apply(&mut self, frame: &Frame) -> bool {
        match self.item.as_mut() {
            Some(item) => {
                item.apply_frame(frame);
                true
            }
            None => false,
        }
    }

    /// 当前位置
    pub fn position(&self) -> Option<Point2D> {
        self.item.as_ref().map(|item| item.position())
    }

    /// 释放视觉项，返回本次调用是否真正执行了释放
    pub fn release(&mut self) -> bool {
        match self.item.take() {
            Some(mut item) => {
                item.dispose();
                true
            }
            None => false,
        }
    }

    pub fn is_released(&self) -> bool {
        self.item.is_none()
    }
}

impl From<Box<dyn AnimatedItem>> for ItemHandle {
    fn from(item: Box<dyn AnimatedItem>) -> Self {
        Self::new(item)
    }
}

impl Drop for ItemHandle {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for ItemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemHandle")
            .field("released", &self.is_released())
            .finish()
    }
}

/// [`SharedItem`] 的内部状态
#[derive(Debug, Clone, PartialEq)]
pub struct ItemState {
    /// 显示文本
    pub label: String,
    pub position: Point2D,
    pub opacity: f32,
    pub scale: f32,
    /// 是否已释放
    pub disposed: bool,
    /// `dispose` 被调用的次数
    pub dispose_count: u32,
    /// 已写入的帧数
    pub frames_applied: u64,
}

/// 共享状态的内存视觉项
///
/// 克隆出的实例指向同一份状态：一份交给控制器，另一份留在外部观察。
#[derive(Debug, Clone)]
pub struct SharedItem {
    inner: Rc<RefCell<ItemState>>,
}

impl SharedItem {
    pub fn new(label: impl Into<String>, position: Point2D) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ItemState {
                label: label.into(),
                position,
                opacity: 1.0,
                scale: 1.0,
                disposed: false,
                dispose_count: 0,
                frames_applied: 0,
            })),
        }
    }

    /// 当前状态快照
    pub fn snapshot(&self) -> ItemState {
        self.inner.borrow().clone()
    }

    pub fn label(&self) -> String {
        self.inner.borrow().label.clone()
    }

    pub fn opacity(&self) -> f32 {
        self.inner.borrow().opacity
    }

    pub fn scale(&self) -> f32 {
        self.inner.borrow().scale
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.borrow().disposed
    }

    pub fn dispose_count(&self) -> u32 {
        self.inner.borrow().dispose_count
    }

    pub fn frames_applied(&self) -> u64 {
        self.inner.borrow().frames_applied
    }

    /// 装箱为控制器可接收的视觉项
    pub fn boxed(&self) -> Box<dyn AnimatedItem> {
        Box::new(self.clone())
    }
}

impl AnimatedItem for SharedItem {
    fn position(&self) -> Point2D {
        self.inner.borrow().position
    }

    fn set_position(&mut self, position: Point2D) {
        self.inner.borrow_mut().position = position;
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.inner.borrow_mut().opacity = opacity;
    }

    fn set_scale(&mut self, scale: f32) {
        self.inner.borrow_mut().scale = scale;
    }

    fn dispose(&mut self) {
        let mut state = self.inner.borrow_mut();
        state.disposed = true;
        state.dispose_count += 1;
    }

    fn apply_frame(&mut self, frame: &Frame) {
        let mut state = self.inner.borrow_mut();
        state.position = frame.position;
        state.opacity = frame.opacity;
        state.scale = frame.scale;
        state.frames_applied += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_item_observes_writes() {
        let item = SharedItem::new("-120", Point2D::zero());
        let mut handle = ItemHandle::new(item.boxed());

        let frame = Frame {
            position: Point2D::new(3.0, 4.0),
            opacity: 0.5,
            scale: 1.25,
        };
        assert!(handle.apply(&frame));

        assert_eq!(handle.position(), Some(Point2D::new(3.0, 4.0)));
        assert_eq!(item.opacity(), 0.5);
        assert_eq!(item.scale(), 1.25);
        assert_eq!(item.frames_applied(), 1);
        assert_eq!(item.label(), "-120");
    }

    #[test]
    fn test_release_disposes_once() {
        let item = SharedItem::new("miss", Point2D::zero());
        let mut handle = ItemHandle::new(item.boxed());

        assert!(handle.release());
        assert!(!handle.release());
        assert!(handle.is_released());
        assert!(!handle.apply(&Frame::default()));
        drop(handle);

        assert!(item.is_disposed());
        assert_eq!(item.dispose_count(), 1);
    }

    #[test]
    fn test_drop_releases() {
        let item = SharedItem::new("+42", Point2D::zero());
        {
            let _handle = ItemHandle::new(item.boxed());
        }
        assert_eq!(item.dispose_count(), 1);
    }
}
