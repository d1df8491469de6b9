//! # Sound 模块
//!
//! 一次性音效触发的抽象接口。
//!
//! 引擎只在动画开始播放时调用一次 [`SoundPlayer::play`]，
//! 失败只记录警告，动画照常进行。

use std::fmt;

use crate::error::SoundError;

/// 音效引用（相对路径或逻辑名，由播放器解析）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SoundRef(String);

impl SoundRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// 从配置字符串创建，空白字符串视为无音效
    pub fn from_config(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SoundRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 音效播放器
pub trait SoundPlayer {
    /// 播放一次音效（不阻塞）
    fn play(&mut self, sound: &SoundRef) -> Result<(), SoundError>;
}

impl<P: SoundPlayer + ?Sized> SoundPlayer for Box<P> {
    fn play(&mut self, sound: &SoundRef) -> Result<(), SoundError> {
        (**self).play(sound)
    }
}

/// 静音播放器
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSoundPlayer;

impl SoundPlayer for NullSoundPlayer {
    fn play(&mut self, sound: &SoundRef) -> Result<(), SoundError> {
        tracing::trace!(sound = %sound, "静音模式，跳过音效");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_ref_from_config() {
        assert_eq!(SoundRef::from_config(""), None);
        assert_eq!(SoundRef::from_config("   "), None);
        assert_eq!(
            SoundRef::from_config(" hit.wav "),
            Some(SoundRef::new("hit.wav"))
        );
    }

    #[test]
    fn test_null_player() {
        let mut player = NullSoundPlayer;
        assert!(player.play(&SoundRef::new("crit.ogg")).is_ok());
    }
}
