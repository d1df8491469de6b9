//! # Audio 模块
//!
//! 动画一次性音效的播放实现。
//!
//! - [`DryRunSoundPlayer`]：只检查音效文件是否存在并计数，不输出声音
//! - `RodioSoundPlayer`：使用 rodio 实际播放（需要 `audio` feature），
//!   支持 MP3, WAV, FLAC, OGG 格式
//!
//! 播放失败由引擎记录警告，动画不受影响。

#[cfg(feature = "audio")]
mod rodio_player;

#[cfg(feature = "audio")]
pub use rodio_player::RodioSoundPlayer;

use fct_engine::{NullSoundPlayer, SoundError, SoundPlayer, SoundRef};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::config::AudioConfig;

/// 解析音效路径
///
/// 绝对路径原样返回，相对路径拼接到音效根目录下。
pub fn resolve_sound_path(root: &Path, sound: &SoundRef) -> PathBuf {
    let path = Path::new(sound.as_str());
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// 按配置选择播放器
///
/// 关闭音效时返回静音播放器；启用 `audio` feature 时尝试打开音频设备，
/// 失败则降级为 [`DryRunSoundPlayer`]。
pub fn build_sound_player(config: &AudioConfig) -> Box<dyn SoundPlayer> {
    if !config.enabled {
        return Box::new(NullSoundPlayer);
    }

    #[cfg(feature = "audio")]
    {
        match RodioSoundPlayer::new(&config.sounds_root, config.volume) {
            Ok(player) => return Box::new(player),
            Err(e) => {
                tracing::warn!(error = %e, "无法初始化音频输出，降级为无声模式");
            }
        }
    }

    Box::new(DryRunSoundPlayer::new(&config.sounds_root))
}

/// 无声播放器：校验文件存在并计数
#[derive(Debug, Clone)]
pub struct DryRunSoundPlayer {
    root: PathBuf,
    played: Rc<Cell<u64>>,
}

impl DryRunSoundPlayer {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            played: Rc::new(Cell::new(0)),
        }
    }

    /// 共享的播放计数（克隆出的实例共用同一计数）
    pub fn played(&self) -> u64 {
        self.played.get()
    }
}

impl SoundPlayer for DryRunSoundPlayer {
    fn play(&mut self, sound: &SoundRef) -> Result<(), SoundError> {
        let path = resolve_sound_path(&self.root, sound);
        if !path.exists() {
            return Err(SoundError::NotFound {
                path: path.display().to_string(),
            });
        }
        self.played.set(self.played.get() + 1);
        tracing::debug!(path = ?path, "播放音效（无声）");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_sound_path() {
        let root = Path::new("sounds");
        assert_eq!(
            resolve_sound_path(root, &SoundRef::new("hit.wav")),
            PathBuf::from("sounds/hit.wav")
        );
        let absolute = std::env::temp_dir().join("crit.wav");
        assert_eq!(
            resolve_sound_path(root, &SoundRef::new(absolute.to_string_lossy())),
            absolute
        );
    }

    #[test]
    fn test_dry_run_player() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hit.wav"), b"RIFF").unwrap();

        let mut player = DryRunSoundPlayer::new(dir.path());
        let observer = player.clone();

        assert!(player.play(&SoundRef::new("hit.wav")).is_ok());
        assert!(matches!(
            player.play(&SoundRef::new("missing.wav")),
            Err(SoundError::NotFound { .. })
        ));
        assert_eq!(observer.played(), 1);
    }

    #[test]
    fn test_disabled_audio_is_silent() {
        let config = AudioConfig {
            enabled: false,
            ..Default::default()
        };
        let mut player = build_sound_player(&config);
        assert!(player.play(&SoundRef::new("does-not-exist.wav")).is_ok());
    }
}
