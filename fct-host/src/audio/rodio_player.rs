//! rodio 音效播放

use fct_engine::{SoundError, SoundPlayer, SoundRef};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use super::resolve_sound_path;

/// rodio 播放器
///
/// 每个音效使用一次性的 `Sink`，分离后自动播放完毕。
pub struct RodioSoundPlayer {
    /// 音频输出流（必须保持存活）
    _stream: OutputStream,
    /// 音频输出句柄
    stream_handle: OutputStreamHandle,
    root: PathBuf,
    /// 音量 (0.0 - 1.0)
    volume: f32,
}

impl RodioSoundPlayer {
    /// 打开默认音频设备
    pub fn new(root: impl AsRef<Path>, volume: f32) -> Result<Self, SoundError> {
        let (stream, stream_handle) =
            OutputStream::try_default().map_err(|e| SoundError::Unavailable {
                message: e.to_string(),
            })?;

        Ok(Self {
            _stream: stream,
            stream_handle,
            root: root.as_ref().to_path_buf(),
            volume: volume.clamp(0.0, 1.0),
        })
    }
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&mut self, sound: &SoundRef) -> Result<(), SoundError> {
        let full_path = resolve_sound_path(&self.root, sound);
        let display = full_path.display().to_string();

        let file = File::open(&full_path).map_err(|_| SoundError::NotFound {
            path: display.clone(),
        })?;

        let source = Decoder::new(BufReader::new(file)).map_err(|e| SoundError::Playback {
            path: display.clone(),
            message: e.to_string(),
        })?;

        let sink = Sink::try_new(&self.stream_handle).map_err(|e| SoundError::Playback {
            path: display.clone(),
            message: e.to_string(),
        })?;
        sink.set_volume(self.volume);
        sink.append(source);
        sink.detach();

        tracing::debug!(path = %display, "播放音效");
        Ok(())
    }
}
