//! # Spawn Config
//!
//! 声明式的动画生成请求。所有字段均可缺省，缺省值由工厂填充；
//! 未识别的键在反序列化时被忽略。
//!
//! ```json
//! {
//!   "type": "Parabola",
//!   "subtype": "Up",
//!   "duration": 1.2,
//!   "starting_position": "Center",
//!   "direction": "Right",
//!   "easing_style": "OutQuad",
//!   "fade_out": true,
//!   "fade_out_percentage": 0.3
//! }
//! ```
//!
//! 百分比字段均为比例（0.3 表示 30%），`scale_percentage` 为峰值缩放比例（1.5 表示 150%）。

use serde::{Deserialize, Serialize};

use crate::error::{BuildError, BuildResult};

/// 动画生成配置
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// 动画类型（Directional / Parabola / Swivel / Stationary / Pow）
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// 子类型（Parabola: Up / Down）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    /// 时长（秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f32>,

    /// 起始站位
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_position: Option<String>,
    /// 结束站位（缺省时由方向与移动距离推导）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending_position: Option<String>,
    /// 移动方向
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    /// 移动距离（像素）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_distance: Option<f32>,
    /// 轨迹缓动
    #[serde(skip_serializing_if = "Option::is_none")]
    pub easing_style: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fade_in: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fade_in_percentage: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fade_in_easing_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fade_out: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fade_out_percentage: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fade_out_easing_style: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub jiggle: Option<bool>,
    /// 抖动强度（Low / Medium / High）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jiggle_intensity: Option<String>,

    /// 峰值缩放（Pow）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_percentage: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_1_percentage: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_2_percentage: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_1_easing_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_2_easing_style: Option<String>,

    /// 转折点偏移方向（Swivel）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swivel_direction: Option<String>,
    /// 转折点偏移距离（像素）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swivel_distance: Option<f32>,
    /// 顶点高度（像素，Parabola）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arc_height: Option<f32>,

    /// 开始时播放的音效
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
}

impl SpawnConfig {
    /// 指定类型与时长（秒）的配置
    pub fn of_type(kind: impl Into<String>, duration_secs: f32) -> Self {
        Self {
            kind: Some(kind.into()),
            duration: Some(duration_secs),
            ..Default::default()
        }
    }

    /// 从任意 JSON 映射解析
    pub fn from_value(value: serde_json::Value) -> BuildResult<Self> {
        serde_json::from_value(value).map_err(|e| BuildError::InvalidConfig {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_ignores_unknown_keys() {
        let config = SpawnConfig::from_value(json!({
            "type": "Directional",
            "duration": 1.5,
            "starting_position": "Bottom-Left",
            "fade_in": true,
            "font_color": "#ff0000"
        }))
        .unwrap();

        assert_eq!(config.kind.as_deref(), Some("Directional"));
        assert_eq!(config.duration, Some(1.5));
        assert_eq!(config.starting_position.as_deref(), Some("Bottom-Left"));
        assert_eq!(config.fade_in, Some(true));
        assert_eq!(config.fade_out, None);
    }

    #[test]
    fn test_from_value_wrong_type() {
        let result = SpawnConfig::from_value(json!({ "duration": "long" }));
        assert!(matches!(result, Err(BuildError::InvalidConfig { .. })));
    }

    #[test]
    fn test_serialize_skips_unset() {
        let config = SpawnConfig::of_type("Pow", 0.8);
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value, json!({ "type": "Pow", "duration": 0.8 }));
    }
}
