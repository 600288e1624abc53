//! JSON-facing slide payload.
//!
//! These types mirror what the authoring client sends. They are deliberately loose (every field
//! optional, `content` kept as raw JSON) and are turned into the validated model in
//! [`crate::scene::slide`] exactly once.

use serde::{Deserialize, Serialize};

/// `storyData` object carrying the ordered slides of a story.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoryDataDef {
    /// Slides in playback order.
    #[serde(default)]
    pub slides: Vec<SlideDef>,
}

/// One slide as authored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlideDef {
    /// Client-side identifier, kept for logging only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Background fill; black when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundDef>,
    /// Elements in z-order (first is bottom-most).
    #[serde(default)]
    pub elements: Vec<ElementDef>,
    /// Display duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// `{ "type": "color" | "image", "value": ... }`.
///
/// Older payloads put the hex string under `color` and the image under `url`; both are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackgroundDef {
    /// `color` or `image`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Hex color or image URL depending on `kind`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Legacy hex color field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Legacy image URL field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One positioned element with a type tag and a type-specific payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementDef {
    /// Client-side identifier, kept for logging only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Element type tag (`text`, `image`, `poll`, ...).
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Position as percentages of the canvas.
    #[serde(default)]
    pub position: PositionDef,
    /// Type-specific payload: an object, a JSON-encoded object, or a bare string for text/image.
    #[serde(default)]
    pub content: serde_json::Value,
    /// Optional presentation overrides.
    #[serde(default)]
    pub style: StyleDef,
}

/// Percentages of canvas width/height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionDef {
    /// Horizontal position, `0..=100`.
    #[serde(default)]
    pub x: f64,
    /// Vertical position, `0..=100`.
    #[serde(default)]
    pub y: f64,
}

/// Presentation overrides shared by all element kinds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDef {
    /// Font size in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Hex color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Height in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TextContentDef {
    #[serde(default)]
    pub(crate) text: Option<String>,
    #[serde(default)]
    pub(crate) font_size: Option<f64>,
    #[serde(default)]
    pub(crate) color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageContentDef {
    #[serde(default, alias = "src")]
    pub(crate) url: Option<String>,
    #[serde(default)]
    pub(crate) max_size: Option<f64>,
    #[serde(default)]
    pub(crate) width: Option<f64>,
    #[serde(default)]
    pub(crate) height: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PollContentDef {
    #[serde(default)]
    pub(crate) question: Option<String>,
    #[serde(default)]
    pub(crate) options: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuizContentDef {
    #[serde(default)]
    pub(crate) question: Option<String>,
    #[serde(default)]
    pub(crate) options: Vec<String>,
    #[serde(default, alias = "correctIndex")]
    pub(crate) correct_answer: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SliderContentDef {
    #[serde(default)]
    pub(crate) question: Option<String>,
    #[serde(default)]
    pub(crate) min_label: Option<String>,
    #[serde(default)]
    pub(crate) max_label: Option<String>,
    #[serde(default)]
    pub(crate) emoji: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct StickerContentDef {
    #[serde(default, alias = "type")]
    pub(crate) kind: Option<String>,
    #[serde(default)]
    pub(crate) size: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct QuestionContentDef {
    #[serde(default)]
    pub(crate) question: Option<String>,
}

/// Decode an element payload into its typed def.
///
/// `null` yields the default payload and a string is parsed as embedded JSON. A bare string that
/// is not JSON is handed to `bare` (text and image use it as the text or URL).
pub(crate) fn content_def<T>(
    content: &serde_json::Value,
    bare: impl FnOnce(&str) -> Option<T>,
) -> Result<T, String>
where
    T: serde::de::DeserializeOwned + Default,
{
    match content {
        serde_json::Value::Null => Ok(T::default()),
        serde_json::Value::Object(_) => {
            T::deserialize(content).map_err(|e| format!("malformed content: {e}"))
        }
        serde_json::Value::String(s) => {
            match serde_json::from_str::<serde_json::Value>(s) {
                Ok(v @ serde_json::Value::Object(_)) => {
                    T::deserialize(&v).map_err(|e| format!("malformed content: {e}"))
                }
                _ => bare(s).ok_or_else(|| "content string is not a JSON object".to_owned()),
            }
        }
        other => Err(format!("content must be an object or string, got {other}")),
    }
}
