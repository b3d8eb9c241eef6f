use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// MediaAsset
// ---------------------------------------------------------------------------

/// One image or audio asset referenced by the analysis input.
///
/// The ingestion side attaches extra per-asset metadata (labels, transcripts,
/// durations); only `filename` is interpreted by the core, the rest is carried
/// through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaAsset {
    pub filename: String,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl MediaAsset {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            extra: HashMap::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// AnalysisInput
// ---------------------------------------------------------------------------

/// Read-only analysis of the available media, produced by an external
/// ingestion pipeline. The core never mutates it.
///
/// `segments` are opaque content descriptions (shot labels, transcripts,
/// timestamps); they are sampled verbatim into generative prompts and never
/// parsed further.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisInput {
    #[serde(default)]
    pub images: Vec<MediaAsset>,
    #[serde(default)]
    pub audio: Vec<MediaAsset>,
    #[serde(default)]
    pub segments: Vec<serde_json::Value>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl AnalysisInput {
    /// First image asset filename, if any image was analyzed.
    pub fn first_image(&self) -> Option<&str> {
        self.images.first().map(|a| a.filename.as_str())
    }

    /// First audio asset filename, if any audio track was analyzed.
    pub fn first_audio(&self) -> Option<&str> {
        self.audio.first().map(|a| a.filename.as_str())
    }

    /// Up to `n` leading segments, serialized for prompt context.
    pub fn sample_segments(&self, n: usize) -> &[serde_json::Value] {
        &self.segments[..self.segments.len().min(n)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> AnalysisInput {
        serde_json::from_value(json!({
            "images": [
                {"filename": "logo.png", "labels": ["logo", "brand"]},
                {"filename": "team.jpg"}
            ],
            "audio": [{"filename": "bg.mp3", "duration": 42.5}],
            "segments": [
                {"start": 0.0, "end": 4.2, "shot": "office_broll"},
                {"start": 4.2, "end": 9.8, "shot": "interview"}
            ],
            "source": "gcs://bucket/video.mp4"
        }))
        .unwrap()
    }

    #[test]
    fn deserializes_recognized_keys() {
        let input = sample();
        assert_eq!(input.images.len(), 2);
        assert_eq!(input.audio.len(), 1);
        assert_eq!(input.segments.len(), 2);
    }

    #[test]
    fn unrecognized_keys_flatten_into_extra() {
        let input = sample();
        assert_eq!(input.extra.get("source"), Some(&json!("gcs://bucket/video.mp4")));
    }

    #[test]
    fn asset_extra_metadata_preserved() {
        let input = sample();
        assert_eq!(
            input.images[0].extra.get("labels"),
            Some(&json!(["logo", "brand"]))
        );
    }

    #[test]
    fn first_image_and_audio() {
        let input = sample();
        assert_eq!(input.first_image(), Some("logo.png"));
        assert_eq!(input.first_audio(), Some("bg.mp3"));

        let empty = AnalysisInput::default();
        assert_eq!(empty.first_image(), None);
        assert_eq!(empty.first_audio(), None);
    }

    #[test]
    fn sample_segments_caps_at_len() {
        let input = sample();
        assert_eq!(input.sample_segments(1).len(), 1);
        assert_eq!(input.sample_segments(5).len(), 2);
        assert_eq!(input.sample_segments(0).len(), 0);
    }

    #[test]
    fn missing_keys_default_to_empty() {
        let input: AnalysisInput = serde_json::from_value(json!({})).unwrap();
        assert!(input.images.is_empty());
        assert!(input.audio.is_empty());
        assert!(input.segments.is_empty());
    }
}
