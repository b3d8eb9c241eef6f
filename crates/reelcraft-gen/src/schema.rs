//! JSON schemas for structured generative output, one per artifact.
//!
//! These are handed to the provider as `response_format.json_schema` in
//! strict mode, so every object sets `additionalProperties: false` and lists
//! all fields as required. Typed validation still happens on our side in
//! `generate_typed`; the schema just steers the generator.

use serde_json::{json, Value};

fn dimension() -> Value {
    json!({
        "type": "object",
        "properties": {
            "score": {"type": "integer", "minimum": 0, "maximum": 5},
            "reason": {"type": "string"},
            "suggestions": {"type": "array", "items": {"type": "string"}}
        },
        "required": ["score", "reason", "suggestions"],
        "additionalProperties": false
    })
}

/// Schema for the scene summarization stage.
pub fn scenes_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "scenes": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "scene_id": {"type": "integer"},
                        "summary": {"type": "string"},
                        "highlight": {"type": "string"}
                    },
                    "required": ["scene_id", "summary", "highlight"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["scenes"],
        "additionalProperties": false
    })
}

/// Schema for the story ideation stage.
pub fn story_idea_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "tone": {"type": "string"},
            "opening": {"type": "string"},
            "development": {"type": "string"},
            "closing": {"type": "string"},
            "key_message": {"type": "string"},
            "opening_sec": {"type": "integer"},
            "development_sec": {"type": "integer"},
            "closing_sec": {"type": "integer"},
            "target_subjects": {"type": "array", "items": {"type": "string"}},
            "image_ratio": {"type": "number"},
            "video_ratio": {"type": "number"}
        },
        "required": [
            "tone", "opening", "development", "closing", "key_message",
            "opening_sec", "development_sec", "closing_sec",
            "target_subjects", "image_ratio", "video_ratio"
        ],
        "additionalProperties": false
    })
}

/// Schema for the storyline writing stage.
pub fn storyline_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "story_summary": {"type": "string"},
            "story_flow": {"type": "array", "items": {"type": "string"}}
        },
        "required": ["story_summary", "story_flow"],
        "additionalProperties": false
    })
}

/// Schema for the timeline drafting stage and both repair rewrites.
pub fn timeline_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "story_summary": {"type": "string"},
            "timeline": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "type": {"type": "string", "enum": ["video", "subtitle", "image", "audio"]},
                        "filename": {"type": ["string", "null"]},
                        "text": {"type": ["string", "null"]},
                        "start": {"type": "number"},
                        "end": {"type": "number"},
                        "position": {
                            "type": ["object", "null"],
                            "properties": {
                                "x": {"type": "integer"},
                                "y": {"type": "integer"}
                            },
                            "required": ["x", "y"],
                            "additionalProperties": false
                        },
                        "size": {
                            "type": ["object", "null"],
                            "properties": {
                                "width": {"type": "integer"},
                                "height": {"type": "integer"}
                            },
                            "required": ["width", "height"],
                            "additionalProperties": false
                        }
                    },
                    "required": ["type", "filename", "text", "start", "end", "position", "size"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["story_summary", "timeline"],
        "additionalProperties": false
    })
}

/// Schema for the engagement evaluation stage.
pub fn fun_evaluation_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "overall_score": {"type": "integer", "minimum": 0, "maximum": 5},
            "verdict": {"type": "string", "enum": ["pass", "borderline", "fail"]},
            "hook_strength": dimension(),
            "pacing": dimension(),
            "novelty": dimension(),
            "clarity": dimension(),
            "emotional_impact": dimension(),
            "cta_effectiveness": dimension(),
            "visual_variety": dimension(),
            "sound_alignment": dimension(),
            "weak_spots": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "start": {"type": "number"},
                        "end": {"type": "number"},
                        "issue": {"type": "string"}
                    },
                    "required": ["start", "end", "issue"],
                    "additionalProperties": false
                }
            },
            "top_actions": {"type": "array", "items": {"type": "string"}}
        },
        "required": [
            "overall_score", "verdict", "hook_strength", "pacing", "novelty",
            "clarity", "emotional_impact", "cta_effectiveness",
            "visual_variety", "sound_alignment", "weak_spots", "top_actions"
        ],
        "additionalProperties": false
    })
}
