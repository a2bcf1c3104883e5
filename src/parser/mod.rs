use crate::error::{IdeaError, Result};
use crate::idea::{ContentType, Music, ReelsIdea, Scene};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct RawReelsResponse {
    normal_version: Option<RawVersion>,
    viral_version: Option<RawVersion>,
}

#[derive(Debug, Deserialize)]
struct RawVersion {
    title: String,
    duration: String,
    scenes: Vec<RawScene>,
    music: RawMusic,
    effects: Vec<String>,
    transitions: Vec<String>,
    tips: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawScene {
    duration: String,
    description: String,
    camera_angle: String,
    text_overlay: String,
}

#[derive(Debug, Deserialize)]
struct RawMusic {
    title: String,
    artist: String,
}

/// Turns a chat-completion envelope into Reels ideas.
///
/// Never fails: a malformed response is logged and contributes no ideas.
/// The normal idea, when present, comes before the viral one.
pub fn parse_reels_response(response: &Value) -> Vec<ReelsIdea> {
    match try_parse_reels_response(response) {
        Ok(ideas) => ideas,
        Err(e) => {
            warn!("Discarding unparseable provider response: {}", e);
            Vec::new()
        }
    }
}

/// Same as [`parse_reels_response`] but reports why parsing failed.
pub fn try_parse_reels_response(response: &Value) -> Result<Vec<ReelsIdea>> {
    let content = extract_content(response)
        .ok_or_else(|| IdeaError::Parse("Empty response content".to_string()))?;

    let json_text = strip_code_fence(content);
    debug!("Parsing reels payload ({} bytes)", json_text.len());

    let parsed: RawReelsResponse = serde_json::from_str(json_text)
        .map_err(|e| IdeaError::Parse(format!("Failed to parse reels JSON: {}", e)))?;

    let mut ideas = Vec::with_capacity(2);
    if let Some(version) = parsed.normal_version {
        ideas.push(create_reels_idea(version, ContentType::Normal));
    }
    if let Some(version) = parsed.viral_version {
        ideas.push(create_reels_idea(version, ContentType::Viral));
    }

    Ok(ideas)
}

/// Text of the first choice's message, if any
pub fn extract_content(response: &Value) -> Option<&str> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .filter(|text| !text.trim().is_empty())
}

/// Removes a surrounding ```json fenced block and whitespace.
pub fn strip_code_fence(text: &str) -> &str {
    text.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

fn create_reels_idea(version: RawVersion, content_type: ContentType) -> ReelsIdea {
    ReelsIdea {
        id: Uuid::new_v4(),
        title: version.title,
        content_type,
        duration: version.duration,
        scenes: version
            .scenes
            .into_iter()
            .map(|scene| Scene {
                duration: scene.duration,
                description: scene.description,
                camera_angle: scene.camera_angle,
                text_overlay: scene.text_overlay,
            })
            .collect(),
        music: Music {
            title: version.music.title,
            artist: version.music.artist,
        },
        effects: version.effects,
        transitions: version.transitions,
        tips: version.tips,
        created_at: Utc::now(),
    }
}
