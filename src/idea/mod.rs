use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Which of the two requested variants an idea belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Informative version
    Normal,
    /// Attention-grabbing version
    Viral,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Normal => "normal",
            ContentType::Viral => "viral",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single shot in a Reels idea
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Shot length as written by the model, e.g. "5s"
    pub duration: String,
    pub description: String,
    pub camera_angle: String,
    /// On-screen text and when it appears
    pub text_overlay: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Music {
    pub title: String,
    pub artist: String,
}

/// One generated Reels concept.
///
/// Built only by the response parser; `id` and `created_at` are assigned
/// there and the record is not changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelsIdea {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// Total length, free-form
    pub duration: String,
    pub scenes: Vec<Scene>,
    pub music: Music,
    pub effects: Vec<String>,
    pub transitions: Vec<String>,
    pub tips: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ReelsIdea {
    /// True when both ideas carry the same generated content, ignoring
    /// identity and timestamp.
    pub fn same_content(&self, other: &ReelsIdea) -> bool {
        self.title == other.title
            && self.content_type == other.content_type
            && self.duration == other.duration
            && self.scenes == other.scenes
            && self.music == other.music
            && self.effects == other.effects
            && self.transitions == other.transitions
            && self.tips == other.tips
    }
}
