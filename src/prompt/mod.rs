/// Longest video a single idea may describe
pub const MAX_REEL_SECONDS: u32 = 59;

/// System and user messages for one Reels generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReelsPrompts {
    pub system: String,
    pub user: String,
}

/// Builds the prompt pair asking for a normal and a viral idea about `topic`.
pub fn build_reels_prompts(topic: &str) -> ReelsPrompts {
    let system = format!(
        r#"You are a social media content expert. You produce detailed, concrete and actionable ideas for Instagram Reels videos.

Rules:
1. Every idea is for a video of at most {max} seconds
2. Ideas are specific to the topic and directly actionable, never generic
3. Give a scene-by-scene shooting plan for every idea
4. Suggest fitting music for every idea (a real song title and artist)
5. Include camera angles and technical details
6. Suggest effects and transitions to use
7. Give timing for spoken lines and on-screen text

Notes:
- Scenes must be clear and practical
- Music suggestions should be current and popular
- Effects must be ones available in Instagram
- Transitions should be simple and effective"#,
        max = MAX_REEL_SECONDS
    );

    let user = format!(
        r#"Topic: {topic}

Create two different Reels ideas for this topic:
1. A normal, informative version
2. An attention-grabbing version that could go viral

For each idea provide:
- Video title
- Total duration (max {max} seconds)
- Scenes and their durations
- Camera angles
- Music suggestion (a real song)
- Effects and transitions
- Spoken line / on-screen text placement
- Shooting tips

Respond with JSON only, in this format:
{{
  "normal_version": {{
    "title": "title",
    "duration": "total duration",
    "scenes": [
      {{
        "duration": "scene duration",
        "description": "scene description",
        "camera_angle": "camera angle",
        "text_overlay": "on-screen text and timing"
      }}
    ],
    "music": {{
      "title": "song title",
      "artist": "artist"
    }},
    "effects": ["effect1", "effect2"],
    "transitions": ["transition1", "transition2"],
    "tips": ["tip1", "tip2"]
  }},
  "viral_version": {{
    // same structure
  }}
}}"#,
        topic = topic.trim(),
        max = MAX_REEL_SECONDS
    );

    ReelsPrompts { system, user }
}
