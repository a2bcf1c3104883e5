//! Listing, expanding, copying and deleting generated ideas.

use crate::error::Result;
use crate::idea::ReelsIdea;
use crate::store::IdeaStore;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

/// Destination for copied idea text
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Yes/no gate in front of destructive actions
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Prints copied text to stdout
#[derive(Debug, Default)]
pub struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", text)?;
        stdout.flush()?;
        Ok(())
    }
}

/// Writes copied text to a file, replacing its contents
#[derive(Debug)]
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Clipboard for FileClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        std::fs::write(&self.path, text)?;
        info!("Copied idea to {}", self.path.display());
        Ok(())
    }
}

/// Asks on stderr and reads the answer from stdin
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        eprint!("{} [y/N] ", prompt);
        let _ = io::stderr().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

#[derive(Debug, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// Ideas ordered newest first; ties keep store order.
pub fn sorted_newest_first(ideas: &[ReelsIdea]) -> Vec<&ReelsIdea> {
    let mut sorted: Vec<&ReelsIdea> = ideas.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

/// View state for the idea history: at most one idea is expanded.
#[derive(Debug, Default, Clone)]
pub struct IdeaHistory {
    open: Option<Uuid>,
}

impl IdeaHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, id: Uuid) {
        self.open = Some(id);
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    /// Expands `id` (collapsing any other) or collapses it if already open.
    /// Returns whether `id` is open afterwards.
    pub fn toggle(&mut self, id: Uuid) -> bool {
        if self.is_open(id) {
            self.close();
            false
        } else {
            self.open(id);
            true
        }
    }

    pub fn is_open(&self, id: Uuid) -> bool {
        self.open == Some(id)
    }

    pub fn open_id(&self) -> Option<Uuid> {
        self.open
    }

    pub fn copy(&self, idea: &ReelsIdea, clipboard: &mut dyn Clipboard) -> Result<()> {
        clipboard.write_text(&format_idea_for_copy(idea))
    }

    /// Deletes one idea after confirmation. Returns true if it was removed.
    pub fn delete(&mut self, store: &mut IdeaStore, id: Uuid, confirm: &mut dyn Confirm) -> bool {
        if !confirm.confirm("Delete this idea?") {
            return false;
        }

        let removed = store.delete(id);
        if self.is_open(id) {
            self.close();
        }
        removed
    }

    /// Clears the whole history after a single confirmation.
    pub fn delete_all(&mut self, store: &mut IdeaStore, confirm: &mut dyn Confirm) -> bool {
        if store.is_empty() || !confirm.confirm("Delete the whole idea history?") {
            return false;
        }

        store.delete_all();
        self.close();
        true
    }
}

/// Plain-text version of an idea used for copying.
pub fn format_idea_for_copy(idea: &ReelsIdea) -> String {
    let scenes = idea
        .scenes
        .iter()
        .enumerate()
        .map(|(index, scene)| {
            format!(
                "{}. ({})\n   {}\n   Camera: {}\n   Text: {}",
                index + 1,
                scene.duration,
                scene.description,
                scene.camera_angle,
                scene.text_overlay
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "{}\n\nDuration: {}\n\nScenes:\n{}\n\nMusic: {} - {}\n\nEffects:\n{}\n\nTransitions:\n{}\n\nTips:\n{}",
        idea.title,
        idea.duration,
        scenes,
        idea.music.title,
        idea.music.artist,
        bullets(&idea.effects),
        bullets(&idea.transitions),
        bullets(&idea.tips)
    )
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line entry for the history list
pub fn render_summary(position: usize, idea: &ReelsIdea) -> String {
    format!(
        "{}. {} ({} - {})",
        position,
        idea.title,
        idea.created_at.format("%B %-d, %Y"),
        idea.content_type
    )
}

/// Expanded view of an idea
pub fn render_details(idea: &ReelsIdea) -> String {
    let mut out = String::from("   Scenes\n");
    for scene in &idea.scenes {
        out.push_str(&format!(
            "     [{}] {}\n       {}\n       {}\n",
            scene.duration, scene.camera_angle, scene.description, scene.text_overlay
        ));
    }
    out.push_str(&format!(
        "   Music\n     {} - {}\n",
        idea.music.title, idea.music.artist
    ));
    out.push_str(&format!(
        "   Effects and transitions\n     Effects: {}\n     Transitions: {}\n",
        idea.effects.join(", "),
        idea.transitions.join(", ")
    ));
    out.push_str("   Tips\n");
    for tip in &idea.tips {
        out.push_str(&format!("     * {}\n", tip));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::idea::{ContentType, Music, Scene};
    use chrono::{Duration, Utc};

    fn test_idea() -> ReelsIdea {
        ReelsIdea {
            id: Uuid::new_v4(),
            title: "Test".to_string(),
            content_type: ContentType::Normal,
            duration: "30s".to_string(),
            scenes: vec![Scene {
                duration: "5s".to_string(),
                description: "Opening shot".to_string(),
                camera_angle: "wide".to_string(),
                text_overlay: "Hello (0-2s)".to_string(),
            }],
            music: Music {
                title: "Song".to_string(),
                artist: "Artist".to_string(),
            },
            effects: vec!["Green screen".to_string()],
            transitions: vec!["Jump cut".to_string()],
            tips: vec!["Use a tripod".to_string()],
            created_at: Utc::now(),
        }
    }

    #[derive(Default)]
    struct MemoryClipboard {
        text: Option<String>,
    }

    impl Clipboard for MemoryClipboard {
        fn write_text(&mut self, text: &str) -> Result<()> {
            self.text = Some(text.to_string());
            Ok(())
        }
    }

    struct Answer(bool);

    impl Confirm for Answer {
        fn confirm(&mut self, _prompt: &str) -> bool {
            self.0
        }
    }

    #[test]
    fn copy_text_has_every_section() {
        let text = format_idea_for_copy(&test_idea());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Test");
        assert!(lines.contains(&"Duration: 30s"));
        assert!(lines.contains(&"1. (5s)"));
        assert!(lines.contains(&"   Camera: wide"));
        assert!(lines.contains(&"   Text: Hello (0-2s)"));
        assert!(lines.contains(&"Music: Song - Artist"));
        assert!(lines.contains(&"- Green screen"));
        assert!(lines.contains(&"- Jump cut"));
        assert!(lines.contains(&"- Use a tripod"));
        assert_eq!(lines.iter().filter(|l| l.starts_with("- ")).count(), 3);
    }

    #[test]
    fn copy_text_is_deterministic() {
        let idea = test_idea();
        assert_eq!(format_idea_for_copy(&idea), format_idea_for_copy(&idea));
    }

    #[test]
    fn copy_writes_to_clipboard() {
        let idea = test_idea();
        let mut clipboard = MemoryClipboard::default();
        IdeaHistory::new().copy(&idea, &mut clipboard).unwrap();
        assert_eq!(clipboard.text.unwrap(), format_idea_for_copy(&idea));
    }

    #[test]
    fn file_clipboard_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idea.txt");
        let mut clipboard = FileClipboard::new(&path);

        clipboard.write_text("hello").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn sorts_newest_first() {
        let mut older = test_idea();
        older.title = "older".to_string();
        older.created_at = Utc::now() - Duration::minutes(5);
        let newer = test_idea();

        let ideas = vec![older, newer];
        let sorted = sorted_newest_first(&ideas);
        assert_eq!(sorted[0].title, "Test");
        assert_eq!(sorted[1].title, "older");
    }

    #[test]
    fn only_one_idea_open_at_a_time() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut history = IdeaHistory::new();

        assert!(history.toggle(a));
        assert!(history.toggle(b));
        assert!(!history.is_open(a));
        assert!(history.is_open(b));
        assert!(!history.toggle(b));
        assert_eq!(history.open_id(), None);
    }

    #[test]
    fn declined_delete_keeps_idea() {
        let idea = test_idea();
        let id = idea.id;
        let mut store = IdeaStore::new();
        store.replace(vec![idea]);

        let mut history = IdeaHistory::new();
        assert!(!history.delete(&mut store, id, &mut Answer(false)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn deleting_open_idea_collapses_it() {
        let idea = test_idea();
        let id = idea.id;
        let mut store = IdeaStore::new();
        store.replace(vec![idea]);

        let mut history = IdeaHistory::new();
        history.open(id);
        assert!(history.delete(&mut store, id, &mut AssumeYes));
        assert!(store.is_empty());
        assert_eq!(history.open_id(), None);
    }

    #[test]
    fn delete_all_needs_confirmation() {
        let mut store = IdeaStore::new();
        store.replace(vec![test_idea(), test_idea()]);
        let mut history = IdeaHistory::new();

        assert!(!history.delete_all(&mut store, &mut Answer(false)));
        assert_eq!(store.len(), 2);
        assert!(history.delete_all(&mut store, &mut Answer(true)));
        assert!(store.is_empty());
    }

    #[test]
    fn summary_shows_type() {
        let line = render_summary(1, &test_idea());
        assert!(line.starts_with("1. Test ("));
        assert!(line.ends_with("- normal)"));
    }
}
