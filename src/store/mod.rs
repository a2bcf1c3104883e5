use crate::idea::ReelsIdea;
use tracing::debug;
use uuid::Uuid;

/// Ideas shown in the current session. Lives in memory only.
#[derive(Debug, Default, Clone)]
pub struct IdeaStore {
    ideas: Vec<ReelsIdea>,
}

impl IdeaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps in the result of a new generation, dropping everything held before.
    pub fn replace(&mut self, ideas: Vec<ReelsIdea>) {
        debug!("Replacing {} idea(s) with {}", self.ideas.len(), ideas.len());
        self.ideas = ideas;
    }

    /// Removes the idea with `id`. Returns false if it was not present.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.ideas.len();
        self.ideas.retain(|idea| idea.id != id);
        self.ideas.len() != before
    }

    pub fn delete_all(&mut self) {
        self.ideas.clear();
    }

    pub fn ideas(&self) -> &[ReelsIdea] {
        &self.ideas
    }

    pub fn get(&self, id: Uuid) -> Option<&ReelsIdea> {
        self.ideas.iter().find(|idea| idea.id == id)
    }

    pub fn len(&self) -> usize {
        self.ideas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ideas.is_empty()
    }
}
