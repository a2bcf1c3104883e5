use crate::api::{ChatBackend, ReelsGenerator, DEFAULT_TEMPERATURE};
use crate::error::{IdeaError, Result};
use crate::idea::ReelsIdea;
use crate::parser::parse_reels_response;
use crate::store::IdeaStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

/// Drives the generate flow for one user session and owns its ideas.
pub struct Session {
    backend: Arc<dyn ChatBackend>,
    models: Vec<String>,
    temperature: f64,
    store: Mutex<IdeaStore>,
    in_flight: AtomicBool,
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Session {
    pub fn new(backend: Arc<dyn ChatBackend>, models: Vec<String>) -> Self {
        Self {
            backend,
            models,
            temperature: DEFAULT_TEMPERATURE,
            store: Mutex::new(IdeaStore::new()),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Generates ideas for `topic` and replaces the current list with them.
    ///
    /// Returns the number of ideas now held. On any error the list is left
    /// untouched.
    pub async fn generate(&self, topic: &str, api_key: Option<String>) -> Result<usize> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(IdeaError::Validation("Please enter a topic".to_string()));
        }

        let generator = ReelsGenerator::new(Arc::clone(&self.backend), api_key, self.models.clone())
            .with_temperature(self.temperature);
        if !generator.has_credential() {
            return Err(IdeaError::MissingCredential);
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Rejected generate for '{}': another generation is running", topic);
            return Err(IdeaError::Busy);
        }
        let _guard = InFlight(&self.in_flight);

        info!("Generating reels ideas for '{}'", topic);
        let responses = generator.generate(topic).await?;

        let mut ideas = Vec::new();
        for response in responses {
            if let Ok(raw) = response.outcome {
                let parsed = parse_reels_response(&raw);
                info!("{} contributed {} idea(s)", response.model, parsed.len());
                ideas.extend(parsed);
            }
        }

        let count = ideas.len();
        self.store().replace(ideas);
        Ok(count)
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Locks the idea list for reading or user-initiated deletes
    pub fn store(&self) -> MutexGuard<'_, IdeaStore> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of the current ideas
    pub fn ideas(&self) -> Vec<ReelsIdea> {
        self.store().ideas().to_vec()
    }
}
