//! Instagram Reels idea generation: prompt building, provider calls,
//! response parsing and the in-memory idea history.

pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod idea;
pub mod parser;
pub mod presentation;
pub mod progress;
pub mod prompt;
pub mod session;
pub mod store;

pub use error::{IdeaError, Result};
pub use idea::{ContentType, Music, ReelsIdea, Scene};
pub use session::Session;
