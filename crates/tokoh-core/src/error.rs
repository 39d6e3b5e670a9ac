use thiserror::Error;

use crate::config::ConfigError;
use crate::person::StoryId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Sentence index references story {story_id}, which has no aliases")]
    UnknownStory { story_id: StoryId },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Invalid ordinal pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
