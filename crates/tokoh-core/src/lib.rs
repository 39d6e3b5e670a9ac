#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod person;
pub mod resolve;

pub use config::{
    ClusteringConfig, ConfigError, NormalizerConfig, ResolverConfig, RoleConfig, RoleEntry,
    POINTERLESS_JARO_THRESHOLD, POINTER_JACCARD_THRESHOLD,
};
pub use error::{Error, Result};
pub use person::{Person, PersonId, PersonRow, RawMention, SentenceId, StoryId};
pub use resolve::{
    CharacterResolver, CorpusResolution, Normalizer, ResolutionStats, SentenceIndex,
    StoryResolution,
};
