mod cluster;
mod merger;
mod normalizer;
mod pipeline;
mod pointer;
mod pointerless;
mod role_merge;
mod roles;
pub mod similarity;

pub use cluster::AliasCluster;
pub use merger::merge_clusters;
pub use normalizer::{CaseFoldNormalizer, CliticNormalizer, Normalizer};
pub use pipeline::{
    CharacterResolver, Clustering, CorpusResolution, ResolutionStats, SentenceIndex,
    StoryResolution,
};
pub use pointer::{Partition, PointerClusterer, PointerOutcome};
pub use pointerless::{PairRule, PointerlessClusterer, Verdict, PAIR_RULES};
pub use role_merge::RoleMerger;
pub use roles::RoleMapper;
