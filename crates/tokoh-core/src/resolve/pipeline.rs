use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use super::merger::merge_clusters;
use super::normalizer::{CliticNormalizer, Normalizer};
use super::pointer::PointerClusterer;
use super::pointerless::PointerlessClusterer;
use super::role_merge::RoleMerger;
use crate::config::ResolverConfig;
use crate::error::{Error, Result};
use crate::person::{Person, PersonRow, RawMention, SentenceId, StoryId};

/// Normalized alias -> sentences it was detected in, for one story.
pub type SentenceIndex = BTreeMap<String, BTreeSet<SentenceId>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionStats {
    pub mentions: usize,
    pub distinct_aliases: usize,
    pub pointer_clusters: usize,
    pub pointerless_clusters: usize,
    pub persons_before_role_merge: usize,
    pub persons: usize,
    pub orphaned_aliases: usize,
}

impl ResolutionStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn total_clusters(&self) -> usize {
        self.pointer_clusters + self.pointerless_clusters
    }

    fn add(&mut self, other: &Self) {
        self.mentions += other.mentions;
        self.distinct_aliases += other.distinct_aliases;
        self.pointer_clusters += other.pointer_clusters;
        self.pointerless_clusters += other.pointerless_clusters;
        self.persons_before_role_merge += other.persons_before_role_merge;
        self.persons += other.persons;
        self.orphaned_aliases += other.orphaned_aliases;
    }
}

/// Canonical persons after clustering and numbering, before role merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clustering {
    pub persons: Vec<Person>,
    pub orphans: Vec<String>,
    pub pointer_clusters: usize,
    pub pointerless_clusters: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryResolution {
    pub story_id: StoryId,
    pub persons: Vec<Person>,
    /// Single-token pointer aliases that matched no unique cluster
    pub orphans: Vec<String>,
    pub stats: ResolutionStats,
}

impl StoryResolution {
    #[must_use]
    pub fn rows(&self) -> Vec<PersonRow> {
        self.persons.iter().map(Person::to_row).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusResolution {
    pub stories: Vec<StoryResolution>,
    pub total_stats: ResolutionStats,
}

impl CorpusResolution {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn add_story(&mut self, story: StoryResolution) {
        self.total_stats.add(&story.stats);
        self.stories.push(story);
    }

    #[must_use]
    pub fn rows(&self) -> Vec<PersonRow> {
        self.stories.iter().flat_map(StoryResolution::rows).collect()
    }

    pub fn story_count(&self) -> usize {
        self.stories.len()
    }
}

/// The full alias resolution pipeline: normalize, cluster with and without
/// pointers, number, merge by role, attach sentence ids.
pub struct CharacterResolver {
    normalizer: Box<dyn Normalizer>,
    pointer: PointerClusterer,
    pointerless: PointerlessClusterer,
    role_merger: RoleMerger,
}

impl CharacterResolver {
    pub fn new(config: &ResolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            normalizer: Box::new(CliticNormalizer::new(&config.normalizer)),
            pointer: PointerClusterer::new(&config.clustering),
            pointerless: PointerlessClusterer::new(&config.clustering, &config.normalizer),
            role_merger: RoleMerger::new(&config.roles)?,
        })
    }

    #[must_use]
    pub fn with_normalizer(mut self, normalizer: Box<dyn Normalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        self.normalizer.normalize(raw)
    }

    #[must_use]
    pub fn role_of(&self, alias: &str) -> Option<&str> {
        self.role_merger.mapper().role_of(alias)
    }

    /// Partitions, clusters both halves, and numbers the result.
    #[must_use]
    pub fn cluster_aliases<S: AsRef<str>>(&self, story_id: StoryId, aliases: &[S]) -> Clustering {
        let partition = self.pointer.partition(aliases);
        let pointerless = self.pointerless.cluster(&partition.without_pointer);
        let pointer = self.pointer.cluster(&partition.with_pointer);

        Clustering {
            persons: merge_clusters(story_id, &pointer.clusters, &pointerless),
            orphans: pointer.orphans,
            pointer_clusters: pointer.clusters.len(),
            pointerless_clusters: pointerless.len(),
        }
    }

    /// Resolves already-normalized aliases of one story.
    #[must_use]
    pub fn resolve_aliases<S: AsRef<str>>(
        &self,
        story_id: StoryId,
        aliases: &[S],
        sentences: &SentenceIndex,
    ) -> StoryResolution {
        let aliases: Vec<&str> = aliases
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|a| !a.trim().is_empty())
            .collect();
        let distinct: HashSet<String> = aliases.iter().map(|a| a.trim().to_lowercase()).collect();

        let clustering = self.cluster_aliases(story_id, &aliases);
        let before = clustering.persons.len();

        let mut persons = self.role_merger.merge(&clustering.persons);
        for person in &mut persons {
            person.sentence_ids = person
                .aliases
                .iter()
                .filter_map(|alias| sentences.get(alias))
                .flatten()
                .copied()
                .collect();
        }

        let stats = ResolutionStats {
            mentions: aliases.len(),
            distinct_aliases: distinct.len(),
            pointer_clusters: clustering.pointer_clusters,
            pointerless_clusters: clustering.pointerless_clusters,
            persons_before_role_merge: before,
            persons: persons.len(),
            orphaned_aliases: clustering.orphans.len(),
        };

        tracing::info!(
            story_id,
            mentions = stats.mentions,
            clusters = stats.total_clusters(),
            persons = stats.persons,
            "resolved story characters"
        );

        StoryResolution {
            story_id,
            persons,
            orphans: clustering.orphans,
            stats,
        }
    }

    /// Normalizes raw mentions, indexes their sentences, and resolves them.
    #[must_use]
    pub fn resolve_mentions(&self, story_id: StoryId, mentions: &[RawMention]) -> StoryResolution {
        let mut aliases = Vec::with_capacity(mentions.len());
        let mut sentences = SentenceIndex::new();

        for mention in mentions {
            let alias = self.normalize(&mention.surface_form);
            if alias.is_empty() {
                tracing::debug!(story_id, sentence_id = mention.sentence_id, "skipping empty mention");
                continue;
            }
            sentences
                .entry(alias.clone())
                .or_default()
                .insert(mention.sentence_id);
            aliases.push(alias);
        }

        self.resolve_aliases(story_id, &aliases, &sentences)
    }

    /// Resolves every story independently, in story id order.
    ///
    /// Fails if `sentences` mentions a story that has no alias stream.
    pub fn resolve_corpus(
        &self,
        aliases: &BTreeMap<StoryId, Vec<String>>,
        sentences: &BTreeMap<StoryId, SentenceIndex>,
    ) -> Result<CorpusResolution> {
        if let Some(&story_id) = sentences.keys().find(|id| !aliases.contains_key(*id)) {
            return Err(Error::UnknownStory { story_id });
        }

        let empty = SentenceIndex::new();
        let mut corpus = CorpusResolution::new();
        for (&story_id, story_aliases) in aliases {
            let index = sentences.get(&story_id).unwrap_or(&empty);
            corpus.add_story(self.resolve_aliases(story_id, story_aliases, index));
        }
        Ok(corpus)
    }

    #[must_use]
    pub fn resolve_mention_corpus(
        &self,
        stories: &BTreeMap<StoryId, Vec<RawMention>>,
    ) -> CorpusResolution {
        let mut corpus = CorpusResolution::new();
        for (&story_id, mentions) in stories {
            corpus.add_story(self.resolve_mentions(story_id, mentions));
        }
        corpus
    }
}
