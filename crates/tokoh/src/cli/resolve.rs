use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tokoh_core::{CharacterResolver, CorpusResolution, RawMention, StoryId};

/// One line of the NER output: a mention tagged with its story.
#[derive(Debug, Deserialize)]
struct MentionRecord {
    story_id: StoryId,
    #[serde(flatten)]
    mention: RawMention,
}

pub fn run(input: &Path, config: Option<&Path>, pretty: bool, stats: bool) -> Result<()> {
    let resolver = CharacterResolver::new(&super::load_config(config)?)?;

    let raw = read_input(input)?;
    let stories = group_by_story(&raw)
        .with_context(|| format!("Invalid mention stream in {}", input.display()))?;
    tracing::debug!(stories = stories.len(), "loaded mention stream");

    let corpus = resolver.resolve_mention_corpus(&stories);
    let rows = corpus.rows();

    let out = if pretty {
        serde_json::to_string_pretty(&rows)?
    } else {
        serde_json::to_string(&rows)?
    };
    println!("{out}");

    if stats {
        print_stats(&corpus);
    }
    Ok(())
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read mentions from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))
}

/// Groups records per story, keeping each story's mention order.
fn group_by_story(raw: &str) -> Result<BTreeMap<StoryId, Vec<RawMention>>> {
    let records: Vec<MentionRecord> = serde_json::from_str(raw)?;

    let mut stories: BTreeMap<StoryId, Vec<RawMention>> = BTreeMap::new();
    for record in records {
        stories
            .entry(record.story_id)
            .or_default()
            .push(record.mention);
    }
    Ok(stories)
}

fn print_stats(corpus: &CorpusResolution) {
    for story in &corpus.stories {
        let s = &story.stats;
        eprintln!(
            "story {}: {} mentions, {} aliases, {} clusters, {} persons",
            story.story_id,
            s.mentions,
            s.distinct_aliases,
            s.total_clusters(),
            s.persons
        );
        if !story.orphans.is_empty() {
            eprintln!("  unassigned: {}", story.orphans.join(", "));
        }
    }

    let total = &corpus.total_stats;
    eprintln!(
        "{} stories, {} mentions, {} persons",
        corpus.story_count(),
        total.mentions,
        total.persons
    );
}
