use std::collections::HashSet;

use crate::config::{ClusteringConfig, NormalizerConfig, POINTERLESS_JARO_THRESHOLD, SHORT_ALIAS_LEN};

use super::cluster::{find_member, AliasCluster};
use super::similarity::{char_len, either_contains, either_contains_phrase, jaro};

/// Pairwise rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairRule {
    ShortString,
    PossessiveClitic,
    Containment,
    FalseMerge,
    Similarity,
}

pub const PAIR_RULES: [PairRule; 5] = [
    PairRule::ShortString,
    PairRule::PossessiveClitic,
    PairRule::Containment,
    PairRule::FalseMerge,
    PairRule::Similarity,
];

/// Outcome of comparing an incoming alias with one cluster member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Join this member's cluster
    Accept(PairRule),
    /// Try the next member of the same cluster
    SkipMember(PairRule),
    /// Stop scanning this cluster altogether
    RejectCluster(PairRule),
    /// Rule does not apply; fall through to the next rule
    Pass,
}

/// Groups aliases that carry no pointer prefix.
///
/// Each alias goes to the first cluster (in creation order) holding a member
/// it is accepted by; otherwise it opens a new cluster.
#[derive(Debug, Clone)]
pub struct PointerlessClusterer {
    possessive_clitics: Vec<String>,
    false_merges: HashSet<(String, String)>,
}

impl PointerlessClusterer {
    #[must_use]
    pub fn new(clustering: &ClusteringConfig, normalizer: &NormalizerConfig) -> Self {
        Self {
            possessive_clitics: normalizer.possessive_clitics.clone(),
            false_merges: clustering.false_merges.iter().cloned().collect(),
        }
    }

    pub fn cluster<S: AsRef<str>>(&self, aliases: &[S]) -> Vec<AliasCluster> {
        let mut clusters: Vec<AliasCluster> = Vec::new();

        for raw in aliases {
            let alias = raw.as_ref().trim().to_lowercase();
            if find_member(&clusters, &alias).is_some() {
                continue;
            }

            match self.place(&alias, &clusters) {
                Some(idx) => {
                    tracing::debug!(alias, cluster = clusters[idx].id, "joined pointerless cluster");
                    clusters[idx].insert(alias);
                }
                None => {
                    let id = clusters.len() + 1;
                    tracing::debug!(alias, cluster = id, "new pointerless cluster");
                    clusters.push(AliasCluster::new(id, alias));
                }
            }
        }

        clusters
    }

    /// First cluster that accepts `alias`. Read-only over `clusters`.
    #[must_use]
    pub fn place(&self, alias: &str, clusters: &[AliasCluster]) -> Option<usize> {
        'clusters: for (idx, cluster) in clusters.iter().enumerate() {
            for member in cluster.members() {
                match self.judge(alias, member) {
                    Verdict::Accept(_) => return Some(idx),
                    Verdict::RejectCluster(rule) => {
                        tracing::debug!(alias, member, ?rule, "cluster vetoed");
                        continue 'clusters;
                    }
                    Verdict::SkipMember(_) | Verdict::Pass => {}
                }
            }
        }
        None
    }

    /// Runs the rule table on one pair; the first rule that decides wins.
    #[must_use]
    pub fn judge(&self, alias: &str, member: &str) -> Verdict {
        PAIR_RULES
            .iter()
            .map(|&rule| self.apply(rule, alias, member))
            .find(|verdict| *verdict != Verdict::Pass)
            .unwrap_or(Verdict::Pass)
    }

    fn apply(&self, rule: PairRule, alias: &str, member: &str) -> Verdict {
        match rule {
            PairRule::ShortString => {
                if char_len(alias) >= SHORT_ALIAS_LEN && char_len(member) >= SHORT_ALIAS_LEN {
                    Verdict::Pass
                } else if either_contains_phrase(alias, member) {
                    Verdict::Accept(rule)
                } else {
                    Verdict::SkipMember(rule)
                }
            }
            PairRule::PossessiveClitic => {
                let Some(clitic) = self
                    .possessive_clitics
                    .iter()
                    .find(|c| alias.ends_with(c.as_str()) && member.ends_with(c.as_str()))
                else {
                    return Verdict::Pass;
                };
                let stem_a = &alias[..alias.len() - clitic.len()];
                let stem_b = &member[..member.len() - clitic.len()];
                if jaro(stem_a, stem_b) >= POINTERLESS_JARO_THRESHOLD {
                    Verdict::Accept(rule)
                } else {
                    Verdict::RejectCluster(rule)
                }
            }
            PairRule::Containment => {
                if either_contains_phrase(alias, member) {
                    Verdict::Accept(rule)
                } else {
                    Verdict::Pass
                }
            }
            PairRule::FalseMerge => {
                if self.is_false_merge(alias, member) {
                    Verdict::SkipMember(rule)
                } else {
                    Verdict::Pass
                }
            }
            PairRule::Similarity => {
                if jaro(alias, member) >= POINTERLESS_JARO_THRESHOLD
                    && !either_contains(alias, member)
                {
                    Verdict::Accept(rule)
                } else {
                    Verdict::Pass
                }
            }
        }
    }

    fn is_false_merge(&self, a: &str, b: &str) -> bool {
        let forward = (a.to_string(), b.to_string());
        let backward = (b.to_string(), a.to_string());
        self.false_merges.contains(&forward) || self.false_merges.contains(&backward)
    }
}

impl Default for PointerlessClusterer {
    fn default() -> Self {
        Self::new(&ClusteringConfig::default(), &NormalizerConfig::default())
    }
}
