use crate::config::{ClusteringConfig, POINTER_JACCARD_THRESHOLD, SHORT_ALIAS_LEN};

use super::cluster::{find_member, AliasCluster};
use super::similarity::{char_len, either_contains, jaccard};

/// Clusters for every pointer, concatenated in pointer order, plus the
/// single-token aliases that could not be attached anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointerOutcome {
    pub clusters: Vec<AliasCluster>,
    pub orphans: Vec<String>,
}

/// Aliases split by whether they start with a pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub with_pointer: Vec<String>,
    pub without_pointer: Vec<String>,
}

/// Groups aliases that start with a kinship/honorific prefix. Each pointer's
/// bucket is clustered on its own.
#[derive(Debug, Clone)]
pub struct PointerClusterer {
    pointers: Vec<String>,
    exclude_pairs: Vec<(String, String)>,
}

impl PointerClusterer {
    #[must_use]
    pub fn new(config: &ClusteringConfig) -> Self {
        Self {
            pointers: config.pointers.clone(),
            exclude_pairs: config.exclude_pairs.clone(),
        }
    }

    #[must_use]
    pub fn pointers(&self) -> &[String] {
        &self.pointers
    }

    /// First pointer (in enumeration order) the alias starts with.
    #[must_use]
    pub fn pointer_of(&self, alias: &str) -> Option<&str> {
        self.pointers
            .iter()
            .find(|p| alias.starts_with(p.as_str()))
            .map(String::as_str)
    }

    /// Splits aliases into the two disjoint clustering inputs, keeping order.
    pub fn partition<S: AsRef<str>>(&self, aliases: &[S]) -> Partition {
        let mut partition = Partition::default();
        for alias in aliases {
            let alias = alias.as_ref().to_string();
            if self.pointer_of(&alias.trim().to_lowercase()).is_some() {
                partition.with_pointer.push(alias);
            } else {
                partition.without_pointer.push(alias);
            }
        }
        partition
    }

    pub fn cluster<S: AsRef<str>>(&self, aliases: &[S]) -> PointerOutcome {
        let folded: Vec<String> = aliases
            .iter()
            .map(|a| a.as_ref().trim().to_lowercase())
            .collect();

        let mut outcome = PointerOutcome::default();

        for pointer in &self.pointers {
            let bucket: Vec<&str> = folded
                .iter()
                .filter(|alias| self.pointer_of(alias) == Some(pointer.as_str()))
                .map(String::as_str)
                .collect();
            if bucket.is_empty() {
                continue;
            }

            let first_id = outcome.clusters.len() + 1;
            let (subs, orphans) = self.cluster_bucket(pointer, &bucket, first_id);
            outcome.clusters.extend(subs);
            outcome.orphans.extend(orphans);
        }

        outcome
    }

    fn cluster_bucket(
        &self,
        pointer: &str,
        bucket: &[&str],
        first_id: usize,
    ) -> (Vec<AliasCluster>, Vec<String>) {
        let mut subs: Vec<AliasCluster> = Vec::new();
        let mut singles: Vec<String> = Vec::new();

        for &alias in bucket {
            if alias.split_whitespace().count() <= 1 {
                if !singles.iter().any(|s| s == alias) {
                    singles.push(alias.to_string());
                }
                continue;
            }
            if find_member(&subs, alias).is_some() {
                continue;
            }

            match self.place(pointer, alias, &subs) {
                Some(idx) => {
                    subs[idx].insert(alias.to_string());
                }
                None => {
                    let id = first_id + subs.len();
                    tracing::debug!(alias, pointer, cluster = id, "new pointer cluster");
                    subs.push(AliasCluster::new(id, alias.to_string()).with_pointer(pointer));
                }
            }
        }

        if singles.is_empty() {
            return (subs, Vec::new());
        }

        match subs.len() {
            0 => {
                let mut cluster = AliasCluster::new(first_id, singles.remove(0)).with_pointer(pointer);
                cluster.extend(singles);
                (vec![cluster], Vec::new())
            }
            1 => {
                subs[0].extend(singles);
                (subs, Vec::new())
            }
            n => {
                tracing::warn!(
                    pointer,
                    clusters = n,
                    orphans = ?singles,
                    "ambiguous single-token aliases left unassigned"
                );
                (subs, singles)
            }
        }
    }

    /// First sub-cluster with a member the alias can merge with. Read-only
    /// over `subs`.
    fn place(&self, pointer: &str, alias: &str, subs: &[AliasCluster]) -> Option<usize> {
        subs.iter().position(|cluster| {
            cluster
                .members()
                .iter()
                .any(|member| self.suffixes_match(pointer, alias, member))
        })
    }

    /// Compares the two aliases with the pointer prefix removed.
    #[must_use]
    pub fn suffixes_match(&self, pointer: &str, alias: &str, member: &str) -> bool {
        if self.is_excluded(alias, member) {
            return false;
        }

        let suffix_a = strip_pointer(pointer, alias);
        let suffix_m = strip_pointer(pointer, member);

        if char_len(suffix_a) < SHORT_ALIAS_LEN || char_len(suffix_m) < SHORT_ALIAS_LEN {
            return suffix_a == suffix_m;
        }

        either_contains(suffix_a, suffix_m) || jaccard(suffix_a, suffix_m) >= POINTER_JACCARD_THRESHOLD
    }

    /// True when the two aliases carry opposing qualifiers.
    #[must_use]
    pub fn is_excluded(&self, a: &str, b: &str) -> bool {
        self.exclude_pairs.iter().any(|(x, y)| {
            (a.contains(x.as_str()) && b.contains(y.as_str()))
                || (a.contains(y.as_str()) && b.contains(x.as_str()))
        })
    }
}

impl Default for PointerClusterer {
    fn default() -> Self {
        Self::new(&ClusteringConfig::default())
    }
}

fn strip_pointer<'a>(pointer: &str, alias: &'a str) -> &'a str {
    alias.strip_prefix(pointer).unwrap_or(alias).trim()
}
