use serde::{Deserialize, Serialize};

/// Provisional equivalence class of aliases. Members keep insertion order and
/// are never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasCluster {
    pub id: usize,
    /// Prefix shared by every member, for clusters built per pointer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
    members: Vec<String>,
}

impl AliasCluster {
    #[must_use]
    pub fn new(id: usize, first: String) -> Self {
        Self {
            id,
            pointer: None,
            members: vec![first],
        }
    }

    #[must_use]
    pub fn with_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.pointer = Some(pointer.into());
        self
    }

    /// Adds `alias` unless it is already a member.
    pub fn insert(&mut self, alias: String) -> bool {
        if self.contains(&alias) {
            return false;
        }
        self.members.push(alias);
        true
    }

    pub fn extend(&mut self, aliases: impl IntoIterator<Item = String>) {
        for alias in aliases {
            self.insert(alias);
        }
    }

    #[must_use]
    pub fn contains(&self, alias: &str) -> bool {
        self.members.iter().any(|m| m == alias)
    }

    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Index of the cluster that already holds `alias`, if any.
#[must_use]
pub fn find_member(clusters: &[AliasCluster], alias: &str) -> Option<usize> {
    clusters.iter().position(|c| c.contains(alias))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_deduplicates() {
        let mut cluster = AliasCluster::new(1, "putri".into());
        assert!(cluster.insert("sang putri".into()));
        assert!(!cluster.insert("putri".into()));
        assert_eq!(cluster.members(), ["putri", "sang putri"]);
    }

    #[test]
    fn test_find_member() {
        let clusters = vec![
            AliasCluster::new(1, "raja".into()),
            AliasCluster::new(2, "dayang sumbi".into()).with_pointer("dayang"),
        ];
        assert_eq!(find_member(&clusters, "dayang sumbi"), Some(1));
        assert_eq!(find_member(&clusters, "sumbi"), None);
    }
}
