use std::collections::BTreeSet;

use crate::person::{Person, PersonId, StoryId};

use super::cluster::AliasCluster;

/// Numbers pointer clusters first, then pointerless clusters, as `Tokoh-1..`.
#[must_use]
pub fn merge_clusters(
    story_id: StoryId,
    pointer_clusters: &[AliasCluster],
    pointerless_clusters: &[AliasCluster],
) -> Vec<Person> {
    pointer_clusters
        .iter()
        .chain(pointerless_clusters)
        .zip(1u32..)
        .map(|(cluster, n)| {
            let aliases: BTreeSet<String> = cluster.members().iter().cloned().collect();
            Person::new(PersonId(n), story_id, aliases)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(id: usize, aliases: &[&str]) -> AliasCluster {
        let mut c = AliasCluster::new(id, aliases[0].to_string());
        c.extend(aliases[1..].iter().map(|a| (*a).to_string()));
        c
    }

    #[test]
    fn test_pointer_clusters_numbered_first() {
        let pointer = vec![cluster(1, &["ibu tani", "ibu"]), cluster(2, &["raja"])];
        let pointerless = vec![cluster(1, &["sang kancil", "kancil"])];

        let persons = merge_clusters(3, &pointer, &pointerless);

        let ids: Vec<String> = persons.iter().map(|p| p.id.to_string()).collect();
        assert_eq!(ids, vec!["Tokoh-1", "Tokoh-2", "Tokoh-3"]);
        assert!(persons[0].has_alias("ibu"));
        assert!(persons[2].has_alias("kancil"));
        assert!(persons.iter().all(|p| p.story_id == 3 && p.role.is_none()));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(merge_clusters(1, &[], &[]).is_empty());
    }
}
