use std::collections::BTreeSet;

use regex::Regex;

use crate::config::RoleConfig;
use crate::person::{Person, PersonId};

use super::roles::RoleMapper;

/// Merges persons of one story whose alias role sets are identical, then
/// spreads generic-parent aliases onto the father and mother.
#[derive(Debug, Clone)]
pub struct RoleMerger {
    mapper: RoleMapper,
    exclude_pairs: Vec<(String, String)>,
    ordinal: Regex,
    generic_parent: String,
    parent_roles: Vec<String>,
}

impl RoleMerger {
    pub fn new(config: &RoleConfig) -> crate::Result<Self> {
        Ok(Self {
            mapper: RoleMapper::new(config),
            exclude_pairs: config.exclude_pairs.clone(),
            ordinal: Regex::new(&config.ordinal_pattern)?,
            generic_parent: config.generic_parent.clone(),
            parent_roles: config.parent_roles.clone(),
        })
    }

    #[must_use]
    pub fn mapper(&self) -> &RoleMapper {
        &self.mapper
    }

    #[must_use]
    pub fn contains_ordinal(&self, alias: &str) -> bool {
        self.ordinal.is_match(&alias.trim().to_lowercase())
    }

    /// True when some alias of `a` and some alias of `b` carry opposing
    /// keywords.
    #[must_use]
    pub fn has_exclusion_conflict(&self, a: &BTreeSet<String>, b: &BTreeSet<String>) -> bool {
        a.iter().any(|x| {
            b.iter().any(|y| {
                self.exclude_pairs.iter().any(|(p, q)| {
                    (x.contains(p.as_str()) && y.contains(q.as_str()))
                        || (x.contains(q.as_str()) && y.contains(p.as_str()))
                })
            })
        })
    }

    fn is_generic_parent(&self, alias: &str) -> bool {
        alias.contains(self.generic_parent.as_str())
    }

    #[must_use]
    pub fn merge(&self, persons: &[Person]) -> Vec<Person> {
        let roles: Vec<BTreeSet<String>> = persons
            .iter()
            .map(|p| self.mapper.roles_of(&p.aliases))
            .collect();

        let mut visited = vec![false; persons.len()];
        let mut merged: Vec<Person> = Vec::new();

        for i in 0..persons.len() {
            if visited[i] {
                continue;
            }
            visited[i] = true;

            let mut current = persons[i].clone();

            for j in (i + 1)..persons.len() {
                if visited[j] {
                    continue;
                }
                let other = &persons[j];

                if current
                    .aliases
                    .iter()
                    .chain(&other.aliases)
                    .any(|a| self.contains_ordinal(a))
                {
                    continue;
                }
                if roles[i].is_empty() || roles[i] != roles[j] {
                    continue;
                }
                if self.has_exclusion_conflict(&current.aliases, &other.aliases) {
                    tracing::debug!(left = %current.id, right = %other.id, "role merge vetoed by exclusion pair");
                    continue;
                }

                tracing::debug!(into = %current.id, from = %other.id, roles = ?roles[i], "merging by role");
                current.aliases.extend(other.aliases.iter().cloned());
                current.sentence_ids.extend(other.sentence_ids.iter().copied());
                visited[j] = true;
            }

            current.roles.clone_from(&roles[i]);
            current.role = self.mapper.primary_role(&roles[i]);
            merged.push(current);
        }

        self.propagate_generic_parent(&mut merged);

        for (person, n) in merged.iter_mut().zip(1u32..) {
            person.id = PersonId(n);
        }
        merged
    }

    /// Copies the generic-parent aliases of the first person holding any into
    /// every parent-role person, dropping the source if nothing else is left
    /// in it.
    fn propagate_generic_parent(&self, persons: &mut Vec<Person>) {
        let Some(source) = persons
            .iter()
            .position(|p| p.aliases.iter().any(|a| self.is_generic_parent(a)))
        else {
            return;
        };

        let generic: Vec<String> = persons[source]
            .aliases
            .iter()
            .filter(|a| self.is_generic_parent(a))
            .cloned()
            .collect();

        for (idx, person) in persons.iter_mut().enumerate() {
            let is_parent = person
                .role
                .as_ref()
                .is_some_and(|r| self.parent_roles.contains(r));
            if idx != source && is_parent {
                person.aliases.extend(generic.iter().cloned());
            }
        }

        if persons[source].aliases.iter().all(|a| self.is_generic_parent(a)) {
            let dropped = persons.remove(source);
            tracing::debug!(person = %dropped.id, "dropped generic parent cluster");
        }
    }
}
