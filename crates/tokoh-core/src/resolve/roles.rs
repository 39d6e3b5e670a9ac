use std::collections::BTreeSet;

use crate::config::{RoleConfig, RoleEntry};

/// Maps aliases to coarse roles through an ordered keyword ontology.
///
/// A whole-alias match is tried first, then each table entry (in order) is
/// checked against the alias tokens. Earlier entries always win.
#[derive(Debug, Clone)]
pub struct RoleMapper {
    entries: Vec<RoleEntry>,
}

impl RoleMapper {
    #[must_use]
    pub fn new(config: &RoleConfig) -> Self {
        Self {
            entries: config.ontology.clone(),
        }
    }

    #[must_use]
    pub fn role_of(&self, alias: &str) -> Option<&str> {
        let alias = alias.trim().to_lowercase();

        if let Some(entry) = self.entries.iter().find(|e| e.keyword == alias) {
            return Some(&entry.role);
        }

        let tokens: Vec<&str> = alias.split_whitespace().collect();
        self.entries
            .iter()
            .find(|e| tokens.contains(&e.keyword.as_str()))
            .map(|e| e.role.as_str())
    }

    /// Distinct roles across a set of aliases.
    pub fn roles_of<'a, I>(&self, aliases: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        aliases
            .into_iter()
            .filter_map(|alias| self.role_of(alias))
            .map(str::to_string)
            .collect()
    }

    /// Position of the first ontology entry yielding `role`.
    #[must_use]
    pub fn precedence(&self, role: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.role == role)
    }

    /// The member of `roles` with the earliest ontology entry.
    #[must_use]
    pub fn primary_role(&self, roles: &BTreeSet<String>) -> Option<String> {
        roles
            .iter()
            .min_by_key(|role| self.precedence(role).unwrap_or(usize::MAX))
            .cloned()
    }
}

impl Default for RoleMapper {
    fn default() -> Self {
        Self::new(&RoleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_match() {
        let mapper = RoleMapper::default();
        assert_eq!(mapper.role_of("sang ayah"), Some("ayah"));
        assert_eq!(mapper.role_of("Pak Tani"), Some("ayah"));
        assert_eq!(mapper.role_of("nenek kebayan"), Some("nenek"));
        assert_eq!(mapper.role_of("anak ke-2"), Some("anak"));
    }

    #[test]
    fn test_whole_alias_match_beats_tokens() {
        let mapper = RoleMapper::default();
        assert_eq!(mapper.role_of("puteri sulung"), Some("anak perempuan sulung"));
        assert_eq!(mapper.role_of("sang puteri sulung"), Some("anak perempuan"));
        assert_eq!(mapper.role_of("yang maha kuasa"), Some("tuhan"));
    }

    #[test]
    fn test_table_order_decides_between_tokens() {
        let mapper = RoleMapper::default();
        // "bapak" precedes "ibu" in the table
        assert_eq!(mapper.role_of("ibu bapak"), Some("ayah"));
    }

    #[test]
    fn test_no_match() {
        let mapper = RoleMapper::default();
        assert_eq!(mapper.role_of("si kancil"), None);
        assert_eq!(mapper.role_of("orang tua"), None);
        assert_eq!(mapper.role_of(""), None);
        // keywords match whole tokens, not substrings
        assert_eq!(mapper.role_of("pakaian"), None);
    }

    #[test]
    fn test_roles_of_and_primary_role() {
        let mapper = RoleMapper::default();
        let aliases: Vec<String> = ["dayang", "ibu", "sang kakak"].iter().map(|s| (*s).to_string()).collect();

        let roles = mapper.roles_of(&aliases);
        assert_eq!(roles.len(), 2);
        assert_eq!(mapper.primary_role(&roles).as_deref(), Some("ibu"));
        assert_eq!(mapper.primary_role(&BTreeSet::new()), None);
    }
}
