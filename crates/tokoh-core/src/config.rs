use std::path::Path;

use serde::{Deserialize, Serialize};

/// Jaro similarity an alias pair must reach in the pointerless phase.
pub const POINTERLESS_JARO_THRESHOLD: f64 = 0.82;

/// Jaccard similarity a suffix pair must reach in the pointer phase.
pub const POINTER_JACCARD_THRESHOLD: f64 = 0.75;

/// Aliases (or pointer suffixes) shorter than this only merge on exact matches.
pub const SHORT_ALIAS_LEN: usize = 4;

/// A clitic is only stripped when the alias is longer than `suffix + STEM_GUARD`.
pub const STEM_GUARD: usize = 2;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(a, b)| ((*a).to_string(), (*b).to_string()))
        .collect()
}

/// Surface-form canonicalization tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Whole words that are never stripped
    pub exceptions: Vec<String>,
    /// Stripped from single-token aliases only
    pub possessive_clitics: Vec<String>,
    /// Stripped regardless of token count
    pub emphatic_clitics: Vec<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            exceptions: strings(&[
                "allah",
                "nabilah",
                "kahlil",
                "permaisuri",
                "istri",
                "puteri",
                "karyawan",
            ]),
            possessive_clitics: strings(&["nya", "ku", "mu"]),
            emphatic_clitics: strings(&["lah", "kah", "tah", "nda"]),
        }
    }
}

/// Tables shared by the pointer and pointerless clustering phases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Kinship/honorific prefixes, in enumeration order
    pub pointers: Vec<String>,
    /// Qualifier pairs that must never end up in the same pointer cluster
    pub exclude_pairs: Vec<(String, String)>,
    /// Known bad pointerless merges (unordered)
    pub false_merges: Vec<(String, String)>,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            pointers: strings(&[
                "ibu",
                "pak",
                "puteri",
                "permaisuri",
                "raja",
                "putera",
                "ayah",
                "istri",
                "suami",
                "uwak",
                "menteri",
                "bunda",
                "anak",
                "kakak",
                "adik",
                "kakek",
                "orang tua",
                "tetangga",
                "putri",
                "beru tandang",
                "putroe",
                "telangkai",
                "tuhan",
                "abang",
            ]),
            exclude_pairs: pairs(&[("bungsu", "sulung"), ("muda", "tua"), ("mahkota", "biasa")]),
            false_merges: pairs(&[
                ("raja", "rajawali"),
                ("putri", "putri malu"),
                ("raja", "rajagaluh"),
            ]),
        }
    }
}

/// One row of the keyword ontology
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleEntry {
    pub keyword: String,
    pub role: String,
}

impl RoleEntry {
    #[must_use]
    pub fn new(keyword: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            role: role.into(),
        }
    }
}

/// Role ontology and role-merge veto tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleConfig {
    /// Ordered (keyword, role) table; earlier entries win
    pub ontology: Vec<RoleEntry>,
    /// Keyword pairs that veto a role merge when split across two persons
    pub exclude_pairs: Vec<(String, String)>,
    /// Regex for ordinal expressions ("ke-2", "kedua")
    pub ordinal_pattern: String,
    /// Substring marking the generic parent concept
    pub generic_parent: String,
    /// Roles that receive copies of generic-parent aliases
    pub parent_roles: Vec<String>,
}

impl Default for RoleConfig {
    fn default() -> Self {
        let ontology = [
            ("ayah", "ayah"),
            ("bapak", "ayah"),
            ("pak", "ayah"),
            ("suami", "ayah"),
            ("yah", "ayah"),
            ("papa", "ayah"),
            ("pa", "ayah"),
            ("ibu", "ibu"),
            ("bunda", "ibu"),
            ("bu", "ibu"),
            ("istri", "ibu"),
            ("isteri", "ibu"),
            ("istrinya", "ibu"),
            ("istri petani", "ibu"),
            ("mama", "ibu"),
            ("ma", "ibu"),
            ("kakek", "kakek"),
            ("kek", "kakek"),
            ("nenek", "nenek"),
            ("nek", "nenek"),
            ("anak", "anak"),
            ("nak", "anak"),
            ("puteri sulung", "anak perempuan sulung"),
            ("puteri bungsu", "anak perempuan bungsu"),
            ("puteri", "anak perempuan"),
            ("putri", "anak perempuan"),
            ("gadis", "anak perempuan"),
            ("putera", "anak laki-laki"),
            ("kanda", "anak laki-laki"),
            ("kakak", "kakak"),
            ("kak", "kakak"),
            ("kaka", "kakak"),
            ("ka", "kakak"),
            ("adik", "adik"),
            ("adek", "adik"),
            ("dik", "adik"),
            ("abang", "abang"),
            ("bang", "abang"),
            ("wak", "penolong"),
            ("pawang", "penolong"),
            ("penduduk", "warga"),
            ("warga", "warga"),
            ("rakyat", "warga"),
            ("masyarakat", "warga"),
            ("tuhan", "tuhan"),
            ("tuhan yang maha esa", "tuhan"),
            ("yang maha esa", "tuhan"),
            ("yang maha kuasa", "tuhan"),
            ("maha kuasa", "tuhan"),
            ("yang maha agung", "tuhan"),
            ("maha agung", "tuhan"),
            ("yang kuasa", "tuhan"),
            ("yang agung", "tuhan"),
            ("yang maha bijaksana", "tuhan"),
            ("maha bijaksana", "tuhan"),
            ("penguasa alam", "tuhan"),
            ("pencipta", "tuhan"),
            ("sang pencipta", "tuhan"),
            ("sang penguasa", "tuhan"),
            ("sang maha kuasa", "tuhan"),
        ];

        Self {
            ontology: ontology
                .iter()
                .map(|(keyword, role)| RoleEntry::new(*keyword, *role))
                .collect(),
            exclude_pairs: pairs(&[("sulung", "bungsu"), ("muda", "tua"), ("mahkota", "biasa")]),
            ordinal_pattern: r"\bke(?:-?\d+|satu|dua|tiga|empat|lima|enam|tujuh|delapan|sembilan|sepuluh|belas|puluh|ratus|ribu)\b"
                .to_string(),
            generic_parent: "orang tua".to_string(),
            parent_roles: strings(&["ayah", "ibu"]),
        }
    }
}

/// Every immutable table the resolver components are built from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub normalizer: NormalizerConfig,
    pub clustering: ClusteringConfig,
    pub roles: RoleConfig,
}

impl ResolverConfig {
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> crate::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_entries("normalizer.possessive_clitics", &self.normalizer.possessive_clitics)?;
        check_entries("normalizer.emphatic_clitics", &self.normalizer.emphatic_clitics)?;
        check_entries("clustering.pointers", &self.clustering.pointers)?;

        let keywords: Vec<String> = self
            .roles
            .ontology
            .iter()
            .map(|entry| entry.keyword.clone())
            .collect();
        check_entries("roles.ontology", &keywords)?;

        if self.roles.generic_parent.trim().is_empty() {
            return Err(ConfigError::EmptyEntry {
                table: "roles.generic_parent",
                index: 0,
            });
        }

        regex::Regex::new(&self.roles.ordinal_pattern)?;
        Ok(())
    }
}

fn check_entries(table: &'static str, entries: &[String]) -> Result<(), ConfigError> {
    for (index, entry) in entries.iter().enumerate() {
        if entry.trim().is_empty() {
            return Err(ConfigError::EmptyEntry { table, index });
        }
        if entry.chars().any(char::is_uppercase) {
            return Err(ConfigError::NotLowercase {
                table,
                entry: entry.clone(),
            });
        }
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Empty entry at index {index} in {table}")]
    EmptyEntry { table: &'static str, index: usize },
    #[error("Entry '{entry}' in {table} must be lowercase")]
    NotLowercase { table: &'static str, entry: String },
    #[error("Ordinal pattern does not compile: {0}")]
    InvalidOrdinalPattern(#[from] regex::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ResolverConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.clustering.pointers.len(), 24);
        assert_eq!(config.clustering.pointers[0], "ibu");
        assert_eq!(config.roles.ontology[0], RoleEntry::new("ayah", "ayah"));
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config =
            ResolverConfig::from_json_str(r#"{"clustering": {"pointers": ["raja"]}}"#).unwrap();

        assert_eq!(config.clustering.pointers, vec!["raja".to_string()]);
        assert_eq!(config.clustering.false_merges.len(), 3);
        assert_eq!(config.normalizer, NormalizerConfig::default());
        assert_eq!(config.roles, RoleConfig::default());
    }

    #[test]
    fn test_empty_pointer_rejected() {
        let err = ResolverConfig::from_json_str(r#"{"clustering": {"pointers": ["ibu", " "]}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            crate::Error::InvalidConfig(ConfigError::EmptyEntry { index: 1, .. })
        ));
    }

    #[test]
    fn test_uppercase_keyword_rejected() {
        let mut config = ResolverConfig::default();
        config.roles.ontology.push(RoleEntry::new("Raja", "raja"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotLowercase { .. })
        ));
    }

    #[test]
    fn test_bad_ordinal_pattern_rejected() {
        let mut config = ResolverConfig::default();
        config.roles.ordinal_pattern = "ke(".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidOrdinalPattern(_))
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = ResolverConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed = ResolverConfig::from_json_str(&json).unwrap();

        assert_eq!(config, parsed);
    }
}
