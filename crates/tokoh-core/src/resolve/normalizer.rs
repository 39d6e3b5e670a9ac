use std::collections::HashSet;

use crate::config::{NormalizerConfig, STEM_GUARD};

use super::similarity::char_len;

/// Turns a raw surface form into a comparable alias.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, raw: &str) -> String;
}

/// Case-folds and trims; nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseFoldNormalizer;

impl Normalizer for CaseFoldNormalizer {
    fn normalize(&self, raw: &str) -> String {
        raw.trim().to_lowercase()
    }
}

/// Case-folds, trims, then strips at most one possessive clitic (single-token
/// aliases only) and at most one emphatic clitic.
#[derive(Debug, Clone)]
pub struct CliticNormalizer {
    exceptions: HashSet<String>,
    possessive: Vec<String>,
    emphatic: Vec<String>,
}

impl CliticNormalizer {
    #[must_use]
    pub fn new(config: &NormalizerConfig) -> Self {
        Self {
            exceptions: config.exceptions.iter().cloned().collect(),
            possessive: config.possessive_clitics.clone(),
            emphatic: config.emphatic_clitics.clone(),
        }
    }

    #[must_use]
    pub fn is_exception(&self, alias: &str) -> bool {
        self.exceptions.contains(alias)
    }
}

impl Default for CliticNormalizer {
    fn default() -> Self {
        Self::new(&NormalizerConfig::default())
    }
}

/// Strips the first clitic in `clitics` that `name` ends with, provided the
/// remaining stem keeps more than `STEM_GUARD` characters.
fn strip_clitic<'a>(name: &'a str, clitics: &[String]) -> Option<&'a str> {
    let len = char_len(name);
    clitics
        .iter()
        .find(|clitic| name.ends_with(clitic.as_str()) && len > char_len(clitic) + STEM_GUARD)
        .map(|clitic| &name[..name.len() - clitic.len()])
}

impl Normalizer for CliticNormalizer {
    fn normalize(&self, raw: &str) -> String {
        let folded = raw.trim().to_lowercase();
        if self.exceptions.contains(&folded) {
            return folded;
        }

        let mut name = folded.as_str();

        if name.split_whitespace().count() == 1 {
            if let Some(stem) = strip_clitic(name, &self.possessive) {
                name = stem;
            }
        }

        if let Some(stem) = strip_clitic(name, &self.emphatic) {
            name = stem;
        }

        name.trim().to_string()
    }
}
