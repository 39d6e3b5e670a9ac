use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub type StoryId = u32;
pub type SentenceId = u32;

/// One person-entity detection handed over by the NER stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMention {
    pub sentence_id: SentenceId,
    pub surface_form: String,
    #[serde(default = "full_confidence")]
    pub confidence: f64,
}

const fn full_confidence() -> f64 {
    1.0
}

impl RawMention {
    #[must_use]
    pub fn new(sentence_id: SentenceId, surface_form: impl Into<String>) -> Self {
        Self {
            sentence_id,
            surface_form: surface_form.into(),
            confidence: 1.0,
        }
    }

    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }
}

/// Canonical character label, rendered as `Tokoh-N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PersonId(pub u32);

const PERSON_PREFIX: &str = "Tokoh-";

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{PERSON_PREFIX}{}", self.0)
    }
}

impl std::str::FromStr for PersonId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(PERSON_PREFIX)
            .and_then(|n| n.parse().ok())
            .filter(|n| *n > 0)
            .map(Self)
            .ok_or_else(|| format!("invalid person id: '{s}' (expected Tokoh-N)"))
    }
}

impl From<PersonId> for String {
    fn from(id: PersonId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for PersonId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A resolved story character.
///
/// `roles` holds every distinct role its aliases map to; `role` is the single
/// role reported downstream, the member of `roles` whose ontology entry comes
/// first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub story_id: StoryId,
    pub aliases: BTreeSet<String>,
    pub roles: BTreeSet<String>,
    pub role: Option<String>,
    pub sentence_ids: BTreeSet<SentenceId>,
}

impl Person {
    #[must_use]
    pub fn new(id: PersonId, story_id: StoryId, aliases: BTreeSet<String>) -> Self {
        Self {
            id,
            story_id,
            aliases,
            roles: BTreeSet::new(),
            role: None,
            sentence_ids: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        let role = role.into();
        self.roles.insert(role.clone());
        self.role = Some(role);
        self
    }

    #[must_use]
    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases.contains(alias)
    }

    #[must_use]
    pub fn to_row(&self) -> PersonRow {
        PersonRow {
            story_id: self.story_id,
            person: self.id,
            aliases: self.aliases.iter().cloned().collect(),
            role: self.role.clone(),
            sentence_ids: self.sentence_ids.iter().copied().collect(),
        }
    }
}

/// Output table row consumed by feature engineering and classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRow {
    pub story_id: StoryId,
    pub person: PersonId,
    pub aliases: Vec<String>,
    pub role: Option<String>,
    pub sentence_ids: Vec<SentenceId>,
}
