use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Sentinel the upstream uses for fields it has no data for.
const UNKNOWN_SENTINEL: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    pub status: String,
    pub species: String,
    pub gender: String,
    pub origin: LocationRef,
    pub location: LocationRef,
    pub image: String,
    #[serde(default)]
    pub episode: Vec<String>,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationRef {
    pub name: String,
}

impl LocationRef {
    pub fn is_unknown(&self) -> bool {
        self.name.is_empty() || self.name == UNKNOWN_SENTINEL
    }

    /// Renderers show a distinct badge instead of the raw sentinel.
    pub fn display_name(&self) -> &str {
        if self.is_unknown() {
            "Unknown"
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Episode {
    pub id: u64,
    pub name: String,
    pub air_date: String,
    pub episode: String,
}

/// One fetched batch, immutable once stored. `next_page` is `None` on the
/// last page of the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterPage {
    pub characters: Vec<Character>,
    pub next_page: Option<u32>,
}

#[derive(Deserialize)]
pub(crate) struct PageEnvelope {
    pub(crate) info: PageInfo,
    pub(crate) results: Vec<Character>,
}

#[derive(Deserialize)]
pub(crate) struct PageInfo {
    pub(crate) next: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Manual,
    Auto,
}

impl Mode {
    pub(crate) fn toggled(self) -> Self {
        match self {
            Mode::Manual => Mode::Auto,
            Mode::Auto => Mode::Manual,
        }
    }
}
