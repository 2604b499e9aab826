//! Quick-navigation command palette.
//!
//! Opened and closed with the platform's primary modifier + K, closed with
//! Escape. While open, the typed query ranks destinations: label prefix
//! matches first, then substring matches, then close misspellings.

use serde::{Deserialize, Serialize};

use super::Destination;

/// Minimum Jaro-Winkler similarity for a fuzzy match.
const FUZZY_THRESHOLD: f64 = 0.85;

/// Host platform, which decides the primary modifier key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Command (Meta) is the primary modifier
    Mac,
    /// Control is the primary modifier
    #[default]
    Other,
}

/// A key press with its modifier state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct KeyChord {
    /// Key name as reported by the host ("k", "K", "Escape", ...)
    pub key: String,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub alt: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }
}

impl Platform {
    /// Whether the chord holds this platform's primary modifier.
    pub fn primary_held(&self, chord: &KeyChord) -> bool {
        match self {
            Platform::Mac => chord.meta,
            Platform::Other => chord.ctrl,
        }
    }
}

/// State of the quick-navigation palette.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommandPalette {
    platform: Platform,
    open: bool,
    query: String,
}

impl CommandPalette {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            open: false,
            query: String::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Handle a key press. Returns true when the palette consumed it.
    pub fn handle_key(&mut self, chord: &KeyChord) -> bool {
        if self.platform.primary_held(chord) && chord.key.eq_ignore_ascii_case("k") {
            self.toggle();
            return true;
        }
        if self.open && chord.key == "Escape" {
            self.close();
            return true;
        }
        false
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open = true;
        }
    }

    /// Close the palette and clear the query.
    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Destinations matching the current query, best first.
    pub fn matches(&self) -> Vec<Destination> {
        rank_destinations(&self.query)
    }

    /// Activate a destination and close the palette.
    pub fn select(&mut self, dest: Destination) -> Destination {
        tracing::debug!(destination = %dest, "palette selection");
        self.close();
        dest
    }

    /// Activate the best match for the current query, if any.
    pub fn select_first(&mut self) -> Option<Destination> {
        let first = self.matches().into_iter().next()?;
        Some(self.select(first))
    }
}

/// Rank destinations against a query. A blank query lists every destination
/// in sidebar order.
pub fn rank_destinations(query: &str) -> Vec<Destination> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Destination::ALL.to_vec();
    }

    let mut scored: Vec<(f64, Destination)> = Destination::ALL
        .into_iter()
        .filter_map(|dest| score(&dest, &query).map(|s| (s, dest)))
        .collect();
    // Stable sort keeps sidebar order among equal scores
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().map(|(_, dest)| dest).collect()
}

fn score(dest: &Destination, query: &str) -> Option<f64> {
    let label = dest.label().to_lowercase();
    if label.starts_with(query) {
        return Some(3.0);
    }
    if label.split_whitespace().any(|word| word.starts_with(query)) {
        return Some(2.5);
    }
    if label.contains(query) {
        return Some(2.0);
    }
    let similarity = strsim::jaro_winkler(&label, query);
    (similarity >= FUZZY_THRESHOLD).then_some(similarity)
}
