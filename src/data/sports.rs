//! Sport catalog.
//!
//! Resolves free-form sport input ("soccer", "Hockey", "ball") to The Odds
//! API sport keys. Lookup is a case-insensitive substring match on the
//! entry name, collecting the keys of every matching entry, so a short
//! input like "ball" resolves to both basketball and football leagues.

use serde::Deserialize;
use tracing::debug;

// ---------------------------------------------------------------------------
// Built-in table
// ---------------------------------------------------------------------------

struct BuiltinSport {
    name: &'static str,
    keys: &'static [&'static str],
}

const BUILTIN_SPORTS: &[BuiltinSport] = &[
    BuiltinSport { name: "football", keys: &["americanfootball_cfl", "americanfootball_nfl"] },
    BuiltinSport { name: "basketball", keys: &["basketball_euroleague", "basketball_nba"] },
    BuiltinSport { name: "boxing", keys: &["boxing_boxing"] },
    BuiltinSport { name: "cricket", keys: &["cricket_icc_world_cup"] },
    BuiltinSport {
        name: "golf",
        keys: &[
            "golf_masters_tournament_winner",
            "golf_pga_championship_winner",
            "golf_the_open_championship_winner",
            "golf_us_open_winner",
        ],
    },
    BuiltinSport {
        name: "ice hockey",
        keys: &[
            "icehockey_nhl",
            "icehockey_nhl_championship_winner",
            "icehockey_sweden_allsvenskan",
            "icehockey_sweden_hockey_league",
        ],
    },
    BuiltinSport { name: "mixed_martial_arts", keys: &["mma_mixed_martial_arts"] },
    BuiltinSport { name: "politics", keys: &["politics_us_presidential_election_winner"] },
    BuiltinSport {
        name: "soccer",
        keys: &[
            "soccer_australia_aleague",
            "soccer_austria_bundesliga",
            "soccer_belgium_first_div",
            "soccer_brazil_campeonato",
            "soccer_brazil_serie_b",
            "soccer_chile_campeonato",
            "soccer_denmark_superliga",
            "soccer_efl_champ",
            "soccer_england_league1",
            "soccer_england_league2",
            "soccer_epl",
            "soccer_fa_cup",
            "soccer_france_ligue_one",
            "soccer_france_ligue_two",
            "soccer_germany_bundesliga",
            "soccer_germany_bundesliga2",
            "soccer_germany_liga3",
            "soccer_greece_super_league",
            "soccer_italy_serie_a",
            "soccer_italy_serie_b",
            "soccer_japan_j_league",
            "soccer_korea_kleague1",
            "soccer_mexico_ligamx",
            "soccer_netherlands_eredivisie",
            "soccer_norway_eliteserien",
            "soccer_poland_ekstraklasa",
            "soccer_portugal_primeira_liga",
            "soccer_spain_la_liga",
            "soccer_spain_segunda_division",
            "soccer_spl",
            "soccer_sweden_allsvenskan",
            "soccer_sweden_superettan",
            "soccer_switzerland_superleague",
            "soccer_turkey_super_league",
            "soccer_uefa_champs_league",
            "soccer_uefa_euro_qualification",
            "soccer_uefa_europa_conference_league",
            "soccer_uefa_europa_league",
            "soccer_usa_mls",
        ],
    },
];

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// One catalog row: a display name and the provider keys it expands to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SportEntry {
    pub name: String,
    pub keys: Vec<String>,
}

/// Immutable sport-name → provider-key table.
#[derive(Debug, Clone)]
pub struct SportCatalog {
    entries: Vec<SportEntry>,
}

impl Default for SportCatalog {
    fn default() -> Self {
        let entries = BUILTIN_SPORTS
            .iter()
            .map(|s| SportEntry {
                name: s.name.to_string(),
                keys: s.keys.iter().map(|k| k.to_string()).collect(),
            })
            .collect();
        Self { entries }
    }
}

impl SportCatalog {
    pub fn new(entries: Vec<SportEntry>) -> Self {
        Self { entries }
    }

    /// Use `entries` if any are configured, otherwise the built-in table.
    pub fn from_config(entries: &[SportEntry]) -> Self {
        if entries.is_empty() {
            Self::default()
        } else {
            Self::new(entries.to_vec())
        }
    }

    pub fn entries(&self) -> &[SportEntry] {
        &self.entries
    }

    /// All provider keys whose entry name contains `input`, ignoring case.
    ///
    /// Keys come back in table order with duplicates removed. Callers
    /// should reject blank input: an empty needle matches every entry.
    pub fn find_keys(&self, input: &str) -> Vec<String> {
        let needle = input.to_lowercase();
        let mut keys: Vec<String> = Vec::new();

        for entry in &self.entries {
            if entry.name.to_lowercase().contains(&needle) {
                for key in &entry.keys {
                    if !keys.contains(key) {
                        keys.push(key.clone());
                    }
                }
            }
        }

        debug!(input, matched = keys.len(), "Sport keys resolved");
        keys
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
