//! Maps vendor ids to display names.
//!
//! A lookup miss is never an error: the raw id is shown instead. Fallback
//! chains are written as ordered candidate lists passed to [`first_present`].

use std::collections::HashMap;

use super::locale::Locale;
use crate::source::{RawTable, Rarity, TeamEntry};

/// First candidate that is present and not blank.
pub fn first_present<I, S>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|c| !AsRef::<str>::as_ref(c).trim().is_empty())
        .map(|c| AsRef::<str>::as_ref(&c).to_string())
}

/// A static id -> display name table
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    names: HashMap<String, String>,
}

impl NameTable {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            names: pairs
                .iter()
                .map(|(id, name)| (id.to_string(), name.to_string()))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Display name for `id`, or `id` itself when unknown
    pub fn resolve(&self, id: &str) -> String {
        first_present([self.get(id), Some(id)]).unwrap_or_else(|| id.to_string())
    }
}

/// Nations, factions and teams from `handbook_team_table.json`
#[derive(Debug, Clone, Default)]
pub struct TeamIndex {
    entries: HashMap<String, TeamEntry>,
}

impl TeamIndex {
    /// Decode the raw team table, dropping entries that do not decode.
    pub fn from_raw(raw: &RawTable) -> Self {
        let mut entries = HashMap::with_capacity(raw.len());
        for (id, value) in raw {
            match serde_json::from_value::<TeamEntry>(value.clone()) {
                Ok(entry) => {
                    entries.insert(id.clone(), entry);
                }
                Err(e) => tracing::warn!(%id, error = %e, "skipping undecodable team entry"),
            }
        }
        Self { entries }
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, TeamEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn name(&self, id: &str) -> Option<&str> {
        self.entries
            .get(id)
            .and_then(|e| e.power_name.as_deref())
            .filter(|n| !n.is_empty())
    }

    /// Entries sorted by id
    pub fn iter_sorted(&self) -> Vec<(&str, &TeamEntry)> {
        let mut all: Vec<_> = self.entries.iter().map(|(k, v)| (k.as_str(), v)).collect();
        all.sort_by(|a, b| a.0.cmp(b.0));
        all
    }
}

/// All cross-reference lookups used while assembling an operator row
#[derive(Debug, Clone)]
pub struct Resolver {
    classes: NameTable,
    archetypes: NameTable,
    teams: TeamIndex,
}

impl Resolver {
    pub fn new(locale: Locale, teams: TeamIndex) -> Self {
        Self {
            classes: NameTable::new(locale.class_names()),
            archetypes: NameTable::new(locale.archetype_names()),
            teams,
        }
    }

    pub fn teams(&self) -> &TeamIndex {
        &self.teams
    }

    pub fn class_name(&self, profession: Option<&str>) -> Option<String> {
        profession.map(|id| self.classes.resolve(id))
    }

    pub fn archetype_name(&self, sub_profession: Option<&str>) -> Option<String> {
        sub_profession.map(|id| self.archetypes.resolve(id))
    }

    /// Group name, else nation name, else whichever raw id is present
    pub fn affiliation(&self, group_id: Option<&str>, nation_id: Option<&str>) -> Option<String> {
        first_present([
            group_id.and_then(|id| self.teams.name(id)),
            nation_id.and_then(|id| self.teams.name(id)),
            group_id,
            nation_id,
        ])
    }

    /// Team-table display name for any affiliation id (nation, team, ...)
    pub fn power_name(&self, id: Option<&str>) -> Option<String> {
        let id = id?;
        first_present([self.teams.name(id), Some(id)])
    }
}

/// `TIER_n` -> n; legacy 0-based integers -> n + 1
pub fn resolve_rarity(rarity: Option<&Rarity>) -> Option<i64> {
    match rarity? {
        Rarity::Tier(code) => code
            .strip_prefix("TIER_")
            .and_then(|n| n.parse::<i64>().ok())
            .filter(|n| (1..=6).contains(n)),
        Rarity::Legacy(n) => Some(n + 1).filter(|n| (1..=6).contains(n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(name: &str) -> TeamEntry {
        TeamEntry {
            power_name: Some(name.to_string()),
            ..Default::default()
        }
    }

    fn resolver() -> Resolver {
        let teams = TeamIndex::from_entries([
            ("penguin".to_string(), team("ペンギン急便")),
            ("lungmen".to_string(), team("龍門")),
            ("action4".to_string(), team("行動予備隊A4")),
        ]);
        Resolver::new(Locale::JaJp, teams)
    }

    #[test]
    fn test_first_present_skips_blank() {
        assert_eq!(
            first_present([None, Some(""), Some("  "), Some("b"), Some("c")]),
            Some("b".to_string())
        );
        assert_eq!(first_present::<_, &str>([None, None]), None);
    }

    #[test]
    fn test_unknown_id_resolves_to_itself() {
        let resolver = resolver();
        assert_eq!(resolver.class_name(Some("TANK")), Some("重装".to_string()));
        assert_eq!(resolver.class_name(Some("TRAP")), Some("TRAP".to_string()));
        assert_eq!(resolver.archetype_name(Some("newthing")), Some("newthing".to_string()));
        assert_eq!(resolver.power_name(Some("nowhere")), Some("nowhere".to_string()));
        assert_eq!(resolver.class_name(None), None);
    }

    #[test]
    fn test_affiliation_prefers_group() {
        let resolver = resolver();
        assert_eq!(
            resolver.affiliation(Some("penguin"), Some("lungmen")),
            Some("ペンギン急便".to_string())
        );
        assert_eq!(resolver.affiliation(None, Some("lungmen")), Some("龍門".to_string()));
        assert_eq!(
            resolver.affiliation(Some("unknown_group"), Some("lungmen")),
            Some("龍門".to_string())
        );
        assert_eq!(resolver.affiliation(None, None), None);
    }

    #[test]
    fn test_rarity_codes() {
        assert_eq!(resolve_rarity(Some(&Rarity::Tier("TIER_6".into()))), Some(6));
        assert_eq!(resolve_rarity(Some(&Rarity::Tier("TIER_9".into()))), None);
        assert_eq!(resolve_rarity(Some(&Rarity::Tier("SSR".into()))), None);
        assert_eq!(resolve_rarity(Some(&Rarity::Legacy(0))), Some(1));
        assert_eq!(resolve_rarity(None), None);
    }
}
