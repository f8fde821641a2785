//! Serde models for the vendor's `gamedata/excel` tables.
//!
//! Every field is optional: the dumps change shape between game versions and
//! a missing field must degrade one record, not the whole run.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A table as loaded from disk: entry id -> undecoded JSON.
///
/// Entries are decoded one at a time so a malformed entry only costs that
/// entry.
pub type RawTable = BTreeMap<String, Value>;

/// One entry of `character_table.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub name: Option<String>,
    pub rarity: Option<Rarity>,
    pub profession: Option<String>,
    pub sub_profession_id: Option<String>,
    pub group_id: Option<String>,
    pub nation_id: Option<String>,
    pub team_id: Option<String>,
    pub item_usage: Option<String>,
    pub item_desc: Option<String>,
    pub is_not_obtainable: Option<bool>,
    pub skills: Option<Vec<Option<SkillRef>>>,
    pub talents: Option<Vec<Option<Talent>>>,
}

impl Character {
    pub fn is_obtainable(&self) -> bool {
        !self.is_not_obtainable.unwrap_or(false)
    }

    /// The display name, if present and not blank.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

/// Rarity as written by current (`"TIER_6"`) and older (`5`) dumps.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Rarity {
    Tier(String),
    Legacy(i64),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRef {
    pub skill_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Talent {
    pub candidates: Option<Vec<TalentCandidate>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TalentCandidate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub blackboard: Option<Vec<BlackboardEntry>>,
}

/// One entry of `skill_table.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Skill {
    pub levels: Option<Vec<SkillLevel>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillLevel {
    pub name: Option<String>,
    pub description: Option<String>,
    pub blackboard: Option<Vec<BlackboardEntry>>,
}

/// One named parameter used to fill a skill or talent description.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlackboardEntry {
    pub key: Option<String>,
    pub value: Option<BlackboardValue>,
    pub value_str: Option<String>,
}

impl BlackboardEntry {
    pub fn number(key: &str, value: f64) -> Self {
        Self {
            key: Some(key.to_string()),
            value: Some(BlackboardValue::Number(value)),
            value_str: None,
        }
    }

    pub fn text(key: &str, value: &str) -> Self {
        Self {
            key: Some(key.to_string()),
            value: Some(BlackboardValue::Text(value.to_string())),
            value_str: None,
        }
    }

    /// The usable value: `value`, else the `valueStr` text.
    pub fn resolved_value(&self) -> Option<BlackboardValue> {
        match (&self.value, &self.value_str) {
            (Some(v), _) => Some(v.clone()),
            (None, Some(s)) => Some(BlackboardValue::Text(s.clone())),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BlackboardValue {
    Number(f64),
    Text(String),
}

impl BlackboardValue {
    /// Numeric reading of the value; text counts when it parses as a float.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            BlackboardValue::Number(n) => Some(*n),
            BlackboardValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for BlackboardValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlackboardValue::Number(n) => write!(f, "{}", n),
            BlackboardValue::Text(s) => f.write_str(s),
        }
    }
}

/// Top level of `handbook_info_table.json`; only the per-character dict is used.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandbookInfoFile {
    #[serde(default)]
    pub handbook_dict: RawTable,
}

/// One character's entry in the handbook dict.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandbookEntry {
    pub story_text_audio: Option<Vec<StorySection>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorySection {
    pub story_title: Option<String>,
    pub stories: Option<Vec<Story>>,
}

impl StorySection {
    /// Title and first story text, when both are non-empty.
    pub fn title_and_text(&self) -> Option<(&str, &str)> {
        let title = self.story_title.as_deref().filter(|t| !t.is_empty())?;
        let text = self
            .stories
            .as_ref()?
            .first()?
            .story_text
            .as_deref()
            .filter(|t| !t.is_empty())?;
        Some((title, text))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub story_text: Option<String>,
}

/// One entry of `handbook_team_table.json` (nation, faction or team).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamEntry {
    pub power_id: Option<String>,
    pub power_name: Option<String>,
    pub color: Option<String>,
    pub order_num: Option<i64>,
    pub power_level: Option<i64>,
}
