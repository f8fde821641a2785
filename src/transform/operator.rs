//! Assembly of one `operators` row from a character entry and the tables it
//! references.

use serde::Deserialize;
use serde_json::Value;

use super::locale::HandbookLabels;
use super::resolver::{resolve_rarity, Resolver};
use super::sections::{format_section, labeled_value, labeled_values};
use super::template::render_description;
use crate::error::RecordError;
use crate::source::{
    BlackboardEntry, Character, HandbookEntry, Skill, SourceTables, StorySection,
};

/// Prefix of playable character ids; tokens, traps and summons use others
pub const CHARACTER_ID_PREFIX: &str = "char_";

pub const SKILL_SLOTS: usize = 3;
pub const TALENT_SLOTS: usize = 2;

/// Why a character entry is or is not turned into a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidacy {
    Operator,
    NotACharacter,
    NotObtainable,
    Unnamed,
}

pub fn classify(id: &str, character: &Character) -> Candidacy {
    if !id.starts_with(CHARACTER_ID_PREFIX) {
        Candidacy::NotACharacter
    } else if !character.is_obtainable() {
        Candidacy::NotObtainable
    } else if character.display_name().is_none() {
        Candidacy::Unnamed
    } else {
        Candidacy::Operator
    }
}

/// A name and its rendered description (skill or talent)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedText {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// The six ability measurement lines, kept as text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AbilityStats {
    pub physical_strength: Option<String>,
    pub mobility: Option<String>,
    pub endurance: Option<String>,
    pub tactical_acumen: Option<String>,
    pub combat_skill: Option<String>,
    pub arts_adaptability: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperatorRow {
    pub name: String,
    pub rarity: Option<i64>,
    pub operator_class: Option<String>,
    pub archetype: Option<String>,
    pub affiliation: Option<String>,
    pub team: Option<String>,
    pub race: Option<String>,
    pub birthplace: Option<String>,
    pub stats: AbilityStats,
    pub profile_summary: Option<String>,
    pub lore_notes: Option<String>,
    pub skills: [NamedText; SKILL_SLOTS],
    pub talents: [NamedText; TALENT_SLOTS],
}

/// What the handbook contributes to a row
#[derive(Debug, Default, PartialEq)]
struct HandbookFields {
    race: Option<String>,
    stats: AbilityStats,
    profile_parts: Vec<String>,
    lore_parts: Vec<String>,
}

/// Builds operator rows; holds everything that is shared across records.
pub struct OperatorBuilder<'a> {
    tables: &'a SourceTables,
    resolver: &'a Resolver,
    labels: &'a HandbookLabels,
}

impl<'a> OperatorBuilder<'a> {
    pub fn new(tables: &'a SourceTables, resolver: &'a Resolver, labels: &'a HandbookLabels) -> Self {
        Self {
            tables,
            resolver,
            labels,
        }
    }

    /// Decode a raw character entry
    pub fn decode(raw: &Value) -> Result<Character, RecordError> {
        Character::deserialize(raw).map_err(|e| RecordError::decode("character", e))
    }

    pub fn build(&self, id: &str, character: &Character) -> Result<OperatorRow, RecordError> {
        let name = character
            .display_name()
            .ok_or(RecordError::MissingField("name"))?
            .to_string();

        let handbook = match self.tables.handbook_entry::<HandbookEntry>(id)? {
            Some(entry) => self.read_handbook(&entry),
            None => {
                tracing::debug!(%id, %name, "no handbook entry");
                HandbookFields::default()
            }
        };

        let mut lore_parts = vec![
            character.item_usage.clone().unwrap_or_default(),
            character.item_desc.clone().unwrap_or_default(),
        ];
        lore_parts.extend(handbook.lore_parts);

        Ok(OperatorRow {
            name,
            rarity: resolve_rarity(character.rarity.as_ref()),
            operator_class: self.resolver.class_name(character.profession.as_deref()),
            archetype: self
                .resolver
                .archetype_name(character.sub_profession_id.as_deref()),
            affiliation: self
                .resolver
                .affiliation(character.group_id.as_deref(), character.nation_id.as_deref()),
            team: self.resolver.power_name(character.team_id.as_deref()),
            race: handbook.race,
            birthplace: self.resolver.power_name(character.nation_id.as_deref()),
            stats: handbook.stats,
            profile_summary: join_parts(&handbook.profile_parts),
            lore_notes: join_parts(&lore_parts),
            skills: [self.skill(character, 0)?, self.skill(character, 1)?, self.skill(character, 2)?],
            talents: [talent(character, 0), talent(character, 1)],
        })
    }

    /// Walk the handbook sections. A later section with the same title
    /// overrides values read from an earlier one.
    fn read_handbook(&self, entry: &HandbookEntry) -> HandbookFields {
        let labels = self.labels;
        let mut fields = HandbookFields::default();

        let sections = entry.story_text_audio.as_deref().unwrap_or_default();
        for (title, text) in sections.iter().filter_map(StorySection::title_and_text) {
            if title == labels.basic_info {
                if let Some(race) = self.label(text, &labels.race) {
                    fields.race = Some(race);
                }
            }

            if title == labels.ability_measurement {
                let stats = &labels.stats;
                let read = AbilityStats {
                    physical_strength: self.stat(text, &stats.physical_strength),
                    mobility: self.stat(text, &stats.mobility),
                    endurance: self.stat(text, &stats.endurance),
                    tactical_acumen: self.stat(text, &stats.tactical_acumen),
                    combat_skill: self.stat(text, &stats.combat_skill),
                    arts_adaptability: self.stat(text, &stats.arts_adaptability),
                };
                fields.stats = merge_stats(std::mem::take(&mut fields.stats), read);
            }

            if labels.profile_sections.iter().any(|t| t == title) {
                fields.profile_parts.push(format_section(title, text.trim()));
            } else if labels.lore_sections.iter().any(|t| t == title) {
                fields.lore_parts.push(format_section(title, text.trim()));
            }
        }

        fields
    }

    fn label(&self, text: &str, label: &str) -> Option<String> {
        labeled_value(text, &self.labels.label_open, label, &self.labels.label_close)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// A stat line repeated within one section takes its last value
    fn stat(&self, text: &str, label: &str) -> Option<String> {
        labeled_values(text, &self.labels.label_open, label, &self.labels.label_close)
            .last()
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
    }

    /// Skill slot `slot`, read from the skill's last (highest) level
    fn skill(&self, character: &Character, slot: usize) -> Result<NamedText, RecordError> {
        let Some(skill_id) = character
            .skills
            .as_ref()
            .and_then(|s| s.get(slot))
            .and_then(|s| s.as_ref())
            .and_then(|s| s.skill_id.as_deref())
        else {
            return Ok(NamedText::default());
        };

        let Some(skill) = self.tables.skill::<Skill>(skill_id)? else {
            tracing::debug!(%skill_id, "skill id not in skill table");
            return Ok(NamedText::default());
        };

        Ok(skill
            .levels
            .as_ref()
            .and_then(|levels| levels.last())
            .map(|level| {
                describe(
                    level.name.as_deref(),
                    level.description.as_deref(),
                    level.blackboard.as_deref(),
                )
            })
            .unwrap_or_default())
    }
}

/// Talent slot `slot`, read from the talent's last (fully upgraded) candidate
fn talent(character: &Character, slot: usize) -> NamedText {
    character
        .talents
        .as_ref()
        .and_then(|t| t.get(slot))
        .and_then(|t| t.as_ref())
        .and_then(|t| t.candidates.as_ref())
        .and_then(|c| c.last())
        .map(|candidate| {
            describe(
                candidate.name.as_deref(),
                candidate.description.as_deref(),
                candidate.blackboard.as_deref(),
            )
        })
        .unwrap_or_default()
}

fn describe(
    name: Option<&str>,
    description: Option<&str>,
    blackboard: Option<&[BlackboardEntry]>,
) -> NamedText {
    NamedText {
        name: name.map(str::to_string),
        description: description
            .filter(|d| !d.is_empty())
            .map(|d| render_description(d, blackboard.unwrap_or_default())),
    }
}

fn merge_stats(earlier: AbilityStats, later: AbilityStats) -> AbilityStats {
    AbilityStats {
        physical_strength: later.physical_strength.or(earlier.physical_strength),
        mobility: later.mobility.or(earlier.mobility),
        endurance: later.endurance.or(earlier.endurance),
        tactical_acumen: later.tactical_acumen.or(earlier.tactical_acumen),
        combat_skill: later.combat_skill.or(earlier.combat_skill),
        arts_adaptability: later.arts_adaptability.or(earlier.arts_adaptability),
    }
}

/// Non-empty parts joined by a blank line; `None` when nothing is left
fn join_parts(parts: &[String]) -> Option<String> {
    let kept: Vec<&str> = parts
        .iter()
        .map(String::as_str)
        .filter(|p| !p.trim().is_empty())
        .collect();
    if kept.is_empty() {
        None
    } else {
        Some(kept.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TeamEntry;
    use crate::transform::locale::Locale;
    use crate::transform::resolver::TeamIndex;
    use serde_json::json;

    fn tables() -> SourceTables {
        let mut tables = SourceTables::default();
        tables.skills.insert(
            "skchr_test_1".into(),
            json!({"levels": [
                {"name": "強撃γ型", "description": "攻撃力+{atk:0%}", "blackboard": [{"key": "atk", "value": 0.5}]},
                {"name": "強撃γ型", "description": "攻撃力<@ba.vup>+{ATK:0%}</>", "blackboard": [{"key": "atk", "value": 1.0}]}
            ]}),
        );
        tables.skills.insert("skchr_broken".into(), json!({"levels": "nope"}));
        tables.handbook.insert(
            "char_test".into(),
            json!({"storyTextAudio": [
                {"storyTitle": "基礎情報", "stories": [{"storyText": "【性別】女\n【種族】コータス"}]},
                {"storyTitle": "能力測定", "stories": [{"storyText": "【物理強度】標準\n【戦場機動】優秀\n【生理的耐性】標準\n【戦術立案】卓越\n【戦闘技術】普通\n【アーツ適性】■■"}]},
                {"storyTitle": "個人履歴", "stories": [{"storyText": "経歴の本文"}]},
                {"storyTitle": "第二資料", "stories": [{"storyText": "二つ目の資料"}]},
                {"storyTitle": "ボイス", "stories": [{"storyText": "ignored"}]}
            ]}),
        );
        tables
    }

    fn resolver() -> Resolver {
        let teams = TeamIndex::from_entries([(
            "rhodes".to_string(),
            TeamEntry {
                power_name: Some("ロドス・アイランド".into()),
                ..Default::default()
            },
        )]);
        Resolver::new(Locale::JaJp, teams)
    }

    fn character() -> Character {
        serde_json::from_value(json!({
            "name": "テスト",
            "rarity": "TIER_5",
            "profession": "CASTER",
            "subProfessionId": "corecaster",
            "nationId": "rhodes",
            "itemUsage": "用途",
            "itemDesc": "説明",
            "skills": [{"skillId": "skchr_test_1"}, {"skillId": null}],
            "talents": [{"candidates": [
                {"name": "素質", "description": "{hp:0%}回復", "blackboard": [{"key": "hp", "value": 0.1}]},
                {"name": "素質+", "description": "{hp:0%}回復", "blackboard": [{"key": "hp", "value": 0.2}]}
            ]}]
        }))
        .unwrap()
    }

    #[test]
    fn test_classify() {
        let named = character();
        assert_eq!(classify("char_test", &named), Candidacy::Operator);
        assert_eq!(classify("token_test", &named), Candidacy::NotACharacter);

        let unnamed = Character::default();
        assert_eq!(classify("char_x", &unnamed), Candidacy::Unnamed);

        let hidden = Character {
            is_not_obtainable: Some(true),
            ..character()
        };
        assert_eq!(classify("char_x", &hidden), Candidacy::NotObtainable);
    }

    #[test]
    fn test_build_full_row() {
        let tables = tables();
        let resolver = resolver();
        let labels = Locale::JaJp.handbook_labels();
        let builder = OperatorBuilder::new(&tables, &resolver, &labels);

        let row = builder.build("char_test", &character()).unwrap();

        assert_eq!(row.name, "テスト");
        assert_eq!(row.rarity, Some(5));
        assert_eq!(row.operator_class.as_deref(), Some("術師"));
        assert_eq!(row.archetype.as_deref(), Some("中堅術師"));
        assert_eq!(row.affiliation.as_deref(), Some("ロドス・アイランド"));
        assert_eq!(row.birthplace.as_deref(), Some("ロドス・アイランド"));
        assert_eq!(row.team, None);
        assert_eq!(row.race.as_deref(), Some("コータス"));
        assert_eq!(row.stats.physical_strength.as_deref(), Some("標準"));
        assert_eq!(row.stats.mobility.as_deref(), Some("優秀"));
        assert_eq!(row.stats.tactical_acumen.as_deref(), Some("卓越"));
        assert_eq!(row.stats.combat_skill.as_deref(), Some("普通"));
        assert_eq!(row.stats.arts_adaptability.as_deref(), Some("■■"));

        assert_eq!(
            row.profile_summary.as_deref(),
            Some("--- 基礎情報 ---\n【性別】女\n【種族】コータス\n\n--- 個人履歴 ---\n経歴の本文")
        );
        assert_eq!(
            row.lore_notes.as_deref(),
            Some("用途\n\n説明\n\n--- 第二資料 ---\n二つ目の資料")
        );

        assert_eq!(row.skills[0].name.as_deref(), Some("強撃γ型"));
        assert_eq!(row.skills[0].description.as_deref(), Some("攻撃力+100%"));
        assert_eq!(row.skills[1], NamedText::default());
        assert_eq!(row.skills[2], NamedText::default());
        assert_eq!(row.talents[0].name.as_deref(), Some("素質+"));
        assert_eq!(row.talents[0].description.as_deref(), Some("20%回復"));
        assert_eq!(row.talents[1], NamedText::default());
    }

    #[test]
    fn test_last_duplicate_section_wins() {
        let mut tables = tables();
        tables.handbook.insert(
            "char_dup".into(),
            json!({"storyTextAudio": [
                {"storyTitle": "基礎情報", "stories": [{"storyText": "【種族】フェリーン"}]},
                {"storyTitle": "能力測定", "stories": [{"storyText": "【物理強度】普通\n【戦場機動】標準"}]},
                {"storyTitle": "基礎情報", "stories": [{"storyText": "【種族】ループス"}]},
                {"storyTitle": "能力測定", "stories": [{"storyText": "【物理強度】優秀"}]}
            ]}),
        );
        let resolver = resolver();
        let labels = Locale::JaJp.handbook_labels();
        let builder = OperatorBuilder::new(&tables, &resolver, &labels);

        let row = builder.build("char_dup", &character()).unwrap();
        assert_eq!(row.race.as_deref(), Some("ループス"));
        assert_eq!(row.stats.physical_strength.as_deref(), Some("優秀"));
        assert_eq!(row.stats.mobility.as_deref(), Some("標準"));
    }

    #[test]
    fn test_repeated_lines_in_one_section() {
        let mut tables = tables();
        tables.handbook.insert(
            "char_rep".into(),
            json!({"storyTextAudio": [
                {"storyTitle": "基礎情報", "stories": [{"storyText": "【種族】フェリーン\n【種族】ループス"}]},
                {"storyTitle": "能力測定", "stories": [{"storyText": "【物理強度】普通\n【戦場機動】標準\n【物理強度】卓越"}]}
            ]}),
        );
        let resolver = resolver();
        let labels = Locale::JaJp.handbook_labels();
        let builder = OperatorBuilder::new(&tables, &resolver, &labels);

        let row = builder.build("char_rep", &character()).unwrap();
        // race keeps the first line, stats the last
        assert_eq!(row.race.as_deref(), Some("フェリーン"));
        assert_eq!(row.stats.physical_strength.as_deref(), Some("卓越"));
        assert_eq!(row.stats.mobility.as_deref(), Some("標準"));
    }

    #[test]
    fn test_missing_handbook_leaves_fields_empty() {
        let tables = tables();
        let resolver = resolver();
        let labels = Locale::JaJp.handbook_labels();
        let builder = OperatorBuilder::new(&tables, &resolver, &labels);

        let row = builder.build("char_nohandbook", &character()).unwrap();
        assert_eq!(row.race, None);
        assert_eq!(row.stats, AbilityStats::default());
        assert_eq!(row.profile_summary, None);
        assert_eq!(row.lore_notes.as_deref(), Some("用途\n\n説明"));
    }

    #[test]
    fn test_broken_skill_fails_the_record() {
        let tables = tables();
        let resolver = resolver();
        let labels = Locale::JaJp.handbook_labels();
        let builder = OperatorBuilder::new(&tables, &resolver, &labels);

        let mut broken = character();
        broken.skills = Some(vec![Some(crate::source::SkillRef {
            skill_id: Some("skchr_broken".into()),
        })]);

        let err = builder.build("char_test", &broken).unwrap_err();
        assert!(matches!(err, RecordError::Decode { kind: "skill", .. }));
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        assert!(OperatorBuilder::decode(&json!({"name": 42})).is_err());
        assert!(OperatorBuilder::decode(&json!({"name": "ok"})).is_ok());
    }
}
