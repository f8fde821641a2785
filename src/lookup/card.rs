//! Display form of an operator row, as the lookup command prints it.

use std::fmt;

use crate::transform::sections::extract_allowed;
use crate::transform::{HandbookLabels, Locale, OperatorRow};

/// Longest value a card field may hold
pub const FIELD_LIMIT: usize = 1024;
/// Characters kept in front of the ellipsis when a value is cut
const TRUNCATED_KEEP: usize = 1020;
const ELLIPSIS: &str = "...";

/// Fixed card wording for one locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardText {
    pub title: &'static str,
    pub class: &'static str,
    pub affiliation: &'static str,
    pub team: &'static str,
    pub birthplace: &'static str,
    pub race: &'static str,
    pub unknown: &'static str,
    pub stats: &'static str,
    pub profile: &'static str,
    pub talent: &'static str,
    pub no_description: &'static str,
}

impl CardText {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::JaJp => Self {
                title: "オペレーター情報",
                class: "クラス/職分",
                affiliation: "所属",
                team: "チーム",
                birthplace: "出身",
                race: "種族",
                unknown: "不明",
                stats: "能力測定",
                profile: "プロファイル・経歴",
                talent: "素質",
                no_description: "説明なし",
            },
            Locale::EnUs => Self {
                title: "Operator",
                class: "Class/Archetype",
                affiliation: "Affiliation",
                team: "Team",
                birthplace: "Birthplace",
                race: "Race",
                unknown: "Unknown",
                stats: "Ability Measurement",
                profile: "Profile & History",
                talent: "Talent",
                no_description: "No description",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardField {
    pub name: String,
    pub value: String,
}

impl CardField {
    fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorCard {
    pub title: String,
    pub summary: String,
    pub fields: Vec<CardField>,
}

impl OperatorCard {
    pub fn from_row(op: &OperatorRow, labels: &HandbookLabels, text: &CardText) -> Self {
        let rarity = op
            .rarity
            .map(|r| r.to_string())
            .unwrap_or_else(|| "?".to_string());
        let title = format!("{}: {} (★{})", text.title, op.name, rarity);

        let or_unknown = |value: &Option<String>| -> String {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .unwrap_or(text.unknown)
                .to_string()
        };

        let mut summary = format!(
            "{}: {} / {}\n{}: {}",
            text.class,
            or_unknown(&op.operator_class),
            or_unknown(&op.archetype),
            text.affiliation,
            or_unknown(&op.affiliation),
        );
        if let Some(team) = op.team.as_deref().filter(|t| !t.is_empty()) {
            summary.push_str(&format!(" / {}: {}", text.team, team));
        }
        summary.push_str(&format!(
            "\n{}: {}\n{}: {}",
            text.birthplace,
            or_unknown(&op.birthplace),
            text.race,
            or_unknown(&op.race)
        ));

        let mut fields = Vec::new();

        if let Some(stats) = stats_line(op, labels) {
            fields.push(CardField::new(text.stats, stats));
        }

        if let Some(profile) = display_profile(op, &labels.display_sections) {
            fields.push(CardField::new(text.profile, truncate_field(&profile)));
        }

        for (i, skill) in op.skills.iter().enumerate() {
            if let Some(name) = skill.name.as_deref() {
                fields.push(CardField::new(
                    format!("S{}: {}", i + 1, name),
                    describe(skill.description.as_deref(), text),
                ));
            }
        }
        for (i, talent) in op.talents.iter().enumerate() {
            if let Some(name) = talent.name.as_deref() {
                fields.push(CardField::new(
                    format!("{}{}: {}", text.talent, i + 1, name),
                    describe(talent.description.as_deref(), text),
                ));
            }
        }

        Self {
            title,
            summary,
            fields,
        }
    }
}

impl fmt::Display for OperatorCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.summary)?;
        for field in &self.fields {
            write!(f, "\n[{}]\n{}\n", field.name, field.value)?;
        }
        Ok(())
    }
}

fn describe(description: Option<&str>, text: &CardText) -> String {
    description
        .filter(|d| !d.is_empty())
        .unwrap_or(text.no_description)
        .to_string()
}

/// `label:value` pairs for the recorded stats; NULL and `N/A` are left out
fn stats_line(op: &OperatorRow, labels: &HandbookLabels) -> Option<String> {
    let s = &op.stats;
    let pairs = [
        (&labels.stats.physical_strength, &s.physical_strength),
        (&labels.stats.mobility, &s.mobility),
        (&labels.stats.endurance, &s.endurance),
        (&labels.stats.tactical_acumen, &s.tactical_acumen),
        (&labels.stats.combat_skill, &s.combat_skill),
        (&labels.stats.arts_adaptability, &s.arts_adaptability),
    ];

    let parts: Vec<String> = pairs
        .iter()
        .filter_map(|(label, value)| {
            let value = value.as_deref().filter(|v| *v != "N/A")?;
            Some(format!("{}:{}", label, value))
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Allowed sections of profile and lore text. When none is present the
/// profile summary is shown as stored; lore notes never stand in for it.
fn display_profile<S: AsRef<str>>(op: &OperatorRow, allow: &[S]) -> Option<String> {
    let profile = op.profile_summary.as_deref().filter(|t| !t.is_empty());
    let combined = [profile, op.lore_notes.as_deref()]
        .into_iter()
        .flatten()
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    extract_allowed(&combined, allow)
        .map(|text| text.trim_end().to_string())
        .or_else(|| profile.map(str::to_string))
}

/// Values longer than `FIELD_LIMIT` characters keep their first
/// `TRUNCATED_KEEP` characters followed by `...`
pub fn truncate_field(value: &str) -> String {
    if value.chars().count() <= FIELD_LIMIT {
        return value.to_string();
    }
    let kept: String = value.chars().take(TRUNCATED_KEEP).collect();
    format!("{}{}", kept, ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{AbilityStats, NamedText};

    fn amiya() -> OperatorRow {
        OperatorRow {
            name: "アーミヤ".into(),
            rarity: Some(5),
            operator_class: Some("術師".into()),
            archetype: Some("中堅術師".into()),
            affiliation: Some("ロドス・アイランド".into()),
            race: Some("コータス".into()),
            stats: AbilityStats {
                physical_strength: Some("普通".into()),
                mobility: Some("N/A".into()),
                arts_adaptability: Some("■■".into()),
                ..Default::default()
            },
            profile_summary: Some(
                "--- 基礎情報 ---\n【種族】コータス\n\n--- 能力測定 ---\n【物理強度】普通".into(),
            ),
            lore_notes: Some("--- 第一資料 ---\nsecret\n\n--- 個人履歴 ---\nCEO".into()),
            skills: [
                NamedText {
                    name: Some("戦術詠唱γ型".into()),
                    description: Some("攻撃速度+45".into()),
                },
                NamedText {
                    name: Some("精神爆発".into()),
                    description: None,
                },
                NamedText::default(),
            ],
            ..Default::default()
        }
    }

    fn card(op: &OperatorRow) -> OperatorCard {
        OperatorCard::from_row(
            op,
            &Locale::JaJp.handbook_labels(),
            &CardText::for_locale(Locale::JaJp),
        )
    }

    #[test]
    fn test_header_and_unknowns() {
        let card = card(&amiya());
        assert_eq!(card.title, "オペレーター情報: アーミヤ (★5)");
        assert!(card.summary.contains("所属: ロドス・アイランド"));
        assert!(!card.summary.contains("チーム"));
        assert!(card.summary.contains("出身: 不明"));
        assert!(card.summary.contains("種族: コータス"));
    }

    #[test]
    fn test_stats_skip_missing_and_na() {
        let card = card(&amiya());
        let stats = &card.fields[0];
        assert_eq!(stats.name, "能力測定");
        assert_eq!(stats.value, "物理強度:普通 アーツ適性:■■");
    }

    #[test]
    fn test_profile_keeps_display_sections_only() {
        let card = card(&amiya());
        let profile = &card.fields[1];
        assert_eq!(profile.name, "プロファイル・経歴");
        assert_eq!(
            profile.value,
            "--- 基礎情報 ---\n【種族】コータス\n\n--- 個人履歴 ---\nCEO"
        );
    }

    #[test]
    fn test_profile_falls_back_to_raw_text() {
        let mut op = amiya();
        op.profile_summary = Some("plain text without markers".into());
        op.lore_notes = None;
        let card = card(&op);
        assert_eq!(card.fields[1].value, "plain text without markers");
    }

    #[test]
    fn test_profile_fallback_leaves_out_lore() {
        let mut op = amiya();
        op.profile_summary = Some("plain profile".into());
        op.lore_notes = Some("item usage line".into());
        assert_eq!(card(&op).fields[1].value, "plain profile");

        // lore alone, without an allowed section, shows no profile field
        op.profile_summary = None;
        let card = card(&op);
        assert!(card.fields.iter().all(|f| f.name != "プロファイル・経歴"));
    }

    #[test]
    fn test_profile_sections_may_come_from_lore() {
        let mut op = amiya();
        op.profile_summary = Some("plain profile".into());
        op.lore_notes = Some("--- 個人履歴 ---\nCEO".into());
        assert_eq!(card(&op).fields[1].value, "--- 個人履歴 ---\nCEO");
    }

    #[test]
    fn test_skills_and_missing_description() {
        let card = card(&amiya());
        let names: Vec<_> = card.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["能力測定", "プロファイル・経歴", "S1: 戦術詠唱γ型", "S2: 精神爆発"]
        );
        assert_eq!(card.fields[3].value, "説明なし");
    }

    #[test]
    fn test_truncate_field() {
        let short = "あ".repeat(FIELD_LIMIT);
        assert_eq!(truncate_field(&short), short);

        let long = "あ".repeat(FIELD_LIMIT + 1);
        let cut = truncate_field(&long);
        assert_eq!(cut.chars().count(), 1023);
        assert_eq!(cut, format!("{}...", "あ".repeat(1020)));

        let cut = truncate_field(&"x".repeat(2000));
        assert_eq!(cut.trim_end_matches('.').len(), 1020);
    }

    #[test]
    fn test_english_wording() {
        let mut op = amiya();
        op.rarity = None;
        let card = OperatorCard::from_row(
            &op,
            &Locale::EnUs.handbook_labels(),
            &CardText::for_locale(Locale::EnUs),
        );
        assert_eq!(card.title, "Operator: アーミヤ (★?)");
        assert!(card.summary.contains("Birthplace: Unknown"));
        assert!(card.to_string().contains("[S1: 戦術詠唱γ型]"));
    }
}
