//! Built-in name tables and handbook labels for each vendor data language.

use serde::{Deserialize, Serialize};

/// Vendor data language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Locale {
    #[default]
    #[serde(rename = "ja_JP")]
    #[value(name = "ja_JP")]
    JaJp,
    #[serde(rename = "en_US")]
    #[value(name = "en_US")]
    EnUs,
}

impl Locale {
    /// Directory name used by the vendor data repositories
    pub fn code(&self) -> &'static str {
        match self {
            Locale::JaJp => "ja_JP",
            Locale::EnUs => "en_US",
        }
    }

    /// Raw-file root of the public data repository for this locale
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Locale::JaJp => "https://raw.githubusercontent.com/Kengxxiao/ArknightsGameData/master",
            Locale::EnUs => {
                "https://raw.githubusercontent.com/Kengxxiao/ArknightsGameData_YoStar/main"
            }
        }
    }

    /// Profession code -> class display name
    pub fn class_names(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Locale::JaJp => JA_CLASSES,
            Locale::EnUs => EN_CLASSES,
        }
    }

    /// Sub-profession code -> archetype display name
    pub fn archetype_names(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Locale::JaJp => JA_ARCHETYPES,
            Locale::EnUs => EN_ARCHETYPES,
        }
    }

    pub fn handbook_labels(&self) -> HandbookLabels {
        match self {
            Locale::JaJp => HandbookLabels {
                label_open: "【".into(),
                label_close: "】".into(),
                basic_info: "基礎情報".into(),
                ability_measurement: "能力測定".into(),
                race: "種族".into(),
                stats: StatLabels {
                    physical_strength: "物理強度".into(),
                    mobility: "戦場機動".into(),
                    endurance: "生理的耐性".into(),
                    tactical_acumen: "戦術立案".into(),
                    combat_skill: "戦闘技術".into(),
                    arts_adaptability: "アーツ適性".into(),
                },
                profile_sections: strings(&["基礎情報", "健康診断", "個人履歴", "第一資料"]),
                lore_sections: strings(&["第二資料", "第三資料", "第四資料", "昇進記録"]),
                display_sections: strings(&["基礎情報", "個人履歴", "健康診断"]),
            },
            Locale::EnUs => HandbookLabels {
                label_open: "[".into(),
                label_close: "]".into(),
                basic_info: "Basic Info".into(),
                ability_measurement: "Ability Measurement".into(),
                race: "Race".into(),
                stats: StatLabels {
                    physical_strength: "Physical Strength".into(),
                    mobility: "Mobility".into(),
                    endurance: "Physiological Endurance".into(),
                    tactical_acumen: "Tactical Planning".into(),
                    combat_skill: "Combat Skill".into(),
                    arts_adaptability: "Originium Adaptability".into(),
                },
                profile_sections: strings(&[
                    "Basic Info",
                    "Physical Exam",
                    "Personal History",
                    "Archive File 1",
                ]),
                lore_sections: strings(&[
                    "Archive File 2",
                    "Archive File 3",
                    "Archive File 4",
                    "Promotion Record",
                ]),
                display_sections: strings(&["Basic Info", "Personal History", "Physical Exam"]),
            },
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Section titles and line labels used to read the handbook text.
#[derive(Debug, Clone, PartialEq)]
pub struct HandbookLabels {
    /// Opening and closing brackets around a line label, e.g. `【種族】`
    pub label_open: String,
    pub label_close: String,
    /// Section carrying the race line
    pub basic_info: String,
    /// Section carrying the six stat lines
    pub ability_measurement: String,
    pub race: String,
    pub stats: StatLabels,
    /// Sections stored, with markers, in `profile_summary`
    pub profile_sections: Vec<String>,
    /// Sections stored, with markers, in `lore_notes`
    pub lore_sections: Vec<String>,
    /// Sections shown by the lookup card
    pub display_sections: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatLabels {
    pub physical_strength: String,
    pub mobility: String,
    pub endurance: String,
    pub tactical_acumen: String,
    pub combat_skill: String,
    pub arts_adaptability: String,
}

// Profession codes as they appear in `character_table.json`
static JA_CLASSES: &[(&str, &str)] = &[
    ("PIONEER", "先鋒"),
    ("WARRIOR", "前衛"),
    ("SNIPER", "狙撃"),
    ("CASTER", "術師"),
    ("SUPPORT", "補助"),
    ("MEDIC", "医療"),
    ("TANK", "重装"),
    ("SPECIAL", "特殊"),
];

static EN_CLASSES: &[(&str, &str)] = &[
    ("PIONEER", "Vanguard"),
    ("WARRIOR", "Guard"),
    ("SNIPER", "Sniper"),
    ("CASTER", "Caster"),
    ("SUPPORT", "Supporter"),
    ("MEDIC", "Medic"),
    ("TANK", "Defender"),
    ("SPECIAL", "Specialist"),
];

static JA_ARCHETYPES: &[(&str, &str)] = &[
    ("agent", "偵察兵"),
    ("alchemist", "錬金士"),
    ("aoesniper", "榴弾射手"),
    ("artsfghter", "術戦士"),
    ("artsprotector", "術技衛士"),
    ("bard", "吟遊者"),
    ("bearer", "旗手"),
    ("blastcaster", "爆撃術師"),
    ("blessing", "祈祷師"),
    ("bombarder", "投擲手"),
    ("centurion", "強襲者"),
    ("chain", "連鎖術師"),
    ("chainhealer", "連鎖癒師"),
    ("charger", "突撃兵"),
    ("closerange", "精密射手"),
    ("corecaster", "中堅術師"),
    ("craftsman", "工匠"),
    ("crusher", "重剣士"),
    ("dollkeeper", "傀儡師"),
    ("duelist", "決闘者"),
    ("executor", "執行者"),
    ("fastshot", "速射手"),
    ("fearless", "勇士"),
    ("fighter", "闘士"),
    ("fortress", "堅城砲手"),
    ("funnel", "操機術師"),
    ("geek", "鬼才"),
    ("guardian", "庇護衛士"),
    ("hammer", "槌撃士"),
    ("healer", "療養師"),
    ("hookmaster", "鉤縄師"),
    ("hunter", "狩人"),
    ("incantationmedic", "呪癒師"),
    ("instructor", "教官"),
    ("librator", "解放者"),
    ("longrange", "戦術射手"),
    ("loopshooter", "旋輪射手"),
    ("lord", "領主"),
    ("merchant", "行商人"),
    ("musha", "武者"),
    ("mystic", "秘術師"),
    ("phalanx", "法陣術師"),
    ("physician", "医師"),
    ("pioneer", "先駆兵"),
    ("primcaster", "本源術師"),
    ("protector", "重盾衛士"),
    ("pusher", "推撃手"),
    ("reaper", "鎌撃士"),
    ("reaperrange", "散弾射手"),
    ("ringhealer", "群癒師"),
    ("ritualist", "祭儀師"),
    ("shotprotector", "哨戒衛士"),
    ("siegesniper", "破城射手"),
    ("slower", "緩速師"),
    ("splashcaster", "拡散術師"),
    ("stalker", "潜伏者"),
    ("summoner", "召喚師"),
    ("sword", "剣豪"),
    ("tactician", "戦術家"),
    ("traper", "罠師"),
    ("underminer", "呪詛師"),
    ("unyield", "破壊者"),
    ("wandermedic", "放浪医"),
];

static EN_ARCHETYPES: &[(&str, &str)] = &[
    ("agent", "Agent"),
    ("alchemist", "Alchemist"),
    ("aoesniper", "Artilleryman"),
    ("artsfghter", "Arts Fighter"),
    ("artsprotector", "Arts Protector"),
    ("bard", "Bard"),
    ("bearer", "Flagbearer"),
    ("blastcaster", "Blast Caster"),
    ("blessing", "Abjurer"),
    ("bombarder", "Flinger"),
    ("centurion", "Centurion"),
    ("chain", "Chain Caster"),
    ("chainhealer", "Chain Healer"),
    ("charger", "Charger"),
    ("closerange", "Heavyshooter"),
    ("corecaster", "Core Caster"),
    ("craftsman", "Artificer"),
    ("crusher", "Crusher"),
    ("dollkeeper", "Dollkeeper"),
    ("duelist", "Duelist"),
    ("executor", "Executor"),
    ("fastshot", "Marksman"),
    ("fearless", "Dreadnought"),
    ("fighter", "Fighter"),
    ("fortress", "Fortress"),
    ("funnel", "Mech-Accord Caster"),
    ("geek", "Geek"),
    ("guardian", "Guardian"),
    ("hammer", "Earthshaker"),
    ("healer", "Therapist"),
    ("hookmaster", "Hookmaster"),
    ("hunter", "Hunter"),
    ("incantationmedic", "Incantation Medic"),
    ("instructor", "Instructor"),
    ("librator", "Liberator"),
    ("longrange", "Deadeye"),
    ("loopshooter", "Loopshooter"),
    ("lord", "Lord"),
    ("merchant", "Merchant"),
    ("musha", "Musha"),
    ("mystic", "Mystic Caster"),
    ("phalanx", "Phalanx Caster"),
    ("physician", "Medic"),
    ("pioneer", "Pioneer"),
    ("primcaster", "Primal Caster"),
    ("protector", "Protector"),
    ("pusher", "Push Stroker"),
    ("reaper", "Reaper"),
    ("reaperrange", "Spreadshooter"),
    ("ringhealer", "Multi-target Medic"),
    ("ritualist", "Ritualist"),
    ("shotprotector", "Sentry Protector"),
    ("siegesniper", "Besieger"),
    ("slower", "Decel Binder"),
    ("splashcaster", "Splash Caster"),
    ("stalker", "Ambusher"),
    ("summoner", "Summoner"),
    ("sword", "Swordmaster"),
    ("tactician", "Tactician"),
    ("traper", "Trapmaster"),
    ("underminer", "Hexer"),
    ("unyield", "Juggernaut"),
    ("wandermedic", "Wandering Medic"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_tables_cover_same_codes() {
        for locale in [Locale::JaJp, Locale::EnUs] {
            assert_eq!(locale.class_names().len(), 8);
            assert_eq!(locale.archetype_names().len(), JA_ARCHETYPES.len());
        }

        for ((ja, _), (en, _)) in JA_ARCHETYPES.iter().zip(EN_ARCHETYPES) {
            assert_eq!(ja, en);
        }
    }

    #[test]
    fn test_display_sections_are_stored_sections() {
        for locale in [Locale::JaJp, Locale::EnUs] {
            let labels = locale.handbook_labels();
            for title in &labels.display_sections {
                assert!(labels.profile_sections.contains(title), "{title} not stored");
            }
        }
    }

    #[test]
    fn test_locale_serde_names() {
        let locale: Locale = serde_json::from_str("\"en_US\"").unwrap();
        assert_eq!(locale, Locale::EnUs);
        assert_eq!(Locale::JaJp.to_string(), "ja_JP");
    }
}
