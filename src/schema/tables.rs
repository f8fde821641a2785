//! Table definitions of the lore lookup database.
//!
//! The bot's lookup commands read these tables by column name, so names and
//! types here are a stable interface.

use super::types::*;

pub static ORGANIZATIONS: TableSchema = TableSchema {
    name: "organizations",
    columns: &[
        Column::text("id").primary_key(),
        Column::text("name").unique(),
        Column::text("type"),
        Column::text("description"),
        Column::text("lore"),
        Column::text("color"),
        Column::integer("order_num"),
    ],
};

pub static OPERATORS: TableSchema = TableSchema {
    name: "operators",
    columns: &[
        Column::text("name").primary_key(),
        Column::integer("rarity"),
        Column::text("operator_class"),
        Column::text("archetype"),
        Column::text("affiliation"),
        Column::text("team"),
        Column::text("race"),
        Column::text("birthplace"),
        Column::text("physical_strength"),
        Column::text("combat_skill"),
        Column::text("mobility"),
        Column::text("endurance"),
        Column::text("tactical_acumen"),
        Column::text("arts_adaptability"),
        Column::text("profile_summary"),
        Column::text("lore_notes"),
        Column::text("skill1_name"),
        Column::text("skill1_desc"),
        Column::text("skill2_name"),
        Column::text("skill2_desc"),
        Column::text("skill3_name"),
        Column::text("skill3_desc"),
        Column::text("talent1_name"),
        Column::text("talent1_desc"),
        Column::text("talent2_name"),
        Column::text("talent2_desc"),
    ],
};

// =============================================================================
// Table Registry
// =============================================================================

/// All tables, in write order
pub static ALL_TABLES: &[&TableSchema] = &[&ORGANIZATIONS, &OPERATORS];

/// Get all table names
pub fn table_names() -> Vec<&'static str> {
    ALL_TABLES.iter().map(|t| t.name).collect()
}
