use std::collections::HashMap;

use crate::schema::TableSchema;
use crate::transform::{OperatorRow, OrganizationRow};

#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Text(String),
}

impl SqlValue {
    pub fn bind_to(&self, idx: usize, stmt: &mut rusqlite::Statement) -> rusqlite::Result<()> {
        match self {
            SqlValue::Null => stmt.raw_bind_parameter(idx, rusqlite::types::Null)?,
            SqlValue::Integer(i) => stmt.raw_bind_parameter(idx, i)?,
            SqlValue::Text(s) => stmt.raw_bind_parameter(idx, s.as_str())?,
        }
        Ok(())
    }
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        value.map(SqlValue::Text).unwrap_or(SqlValue::Null)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<Option<i64>> for SqlValue {
    fn from(value: Option<i64>) -> Self {
        value.map(SqlValue::Integer).unwrap_or(SqlValue::Null)
    }
}

static NULL: SqlValue = SqlValue::Null;

/// Column name -> value for one row; unset columns are written as NULL
#[derive(Debug, Default)]
pub struct RowValues {
    values: HashMap<&'static str, SqlValue>,
}

impl RowValues {
    pub fn set(&mut self, column: &'static str, value: impl Into<SqlValue>) -> &mut Self {
        self.values.insert(column, value.into());
        self
    }

    pub fn get(&self, column: &str) -> &SqlValue {
        self.values.get(column).unwrap_or(&NULL)
    }

    /// Values in the schema's column order
    pub fn ordered(&self, schema: &TableSchema) -> Vec<&SqlValue> {
        schema.columns.iter().map(|c| self.get(c.name)).collect()
    }
}

impl From<&OperatorRow> for RowValues {
    fn from(op: &OperatorRow) -> Self {
        let mut row = RowValues::default();
        row.set("name", op.name.clone())
            .set("rarity", op.rarity)
            .set("operator_class", op.operator_class.clone())
            .set("archetype", op.archetype.clone())
            .set("affiliation", op.affiliation.clone())
            .set("team", op.team.clone())
            .set("race", op.race.clone())
            .set("birthplace", op.birthplace.clone())
            .set("physical_strength", op.stats.physical_strength.clone())
            .set("combat_skill", op.stats.combat_skill.clone())
            .set("mobility", op.stats.mobility.clone())
            .set("endurance", op.stats.endurance.clone())
            .set("tactical_acumen", op.stats.tactical_acumen.clone())
            .set("arts_adaptability", op.stats.arts_adaptability.clone())
            .set("profile_summary", op.profile_summary.clone())
            .set("lore_notes", op.lore_notes.clone());

        const SKILL_COLUMNS: [(&str, &str); 3] = [
            ("skill1_name", "skill1_desc"),
            ("skill2_name", "skill2_desc"),
            ("skill3_name", "skill3_desc"),
        ];
        const TALENT_COLUMNS: [(&str, &str); 2] = [
            ("talent1_name", "talent1_desc"),
            ("talent2_name", "talent2_desc"),
        ];

        for (&(name_col, desc_col), skill) in SKILL_COLUMNS.iter().zip(&op.skills) {
            row.set(name_col, skill.name.clone())
                .set(desc_col, skill.description.clone());
        }
        for (&(name_col, desc_col), talent) in TALENT_COLUMNS.iter().zip(&op.talents) {
            row.set(name_col, talent.name.clone())
                .set(desc_col, talent.description.clone());
        }

        row
    }
}

impl From<&OrganizationRow> for RowValues {
    fn from(org: &OrganizationRow) -> Self {
        let mut row = RowValues::default();
        row.set("id", org.id.clone())
            .set("name", org.name.clone())
            .set("type", org.org_type.clone())
            .set("description", org.description.clone())
            .set("lore", org.lore.clone())
            .set("color", org.color.clone())
            .set("order_num", org.order_num);
        row
    }
}
