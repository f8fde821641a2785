//! Read side of the lore database: substring search and exact lookups
//! against a database produced by a completed conversion.

pub mod card;

pub use card::{CardField, CardText, OperatorCard};

use anyhow::{bail, Context, Result};
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row};
use std::path::Path;

use crate::schema::{OPERATORS, ORGANIZATIONS};
use crate::transform::{AbilityStats, NamedText, OperatorRow, OrganizationRow};

pub struct LoreDb {
    conn: Connection,
}

impl LoreDb {
    /// Open an existing database read-only. Fails when the file or the
    /// `operators` table is missing.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Database not found: {:?}", path);
        }

        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .with_context(|| format!("Failed to open database: {:?}", path))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let has_operators: bool = conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            [OPERATORS.name],
            |row| row.get(0),
        )?;
        if !has_operators {
            bail!("Database has no {} table", OPERATORS.name);
        }

        Ok(Self { conn })
    }

    /// Case-insensitive substring match on operator name, ordered by name
    pub fn search_operators(&self, term: &str) -> Result<Vec<OperatorRow>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE name LIKE ?1 COLLATE NOCASE ORDER BY name",
            OPERATORS.column_names().join(", "),
            OPERATORS.name
        );
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let rows = stmt
            .query_map([format!("%{}%", term)], operator_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!(term, found = rows.len(), "operator search");
        Ok(rows)
    }

    pub fn find_operator(&self, name: &str) -> Result<Option<OperatorRow>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE name = ?1",
            OPERATORS.column_names().join(", "),
            OPERATORS.name
        );
        Ok(self
            .conn
            .query_row(&sql, [name], operator_from_row)
            .optional()?)
    }

    /// Exact id or name first, then the first substring match on name
    pub fn find_organization(&self, term: &str) -> Result<Option<OrganizationRow>> {
        let columns = ORGANIZATIONS.column_names().join(", ");

        let exact = format!(
            "SELECT {} FROM {} WHERE id = ?1 OR name = ?1",
            columns, ORGANIZATIONS.name
        );
        if let Some(org) = self
            .conn
            .query_row(&exact, [term], organization_from_row)
            .optional()?
        {
            return Ok(Some(org));
        }

        let partial = format!(
            "SELECT {} FROM {} WHERE name LIKE ?1 COLLATE NOCASE ORDER BY order_num, name LIMIT 1",
            columns, ORGANIZATIONS.name
        );
        Ok(self
            .conn
            .query_row(&partial, [format!("%{}%", term)], organization_from_row)
            .optional()?)
    }
}

fn named_text(row: &Row, name_col: &str, desc_col: &str) -> rusqlite::Result<NamedText> {
    Ok(NamedText {
        name: row.get(name_col)?,
        description: row.get(desc_col)?,
    })
}

fn operator_from_row(row: &Row) -> rusqlite::Result<OperatorRow> {
    Ok(OperatorRow {
        name: row.get("name")?,
        rarity: row.get("rarity")?,
        operator_class: row.get("operator_class")?,
        archetype: row.get("archetype")?,
        affiliation: row.get("affiliation")?,
        team: row.get("team")?,
        race: row.get("race")?,
        birthplace: row.get("birthplace")?,
        stats: AbilityStats {
            physical_strength: row.get("physical_strength")?,
            mobility: row.get("mobility")?,
            endurance: row.get("endurance")?,
            tactical_acumen: row.get("tactical_acumen")?,
            combat_skill: row.get("combat_skill")?,
            arts_adaptability: row.get("arts_adaptability")?,
        },
        profile_summary: row.get("profile_summary")?,
        lore_notes: row.get("lore_notes")?,
        skills: [
            named_text(row, "skill1_name", "skill1_desc")?,
            named_text(row, "skill2_name", "skill2_desc")?,
            named_text(row, "skill3_name", "skill3_desc")?,
        ],
        talents: [
            named_text(row, "talent1_name", "talent1_desc")?,
            named_text(row, "talent2_name", "talent2_desc")?,
        ],
    })
}

fn organization_from_row(row: &Row) -> rusqlite::Result<OrganizationRow> {
    Ok(OrganizationRow {
        id: row.get("id")?,
        name: row.get("name")?,
        org_type: row.get("type")?,
        description: row.get("description")?,
        lore: row.get("lore")?,
        color: row.get("color")?,
        order_num: row.get("order_num")?,
    })
}
