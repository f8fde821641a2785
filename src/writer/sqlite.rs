use anyhow::{Context, Result};
use rusqlite::{Connection, Transaction};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

use super::row::RowValues;
use super::schema_gen::{generate_create_table, generate_upsert};
use crate::config::Settings;
use crate::schema::{TableSchema, ALL_TABLES, OPERATORS, ORGANIZATIONS};
use crate::source::{resolve_excel_dir, SourceTables};
use crate::transform::operator::CHARACTER_ID_PREFIX;
use crate::transform::{classify, Candidacy, OperatorBuilder, OrganizationRow, Resolver, TeamIndex};
use crate::ui::{Phase, Ui};

/// Counts reported at the end of a conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    pub organizations: u64,
    pub organizations_skipped: u64,
    /// Organization rows that failed to insert
    pub organizations_failed: u64,
    pub operators: u64,
    /// Entries filtered out (tokens, unobtainable, unnamed)
    pub skipped: u64,
    /// Operator entries that failed to decode, assemble or insert
    pub failed: u64,
}

impl std::fmt::Display for ConvertSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} operators, {} organizations ({} entries skipped, {} failed)",
            self.operators,
            self.organizations,
            self.skipped + self.organizations_skipped,
            self.failed + self.organizations_failed
        )
    }
}

pub struct LoreWriter {
    conn: Connection,
}

impl LoreWriter {
    /// Open (or create) the database. With `fresh`, an existing file is removed first.
    pub fn open(db_path: &Path, fresh: bool) -> Result<Self> {
        if fresh && db_path.exists() {
            std::fs::remove_file(db_path).context("Failed to remove existing database")?;
        }

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).context("Failed to create database directory")?;
        }

        let conn = Connection::open(db_path).context("Failed to open database")?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        Ok(Self { conn })
    }

    /// Create all tables that do not exist yet
    pub fn create_tables(&self, schemas: &[&TableSchema]) -> Result<()> {
        for schema in schemas {
            let sql = generate_create_table(schema);
            self.conn
                .execute(&sql, [])
                .with_context(|| format!("Failed to create table: {}", schema.name))?;
        }

        Ok(())
    }

    /// The single transaction a run writes through
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    /// Leave WAL mode so the file can be opened read-only on its own.
    pub fn finalize(self) -> Result<()> {
        self.conn.execute_batch(
            "PRAGMA optimize;
             PRAGMA journal_mode = DELETE;",
        )?;
        Ok(())
    }
}

/// Insert or replace one whole row
fn upsert(tx: &Transaction, schema: &TableSchema, row: &RowValues) -> rusqlite::Result<()> {
    let mut stmt = tx.prepare_cached(&generate_upsert(schema))?;

    for (idx, value) in row.ordered(schema).into_iter().enumerate() {
        value.bind_to(idx + 1, &mut stmt)?;
    }
    stmt.raw_execute()?;

    Ok(())
}

/// Upsert every team-table entry that has an id and a name. Like operators,
/// a row that fails to insert is logged and counted without stopping the run.
pub fn write_organizations(
    tx: &Transaction,
    teams: &TeamIndex,
    summary: &mut ConvertSummary,
    ui: &mut impl Ui,
) {
    let entries = teams.iter_sorted();
    let total = entries.len() as u64;

    for (i, (key, entry)) in entries.into_iter().enumerate() {
        ui.set_progress(i as u64 + 1, total, "organizations");

        let org = match OrganizationRow::from_team(entry) {
            Ok(org) => org,
            Err(e) => {
                tracing::warn!(%key, error = %e, "skipping organization");
                summary.organizations_skipped += 1;
                ui.set_counts(summary);
                continue;
            }
        };

        match upsert(tx, &ORGANIZATIONS, &RowValues::from(&org)) {
            Ok(()) => summary.organizations += 1,
            Err(e) => {
                tracing::warn!(id = %org.id, error = %e, "failed to write organization");
                ui.log(format!("Failed organization {}: {}", org.id, e));
                summary.organizations_failed += 1;
            }
        }
        ui.set_counts(summary);
    }
}

/// Build and upsert one row per operator. A record that fails is logged and
/// skipped; it never aborts the run.
pub fn write_operators(
    tx: &Transaction,
    tables: &SourceTables,
    builder: &OperatorBuilder,
    summary: &mut ConvertSummary,
    ui: &mut impl Ui,
) {
    let total = tables.characters.len() as u64;
    let mut seen_names: HashSet<String> = HashSet::new();

    for (i, (id, raw)) in tables.characters.iter().enumerate() {
        ui.set_progress(i as u64 + 1, total, "operators");

        if !id.starts_with(CHARACTER_ID_PREFIX) {
            summary.skipped += 1;
            continue;
        }

        let character = match OperatorBuilder::decode(raw) {
            Ok(character) => character,
            Err(e) => {
                report_failure(ui, best_known_name(id, raw), &e.into());
                summary.failed += 1;
                ui.set_counts(summary);
                continue;
            }
        };

        let candidacy = classify(id, &character);
        if candidacy != Candidacy::Operator {
            tracing::debug!(%id, ?candidacy, "not an operator");
            summary.skipped += 1;
            ui.set_counts(summary);
            continue;
        }

        let result = builder
            .build(id, &character)
            .map_err(anyhow::Error::from)
            .and_then(|row| {
                upsert(tx, &OPERATORS, &RowValues::from(&row))?;
                Ok(row.name)
            });

        match result {
            Ok(name) => {
                if !seen_names.insert(name.clone()) {
                    tracing::warn!(%id, %name, "operator name seen before, row replaced");
                }
                summary.operators += 1;
            }
            Err(e) => {
                report_failure(ui, best_known_name(id, raw), &e);
                summary.failed += 1;
            }
        }
        ui.set_counts(summary);
    }
}

/// The entry's name when it has one, else its id
fn best_known_name<'a>(id: &'a str, raw: &'a Value) -> &'a str {
    raw.get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())
        .unwrap_or(id)
}

fn report_failure(ui: &mut impl Ui, operator: &str, error: &anyhow::Error) {
    tracing::warn!(%operator, error = %error, "skipping operator");
    ui.log(format!("Skipped {}: {}", operator, error));
}

/// Convert the vendor tables in `data_dir` into the lore database at
/// `output_db`. Everything is written in one transaction, committed at the end.
pub fn convert_to_sqlite(
    data_dir: &Path,
    output_db: &Path,
    settings: &Settings,
    fresh: bool,
    ui: &mut impl Ui,
) -> Result<ConvertSummary> {
    ui.set_phase(Phase::Loading);
    let excel_dir = resolve_excel_dir(data_dir, settings.locale.code());
    ui.set_info(format!("{:?}", excel_dir));
    let tables = SourceTables::load(&excel_dir)?;

    let resolver = Resolver::new(settings.locale, TeamIndex::from_raw(&tables.teams));
    let builder = OperatorBuilder::new(&tables, &resolver, &settings.labels);

    ui.set_phase(Phase::Converting);
    ui.set_info(format!("{:?}", output_db));
    let mut writer = LoreWriter::open(output_db, fresh)?;
    writer.create_tables(ALL_TABLES)?;

    let mut summary = ConvertSummary::default();
    {
        let tx = writer.transaction()?;
        write_organizations(&tx, resolver.teams(), &mut summary, ui);
        write_operators(&tx, &tables, &builder, &mut summary, ui);
        tx.commit().context("Failed to commit")?;
    }

    writer.finalize()?;
    ui.clear_progress();

    tracing::info!(
        operators = summary.operators,
        organizations = summary.organizations,
        skipped = summary.skipped,
        failed = summary.failed + summary.organizations_failed,
        "conversion finished"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Locale;
    use crate::ui::SilentUi;
    use serde_json::json;

    fn writer_with_tables() -> LoreWriter {
        let writer = LoreWriter {
            conn: Connection::open_in_memory().unwrap(),
        };
        writer.create_tables(ALL_TABLES).unwrap();
        writer
    }

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn test_write_operators_recovers_per_record() {
        let mut tables = SourceTables::default();
        tables.characters.insert("char_001".into(), json!({"name": "Alpha", "rarity": "TIER_3"}));
        tables.characters.insert("char_002".into(), json!({"name": ["not", "a", "string"]}));
        tables.characters.insert("char_003".into(), json!({"name": "Gamma", "isNotObtainable": true}));
        tables.characters.insert("token_004".into(), json!({"name": "Delta"}));
        tables.characters.insert(
            "char_005".into(),
            json!({"name": "Epsilon", "skills": [{"skillId": "sk_bad"}]}),
        );
        tables.skills.insert("sk_bad".into(), json!({"levels": {"oops": true}}));

        let resolver = Resolver::new(Locale::JaJp, TeamIndex::default());
        let labels = Locale::JaJp.handbook_labels();
        let builder = OperatorBuilder::new(&tables, &resolver, &labels);

        let mut writer = writer_with_tables();
        let mut summary = ConvertSummary::default();
        {
            let tx = writer.transaction().unwrap();
            write_operators(&tx, &tables, &builder, &mut summary, &mut SilentUi::new());
            tx.commit().unwrap();
        }

        assert_eq!(summary.operators, 1);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.failed, 2);
        assert_eq!(count(&writer.conn, "operators"), 1);
    }

    #[test]
    fn test_upsert_replaces_whole_row() {
        let mut writer = writer_with_tables();
        let tx = writer.transaction().unwrap();

        let mut first = RowValues::default();
        first.set("name", "Alpha".to_string()).set("race", Some("Cautus".to_string()));
        upsert(&tx, &OPERATORS, &first).unwrap();

        let mut second = RowValues::default();
        second.set("name", "Alpha".to_string()).set("rarity", Some(4_i64));
        upsert(&tx, &OPERATORS, &second).unwrap();
        tx.commit().unwrap();

        let (rarity, race): (Option<i64>, Option<String>) = writer
            .conn
            .query_row("SELECT rarity, race FROM operators WHERE name = 'Alpha'", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!(rarity, Some(4));
        assert_eq!(race, None);
        assert_eq!(count(&writer.conn, "operators"), 1);
    }

    #[test]
    fn test_uncommitted_transaction_writes_nothing() {
        let mut writer = writer_with_tables();
        {
            let tx = writer.transaction().unwrap();
            let mut row = RowValues::default();
            row.set("id", "rhodes".to_string()).set("name", "Rhodes".to_string());
            upsert(&tx, &ORGANIZATIONS, &row).unwrap();
        }
        assert_eq!(count(&writer.conn, "organizations"), 0);
    }

    #[test]
    fn test_best_known_name() {
        assert_eq!(best_known_name("char_1", &json!({"name": "Alpha"})), "Alpha");
        assert_eq!(best_known_name("char_1", &json!({"name": 3})), "char_1");
        assert_eq!(best_known_name("char_1", &json!({})), "char_1");
    }

    #[test]
    fn test_summary_display() {
        let summary = ConvertSummary {
            organizations: 2,
            organizations_skipped: 1,
            organizations_failed: 2,
            operators: 10,
            skipped: 4,
            failed: 1,
        };
        assert_eq!(
            summary.to_string(),
            "10 operators, 2 organizations (5 entries skipped, 3 failed)"
        );
    }

    #[test]
    fn test_organization_insert_failure_keeps_operators() {
        let mut raw_teams = crate::source::RawTable::new();
        raw_teams.insert("rhodes".into(), json!({"powerId": "rhodes", "powerName": "Rhodes", "powerLevel": 1}));
        raw_teams.insert("unnamed".into(), json!({"powerId": "unnamed"}));
        let teams = TeamIndex::from_raw(&raw_teams);

        let mut tables = SourceTables::default();
        tables.characters.insert("char_001".into(), json!({"name": "Alpha", "rarity": "TIER_3"}));
        let resolver = Resolver::new(Locale::JaJp, TeamIndex::default());
        let labels = Locale::JaJp.handbook_labels();
        let builder = OperatorBuilder::new(&tables, &resolver, &labels);

        // no organizations table, so every organization insert fails
        let mut writer = LoreWriter {
            conn: Connection::open_in_memory().unwrap(),
        };
        writer.create_tables(&[&OPERATORS]).unwrap();

        let mut summary = ConvertSummary::default();
        {
            let tx = writer.transaction().unwrap();
            let mut ui = SilentUi::new();
            write_organizations(&tx, &teams, &mut summary, &mut ui);
            write_operators(&tx, &tables, &builder, &mut summary, &mut ui);
            tx.commit().unwrap();
        }

        assert_eq!(summary.organizations, 0);
        assert_eq!(summary.organizations_failed, 1);
        assert_eq!(summary.organizations_skipped, 1);
        assert_eq!(summary.operators, 1);
        assert_eq!(count(&writer.conn, "operators"), 1);
    }
}
