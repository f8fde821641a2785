use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use super::tables::{HandbookInfoFile, RawTable};
use crate::error::{LoadError, RecordError};

pub const CHARACTER_TABLE: &str = "character_table.json";
pub const SKILL_TABLE: &str = "skill_table.json";
pub const HANDBOOK_TABLE: &str = "handbook_info_table.json";
pub const TEAM_TABLE: &str = "handbook_team_table.json";

/// Every file a conversion needs, in load order
pub const SOURCE_FILES: &[&str] = &[CHARACTER_TABLE, SKILL_TABLE, HANDBOOK_TABLE, TEAM_TABLE];

/// In-memory snapshot of the four vendor tables
#[derive(Debug, Default)]
pub struct SourceTables {
    pub characters: RawTable,
    pub skills: RawTable,
    /// The `handbookDict` of the handbook file, keyed by character id
    pub handbook: RawTable,
    pub teams: RawTable,
}

impl SourceTables {
    /// Load all tables from `dir`. Any missing or malformed file aborts the load.
    pub fn load(dir: &Path) -> Result<Self, LoadError> {
        let characters = read_json::<RawTable>(&dir.join(CHARACTER_TABLE))?;
        let skills = read_json::<RawTable>(&dir.join(SKILL_TABLE))?;
        let handbook = read_json::<HandbookInfoFile>(&dir.join(HANDBOOK_TABLE))?.handbook_dict;
        let teams = read_json::<RawTable>(&dir.join(TEAM_TABLE))?;

        tracing::info!(
            characters = characters.len(),
            skills = skills.len(),
            handbook = handbook.len(),
            teams = teams.len(),
            "loaded source tables"
        );

        Ok(Self {
            characters,
            skills,
            handbook,
            teams,
        })
    }

    /// Decode one skill entry, `None` when the id is unknown
    pub fn skill<T: DeserializeOwned>(&self, id: &str) -> Result<Option<T>, RecordError> {
        decode_entry(&self.skills, id, "skill")
    }

    /// Decode one character's handbook entry, `None` when there is none
    pub fn handbook_entry<T: DeserializeOwned>(&self, id: &str) -> Result<Option<T>, RecordError> {
        decode_entry(&self.handbook, id, "handbook")
    }
}

fn decode_entry<T: DeserializeOwned>(
    table: &RawTable,
    id: &str,
    kind: &'static str,
) -> Result<Option<T>, RecordError> {
    match table.get(id) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => T::deserialize(value)
            .map(Some)
            .map_err(|e| RecordError::decode(kind, e)),
    }
}

/// Find the directory holding the excel tables.
///
/// Accepts the tables directory itself or a checkout of the vendor data
/// repository (`<root>/<locale>/gamedata/excel`). Falls back to `dir` so that
/// the load error names the file the user was expected to provide.
pub fn resolve_excel_dir(dir: &Path, locale: &str) -> PathBuf {
    if dir.join(CHARACTER_TABLE).exists() {
        return dir.to_path_buf();
    }

    let nested = dir.join(locale).join("gamedata").join("excel");
    if nested.join(CHARACTER_TABLE).exists() {
        return nested;
    }

    dir.to_path_buf()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    if !path.exists() {
        return Err(LoadError::Missing {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}
