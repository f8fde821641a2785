pub mod row;
pub mod schema_gen;
pub mod sqlite;

pub use row::{RowValues, SqlValue};
pub use sqlite::{convert_to_sqlite, ConvertSummary, LoreWriter};
