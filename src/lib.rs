pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod schema;
pub mod source;
pub mod transform;
pub mod ui;
pub mod writer;

pub use cli::{Cli, Commands};
pub use config::{AppConfig, Settings};
pub use error::{LoadError, RecordError};
pub use lookup::LoreDb;
pub use ui::{Dashboard, LogUi, Phase, SilentUi, Ui};
pub use writer::{convert_to_sqlite, ConvertSummary};
