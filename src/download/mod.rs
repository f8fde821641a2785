pub mod cache;
pub mod client;

pub use cache::*;
pub use client::*;

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::Settings;
use crate::source::SOURCE_FILES;
use crate::ui::{Phase, Ui};

/// Make sure every source table of the configured locale is in the cache
/// and return the directory holding them.
pub fn ensure_data_downloaded(
    settings: &Settings,
    cache_dir: Option<PathBuf>,
    force: bool,
    ui: &mut impl Ui,
) -> Result<PathBuf> {
    ui.set_phase(Phase::Checking);
    let cache = CacheManager::new(cache_dir.or_else(|| settings.cache_dir.clone()))?;
    let locale = settings.locale;
    let dir = cache.locale_dir(locale);

    if !force && cache.is_cached(locale) {
        ui.log(format!("Using cached {} tables in {:?}", locale, dir));
        return Ok(dir);
    }

    std::fs::create_dir_all(&dir).context("Failed to create locale cache directory")?;
    cache.cleanup_partial(locale)?;

    ui.set_phase(Phase::Downloading);
    ui.set_info(format!("{} from {}", locale, settings.base_url));
    let client = DataClient::new(&settings.base_url)?;

    for file in SOURCE_FILES {
        if !force && cache.is_table_cached(locale, file) {
            ui.log(format!("{}: cached", file));
            continue;
        }

        let partial = cache.partial_path(locale, file);
        let bytes = client.download_table(locale, file, &partial, ui)?;
        std::fs::rename(&partial, cache.table_path(locale, file))
            .with_context(|| format!("Failed to move {} into the cache", file))?;
        ui.log(format!("{}: {} bytes", file, bytes));
    }

    ui.clear_progress();
    Ok(dir)
}
