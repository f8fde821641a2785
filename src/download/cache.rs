use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

use crate::source::SOURCE_FILES;
use crate::transform::Locale;

pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(custom_dir: Option<PathBuf>) -> Result<Self> {
        let cache_dir = match custom_dir {
            Some(dir) => dir,
            None => {
                let proj_dirs = ProjectDirs::from("", "", "ark-lore-to-sqlite")
                    .context("Could not determine cache directory")?;
                proj_dirs.cache_dir().to_path_buf()
            }
        };

        fs::create_dir_all(&cache_dir).context("Failed to create cache directory")?;

        Ok(Self { cache_dir })
    }

    /// Get the cache directory path
    /// Directory holding the tables of one locale
    pub fn locale_dir(&self, locale: Locale) -> PathBuf {
        self.cache_dir.join(locale.code())
    }

    pub fn table_path(&self, locale: Locale, file: &str) -> PathBuf {
        self.locale_dir(locale).join(file)
    }

    /// Check if one table is already cached
    pub fn is_table_cached(&self, locale: Locale, file: &str) -> bool {
        self.table_path(locale, file).exists()
    }

    /// Check if every table of a locale is cached
    pub fn is_cached(&self, locale: Locale) -> bool {
        SOURCE_FILES
            .iter()
            .all(|file| self.is_table_cached(locale, file))
    }

    /// Temporary download target; renamed over the table once complete
    pub fn partial_path(&self, locale: Locale, file: &str) -> PathBuf {
        self.locale_dir(locale).join(format!("{}.part", file))
    }

    /// Remove leftovers of interrupted downloads
    pub fn cleanup_partial(&self, locale: Locale) -> Result<()> {
        let dir = self.locale_dir(locale);
        if !dir.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("part") {
                fs::remove_file(&path).ok();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_cached_needs_every_table() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(Some(dir.path().to_path_buf())).unwrap();
        let locale_dir = cache.locale_dir(Locale::JaJp);
        fs::create_dir_all(&locale_dir).unwrap();

        for file in &SOURCE_FILES[..3] {
            fs::write(locale_dir.join(file), "{}").unwrap();
        }
        assert!(!cache.is_cached(Locale::JaJp));

        fs::write(locale_dir.join(SOURCE_FILES[3]), "{}").unwrap();
        assert!(cache.is_cached(Locale::JaJp));
        assert!(!cache.is_cached(Locale::EnUs));
    }

    #[test]
    fn test_cleanup_partial() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(Some(dir.path().to_path_buf())).unwrap();
        fs::create_dir_all(cache.locale_dir(Locale::JaJp)).unwrap();

        let partial = cache.partial_path(Locale::JaJp, "skill_table.json");
        fs::write(&partial, "{").unwrap();
        fs::write(cache.table_path(Locale::JaJp, "team.json"), "{}").unwrap();

        cache.cleanup_partial(Locale::JaJp).unwrap();
        assert!(!partial.exists());
        assert!(cache.table_path(Locale::JaJp, "team.json").exists());
    }
}
