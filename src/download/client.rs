use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use std::io::{Read, Write};
use std::path::Path;

use crate::transform::Locale;
use crate::ui::Ui;

pub struct DataClient {
    client: Client,
    base_url: String,
}

impl DataClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent("ark-lore-to-sqlite")
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of one excel table in the data repository
    pub fn table_url(&self, locale: Locale, file: &str) -> String {
        format!(
            "{}/{}/gamedata/excel/{}",
            self.base_url,
            locale.code(),
            file
        )
    }

    /// Download one table to `dest`
    pub fn download_table(
        &self,
        locale: Locale,
        file: &str,
        dest: &Path,
        ui: &mut impl Ui,
    ) -> Result<u64> {
        let url = self.table_url(locale, file);
        tracing::debug!(%url, "downloading table");

        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("Failed to start download of {}", file))?;

        if !response.status().is_success() {
            bail!("Download of {} failed: HTTP {}", url, response.status());
        }

        let total_size = response.content_length().unwrap_or(0);

        let mut dest_file =
            std::fs::File::create(dest).context("Failed to create destination file")?;

        let mut downloaded: u64 = 0;
        let mut buffer = [0u8; 8192];
        let mut reader = response;

        loop {
            let bytes_read = reader
                .read(&mut buffer)
                .context("Failed to read from response")?;

            if bytes_read == 0 {
                break;
            }

            dest_file
                .write_all(&buffer[..bytes_read])
                .context("Failed to write to file")?;

            downloaded += bytes_read as u64;
            ui.set_progress(
                downloaded,
                total_size,
                format!("{} {}", file, format_bytes(downloaded, total_size)),
            );
        }

        Ok(downloaded)
    }
}

/// Format bytes as human-readable string
fn format_bytes(current: u64, total: u64) -> String {
    fn fmt(bytes: u64) -> String {
        if bytes >= 1_000_000_000 {
            format!("{:.1} GB", bytes as f64 / 1_000_000_000.0)
        } else if bytes >= 1_000_000 {
            format!("{:.1} MB", bytes as f64 / 1_000_000.0)
        } else if bytes >= 1_000 {
            format!("{:.1} KB", bytes as f64 / 1_000.0)
        } else {
            format!("{} B", bytes)
        }
    }
    if total == 0 {
        fmt(current)
    } else {
        format!("{} / {}", fmt(current), fmt(total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500, 999), "500 B / 999 B");
        assert_eq!(format_bytes(1500, 3000), "1.5 KB / 3.0 KB");
        assert_eq!(format_bytes(1_500_000, 0), "1.5 MB");
    }

    #[test]
    fn test_table_url() {
        let client = DataClient::new("https://example.com/data/").unwrap();
        assert_eq!(
            client.table_url(Locale::JaJp, "skill_table.json"),
            "https://example.com/data/ja_JP/gamedata/excel/skill_table.json"
        );
    }
}
