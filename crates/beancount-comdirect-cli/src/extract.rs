use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use beancount_comdirect::{Entry, render, sort_entries};

use crate::config::Config;
use crate::input;

/// Extract every configured section from `files`.
///
/// Fails on the first malformed section, before anything is written.
pub fn extract_files(files: &[PathBuf], config: &Config, sort: bool) -> Result<Vec<Entry>> {
    let importers = config.importers();
    let mut entries = Vec::new();

    for path in files {
        let text = input::read_export(path)?;
        let filename = path.display().to_string();

        let mut sections = 0;
        for importer in importers.iter().filter(|i| i.identify(text.lines())) {
            let extracted = importer
                .extract(text.lines(), &filename)
                .with_context(|| format!("Failed to extract {} from {filename}", importer.name()))?;
            tracing::info!(
                file = %filename,
                importer = %importer.name(),
                entries = extracted.len(),
                "extracted"
            );
            entries.extend(extracted);
            sections += 1;
        }

        if sections == 0 {
            tracing::warn!(file = %filename, "no configured account section found");
        }
    }

    if sort {
        sort_entries(&mut entries);
    }
    Ok(entries)
}

pub fn write_entries(entries: &[Entry], output: Option<&Path>) -> Result<()> {
    let text = render(entries);
    match output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => std::io::stdout()
            .lock()
            .write_all(text.as_bytes())
            .context("Failed to write to stdout")?,
    }
    Ok(())
}
