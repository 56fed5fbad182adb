use std::path::Path;

use anyhow::{Context, Result};
use lcore_ingest::{read_raw_table, resolve_source_file};
use lcore_standards::DomainConfig;
use lcore_transform::SourceSet;
use tracing::debug;

/// Load every source file a domain declares from `data_dir`.
pub fn load_sources(data_dir: &Path, config: &DomainConfig) -> Result<SourceSet> {
    let mut sources = SourceSet::new();
    for source in &config.sources {
        let path = resolve_source_file(data_dir, &source.file)
            .with_context(|| format!("locate {} source `{}`", config.name, source.role))?;
        let table =
            read_raw_table(&path).with_context(|| format!("read {}", path.display()))?;
        debug!(
            domain = %config.name,
            role = %source.role,
            path = %path.display(),
            rows = table.len(),
            encoding = ?table.encoding,
            "source loaded"
        );
        sources.insert(&source.role, table);
    }
    Ok(sources)
}
