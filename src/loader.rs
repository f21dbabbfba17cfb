//! Migration discovery.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// One migration file: its file name and full SQL text.
#[derive(Debug, Clone, PartialEq)]
pub struct Migration {
    pub name: String,
    pub sql: String,
}

impl Migration {
    pub fn new(name: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql: sql.into(),
        }
    }
}

/// Read every `*.sql` file directly under `dir`, sorted by file name.
pub fn load_migrations(dir: &Path) -> Result<Vec<Migration>> {
    let discovery = |source| Error::Discovery {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(discovery)? {
        let path = entry.map_err(discovery)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "sql") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut migrations = Vec::with_capacity(paths.len());
    for path in paths {
        log::debug!("Reading migration {}", path.display());
        let sql = fs::read_to_string(&path).map_err(|source| Error::ReadMigration {
            path: path.clone(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        migrations.push(Migration { name, sql });
    }

    log::info!("Found {} migration(s) in {}", migrations.len(), dir.display());
    Ok(migrations)
}
