//! Load, parse, render and write in one pass.

use crate::catalog::ModuleCatalog;
use crate::error::{Error, Result};
use crate::loader::load_migrations;
use crate::model::{Schema, SchemaStats};
use crate::render::{render_html, render_markdown, render_mermaid};
use crate::sql::SchemaParser;
use std::fs;
use std::path::{Path, PathBuf};

pub const MERMAID_FILE: &str = "database-erd.mmd";
pub const HTML_FILE: &str = "database-erd.html";
pub const MARKDOWN_FILE: &str = "DATABASE_SCHEMA_DOCUMENTATION.md";
pub const DEFAULT_MIGRATIONS_DIR: &str = "supabase/migrations";

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Project root.
    pub root: PathBuf,
    /// Migrations directory; relative paths resolve against `root`.
    pub migrations_dir: PathBuf,
    /// Output directory; `None` writes next to the project root.
    pub output_dir: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            migrations_dir: PathBuf::from(DEFAULT_MIGRATIONS_DIR),
            output_dir: None,
        }
    }
}

impl Options {
    pub fn migrations_path(&self) -> PathBuf {
        self.root.join(&self.migrations_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => self.root.join(dir),
            None => self.root.clone(),
        }
    }
}

/// The three rendered documents.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub mermaid: String,
    pub html: String,
    pub markdown: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub migrations: usize,
    pub stats: SchemaStats,
    pub written: Vec<PathBuf>,
}

pub struct Generator {
    options: Options,
    catalog: ModuleCatalog,
}

impl Generator {
    pub fn new(options: Options, catalog: ModuleCatalog) -> Self {
        Self { options, catalog }
    }

    pub fn catalog(&self) -> &ModuleCatalog {
        &self.catalog
    }

    /// Run the whole pipeline, stamping the HTML with the current time.
    pub fn run(&self) -> Result<Summary> {
        let generated_at = chrono::Utc::now()
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string();
        self.run_at(&generated_at)
    }

    /// Run the whole pipeline with a fixed HTML timestamp.
    ///
    /// Files are overwritten one after another; a failed write leaves the
    /// earlier ones in place.
    pub fn run_at(&self, generated_at: &str) -> Result<Summary> {
        let migrations = load_migrations(&self.options.migrations_path())?;
        let schema = SchemaParser::new(&self.catalog).parse(&migrations);
        let stats = schema.stats();
        log::info!(
            "Parsed {} tables, {} relationships, {} columns in {} modules",
            stats.tables,
            stats.relationships,
            stats.columns,
            stats.modules
        );

        let artifacts = self.render(&schema, generated_at);
        let out_dir = self.options.output_path();
        let written = vec![
            write(&out_dir.join(MERMAID_FILE), &artifacts.mermaid)?,
            write(&out_dir.join(HTML_FILE), &artifacts.html)?,
            write(&out_dir.join(MARKDOWN_FILE), &artifacts.markdown)?,
        ];

        Ok(Summary {
            migrations: migrations.len(),
            stats,
            written,
        })
    }

    pub fn render(&self, schema: &Schema, generated_at: &str) -> Artifacts {
        let mermaid = render_mermaid(schema, &self.catalog);
        let html = render_html(schema, &mermaid, generated_at);
        let markdown = render_markdown(schema, &self.catalog);
        Artifacts {
            mermaid,
            html,
            markdown,
        }
    }
}

fn write(path: &Path, content: &str) -> Result<PathBuf> {
    fs::write(path, content).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Wrote {}", path.display());
    Ok(path.to_path_buf())
}
