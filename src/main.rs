use anyhow::Context;
use clap::Parser;
use migration_erd::{Generator, ModuleCatalog, Options};
use std::path::PathBuf;
use std::process;

/// Generate an ER diagram and schema docs from SQL migrations.
///
/// With no arguments, reads `./supabase/migrations/*.sql` and writes
/// `database-erd.mmd`, `database-erd.html` and
/// `DATABASE_SCHEMA_DOCUMENTATION.md` into the current directory.
#[derive(Parser)]
#[command(name = "migration-erd", version, about)]
struct Cli {
    /// Project root
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Migrations directory, relative to the project root
    #[arg(long, default_value = migration_erd::generator::DEFAULT_MIGRATIONS_DIR)]
    migrations: PathBuf,

    /// Output directory, relative to the project root (default: the root)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Log every migration and table
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli) {
        log::error!("{:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let options = Options {
        root: cli.root,
        migrations_dir: cli.migrations,
        output_dir: cli.out_dir,
    };

    let summary = Generator::new(options, ModuleCatalog::default())
        .run()
        .context("ERD generation failed")?;

    log::info!(
        "Generated {} files from {} migration(s): {} tables, {} relationships",
        summary.written.len(),
        summary.migrations,
        summary.stats.tables,
        summary.stats.relationships
    );
    Ok(())
}
