use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read migrations directory {}: {source}", path.display())]
    Discovery { path: PathBuf, source: io::Error },
    #[error("cannot read migration {}: {source}", path.display())]
    ReadMigration { path: PathBuf, source: io::Error },
    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
