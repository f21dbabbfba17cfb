//! Migration SQL to schema model.

mod parser;
mod types;

pub use parser::{SchemaParser, parse_sql};
pub use types::{ARRAY_SUFFIX, display_type, normalize_type};
