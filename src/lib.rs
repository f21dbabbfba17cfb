pub mod catalog;
pub mod error;
pub mod generator;
pub mod loader;
pub mod measure;
pub mod model;
pub mod render;
pub mod sql;

use wasm_bindgen::prelude::*;

pub use catalog::ModuleCatalog;
pub use error::Error;
pub use generator::{Artifacts, Generator, Options, Summary};
pub use model::{Cardinality, Column, ForeignKey, Schema, SchemaStats, Table};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Render migration SQL to a Mermaid ER diagram
#[wasm_bindgen(js_name = "sqlToMermaid")]
pub fn sql_to_mermaid(sql: &str) -> String {
    let catalog = ModuleCatalog::default();
    let schema = sql::SchemaParser::new(&catalog).parse_sql(sql);
    render::render_mermaid(&schema, &catalog)
}

/// Render migration SQL to Markdown schema documentation
#[wasm_bindgen(js_name = "sqlToMarkdown")]
pub fn sql_to_markdown(sql: &str) -> String {
    let catalog = ModuleCatalog::default();
    let schema = sql::SchemaParser::new(&catalog).parse_sql(sql);
    render::render_markdown(&schema, &catalog)
}
