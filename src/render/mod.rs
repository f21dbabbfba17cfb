//! Output artifacts rendered from a parsed [`Schema`].

mod html;
mod markdown;
mod mermaid;

pub use html::render_html;
pub use markdown::{describe_column, render_markdown};
pub use mermaid::render_mermaid;

use crate::catalog::ModuleCatalog;
use crate::model::{Schema, Table};

/// Tables grouped by module, in catalog order.
///
/// Modules the catalog does not list follow in order of first appearance.
/// Empty modules are left out.
pub(crate) fn group_by_module<'a>(
    schema: &'a Schema,
    catalog: &'a ModuleCatalog,
) -> Vec<(&'a str, Vec<&'a Table>)> {
    let mut order = catalog.module_order();
    for table in schema.tables() {
        if !order.contains(&table.module.as_str()) {
            order.push(table.module.as_str());
        }
    }

    order
        .into_iter()
        .map(|module| (module, schema.tables_in(module).collect::<Vec<_>>()))
        .filter(|(_, tables)| !tables.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_module() {
        let mut schema = Schema::new();
        schema.insert(Table::new("widgets", "Other"));
        schema.insert(Table::new("projects", "Projects"));
        schema.insert(Table::new("ledger", "Accounting"));
        schema.insert(Table::new("users", "Core"));

        let catalog = ModuleCatalog::default();
        let groups: Vec<(&str, usize)> = group_by_module(&schema, &catalog)
            .into_iter()
            .map(|(m, tables)| (m, tables.len()))
            .collect();
        assert_eq!(
            groups,
            [("Core", 1), ("Projects", 1), ("Other", 1), ("Accounting", 1)]
        );
    }
}
