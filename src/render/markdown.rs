//! Markdown schema reference.

use super::group_by_module;
use crate::catalog::ModuleCatalog;
use crate::measure::{column_widths, pad};
use crate::model::{Column, Schema, Table};
use crate::sql::display_type;

const HEADER: [&str; 6] = ["Column", "Type", "Nullable", "Key", "Default", "Description"];

/// Render the schema documentation: table of contents, then one section
/// per module with column, foreign key and index listings per table.
pub fn render_markdown(schema: &Schema, catalog: &ModuleCatalog) -> String {
    let groups = group_by_module(schema, catalog);
    let stats = schema.stats();
    let mut output = String::from("# Database Schema Documentation\n\n");

    output.push_str(&format!(
        "{} tables, {} relationships, {} columns across {} modules.\n\n",
        stats.tables, stats.relationships, stats.columns, stats.modules
    ));

    output.push_str("## Table of Contents\n\n");
    for (module, tables) in &groups {
        output.push_str(&format!("- [{}](#{})\n", module, module_anchor(module)));
        for table in tables {
            output.push_str(&format!("  - [{}](#{})\n", table.name, table_anchor(&table.name)));
        }
    }

    for (module, tables) in &groups {
        output.push_str(&format!(
            "\n<a id=\"{}\"></a>\n\n## {}\n",
            module_anchor(module),
            module
        ));
        for table in tables {
            render_table(&mut output, table);
        }
    }

    output
}

fn render_table(output: &mut String, table: &Table) {
    output.push_str(&format!(
        "\n<a id=\"{}\"></a>\n\n### {}\n\n",
        table_anchor(&table.name),
        table.name
    ));

    let mut rows: Vec<Vec<String>> = vec![HEADER.iter().map(|h| h.to_string()).collect()];
    rows.extend(table.columns.iter().map(column_row));
    let widths = column_widths(&rows);

    for (i, row) in rows.iter().enumerate() {
        push_row(output, row.iter().map(String::as_str), &widths);
        if i == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat((*w).max(3))).collect();
            push_row(output, rule.iter().map(String::as_str), &widths);
        }
    }

    if !table.foreign_keys.is_empty() {
        output.push_str("\n**Foreign Keys:**\n\n");
        for fk in &table.foreign_keys {
            output.push_str(&format!(
                "- `{}` → `{}.{}`\n",
                fk.column, fk.referenced_table, fk.referenced_column
            ));
        }
    }

    if !table.indexes.is_empty() {
        output.push_str("\n**Indexes:**\n\n");
        for index in &table.indexes {
            output.push_str(&format!("- `({})`\n", index));
        }
    }
}

fn push_row<'a>(output: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    output.push('|');
    for (cell, width) in cells.zip(widths) {
        output.push(' ');
        output.push_str(&pad(cell, (*width).max(3)));
        output.push_str(" |");
    }
    output.push('\n');
}

fn column_row(column: &Column) -> Vec<String> {
    let key = match (column.primary_key, column.unique) {
        (true, _) => "PK",
        (false, true) => "UK",
        (false, false) => "",
    };
    let default = match &column.default {
        Some(expr) => format!("`{}`", escape_cell(expr)),
        None => "-".to_string(),
    };

    vec![
        format!("`{}`", column.name),
        escape_cell(&display_type(&column.sql_type)),
        (if column.nullable { "Yes" } else { "No" }).to_string(),
        key.to_string(),
        default,
        escape_cell(&describe_column(&column.name)),
    ]
}

/// Best-effort description of a column from its name.
pub fn describe_column(name: &str) -> String {
    let known = match name {
        "id" => "Unique identifier",
        "organization_id" => "Owning organization",
        "project_id" => "Related project",
        "user_id" => "Related user",
        "company_id" => "Related company",
        "parent_id" => "Parent record",
        "name" => "Display name",
        "title" => "Title",
        "description" => "Detailed description",
        "status" => "Current status",
        "type" => "Record type",
        "email" => "Email address",
        "phone" => "Phone number",
        "slug" => "URL-friendly identifier",
        "notes" => "Free-form notes",
        "metadata" => "Additional metadata (JSON)",
        "settings" => "Configuration settings (JSON)",
        "amount" => "Monetary amount",
        "currency" => "Currency code",
        "start_date" => "Start date",
        "end_date" => "End date",
        "due_date" => "Due date",
        "is_active" => "Whether the record is active",
        "created_by" => "User who created the record",
        "updated_by" => "User who last updated the record",
        "created_at" => "Record creation timestamp",
        "updated_at" => "Last update timestamp",
        "deleted_at" => "Soft deletion timestamp",
        _ => return name.replace('_', " "),
    };
    known.to_string()
}

// Modules and tables may share a name (`Projects` / `projects`), so each
// kind gets its own explicit anchor namespace.
fn module_anchor(module: &str) -> String {
    format!("module-{}", anchor(module))
}

fn table_anchor(table: &str) -> String {
    format!("table-{}", anchor(table))
}

/// GitHub-style heading slug.
fn anchor(heading: &str) -> String {
    heading
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
            _ => None,
        })
        .collect()
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ForeignKey;

    fn projects() -> Table {
        let mut table = Table::new("projects", "Projects");
        let mut id = Column::new("id", "UUID");
        id.primary_key = true;
        id.default = Some("gen_random_uuid()".to_string());
        table.columns.push(id);
        let mut org = Column::new("organization_id", "UUID");
        org.nullable = false;
        table.columns.push(org);
        table.columns.push(Column::new("budget_code", "TEXT_ARRAY"));
        table.foreign_keys.push(ForeignKey {
            column: "organization_id".to_string(),
            referenced_table: "organizations".to_string(),
            referenced_column: "id".to_string(),
        });
        table.indexes.push("organization_id".to_string());
        table
    }

    #[test]
    fn test_describe_column() {
        assert_eq!(describe_column("created_at"), "Record creation timestamp");
        assert_eq!(describe_column("budget_line_total"), "budget line total");
    }

    #[test]
    fn test_table_section() {
        let mut schema = Schema::new();
        schema.insert(projects());
        let out = render_markdown(&schema, &ModuleCatalog::default());

        assert!(out.contains("- [Projects](#module-projects)\n  - [projects](#table-projects)\n"));
        assert!(out.contains("\n<a id=\"module-projects\"></a>\n\n## Projects\n"));
        assert!(out.contains("\n## Projects\n\n<a id=\"table-projects\"></a>\n\n### projects\n\n| Column "));
        assert!(out.contains(
            "| `id`              | UUID   | Yes      | PK  | `gen_random_uuid()` | Unique identifier   |\n"
        ));
        assert!(out.contains(
            "| `organization_id` | UUID   | No       |     | -                   | Owning organization |\n"
        ));
        assert!(out.contains("| `budget_code`     | TEXT[] |"));
        assert!(out.contains("**Foreign Keys:**\n\n- `organization_id` → `organizations.id`\n"));
        assert!(out.contains("**Indexes:**\n\n- `(organization_id)`\n"));
    }

    #[test]
    fn test_header_rule_aligns() {
        let mut schema = Schema::new();
        schema.insert(projects());
        let out = render_markdown(&schema, &ModuleCatalog::default());
        let header = out.lines().find(|l| l.starts_with("| Column")).unwrap();
        let rule = out.lines().find(|l| l.starts_with("| ---")).unwrap();
        assert_eq!(header.len(), rule.len());
    }

    #[test]
    fn test_escapes_pipes() {
        let mut table = Table::new("flags", "Other");
        let mut col = Column::new("mask", "TEXT");
        col.default = Some("'a|b'".to_string());
        table.columns.push(col);
        let mut schema = Schema::new();
        schema.insert(table);

        let out = render_markdown(&schema, &ModuleCatalog::default());
        assert!(out.contains("`'a\\|b'`"));
    }

    #[test]
    fn test_anchor() {
        assert_eq!(anchor("Project Members"), "project-members");
        assert_eq!(anchor("purchase_orders"), "purchase_orders");
    }

    #[test]
    fn test_module_and_table_anchors_are_distinct() {
        assert_ne!(module_anchor("Projects"), table_anchor("projects"));

        let mut schema = Schema::new();
        schema.insert(projects());
        let out = render_markdown(&schema, &ModuleCatalog::default());
        assert_eq!(out.matches("<a id=\"module-projects\"></a>").count(), 1);
        assert_eq!(out.matches("<a id=\"table-projects\"></a>").count(), 1);
    }
}
