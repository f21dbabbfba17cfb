//! Mermaid `erDiagram` output.

use super::group_by_module;
use crate::catalog::ModuleCatalog;
use crate::model::{Cardinality, Column, Schema, Table};
use crate::sql::display_type;

/// Render the schema as a Mermaid entity-relationship diagram.
pub fn render_mermaid(schema: &Schema, catalog: &ModuleCatalog) -> String {
    let mut output = String::from("erDiagram\n");

    for (module, tables) in group_by_module(schema, catalog) {
        output.push_str(&format!("    %% {}\n", module));
        for table in tables {
            render_entity(&mut output, table);
        }
        output.push('\n');
    }

    let mut relationships = String::new();
    for table in schema.tables() {
        for fk in &table.foreign_keys {
            let cardinality = Cardinality::infer(&table.name, fk);
            relationships.push_str(&format!(
                "    {} {} {} : \"{}\"\n",
                fk.referenced_table,
                cardinality.notation(),
                table.name,
                fk.column
            ));
        }
    }
    if !relationships.is_empty() {
        output.push_str("    %% Relationships\n");
        output.push_str(&relationships);
    }

    output
}

fn render_entity(output: &mut String, table: &Table) {
    if table.columns.is_empty() {
        output.push_str(&format!("    {}\n", table.name));
        return;
    }

    output.push_str(&format!("    {} {{\n", table.name));
    for column in &table.columns {
        render_attribute(output, column);
    }
    output.push_str("    }\n");
}

fn render_attribute(output: &mut String, column: &Column) {
    output.push_str(&format!(
        "        {} {}",
        attribute_type(&column.sql_type),
        column.name
    ));

    if column.primary_key {
        output.push_str(" PK");
    } else if column.unique {
        output.push_str(" UK");
    }

    // Required columns carry a "*" comment.
    if !column.nullable {
        output.push_str(" \"*\"");
    }

    output.push('\n');
}

/// Mermaid attribute types only allow word characters, `-`, `[]` and `()`.
fn attribute_type(sql_type: &str) -> String {
    display_type(sql_type)
        .chars()
        .map(|c| match c {
            c if c.is_ascii_alphanumeric() => c,
            '-' | '_' | '[' | ']' | '(' | ')' => c,
            _ => '_',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ForeignKey;

    fn schema() -> Schema {
        let mut schema = Schema::new();

        let mut projects = Table::new("projects", "Projects");
        let mut id = Column::new("id", "UUID");
        id.primary_key = true;
        projects.columns.push(id);
        let mut name = Column::new("name", "VARCHAR");
        name.nullable = false;
        projects.columns.push(name);
        let mut slug = Column::new("slug", "TEXT");
        slug.unique = true;
        projects.columns.push(slug);
        projects.columns.push(Column::new("tags", "TEXT_ARRAY"));
        projects.columns.push(Column::new("score", "DOUBLE PRECISION"));
        schema.insert(projects);

        let mut members = Table::new("project_members", "Projects");
        members.columns.push(Column::new("project_id", "UUID"));
        members.foreign_keys.push(ForeignKey {
            column: "project_id".to_string(),
            referenced_table: "projects".to_string(),
            referenced_column: "id".to_string(),
        });
        schema.insert(members);

        schema.insert(Table::new("audit_trail", "Other"));
        schema
    }

    #[test]
    fn test_entities() {
        let out = render_mermaid(&schema(), &ModuleCatalog::default());
        assert!(out.starts_with("erDiagram\n    %% Projects\n    projects {\n"));
        assert!(out.contains("        UUID id PK\n"));
        assert!(out.contains("        VARCHAR name \"*\"\n"));
        assert!(out.contains("        TEXT slug UK\n"));
        assert!(out.contains("        TEXT[] tags\n"));
        assert!(out.contains("        DOUBLE_PRECISION score\n"));
        assert!(out.contains("    %% Other\n    audit_trail\n"));
    }

    #[test]
    fn test_join_table_relationship_is_one_to_many() {
        let out = render_mermaid(&schema(), &ModuleCatalog::default());
        assert!(out.contains("    %% Relationships\n"));
        assert!(out.contains("    projects ||--o{ project_members : \"project_id\"\n"));
    }

    #[test]
    fn test_empty_schema() {
        let out = render_mermaid(&Schema::new(), &ModuleCatalog::default());
        assert_eq!(out, "erDiagram\n");
    }

    #[test]
    fn test_schema_qualified_types_are_sanitized() {
        let catalog = ModuleCatalog::default();
        let schema = crate::sql::SchemaParser::new(&catalog)
            .parse_sql("CREATE TABLE projects (status public.project_status);");
        let out = render_mermaid(&schema, &catalog);
        assert!(out.contains("        PUBLIC_PROJECT_STATUS status\n"));
        assert_eq!(attribute_type("PUBLIC.PROJECT_STATUS"), "PUBLIC_PROJECT_STATUS");
        assert_eq!(attribute_type("DOUBLE PRECISION"), "DOUBLE_PRECISION");
        assert_eq!(attribute_type("TEXT_ARRAY"), "TEXT[]");
    }
}
