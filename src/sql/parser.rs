//! Pattern-based extraction of tables from migration SQL.
//!
//! This is a best-effort scanner, not a SQL grammar. Constructs that do not
//! match are left out of the schema rather than reported:
//!
//! * a table body ends at the first `);`, so a nested `);` cuts it short;
//! * the body is split on every comma, so `NUMERIC(10, 2)` or a `DEFAULT`
//!   containing a comma is torn apart and the fragments are dropped;
//! * `ALTER TABLE ... ADD COLUMN` is not tracked.

use super::types::normalize_type;
use crate::catalog::ModuleCatalog;
use crate::loader::Migration;
use crate::model::{Column, ForeignKey, Schema, Table};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($re).unwrap());
    };
}

pattern!(LINE_COMMENT, r"--[^\n]*");
pattern!(BLOCK_COMMENT, r"(?s)/\*.*?\*/");
pattern!(
    CREATE_TABLE,
    r#"(?is)\bCREATE\s+(?:(?:GLOBAL|LOCAL)\s+)?(?:(?:TEMP|TEMPORARY|UNLOGGED)\s+)?TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?(?:"?\w+"?\.)?"?(\w+)"?\s*\((.*?)\);"#
);
pattern!(
    TABLE_CLAUSE,
    r"(?i)^(?:CONSTRAINT|PRIMARY\s+KEY|FOREIGN\s+KEY|CHECK|UNIQUE)\b"
);
pattern!(
    COLUMN,
    r#"(?i)^"?(\w+)"?\s+((?:CHARACTER\s+VARYING|DOUBLE\s+PRECISION|TIME(?:STAMP)?(?:\s*\(\d*\)?)?\s+WITH(?:OUT)?\s+TIME\s+ZONE|[a-z_][\w.]*)(?:\s*\([^)]*\)?)?(?:\s*\[\])*)"#
);
pattern!(
    DEFAULT,
    r"(?is)\bDEFAULT\s+((?:'(?:[^']|'')*'|[^']|')+?)\s*(?:\b(?:NOT\s+NULL|NULL|PRIMARY\s+KEY|UNIQUE|REFERENCES|CHECK|CONSTRAINT|GENERATED)\b|$)"
);
pattern!(
    REFERENCES,
    r#"(?i)\bREFERENCES\s+(?:"?\w+"?\.)?"?(\w+)"?\s*(?:\(\s*"?(\w+)"?\s*\))?"#
);
pattern!(
    TABLE_FOREIGN_KEY,
    r#"(?is)^(?:CONSTRAINT\s+"?\w+"?\s+)?FOREIGN\s+KEY\s*\(\s*"?(\w+)"?\s*\)\s*REFERENCES\s+(?:"?\w+"?\.)?"?(\w+)"?\s*(?:\(\s*"?(\w+)"?\s*\))?"#
);
pattern!(
    ALTER_FOREIGN_KEY,
    r#"(?is)\bALTER\s+TABLE\s+(?:IF\s+EXISTS\s+)?(?:ONLY\s+)?(?:"?\w+"?\.)?"?(\w+)"?\s+ADD\s+(?:CONSTRAINT\s+"?\w+"?\s+)?FOREIGN\s+KEY\s*\(\s*"?(\w+)"?\s*\)\s*REFERENCES\s+(?:"?\w+"?\.)?"?(\w+)"?\s*(?:\(\s*"?(\w+)"?\s*\))?"#
);
pattern!(
    CREATE_INDEX,
    r#"(?is)\bCREATE\s+(?:UNIQUE\s+)?INDEX\s+(?:CONCURRENTLY\s+)?(?:IF\s+NOT\s+EXISTS\s+)?(?:"?\w+"?\s+)?ON\s+(?:ONLY\s+)?(?:"?\w+"?\.)?"?(\w+)"?\s*(?:USING\s+\w+\s*)?\("#
);

/// Parse SQL text with the default module catalog.
pub fn parse_sql(sql: &str) -> Schema {
    SchemaParser::new(&ModuleCatalog::default()).parse_sql(sql)
}

/// Turns migration text into a [`Schema`], tagging tables through a catalog.
pub struct SchemaParser<'a> {
    catalog: &'a ModuleCatalog,
}

impl<'a> SchemaParser<'a> {
    pub fn new(catalog: &'a ModuleCatalog) -> Self {
        Self { catalog }
    }

    /// Parse all migrations as one text, in the given order.
    pub fn parse(&self, migrations: &[Migration]) -> Schema {
        let sql = migrations
            .iter()
            .map(|m| m.sql.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.parse_sql(&sql)
    }

    pub fn parse_sql(&self, sql: &str) -> Schema {
        let sql = strip_comments(sql);
        let altered = collect_alter_foreign_keys(&sql);
        let indexes = collect_indexes(&sql);
        let mut schema = Schema::new();

        for caps in CREATE_TABLE.captures_iter(&sql) {
            let name = &caps[1];
            if is_excluded(name) {
                log::debug!("Skipping partition/materialized view {}", name);
                continue;
            }

            let mut table = self.parse_table(name, &caps[2]);
            table
                .foreign_keys
                .extend(altered.get(name).into_iter().flatten().cloned());
            table.indexes = indexes.get(name).cloned().unwrap_or_default();

            log::debug!(
                "Parsed table {} ({} columns, {} foreign keys) -> {}",
                table.name,
                table.columns.len(),
                table.foreign_keys.len(),
                table.module
            );
            if schema.insert(table).is_some() {
                log::debug!("Table {} redefined, keeping the later definition", name);
            }
        }

        schema
    }

    fn parse_table(&self, name: &str, body: &str) -> Table {
        let mut table = Table::new(name, self.catalog.resolve(name));

        for piece in body.split(',') {
            let piece = piece.trim();
            if piece.is_empty() {
                continue;
            }

            if TABLE_CLAUSE.is_match(piece) {
                if let Some(caps) = TABLE_FOREIGN_KEY.captures(piece) {
                    table.foreign_keys.push(foreign_key(&caps, 1));
                }
                continue;
            }

            let Some(caps) = COLUMN.captures(piece) else {
                log::trace!("Ignoring unrecognised clause in {}: {}", name, piece);
                continue;
            };

            let rest = &piece[caps.get(0).map_or(0, |m| m.end())..];
            let column = parse_column(&caps[1], &caps[2], rest);

            if let Some(r) = REFERENCES.captures(rest) {
                table.foreign_keys.push(ForeignKey {
                    column: column.name.clone(),
                    referenced_table: r[1].to_string(),
                    referenced_column: r.get(2).map_or("id", |m| m.as_str()).to_string(),
                });
            }

            table.columns.push(column);
        }

        table
    }
}

fn parse_column(name: &str, raw_type: &str, rest: &str) -> Column {
    let flags = rest.to_uppercase();
    Column {
        name: name.to_string(),
        sql_type: normalize_type(raw_type),
        nullable: !flags.contains("NOT NULL"),
        primary_key: flags.contains("PRIMARY KEY"),
        unique: flags.contains("UNIQUE"),
        default: DEFAULT
            .captures(rest)
            .map(|c| c[1].trim().to_string())
            .filter(|d| !d.is_empty()),
    }
}

/// Partitions and materialized views stay out of the diagram.
fn is_excluded(table: &str) -> bool {
    table.contains("_partition") || table.starts_with("mv_")
}

fn strip_comments(sql: &str) -> Cow<'_, str> {
    match BLOCK_COMMENT.replace_all(sql, "") {
        Cow::Borrowed(s) => LINE_COMMENT.replace_all(s, ""),
        Cow::Owned(s) => Cow::Owned(LINE_COMMENT.replace_all(&s, "").into_owned()),
    }
}

/// Build a foreign key from `(column, table, column?)` captures starting at `first`.
fn foreign_key(caps: &Captures, first: usize) -> ForeignKey {
    ForeignKey {
        column: caps[first].to_string(),
        referenced_table: caps[first + 1].to_string(),
        referenced_column: caps
            .get(first + 2)
            .map_or("id", |m| m.as_str())
            .to_string(),
    }
}

fn collect_alter_foreign_keys(sql: &str) -> HashMap<String, Vec<ForeignKey>> {
    let mut map: HashMap<String, Vec<ForeignKey>> = HashMap::new();
    for caps in ALTER_FOREIGN_KEY.captures_iter(sql) {
        map.entry(caps[1].to_string())
            .or_default()
            .push(foreign_key(&caps, 2));
    }
    map
}

fn collect_indexes(sql: &str) -> HashMap<String, Vec<String>> {
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    for caps in CREATE_INDEX.captures_iter(sql) {
        let start = caps.get(0).map_or(0, |m| m.end());
        let Some(columns) = parenthesized(&sql[start..]) else {
            log::trace!("Ignoring unterminated index on {}", &caps[1]);
            continue;
        };
        map.entry(caps[1].to_string())
            .or_default()
            .push(columns.trim().to_string());
    }
    map
}

/// Text up to the paren closing an already opened one, never past the end
/// of the statement.
fn parenthesized(text: &str) -> Option<&str> {
    let mut depth = 1;
    let mut quoted = false;
    for (i, c) in text.char_indices() {
        match c {
            '\'' => quoted = !quoted,
            _ if quoted => {}
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[..i]);
                }
            }
            ';' => return None,
            _ => {}
        }
    }
    None
}
