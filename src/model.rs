//! In-memory schema model built from migration text.

use std::collections::{HashMap, HashSet};

/// Module tag for tables that no catalog entry claims.
pub const OTHER_MODULE: &str = "Other";

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    /// Declaration order.
    pub columns: Vec<Column>,
    /// Inline and `ALTER TABLE` declarations; duplicates are kept.
    pub foreign_keys: Vec<ForeignKey>,
    /// Raw column-list text of each `CREATE INDEX ... ON <table> (...)`.
    pub indexes: Vec<String>,
    pub module: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    /// Normalized type, see [`crate::sql::normalize_type`].
    pub sql_type: String,
    /// Cleared only by a literal `NOT NULL`, never by `PRIMARY KEY`.
    pub nullable: bool,
    pub primary_key: bool,
    pub unique: bool,
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
}

impl Column {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            nullable: true,
            primary_key: false,
            unique: false,
            default: None,
        }
    }
}

impl Table {
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            foreign_keys: Vec::new(),
            indexes: Vec::new(),
            module: module.into(),
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Relationship notation, inferred at render time from naming conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// `||--o{`
    OneToMany,
    /// `||--o|`
    OneToZeroOrOne,
}

impl Cardinality {
    pub fn notation(self) -> &'static str {
        match self {
            Cardinality::OneToMany => "||--o{",
            Cardinality::OneToZeroOrOne => "||--o|",
        }
    }

    /// Guess the cardinality of `fk`, declared on `table`.
    ///
    /// Join-style tables (`*_members`, `*_items`, `*_assignments`) are
    /// one-to-many. Otherwise an `*_id` column that is not a parent pointer
    /// is drawn as optional one-to-one. This is a display aid and may
    /// misclassify relationships.
    pub fn infer(table: &str, fk: &ForeignKey) -> Self {
        const MANY_SUFFIXES: [&str; 3] = ["_members", "_items", "_assignments"];

        if MANY_SUFFIXES.iter().any(|s| table.contains(s)) {
            Cardinality::OneToMany
        } else if fk.column.ends_with("_id") && !fk.column.contains("parent") {
            Cardinality::OneToZeroOrOne
        } else {
            Cardinality::OneToMany
        }
    }
}

/// Tables keyed by name, iterated in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    tables: Vec<Table>,
    index: HashMap<String, usize>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `table`, replacing any earlier table of the same name.
    ///
    /// The replacement keeps the slot of the first definition. Columns of
    /// the two definitions are not merged.
    pub fn insert(&mut self, table: Table) -> Option<Table> {
        match self.index.get(&table.name) {
            Some(&i) => Some(std::mem::replace(&mut self.tables[i], table)),
            None => {
                self.index.insert(table.name.clone(), self.tables.len());
                self.tables.push(table);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.index.get(name).map(|&i| &self.tables[i])
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Tables tagged with `module`, in schema order.
    pub fn tables_in<'a>(&'a self, module: &'a str) -> impl Iterator<Item = &'a Table> + 'a {
        self.tables.iter().filter(move |t| t.module == module)
    }

    pub fn stats(&self) -> SchemaStats {
        let modules: HashSet<&str> = self.tables.iter().map(|t| t.module.as_str()).collect();
        SchemaStats {
            tables: self.tables.len(),
            relationships: self.tables.iter().map(|t| t.foreign_keys.len()).sum(),
            columns: self.tables.iter().map(|t| t.columns.len()).sum(),
            modules: modules.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchemaStats {
    pub tables: usize,
    /// Every foreign key counts, duplicates included.
    pub relationships: usize,
    pub columns: usize,
    /// Distinct module tags present in the schema.
    pub modules: usize,
}
