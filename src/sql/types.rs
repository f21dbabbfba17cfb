//! SQL type normalization.

use regex::Regex;
use std::sync::LazyLock;

/// Marker appended to array types; [`display_type`] turns it back into `[]`.
pub const ARRAY_SUFFIX: &str = "_ARRAY";

static PARAMS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\([^)]*\)?").unwrap());
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalize a raw column type as written in a migration.
///
/// Parameters are dropped (`VARCHAR(255)` -> `VARCHAR`), a few verbose
/// spellings are shortened and arrays get the [`ARRAY_SUFFIX`] marker.
pub fn normalize_type(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    let stripped = PARAMS.replace_all(&upper, "");
    let mut base = SPACES.replace_all(stripped.trim(), " ").into_owned();

    let mut is_array = false;
    while let Some(inner) = base.strip_suffix("[]") {
        base = inner.trim_end().to_string();
        is_array = true;
    }

    let mut typ = match base.as_str() {
        "CHARACTER VARYING" => "VARCHAR".to_string(),
        "TIMESTAMP WITH TIME ZONE" => "TIMESTAMPTZ".to_string(),
        "TIMESTAMP WITHOUT TIME ZONE" => "TIMESTAMP".to_string(),
        _ => base,
    };

    if is_array {
        typ.push_str(ARRAY_SUFFIX);
    }
    typ
}

/// Render a normalized type for humans (`TEXT_ARRAY` -> `TEXT[]`).
pub fn display_type(typ: &str) -> String {
    match typ.strip_suffix(ARRAY_SUFFIX) {
        Some(inner) => format!("{}[]", inner),
        None => typ.to_string(),
    }
}
