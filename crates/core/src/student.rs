//! Student search helpers.
//!
//! Student lists are searched by a case-insensitive substring of the name or
//! the matrícula.

/// Normalise a free-text search term; blank input means "no filter".
pub fn normalize_search(term: Option<&str>) -> Option<String> {
    term.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Escape `%`, `_` and `\` so a search term matches literally inside `ILIKE`.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Build an `ILIKE` pattern that matches `term` anywhere in a column.
pub fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}
