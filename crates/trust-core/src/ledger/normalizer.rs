/// Normalize an exported event-type cell into a canonical tag: strip
/// BOM/zero-width characters, collapse whitespace runs into underscores,
/// lowercase.
pub(crate) fn normalize_tag(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_ascii_lowercase()
}

#[cfg(test)]
pub(crate) fn normalize_for_tests(value: &str) -> String {
    normalize_tag(value)
}
