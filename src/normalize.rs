/// Canonical form of an address for duplicate detection.
///
/// Trims, lowercases, drops `.`, `,` and `#`, turns line breaks into spaces and
/// collapses whitespace runs. Returns `None` when nothing is left, so blank
/// cells never share a key.
pub fn normalize_address(value: Option<&str>) -> Option<String> {
    let lowered = value?.trim().to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | '#'))
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();

    let key = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}
