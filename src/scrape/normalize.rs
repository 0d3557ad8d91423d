/// Canonicalize free text for comparison: lowercase, drop ordinary,
/// non-breaking, and narrow no-break spaces, trim the rest. Rendered
/// cards mix U+00A0 and U+202F (common before AM/PM) with plain spaces,
/// so comparisons must ignore all three. Never used for display.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{202f}'))
        .collect::<String>()
        .trim()
        .to_string()
}
