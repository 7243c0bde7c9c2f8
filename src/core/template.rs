//! Message template analysis and rendering
//!
//! Templates carry a fixed placeholder token; the number of occurrences
//! determines how many variable columns a mapping must supply.

/// Variable placeholder token recognized in message templates.
pub const PLACEHOLDER: &str = "{#var#}";

/// Counts non-overlapping placeholder occurrences in a template.
///
/// Returns 0 for an empty template.
pub fn count_placeholders(template: &str) -> usize {
    template.matches(PLACEHOLDER).count()
}

/// Renders a template by substituting placeholders left to right with the
/// corresponding `vars` entry by position.
///
/// Placeholders beyond the end of `vars` render as the empty string; excess
/// `vars` entries are unused. Side-effect-free and deterministic.
pub fn render(template: &str, vars: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut pieces = template.split(PLACEHOLDER);

    if let Some(first) = pieces.next() {
        out.push_str(first);
    }
    for (i, piece) in pieces.enumerate() {
        if let Some(var) = vars.get(i) {
            out.push_str(var);
        }
        out.push_str(piece);
    }

    out
}
