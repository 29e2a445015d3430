/// Separator used by both source tables.
pub const FIELD_SEPARATOR: char = ',';

/// Split one line into fields, honoring double-quoted sections.
///
/// Inside quotes the separator is literal content and `""` yields a single `"`.
/// The end of the line always closes the final field, so an empty line yields one
/// empty field and a line of `N` separators yields `N + 1` empty fields.
#[must_use]
pub fn split(line: &str, separator: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '"' {
            if quoted && chars.peek() == Some(&'"') {
                current.push('"');
                chars.next();
            } else {
                quoted = !quoted;
            }
        } else if ch == separator && !quoted {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }

    fields.push(current);
    fields
}
