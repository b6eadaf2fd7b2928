use crate::error::{Result, RewriteError};

/// Neutralize characters meaningful to the target document's literal-text
/// syntax before splicing markup into it: backtick template delimiters and
/// `${` interpolation starts. Quote delimiters are inert in element-children
/// position and pass through untouched, so attribute values survive intact.
///
/// The single canonical routine; [`unescape_markup`] is its exact inverse.
/// The escaped output is verified before being returned.
pub fn escape_markup(input: &str) -> Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push_str("\\${");
            }
            _ => out.push(c),
        }
    }

    if !verify_escaped(&out) {
        return Err(RewriteError::escape(
            "escaped markup still contains active delimiters",
        ));
    }
    Ok(out)
}

/// Inverse of [`escape_markup`]: a backslash followed by a backtick or a
/// dollar sign collapses to the bare character; any other backslash is
/// literal text and kept.
pub fn unescape_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('`') => {
                chars.next();
                out.push('`');
            }
            // "\${" unescapes to "${"; the brace follows on its own
            Some('$') => {
                chars.next();
                out.push('$');
            }
            _ => out.push('\\'),
        }
    }
    out
}

/// Check that no active delimiter survives in escaped text. Scans pairing
/// each backslash with the character it escapes, the same walk
/// [`unescape_markup`] performs.
fn verify_escaped(input: &str) -> bool {
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if matches!(chars.peek(), Some('`' | '$')) => {
                chars.next();
            }
            '`' => return false,
            '$' if chars.peek() == Some(&'{') => return false,
            _ => {}
        }
    }
    true
}
