use crate::error::{Result, RewriteError};

const ROOT_TAG: &[u8] = b"svg";

/// Extract the markup strictly between the root `<svg ...>` open tag and its
/// matching closing tag, trimmed of surrounding whitespace.
///
/// The scan is depth-aware so nested `<svg>` elements inside the asset do not
/// truncate the result. Fails rather than returning partial or empty content:
/// a self-closing or unclosed root is a [`RewriteError::MalformedAsset`].
pub fn extract_inner_markup(asset: &str) -> Result<String> {
    let bytes = asset.as_bytes();

    let open_start = find_open_tag(bytes, 0)
        .ok_or_else(|| RewriteError::malformed_asset("no <svg> root element"))?;
    let (open_end, self_closing) = find_tag_end(bytes, open_start)
        .ok_or_else(|| RewriteError::malformed_asset("unterminated root element tag"))?;
    if self_closing {
        return Err(RewriteError::malformed_asset(
            "self-closing root element has no inner content",
        ));
    }

    let content_start = open_end + 1;
    let mut depth = 1usize;
    let mut i = content_start;
    while i < bytes.len() {
        if is_close_tag_at(bytes, i) {
            depth -= 1;
            if depth == 0 {
                return Ok(asset[content_start..i].trim().to_string());
            }
            let (end, _) = find_tag_end(bytes, i)
                .ok_or_else(|| RewriteError::malformed_asset("unterminated closing tag"))?;
            i = end + 1;
        } else if is_open_tag_at(bytes, i) {
            let (end, nested_self_closing) = find_tag_end(bytes, i)
                .ok_or_else(|| RewriteError::malformed_asset("unterminated nested tag"))?;
            if !nested_self_closing {
                depth += 1;
            }
            i = end + 1;
        } else {
            i += 1;
        }
    }

    Err(RewriteError::malformed_asset(
        "no matching closing tag for root element",
    ))
}

fn find_open_tag(bytes: &[u8], from: usize) -> Option<usize> {
    (from..bytes.len()).find(|&i| is_open_tag_at(bytes, i))
}

fn is_open_tag_at(bytes: &[u8], i: usize) -> bool {
    bytes[i..].starts_with(b"<")
        && bytes[i + 1..].starts_with(ROOT_TAG)
        && is_tag_boundary(bytes.get(i + 1 + ROOT_TAG.len()))
}

fn is_close_tag_at(bytes: &[u8], i: usize) -> bool {
    bytes[i..].starts_with(b"</")
        && bytes[i + 2..].starts_with(ROOT_TAG)
        && is_tag_boundary(bytes.get(i + 2 + ROOT_TAG.len()))
}

fn is_tag_boundary(byte: Option<&u8>) -> bool {
    matches!(byte, Some(b' ' | b'\t' | b'\r' | b'\n' | b'>' | b'/'))
}

/// Find the `>` that terminates the tag starting at `from`, skipping over
/// quoted attribute values. Returns its index and whether the tag is
/// self-closing.
fn find_tag_end(bytes: &[u8], from: usize) -> Option<(usize, bool)> {
    let mut quote: Option<u8> = None;
    let mut prev_meaningful = 0u8;
    for (offset, &byte) in bytes[from..].iter().enumerate() {
        match quote {
            Some(q) => {
                if byte == q {
                    quote = None;
                }
            }
            None => match byte {
                b'"' | b'\'' => quote = Some(byte),
                b'>' => return Some((from + offset, prev_meaningful == b'/')),
                b' ' | b'\t' | b'\r' | b'\n' => {}
                _ => prev_meaningful = byte,
            },
        }
    }
    None
}
