use crate::error::{Result, RewriteError};
use crate::types::DeclarationHandle;
use regex::{Captures, NoExpand, Regex};
use std::ops::Range;

/// Pattern-based declaration locator.
///
/// The degraded mode: regex matchers tied to the `export const Name = (...)
/// => { return (...); };` layout, kept for sources the structural locator
/// cannot parse. Same [`DeclarationHandle`] contract as the AST locator.
#[derive(Debug, Default)]
pub struct PatternLocator;

impl PatternLocator {
    pub fn new() -> Self {
        Self
    }

    /// Locate an icon declaration returning an `<svg>` element
    pub fn locate_icon(&self, content: &str, name: &str) -> Result<DeclarationHandle> {
        let pattern = format!(
            r"(?s)export\s+const\s+{}\s*=\s*\(.*?=>\s*\{{.*?return\s*\(\s*(<svg[^>]*>)(.*?)(</svg>)\s*\)\s*;?\s*\}};",
            regex::escape(name)
        );
        let re = compile(&pattern)?;
        let caps = re
            .captures(content)
            .ok_or_else(|| RewriteError::not_found(name))?;

        let open = group(&caps, 1, name)?;
        let inner = group(&caps, 2, name)?;
        let close = group(&caps, 3, name)?;
        Ok(DeclarationHandle {
            name: name.to_string(),
            tag: "svg".to_string(),
            return_span: open.start..close.end,
            inner_span: Some(inner),
        })
    }

    /// Locate a logo-type declaration, capturing its whole returned expression
    pub fn locate_logo_type(&self, content: &str, name: &str) -> Result<DeclarationHandle> {
        let pattern = format!(
            r"(?s)export\s+const\s+{}\s*=\s*\(.*?=>\s*\{{.*?return\s*\((.*?)\)\s*;\s*\}};",
            regex::escape(name)
        );
        let re = compile(&pattern)?;
        let caps = re
            .captures(content)
            .ok_or_else(|| RewriteError::not_found(name))?;

        let expr = group(&caps, 1, name)?;
        let tag = leading_tag_name(&content[expr.clone()]);
        Ok(DeclarationHandle {
            name: name.to_string(),
            tag,
            return_span: expr,
            inner_span: None,
        })
    }
}

/// Replace every occurrence of a text-node literal bounded by `>`/`<`
/// (interior whitespace tolerated), preserving the delimiters. Zero
/// occurrences is a hard [`RewriteError::LiteralNotFound`], not a silent
/// no-op. Returns the updated text and the occurrence count.
pub fn replace_text_node(
    content: &str,
    old_literal: &str,
    new_literal: &str,
) -> Result<(String, usize)> {
    let re = text_node_regex(old_literal)?;
    let count = re.find_iter(content).count();
    if count == 0 {
        return Err(RewriteError::literal_not_found(old_literal.to_string()));
    }
    let replacement = format!(">{new_literal}<");
    let updated = re.replace_all(content, NoExpand(&replacement)).into_owned();
    Ok((updated, count))
}

/// Whether a `>literal<` text node (whitespace-tolerant) is present
pub fn contains_text_node(content: &str, literal: &str) -> bool {
    text_node_regex(literal)
        .map(|re| re.is_match(content))
        .unwrap_or(false)
}

fn text_node_regex(literal: &str) -> Result<Regex> {
    compile(&format!(r">\s*{}\s*<", regex::escape(literal)))
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| RewriteError::parse(e.to_string()))
}

fn group(caps: &Captures, idx: usize, name: &str) -> Result<Range<usize>> {
    caps.get(idx)
        .map(|m| m.range())
        .ok_or_else(|| RewriteError::unexpected_shape(name, "pattern capture group missing"))
}

/// Best-effort tag name of the first element in a markup snippet
fn leading_tag_name(markup: &str) -> String {
    static TAG: once_cell::sync::Lazy<Regex> = once_cell::sync::Lazy::new(|| {
        Regex::new(r"<\s*([A-Za-z][A-Za-z0-9._-]*)").expect("valid tag pattern")
    });
    TAG.captures(markup)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
