use crate::error::{Result, RewriteError};
use std::path::Path;

/// Source language of a document being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    TypeScriptReact,
    TypeScript,
    JavaScript,
    Unknown,
}

impl Language {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "tsx" => Language::TypeScriptReact,
            "ts" | "mts" | "cts" => Language::TypeScript,
            "js" | "jsx" | "mjs" | "cjs" => Language::JavaScript,
            _ => Language::Unknown,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Unknown)
    }

    /// Get language name as string
    pub fn as_str(self) -> &'static str {
        match self {
            Language::TypeScriptReact => "tsx",
            Language::TypeScript => "typescript",
            Language::JavaScript => "javascript",
            Language::Unknown => "unknown",
        }
    }

    /// Check if this language is supported for AST parsing
    pub fn supports_ast(self) -> bool {
        !matches!(self, Language::Unknown)
    }

    /// Get Tree-sitter language instance.
    ///
    /// TSX needs its own grammar: JSX constructs do not parse under the
    /// plain TypeScript grammar.
    pub fn tree_sitter_language(self) -> Result<tree_sitter::Language> {
        match self {
            Language::TypeScriptReact => Ok(tree_sitter_typescript::LANGUAGE_TSX.into()),
            Language::TypeScript => Ok(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
            Language::JavaScript => Ok(tree_sitter_javascript::LANGUAGE.into()),
            Language::Unknown => Err(RewriteError::unsupported_language(self.as_str())),
        }
    }
}
