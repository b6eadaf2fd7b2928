use std::path::PathBuf;
use thiserror::Error;

/// Result type for rewrite operations
pub type Result<T> = std::result::Result<T, RewriteError>;

/// Errors that can occur while rebranding source documents
#[derive(Error, Debug)]
pub enum RewriteError {
    /// Required input file absent at a checked path
    #[error("Required file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    /// Replacement asset lacks a parseable root-element pair
    #[error("Malformed asset: {0}")]
    MalformedAsset(String),

    /// Named declaration absent from the source document
    #[error("Declaration '{0}' not found")]
    DeclarationNotFound(String),

    /// Declaration found but its internal structure does not match
    #[error("Declaration '{declaration}' has an unexpected shape: {detail}")]
    UnexpectedShape { declaration: String, detail: String },

    /// No return expression inside the declaration body
    #[error("No return expression found in '{0}'")]
    ReturnExpressionMissing(String),

    /// Escaped markup failed post-escape verification
    #[error("Escaping failed: {0}")]
    EscapeFailure(String),

    /// Text-node replacement target absent
    #[error("Text literal {0:?} not found")]
    LiteralNotFound(String),

    /// Failed to parse the source document
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Unsupported source language
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Edit span out of bounds or overlapping another edit
    #[error("Invalid edit span: start={start}, end={end}")]
    InvalidSpan { start: usize, end: usize },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RewriteError {
    /// Create a missing-file error
    pub fn missing_file(path: impl Into<PathBuf>) -> Self {
        Self::MissingFile { path: path.into() }
    }

    /// Create a malformed-asset error
    pub fn malformed_asset(msg: impl Into<String>) -> Self {
        Self::MalformedAsset(msg.into())
    }

    /// Create a declaration-not-found error
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::DeclarationNotFound(name.into())
    }

    /// Create an unexpected-shape error
    pub fn unexpected_shape(declaration: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::UnexpectedShape {
            declaration: declaration.into(),
            detail: detail.into(),
        }
    }

    /// Create a return-expression-missing error
    pub fn return_missing(name: impl Into<String>) -> Self {
        Self::ReturnExpressionMissing(name.into())
    }

    /// Create an escape-failure error
    pub fn escape(msg: impl Into<String>) -> Self {
        Self::EscapeFailure(msg.into())
    }

    /// Create a literal-not-found error
    pub fn literal_not_found(literal: impl Into<String>) -> Self {
        Self::LiteralNotFound(literal.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create an unsupported-language error
    pub fn unsupported_language(lang: impl Into<String>) -> Self {
        Self::UnsupportedLanguage(lang.into())
    }

    /// Create an invalid-config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Errors that lenient mode downgrades to a warning + skipped step
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            Self::DeclarationNotFound(_)
                | Self::UnexpectedShape { .. }
                | Self::ReturnExpressionMissing(_)
                | Self::LiteralNotFound(_)
        )
    }

    /// Errors that mean the structural locator cannot run at all,
    /// triggering the pattern-engine fallback
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::ParseError(_) | Self::UnsupportedLanguage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skippable_classification() {
        assert!(RewriteError::not_found("Icon").is_skippable());
        assert!(RewriteError::unexpected_shape("Icon", "extra wrapping").is_skippable());
        assert!(RewriteError::literal_not_found("Powered by Acme").is_skippable());
        assert!(!RewriteError::malformed_asset("no root").is_skippable());
        assert!(!RewriteError::missing_file("/tmp/logo.svg").is_skippable());
    }

    #[test]
    fn test_parse_failure_classification() {
        assert!(RewriteError::parse("bad").is_parse_failure());
        assert!(RewriteError::unsupported_language("vue").is_parse_failure());
        assert!(!RewriteError::not_found("Icon").is_parse_failure());
    }
}
