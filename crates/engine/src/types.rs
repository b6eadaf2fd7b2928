use serde::Serialize;
use std::ops::Range;
use std::path::PathBuf;

/// Handle to a located declaration's return expression.
///
/// Spans are byte offsets into the source document the handle was produced
/// from; producing one never mutates the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationHandle {
    /// Binding name of the declaration
    pub name: String,

    /// Tag name of the returned element (best-effort in pattern mode)
    pub tag: String,

    /// Byte span of the entire returned expression
    pub return_span: Range<usize>,

    /// Byte span strictly between the opening and closing tags.
    /// `None` for self-closing elements, which have no body to splice into.
    pub inner_span: Option<Range<usize>>,
}

impl DeclarationHandle {
    /// Whether the returned element has an inner body that can be replaced
    #[must_use]
    pub const fn has_body(&self) -> bool {
        self.inner_span.is_some()
    }
}

/// What happened to a single rewrite step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// An edit was queued and applied
    Applied,
    /// The new-brand marker was already present; nothing to do
    AlreadyApplied,
    /// Step failed in lenient mode and was skipped with a warning
    Skipped,
}

impl StepOutcome {
    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::AlreadyApplied => "already applied",
            Self::Skipped => "skipped",
        }
    }
}

/// Per-step result entry in a [`RewriteReport`]
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    /// What was targeted (declaration name or text literal)
    pub target: String,

    /// What happened
    pub outcome: StepOutcome,
}

impl StepReport {
    pub fn new(target: impl Into<String>, outcome: StepOutcome) -> Self {
        Self {
            target: target.into(),
            outcome,
        }
    }
}

/// Outcome of a full rewrite run
#[derive(Debug, Clone, Serialize)]
pub struct RewriteReport {
    /// Icons source file that was (or would be) rewritten
    pub icons_file: PathBuf,

    /// Powered-by source file that was (or would be) rewritten
    pub powered_by_file: PathBuf,

    /// True when nothing was written to disk
    pub dry_run: bool,

    /// Icon declaration step
    pub icon: StepReport,

    /// Logo-type declaration step
    pub logo_type: StepReport,

    /// Powered-by text-node step
    pub powered_by: StepReport,
}

impl RewriteReport {
    /// All steps in execution order
    #[must_use]
    pub fn steps(&self) -> [&StepReport; 3] {
        [&self.icon, &self.logo_type, &self.powered_by]
    }

    /// Number of steps that queued an edit
    #[must_use]
    pub fn applied_count(&self) -> usize {
        self.steps()
            .iter()
            .filter(|s| s.outcome == StepOutcome::Applied)
            .count()
    }

    /// True when every step detected prior application
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.steps()
            .iter()
            .all(|s| s.outcome == StepOutcome::AlreadyApplied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(a: StepOutcome, b: StepOutcome, c: StepOutcome) -> RewriteReport {
        RewriteReport {
            icons_file: PathBuf::from("icons.tsx"),
            powered_by_file: PathBuf::from("FixedLogo.tsx"),
            dry_run: false,
            icon: StepReport::new("Icon", a),
            logo_type: StepReport::new("LogoTypeIcon", b),
            powered_by: StepReport::new("Powered by Acme", c),
        }
    }

    #[test]
    fn test_applied_count() {
        let r = report(
            StepOutcome::Applied,
            StepOutcome::Skipped,
            StepOutcome::Applied,
        );
        assert_eq!(r.applied_count(), 2);
        assert!(!r.is_noop());
    }

    #[test]
    fn test_noop_detection() {
        let r = report(
            StepOutcome::AlreadyApplied,
            StepOutcome::AlreadyApplied,
            StepOutcome::AlreadyApplied,
        );
        assert_eq!(r.applied_count(), 0);
        assert!(r.is_noop());
    }

    #[test]
    fn test_handle_has_body() {
        let with_body = DeclarationHandle {
            name: "Icon".to_string(),
            tag: "svg".to_string(),
            return_span: 0..10,
            inner_span: Some(4..6),
        };
        let self_closing = DeclarationHandle {
            name: "LogoTypeIcon".to_string(),
            tag: "OldMark".to_string(),
            return_span: 0..10,
            inner_span: None,
        };
        assert!(with_body.has_body());
        assert!(!self_closing.has_body());
    }
}
