use crate::asset::extract_inner_markup;
use crate::config::{LocatorEngine, RewriteConfig, Strictness};
use crate::document::SourceDocument;
use crate::error::{Result, RewriteError};
use crate::escape::escape_markup;
use crate::language::Language;
use crate::locator::AstLocator;
use crate::pattern::{contains_text_node, replace_text_node, PatternLocator};
use crate::types::{DeclarationHandle, RewriteReport, StepOutcome, StepReport};
use std::path::{Path, PathBuf};

/// Main rewriter interface.
///
/// Orchestrates a full rebranding run: up-front existence checks, asset
/// extraction, declaration replacement in the icons document, text-node
/// replacement in the powered-by document. Each document is either persisted
/// with all of its edits applied and re-validated, or left untouched.
pub struct Rewriter {
    config: RewriteConfig,
}

impl Rewriter {
    /// Create a rewriter from a validated configuration
    pub fn new(config: RewriteConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RewriteConfig {
        &self.config
    }

    /// Run the full rewrite and persist the mutated documents
    pub fn rewrite(&self) -> Result<RewriteReport> {
        self.run(false)
    }

    /// Dry-run: compute every step and validate results, write nothing
    pub fn check(&self) -> Result<RewriteReport> {
        self.run(true)
    }

    fn run(&self, dry_run: bool) -> Result<RewriteReport> {
        let icons_path = self.config.icons_path();
        let asset_path = self.config.asset_path();
        let powered_by_path = self.config.powered_by_path();

        // existence is a precondition, checked before any mutation begins
        for path in [&icons_path, &asset_path, &powered_by_path] {
            if !path.exists() {
                return Err(RewriteError::missing_file(absolute(path)));
            }
        }
        log::info!(
            "rebranding {:?} -> {:?} under {}",
            self.config.old_brand,
            self.config.new_brand,
            self.config.root.display()
        );

        let asset_text = std::fs::read_to_string(&asset_path)?;
        let inner_markup = extract_inner_markup(&asset_text)?;
        let escaped_markup = escape_markup(&inner_markup)?;
        log::debug!("extracted {} bytes of asset markup", inner_markup.len());

        let mut icons_doc = SourceDocument::read(&icons_path)?;
        let icons_language = Language::from_path(&icons_path);
        let had_errors = self.syntax_errors_in(&icons_doc);

        let icon = self.step(
            &self.config.icon_component,
            self.plan_icon(&mut icons_doc, icons_language, &escaped_markup),
        )?;
        let logo_type = self.step(
            &self.config.logo_type_component,
            self.plan_logo_type(&mut icons_doc, icons_language),
        )?;

        if icons_doc.has_edits() {
            icons_doc.apply_edits()?;
            self.verify_document(&icons_doc, had_errors)?;
            if !dry_run {
                icons_doc.save()?;
                log::info!("updated {}", icons_doc.path().display());
            }
        }

        let mut powered_by_doc = SourceDocument::read(&powered_by_path)?;
        let powered_by_had_errors = self.syntax_errors_in(&powered_by_doc);
        let powered_by = self.step(
            &self.config.powered_by_old(),
            self.plan_powered_by(&mut powered_by_doc),
        )?;

        if powered_by == StepOutcome::Applied {
            self.verify_document(&powered_by_doc, powered_by_had_errors)?;
            if !dry_run {
                powered_by_doc.save()?;
                log::info!("updated {}", powered_by_doc.path().display());
            }
        }

        Ok(RewriteReport {
            icons_file: icons_path,
            powered_by_file: powered_by_path,
            dry_run,
            icon: StepReport::new(&self.config.icon_component, icon),
            logo_type: StepReport::new(&self.config.logo_type_component, logo_type),
            powered_by: StepReport::new(self.config.powered_by_old(), powered_by),
        })
    }

    /// Replace the inner body of the icon element with the escaped asset
    /// markup. The enclosing tag pair is left untouched.
    fn plan_icon(
        &self,
        doc: &mut SourceDocument,
        language: Language,
        escaped_markup: &str,
    ) -> Result<StepOutcome> {
        let name = &self.config.icon_component;
        let handle = self.locate_icon(doc.content(), language, name)?;
        let inner_span = handle.inner_span.clone().ok_or_else(|| {
            RewriteError::unexpected_shape(
                name,
                format!("<{}/> is self-closing, no body to replace", handle.tag),
            )
        })?;

        let current = doc.content()[inner_span.clone()].trim().to_string();
        if current == escaped_markup.trim() {
            return Ok(StepOutcome::AlreadyApplied);
        }

        doc.queue_edit(inner_span, format!("\n        {escaped_markup}\n      "));
        Ok(StepOutcome::Applied)
    }

    /// Replace the entire returned expression of the logo-type declaration
    /// with a brand-text span. Wholesale replacement: the new content is a
    /// different element type than the original.
    fn plan_logo_type(&self, doc: &mut SourceDocument, language: Language) -> Result<StepOutcome> {
        let name = &self.config.logo_type_component;
        let handle = self.locate_logo_type(doc.content(), language, name)?;

        let current = &doc.content()[handle.return_span.clone()];
        if contains_text_node(current, &self.config.new_brand) {
            return Ok(StepOutcome::AlreadyApplied);
        }

        doc.queue_edit(
            handle.return_span.clone(),
            logo_type_markup(&self.config.new_brand),
        );
        Ok(StepOutcome::Applied)
    }

    /// Replace every `>Powered by <old><` text node with the new brand
    fn plan_powered_by(&self, doc: &mut SourceDocument) -> Result<StepOutcome> {
        let new_text = self.config.powered_by_new();
        if contains_text_node(doc.content(), &new_text) {
            return Ok(StepOutcome::AlreadyApplied);
        }

        let old_text = self.config.powered_by_old();
        let (updated, count) = replace_text_node(doc.content(), &old_text, &new_text)?;
        log::debug!(
            "replaced {count} occurrence(s) of {:?} in {}",
            old_text,
            doc.path().display()
        );
        doc.replace_content(updated);
        Ok(StepOutcome::Applied)
    }

    fn locate_icon(
        &self,
        content: &str,
        language: Language,
        name: &str,
    ) -> Result<DeclarationHandle> {
        if self.config.engine == LocatorEngine::Ast {
            match ast_locate(content, language, name) {
                Err(err) if err.is_parse_failure() => {
                    log::warn!(
                        "structural locator unavailable for '{name}' ({err}); falling back to pattern matching"
                    );
                }
                other => return other,
            }
        }
        PatternLocator::new().locate_icon(content, name)
    }

    fn locate_logo_type(
        &self,
        content: &str,
        language: Language,
        name: &str,
    ) -> Result<DeclarationHandle> {
        if self.config.engine == LocatorEngine::Ast {
            match ast_locate(content, language, name) {
                Err(err) if err.is_parse_failure() => {
                    log::warn!(
                        "structural locator unavailable for '{name}' ({err}); falling back to pattern matching"
                    );
                }
                other => return other,
            }
        }
        PatternLocator::new().locate_logo_type(content, name)
    }

    /// Apply the strictness policy to a planned step
    fn step(&self, target: &str, planned: Result<StepOutcome>) -> Result<StepOutcome> {
        match planned {
            Ok(outcome) => {
                log::info!("{target}: {}", outcome.as_str());
                Ok(outcome)
            }
            Err(err)
                if self.config.strictness == Strictness::Lenient && err.is_skippable() =>
            {
                if matches!(err, RewriteError::LiteralNotFound(_)) {
                    log::warn!("{target}: {err}; the value might already be changed, skipping");
                } else {
                    log::warn!("{target}: {err}; skipping");
                }
                Ok(StepOutcome::Skipped)
            }
            Err(err) => Err(err),
        }
    }

    /// Post-condition: the mutated document must still parse. A document
    /// that already carried syntax errors before editing (pattern-engine
    /// territory) only gets a warning, since a clean parse was never true.
    fn verify_document(&self, doc: &SourceDocument, had_errors_before: bool) -> Result<()> {
        let language = Language::from_path(doc.path());
        if !language.supports_ast() {
            log::debug!(
                "skipping structural validation for {} (unknown language)",
                doc.path().display()
            );
            return Ok(());
        }
        let has_errors = AstLocator::new(language)?.has_syntax_errors(doc.content())?;
        if has_errors && !had_errors_before {
            return Err(RewriteError::parse(format!(
                "substitution corrupted {}; refusing to write",
                doc.path().display()
            )));
        }
        if has_errors {
            log::warn!(
                "{} still contains pre-existing syntax errors",
                doc.path().display()
            );
        }
        Ok(())
    }

    fn syntax_errors_in(&self, doc: &SourceDocument) -> bool {
        let language = Language::from_path(doc.path());
        if !language.supports_ast() {
            return false;
        }
        AstLocator::new(language)
            .and_then(|mut locator| locator.has_syntax_errors(doc.content()))
            .unwrap_or(false)
    }
}

fn ast_locate(content: &str, language: Language, name: &str) -> Result<DeclarationHandle> {
    AstLocator::new(language).and_then(|mut locator| locator.locate(content, name))
}

/// The replacement logo-type expression: a span sized off the `size` prop,
/// carrying the new brand text.
fn logo_type_markup(new_brand: &str) -> String {
    format!(
        "<span\n      style={{{{ fontSize: size ? `${{size / 5}}px` : \"1rem\", fontWeight: \"bold\" }}}}\n      className={{className}}\n    >\n      {new_brand}\n    </span>"
    )
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
