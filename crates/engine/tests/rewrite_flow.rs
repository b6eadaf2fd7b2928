use rebrand_engine::{
    AstLocator, Language, LocatorEngine, RewriteConfig, RewriteError, Rewriter, StepOutcome,
    Strictness,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ICONS_TSX: &str = r#"import { IconProps } from "./types";

export const Icon = ({ size = 16, className }: IconProps) => {
  return (
    <svg
      width={size}
      height={size}
      className={className}
      viewBox="0 0 24 24"
      xmlns="http://www.w3.org/2000/svg"
    >
      <circle cx="12" cy="12" r="10" />
    </svg>
  );
};

export const LogoTypeIcon = ({ size = 16, className }: IconProps) => {
  return (
    <OldMark className={className} />
  );
};
"#;

const LOGO_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24">
  <path d="M4 4h16v16H4z" fill="#ffd166" />
</svg>
"##;

const FIXED_LOGO_TSX: &str = r#"import React from "react";

export default function FixedLogo() {
  return (
    <div className="fixed left-4 bottom-4">
      <p className="text-xs">
        Powered by Acme
      </p>
    </div>
  );
}
"#;

fn setup(dir: &Path) -> RewriteConfig {
    fs::write(dir.join("icons.tsx"), ICONS_TSX).unwrap();
    fs::write(dir.join("logo.svg"), LOGO_SVG).unwrap();
    fs::write(dir.join("FixedLogo.tsx"), FIXED_LOGO_TSX).unwrap();

    RewriteConfig {
        root: dir.to_path_buf(),
        icons_file: PathBuf::from("icons.tsx"),
        logo_asset: PathBuf::from("logo.svg"),
        powered_by_file: PathBuf::from("FixedLogo.tsx"),
        old_brand: "Acme".to_string(),
        new_brand: "Zenith".to_string(),
        ..Default::default()
    }
}

fn parses_cleanly(path: &Path) -> bool {
    let content = fs::read_to_string(path).unwrap();
    !AstLocator::new(Language::from_path(path))
        .unwrap()
        .has_syntax_errors(&content)
        .unwrap()
}

#[test]
fn full_rewrite_applies_all_steps() {
    let temp = TempDir::new().unwrap();
    let config = setup(temp.path());
    let report = Rewriter::new(config).unwrap().rewrite().unwrap();

    assert_eq!(report.icon.outcome, StepOutcome::Applied);
    assert_eq!(report.logo_type.outcome, StepOutcome::Applied);
    assert_eq!(report.powered_by.outcome, StepOutcome::Applied);
    assert_eq!(report.applied_count(), 3);

    let icons = fs::read_to_string(temp.path().join("icons.tsx")).unwrap();
    assert!(icons.contains(r##"<path d="M4 4h16v16H4z" fill="#ffd166" />"##));
    assert!(!icons.contains("<circle"));
    assert!(!icons.contains("OldMark"));
    assert!(icons.contains("<span"));
    assert!(icons.contains("Zenith"));
    // surrounding content outside the mutated regions is preserved
    assert!(icons.contains("import { IconProps } from \"./types\";"));
    assert!(icons.contains("viewBox=\"0 0 24 24\""));

    let fixed = fs::read_to_string(temp.path().join("FixedLogo.tsx")).unwrap();
    assert!(fixed.contains(">Powered by Zenith<"));
    assert!(!fixed.contains("Acme"));

    assert!(parses_cleanly(&temp.path().join("icons.tsx")));
    assert!(parses_cleanly(&temp.path().join("FixedLogo.tsx")));
}

#[test]
fn second_run_is_detected_and_skipped() {
    let temp = TempDir::new().unwrap();
    let config = setup(temp.path());

    let rewriter = Rewriter::new(config).unwrap();
    rewriter.rewrite().unwrap();
    let after_first = fs::read_to_string(temp.path().join("icons.tsx")).unwrap();
    let fixed_after_first = fs::read_to_string(temp.path().join("FixedLogo.tsx")).unwrap();

    let report = rewriter.rewrite().unwrap();
    assert!(report.is_noop(), "second run must detect prior application");
    assert_eq!(report.icon.outcome, StepOutcome::AlreadyApplied);
    assert_eq!(report.logo_type.outcome, StepOutcome::AlreadyApplied);
    assert_eq!(report.powered_by.outcome, StepOutcome::AlreadyApplied);

    // deterministically identical output, never further corruption
    assert_eq!(
        fs::read_to_string(temp.path().join("icons.tsx")).unwrap(),
        after_first
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("FixedLogo.tsx")).unwrap(),
        fixed_after_first
    );
}

#[test]
fn pattern_engine_produces_equivalent_result() {
    let temp = TempDir::new().unwrap();
    let mut config = setup(temp.path());
    config.engine = LocatorEngine::Pattern;

    let report = Rewriter::new(config).unwrap().rewrite().unwrap();
    assert_eq!(report.applied_count(), 3);

    let icons = fs::read_to_string(temp.path().join("icons.tsx")).unwrap();
    assert!(icons.contains(r##"<path d="M4 4h16v16H4z" fill="#ffd166" />"##));
    assert!(!icons.contains("OldMark"));
    assert!(parses_cleanly(&temp.path().join("icons.tsx")));
}

#[test]
fn missing_asset_leaves_sources_untouched() {
    let temp = TempDir::new().unwrap();
    let config = setup(temp.path());
    fs::remove_file(temp.path().join("logo.svg")).unwrap();

    let err = Rewriter::new(config).unwrap().rewrite().unwrap_err();
    assert!(matches!(err, RewriteError::MissingFile { .. }));

    assert_eq!(
        fs::read_to_string(temp.path().join("icons.tsx")).unwrap(),
        ICONS_TSX
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("FixedLogo.tsx")).unwrap(),
        FIXED_LOGO_TSX
    );
}

#[test]
fn malformed_asset_is_fatal_before_any_write() {
    let temp = TempDir::new().unwrap();
    let config = setup(temp.path());
    fs::write(temp.path().join("logo.svg"), "<svg viewBox=\"0 0 1 1\">").unwrap();

    let err = Rewriter::new(config).unwrap().rewrite().unwrap_err();
    assert!(matches!(err, RewriteError::MalformedAsset(_)));
    assert_eq!(
        fs::read_to_string(temp.path().join("icons.tsx")).unwrap(),
        ICONS_TSX
    );
}

#[test]
fn strict_mode_aborts_on_missing_declaration() {
    let temp = TempDir::new().unwrap();
    let mut config = setup(temp.path());
    config.logo_type_component = "AbsentLogoType".to_string();

    let err = Rewriter::new(config).unwrap().rewrite().unwrap_err();
    assert!(matches!(err, RewriteError::DeclarationNotFound(_)));

    // nothing was written even though the icon step had succeeded in memory
    assert_eq!(
        fs::read_to_string(temp.path().join("icons.tsx")).unwrap(),
        ICONS_TSX
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("FixedLogo.tsx")).unwrap(),
        FIXED_LOGO_TSX
    );
}

#[test]
fn lenient_mode_skips_missing_declaration_and_applies_the_rest() {
    let temp = TempDir::new().unwrap();
    let mut config = setup(temp.path());
    config.logo_type_component = "AbsentLogoType".to_string();
    config.strictness = Strictness::Lenient;

    let report = Rewriter::new(config).unwrap().rewrite().unwrap();
    assert_eq!(report.icon.outcome, StepOutcome::Applied);
    assert_eq!(report.logo_type.outcome, StepOutcome::Skipped);
    assert_eq!(report.powered_by.outcome, StepOutcome::Applied);

    let icons = fs::read_to_string(temp.path().join("icons.tsx")).unwrap();
    assert!(icons.contains(r##"<path d="M4 4h16v16H4z" fill="#ffd166" />"##));
    assert!(icons.contains("OldMark"), "skipped declaration is untouched");
    assert!(parses_cleanly(&temp.path().join("icons.tsx")));
}

#[test]
fn strict_mode_aborts_on_missing_powered_by_literal() {
    let temp = TempDir::new().unwrap();
    let mut config = setup(temp.path());
    config.old_brand = "SomethingElse".to_string();

    let err = Rewriter::new(config).unwrap().rewrite().unwrap_err();
    assert!(matches!(err, RewriteError::LiteralNotFound(_)));
    assert_eq!(
        fs::read_to_string(temp.path().join("FixedLogo.tsx")).unwrap(),
        FIXED_LOGO_TSX
    );
}

#[test]
fn lenient_mode_warns_on_missing_powered_by_literal() {
    let temp = TempDir::new().unwrap();
    let mut config = setup(temp.path());
    config.old_brand = "SomethingElse".to_string();
    config.strictness = Strictness::Lenient;

    let report = Rewriter::new(config).unwrap().rewrite().unwrap();
    assert_eq!(report.powered_by.outcome, StepOutcome::Skipped);
    assert_eq!(
        fs::read_to_string(temp.path().join("FixedLogo.tsx")).unwrap(),
        FIXED_LOGO_TSX
    );
}

#[test]
fn check_computes_outcomes_without_writing() {
    let temp = TempDir::new().unwrap();
    let config = setup(temp.path());

    let report = Rewriter::new(config).unwrap().check().unwrap();
    assert!(report.dry_run);
    assert_eq!(report.applied_count(), 3);

    assert_eq!(
        fs::read_to_string(temp.path().join("icons.tsx")).unwrap(),
        ICONS_TSX
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("FixedLogo.tsx")).unwrap(),
        FIXED_LOGO_TSX
    );
}

#[test]
fn expression_body_logo_type_is_replaced() {
    let temp = TempDir::new().unwrap();
    let mut config = setup(temp.path());
    let expression_body = ICONS_TSX.replace(
        "  return (\n    <OldMark className={className} />\n  );\n",
        "  return <OldMark className={className} />;\n",
    );
    assert!(expression_body.contains("return <OldMark"));
    fs::write(temp.path().join("icons.tsx"), &expression_body).unwrap();
    config.strictness = Strictness::Strict;

    let report = Rewriter::new(config).unwrap().rewrite().unwrap();
    assert_eq!(report.logo_type.outcome, StepOutcome::Applied);

    let icons = fs::read_to_string(temp.path().join("icons.tsx")).unwrap();
    assert!(!icons.contains("OldMark"));
    assert!(icons.contains("Zenith"));
    assert!(parses_cleanly(&temp.path().join("icons.tsx")));
}
