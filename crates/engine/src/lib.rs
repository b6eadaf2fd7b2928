//! # Rebrand Engine
//!
//! Structural find-and-replace for rebranding a web frontend checkout:
//! swap a logo asset into an icon component, replace a logo-type component
//! with brand text, and update a powered-by text node.
//!
//! ## Philosophy
//!
//! One configurable rewriter instead of accumulated ad hoc scripts:
//! - Locate declarations structurally (tree-sitter), not by brittle regexes
//!   tied to parameter shapes and spacing; the historical patterns survive
//!   only as an explicit degraded mode.
//! - Verify post-conditions instead of hoping the pattern matched: escaped
//!   markup is re-checked, mutated documents are re-parsed before writing.
//! - Fail whole: a document is persisted with all of its edits or not at all.
//!
//! A run is a one-shot, single-threaded process over a fixed set of files.
//! Concurrent invocations against the same files are not guarded against;
//! that is a known limitation, not a supported mode.
//!
//! ## Architecture
//!
//! ```text
//! RewriteConfig (root + paths + brands + policy)
//!     │
//!     ├──> Existence checks (all inputs, before any mutation)
//!     │
//!     ├──> Asset extraction (<svg> inner markup) ──> canonical escaping
//!     │
//!     ├──> Declaration locating
//!     │    ├─> AstLocator (tree-sitter, default)
//!     │    └─> PatternLocator (regex lineage, degraded fallback)
//!     │
//!     └──> SourceDocument editing
//!          ├─> queued byte-range edits, applied in one pass
//!          ├─> re-parse validation (post-condition)
//!          └─> single write-back per document
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use rebrand_engine::{RewriteConfig, Rewriter};
//!
//! let config = RewriteConfig {
//!     old_brand: "Acme".to_string(),
//!     new_brand: "Zenith".to_string(),
//!     ..Default::default()
//! };
//!
//! let rewriter = Rewriter::new(config)?;
//! let report = rewriter.rewrite()?;
//! for step in report.steps() {
//!     println!("{}: {}", step.target, step.outcome.as_str());
//! }
//! # Ok::<(), rebrand_engine::RewriteError>(())
//! ```

mod asset;
mod config;
mod document;
mod error;
mod escape;
mod language;
mod locator;
mod pattern;
mod rewriter;
mod types;

pub use asset::extract_inner_markup;
pub use config::{LocatorEngine, RewriteConfig, Strictness};
pub use document::SourceDocument;
pub use error::{Result, RewriteError};
pub use escape::{escape_markup, unescape_markup};
pub use language::Language;
pub use locator::AstLocator;
pub use pattern::{contains_text_node, replace_text_node, PatternLocator};
pub use rewriter::Rewriter;
pub use types::{DeclarationHandle, RewriteReport, StepOutcome, StepReport};
