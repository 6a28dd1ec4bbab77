//! Layer guard for `crud_backend`.
//!
//! The backend keeps three layers under `backend/src`: `domain`, `inbound`
//! and `outbound`. Bootstrap modules (`settings`, `startup`, `middleware`)
//! sit beside them. Every `.rs` file inside a layer directory is parsed and
//! each path it mentions is classified as either a crate module or an
//! external crate; [`Layer::rules`] decides which of those are off limits.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::{self, Visit};
use thiserror::Error;

/// Library name of the linted crate, as written in absolute paths.
const CRATE_NAME: &str = "crud_backend";

/// Top-level modules of the linted crate.
const CRATE_MODULES: &[&str] = &[
    "domain",
    "inbound",
    "outbound",
    "middleware",
    "settings",
    "startup",
];

const BOOTSTRAP: &[&str] = &["middleware", "settings", "startup"];
const WEB_CRATES: &[&str] = &["actix_web", "utoipa", "utoipa_swagger_ui"];
const DB_CRATES: &[&str] = &["diesel", "diesel_async", "diesel_migrations"];

/// A layer of the backend, named after its directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Records, ports and services.
    Domain,
    /// HTTP adapters.
    Inbound,
    /// Persistence adapters.
    Outbound,
}

/// Modules and crates a layer must not reach.
#[derive(Debug, Clone, Copy)]
pub struct Rules {
    modules: &'static [&'static [&'static str]],
    crates: &'static [&'static [&'static str]],
}

impl Rules {
    fn forbids_module(&self, name: &str) -> bool {
        self.modules.iter().any(|group| group.contains(&name))
    }

    fn forbids_crate(&self, name: &str) -> bool {
        self.crates.iter().any(|group| group.contains(&name))
    }
}

impl Layer {
    const ALL: [Self; 3] = [Self::Domain, Self::Inbound, Self::Outbound];

    /// Directory name under `backend/src`.
    pub const fn dir(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    /// Boundary rules for this layer.
    pub const fn rules(self) -> Rules {
        match self {
            Self::Domain => Rules {
                modules: &[&["inbound", "outbound"], BOOTSTRAP],
                crates: &[WEB_CRATES, DB_CRATES, &["ortho_config"]],
            },
            Self::Inbound => Rules {
                modules: &[&["outbound", "settings", "startup"]],
                crates: &[DB_CRATES],
            },
            Self::Outbound => Rules {
                modules: &[&["inbound"], BOOTSTRAP],
                crates: &[WEB_CRATES],
            },
        }
    }

    /// The layer owning `relative`, a path below `backend/src`.
    pub fn of(relative: &Path) -> Option<Self> {
        let first = relative.components().next()?.as_os_str().to_str()?;
        Self::ALL.into_iter().find(|layer| layer.dir() == first)
    }
}

/// What a path in the source refers to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Target {
    Module(String),
    Crate(String),
}

/// A boundary violation in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `backend/src`.
    pub file: PathBuf,
    /// Rule that was broken.
    pub message: String,
}

/// Failures reported by the lint.
#[derive(Debug, Error)]
pub enum LintError {
    /// The source tree could not be read.
    #[error("failed to read backend sources: {0}")]
    Io(#[from] io::Error),
    /// A file sits outside the three layers.
    #[error("{}: not inside domain, inbound or outbound", file.display())]
    UnknownLayer {
        /// Offending file.
        file: PathBuf,
    },
    /// A file is not valid Rust.
    #[error("{}: {message}", file.display())]
    Parse {
        /// Offending file.
        file: PathBuf,
        /// Parser diagnostic.
        message: String,
    },
    /// Boundary rules were broken.
    #[error("layer violations:{}", render(.0))]
    Violations(Vec<Violation>),
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| format!("\n- {}: {}", violation.file.display(), violation.message))
        .collect()
}

/// A Rust source file keyed by its path below `backend/src`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Path relative to `backend/src`.
    pub file: PathBuf,
    /// File contents.
    pub contents: String,
}

/// Lint every layer file under `backend_dir/src`.
///
/// # Errors
/// Returns [`LintError`] for unreadable or unparsable files and for any
/// boundary violation.
pub fn lint_backend(backend_dir: &Path) -> Result<(), LintError> {
    let src = backend_dir.join("src");
    let mut sources = Vec::new();
    for layer in Layer::ALL {
        read_tree(&src, &src.join(layer.dir()), &mut sources)?;
    }
    lint(&sources)
}

/// Lint in-memory sources.
///
/// # Errors
/// Returns [`LintError`] for files outside a layer, unparsable files and
/// boundary violations.
pub fn lint(sources: &[Source]) -> Result<(), LintError> {
    let mut violations = Vec::new();
    for source in sources {
        let layer = Layer::of(&source.file).ok_or_else(|| LintError::UnknownLayer {
            file: source.file.clone(),
        })?;
        let ast = syn::parse_file(&source.contents).map_err(|err| LintError::Parse {
            file: source.file.clone(),
            message: err.to_string(),
        })?;
        violations.extend(check(layer, &source.file, &ast));
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(LintError::Violations(violations))
    }
}

fn check(layer: Layer, file: &Path, ast: &syn::File) -> Vec<Violation> {
    let rules = layer.rules();
    let mut targets = Targets::default();
    targets.visit_file(ast);

    targets
        .found
        .into_iter()
        .filter_map(|target| match target {
            Target::Module(name) if rules.forbids_module(&name) => {
                Some(format!("{} must not use crate::{name}", layer.dir()))
            }
            Target::Crate(name) if rules.forbids_crate(&name) => {
                Some(format!("{} must not use crate `{name}`", layer.dir()))
            }
            _ => None,
        })
        .map(|message| Violation {
            file: file.to_path_buf(),
            message,
        })
        .collect()
}

/// Classify a path by its leading segments.
fn classify(segments: &[String]) -> Option<Target> {
    let mut rest = segments
        .iter()
        .map(String::as_str)
        .skip_while(|segment| matches!(*segment, "crate" | "self" | "super"));
    let relative = rest.clone().count() < segments.len();
    let head = rest.next()?;

    if head == CRATE_NAME {
        return rest.next().map(|module| Target::Module(module.to_owned()));
    }
    if relative || CRATE_MODULES.contains(&head) {
        return Some(Target::Module(head.to_owned()));
    }
    Some(Target::Crate(head.to_owned()))
}

/// Collects the targets of every path and `use` item in a file.
#[derive(Default)]
struct Targets {
    found: BTreeSet<Target>,
}

impl Targets {
    fn record(&mut self, segments: &[String]) {
        self.found.extend(classify(segments));
    }

    fn record_use(&mut self, tree: &syn::UseTree, prefix: &mut Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.record_use(&path.tree, prefix);
                prefix.pop();
            }
            syn::UseTree::Name(syn::UseName { ident })
            | syn::UseTree::Rename(syn::UseRename { ident, .. }) => {
                prefix.push(ident.to_string());
                self.record(prefix);
                prefix.pop();
            }
            syn::UseTree::Glob(_) => self.record(prefix),
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use(item, prefix);
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for Targets {
    fn visit_path(&mut self, path: &'ast syn::Path) {
        // Bare identifiers are locals or prelude items.
        if path.segments.len() > 1 {
            let segments: Vec<String> = path
                .segments
                .iter()
                .map(|segment| segment.ident.to_string())
                .collect();
            self.record(&segments);
        }
        visit::visit_path(self, path);
    }

    fn visit_item_use(&mut self, item: &'ast syn::ItemUse) {
        self.record_use(&item.tree, &mut Vec::new());
    }
}

/// Push every `.rs` file below `dir` onto `out`, keyed relative to `src`.
fn read_tree(src: &Path, dir: &Path, out: &mut Vec<Source>) -> Result<(), LintError> {
    if !dir.is_dir() {
        return Ok(());
    }
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in fs::read_dir(&current)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                let file = path.strip_prefix(src).unwrap_or(&path).to_path_buf();
                let contents = fs::read_to_string(&path)?;
                out.push(Source { file, contents });
            }
        }
    }
    Ok(())
}
