//! Resource resolution: map heterogeneous URI forms to local, renderable files.
//!
//! This is the seam the rendering engine calls synchronously and repeatedly
//! while laying out the document. Each submodule handles exactly one URI
//! class:
//!
//! ```text
//! uri ──▶ classify ──┬─ Data     ──▶ data_uri  (decode to temp file)
//!                    ├─ Remote   ──▶ fetch     (download to temp file, opt-in)
//!                    ├─ Absolute ──▶ use as-is
//!                    └─ Relative ──▶ path      (base dir, then cwd)
//! ```
//!
//! ## The never-fails contract
//!
//! [`ResourceResolver::resolve`] terminates in a string on every code path.
//! Internally, each step returns a tagged [`Resolution`] instead of silently
//! swallowing failures; the resolver substitutes the original URI on
//! [`Resolution::Unresolved`] and logs a `warn!`, so a broken image degrades
//! to whatever placeholder the engine draws — it never aborts the render.
//!
//! ## Temp-file lifetime
//!
//! Every materialized file is tracked as a [`tempfile::TempPath`] owned by
//! the resolver. When the resolver drops at the end of the conversion, all
//! of them are deleted — success or failure, no orphaned files in `/tmp`.

pub mod data_uri;
pub mod fetch;
pub mod path;

use crate::config::RenderConfig;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tracing::{debug, warn};

/// The four resource-reference classes, tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriClass {
    /// `data:` URI with an embedded payload.
    Data,
    /// `http://` or `https://` URL.
    Remote,
    /// Absolute filesystem path that exists.
    Absolute,
    /// Everything else — resolved against base dir / cwd.
    Relative,
}

/// Categorise a resource reference. Pure aside from one existence check;
/// never fails — anything unrecognised falls through to `Relative`.
pub fn classify(uri: &str) -> UriClass {
    if uri.starts_with("data:") {
        return UriClass::Data;
    }
    if uri.starts_with("http://") || uri.starts_with("https://") {
        return UriClass::Remote;
    }
    let p = Path::new(uri);
    if p.is_absolute() && p.exists() {
        return UriClass::Absolute;
    }
    UriClass::Relative
}

/// Outcome of resolving one resource reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A local file the engine can read.
    Resolved(PathBuf),
    /// Could not be resolved; the caller substitutes the original URI.
    Unresolved,
}

/// Resolves resource references for one conversion.
///
/// Owns the resolution policy (base directory, remote-fetch opt-in,
/// timeout, temp directory), the temp files it materializes, and counters
/// for [`crate::output::RenderStats`]. One resolver per conversion call;
/// repeated references to the same URL are *not* deduplicated — each
/// triggers its own fetch, keeping the resolver stateless across calls
/// apart from bookkeeping.
pub struct ResourceResolver {
    base_dir: PathBuf,
    allow_remote: bool,
    fetch_timeout_secs: u64,
    temp_dir: Option<PathBuf>,
    /// Materialized files; deleted when the resolver drops.
    temps: Vec<TempPath>,
    resolved: usize,
    unresolved: usize,
}

impl ResourceResolver {
    /// Build a resolver from the conversion configuration.
    ///
    /// A missing `base_dir` means "the process working directory", which
    /// makes resolution steps (b) and (c) coincide.
    pub fn new(config: &RenderConfig) -> Self {
        let base_dir = config
            .base_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            base_dir,
            allow_remote: config.allow_remote_fetch,
            fetch_timeout_secs: config.fetch_timeout_secs,
            temp_dir: config.temp_dir.clone(),
            temps: Vec::new(),
            resolved: 0,
            unresolved: 0,
        }
    }

    /// Resolve a resource reference to a string the engine can use.
    ///
    /// `rel` is the relation hint from the document (the attribute the URI
    /// appeared in, e.g. `src`); it is used for diagnostics only. Never
    /// fails: unresolvable references come back unchanged.
    pub fn resolve(&mut self, uri: &str, rel: &str) -> String {
        match self.resolve_inner(uri) {
            Resolution::Resolved(path) => {
                self.resolved += 1;
                debug!("Resolved {rel} {uri:?} → {}", path.display());
                path.to_string_lossy().into_owned()
            }
            Resolution::Unresolved => {
                self.unresolved += 1;
                warn!("Unresolved {rel} reference {uri:?}, passing through to engine");
                uri.to_string()
            }
        }
    }

    fn resolve_inner(&mut self, uri: &str) -> Resolution {
        match classify(uri) {
            UriClass::Data => self.track(data_uri::materialize(uri, self.temp_dir.as_deref())),
            UriClass::Remote => self.track(fetch::fetch(
                uri,
                self.allow_remote,
                self.fetch_timeout_secs,
                self.temp_dir.as_deref(),
            )),
            UriClass::Absolute => Resolution::Resolved(PathBuf::from(uri)),
            UriClass::Relative => path::resolve_path(uri, &self.base_dir),
        }
    }

    /// Take ownership of a materialized temp file, keeping it alive until
    /// the conversion ends.
    fn track(&mut self, temp: Option<TempPath>) -> Resolution {
        match temp {
            Some(t) => {
                let path = t.to_path_buf();
                self.temps.push(t);
                Resolution::Resolved(path)
            }
            None => Resolution::Unresolved,
        }
    }

    /// References materialized or mapped to a local file so far.
    pub fn resolved_count(&self) -> usize {
        self.resolved
    }

    /// References passed through unchanged so far.
    pub fn unresolved_count(&self) -> usize {
        self.unresolved
    }
}
