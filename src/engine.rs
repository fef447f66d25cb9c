//! The HTML-to-PDF engine seam.
//!
//! Laying out HTML into paginated PDF is a commodity problem; this crate
//! specifies only the boundary and delegates the work. [`RenderEngine`] is
//! the contract: take a complete UTF-8 HTML document, consult the resource
//! callback for every reference, write PDF bytes to the sink, and report an
//! internal error count (zero means success).
//!
//! [`CommandEngine`] is the production implementation. It shells out to an
//! external HTML-to-PDF command (`weasyprint` by default, overridable via
//! `MD2PDF_ENGINE_BIN` or [`CommandEngine::with_command`]). A subprocess
//! cannot call back into our resolver mid-layout, so the engine applies the
//! callback up front: every `src` attribute in the document is rewritten to
//! its resolved location before the command runs. Materialized
//! temp files stay alive for the whole conversion (the resolver owns them),
//! so the subprocess always finds them on disk.

use crate::error::EngineError;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::io::Write;
use std::process::Command;
use tracing::{debug, info, warn};

/// Environment variable naming the external HTML-to-PDF command.
pub const ENGINE_BIN_VAR: &str = "MD2PDF_ENGINE_BIN";

/// Default external renderer command.
pub const DEFAULT_ENGINE_BIN: &str = "weasyprint";

/// Resource lookup hook: `(uri, relation_hint) -> resolved location`.
///
/// Must never fail; an unresolvable reference comes back unchanged.
pub type ResolveFn<'a> = dyn FnMut(&str, &str) -> String + 'a;

/// An HTML-to-PDF rendering engine.
///
/// # Contract
/// * `html` is a complete UTF-8 document (not a fragment).
/// * Every resource reference encountered is passed through `resolver`;
///   the returned string is used in its place.
/// * On completion, PDF bytes have been written to `sink` and the returned
///   count is the number of internal rendering errors — zero for success.
/// * `Err(EngineError)` means the engine could not run to completion at all.
pub trait RenderEngine {
    fn render(
        &self,
        html: &str,
        sink: &mut dyn Write,
        resolver: &mut ResolveFn<'_>,
    ) -> Result<u32, EngineError>;
}

/// `src="…"` attributes, single- or double-quoted.
///
/// Only `src` is rewritten: those are the references the engine must
/// dereference to bytes during layout. Anchor `href`s are hyperlinks, not
/// embedded resources — routing them through the resolver would download
/// every link target when remote fetching is enabled.
static RE_RESOURCE_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\b(src)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap());

/// Rewrite every embedded resource reference in `html` through the resolver.
pub fn rewrite_resources(html: &str, resolver: &mut ResolveFn<'_>) -> String {
    RE_RESOURCE_ATTR
        .replace_all(html, |caps: &Captures<'_>| {
            let attr = &caps[1];
            let uri = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            let resolved = resolver(uri, attr);
            format!("{attr}=\"{resolved}\"")
        })
        .into_owned()
}

/// Shells out to an external HTML-to-PDF command.
///
/// The command is invoked as `<bin> <input.html> <output.pdf>`, the calling
/// convention shared by weasyprint, wkhtmltopdf and prince. Input is
/// written as UTF-8 (all three default to UTF-8 for file input declared
/// via `<meta charset>`); stderr is captured and logged.
pub struct CommandEngine {
    command: String,
}

impl CommandEngine {
    /// Engine using `MD2PDF_ENGINE_BIN` if set, else `weasyprint`.
    pub fn from_env() -> Self {
        let command = std::env::var(ENGINE_BIN_VAR)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ENGINE_BIN.to_string());
        Self { command }
    }

    /// Engine using an explicit command.
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl RenderEngine for CommandEngine {
    fn render(
        &self,
        html: &str,
        sink: &mut dyn Write,
        resolver: &mut ResolveFn<'_>,
    ) -> Result<u32, EngineError> {
        let rewritten = rewrite_resources(html, resolver);

        let html_file = tempfile::Builder::new()
            .prefix("md2pdf-doc-")
            .suffix(".html")
            .tempfile()?;
        std::fs::write(html_file.path(), rewritten.as_bytes())?;

        let pdf_file = tempfile::Builder::new()
            .prefix("md2pdf-out-")
            .suffix(".pdf")
            .tempfile()?;

        info!("Invoking renderer: {} {}", self.command, html_file.path().display());
        let output = Command::new(&self.command)
            .arg(html_file.path())
            .arg(pdf_file.path())
            .output()
            .map_err(|e| EngineError::Spawn {
                command: self.command.clone(),
                source: e,
            })?;

        if !output.stderr.is_empty() {
            debug!(
                "Renderer stderr: {}",
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
        }

        match output.status.code() {
            Some(0) => {
                let pdf = std::fs::read(pdf_file.path())?;
                sink.write_all(&pdf)?;
                Ok(0)
            }
            Some(code) => {
                warn!("Renderer '{}' exited with status {code}", self.command);
                // The command failed as a unit; surface it as one internal
                // error so the orchestrator maps it to RenderFailed.
                Ok(1)
            }
            None => Err(EngineError::Terminated {
                command: self.command.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_double_quoted_src() {
        let html = r#"<img src="a.png"/> <img src="b.png"/>"#;
        let mut calls = Vec::new();
        let out = rewrite_resources(html, &mut |uri, rel| {
            calls.push((uri.to_string(), rel.to_string()));
            format!("/resolved/{uri}")
        });
        assert_eq!(out, r#"<img src="/resolved/a.png"/> <img src="/resolved/b.png"/>"#);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], ("a.png".into(), "src".into()));
    }

    #[test]
    fn rewrites_single_quoted_src() {
        let html = "<img src='docs/x.png'>";
        let out = rewrite_resources(html, &mut |uri, _| format!("R:{uri}"));
        assert_eq!(out, r#"<img src="R:docs/x.png">"#);
    }

    #[test]
    fn hyperlinks_left_alone() {
        let html = r#"<a href="https://example.com/page">link</a>"#;
        let out = rewrite_resources(html, &mut |_, _| panic!("href must not be resolved"));
        assert_eq!(out, html);
    }

    #[test]
    fn passthrough_resolver_keeps_document_unchanged_modulo_quotes() {
        let html = r#"<img src="same.png"/>"#;
        let out = rewrite_resources(html, &mut |uri, _| uri.to_string());
        assert_eq!(out, html);
    }

    #[test]
    fn attributes_without_src_untouched() {
        let html = r#"<div class="src-like">src = nothing</div>"#;
        let out = rewrite_resources(html, &mut |_, _| panic!("must not be called"));
        assert_eq!(out, html);
    }

    #[test]
    fn spawn_failure_on_missing_binary() {
        let engine = CommandEngine::with_command("md2pdf-definitely-not-installed");
        let mut sink = Vec::new();
        let err = engine
            .render("<html></html>", &mut sink, &mut |u, _| u.to_string())
            .unwrap_err();
        assert!(matches!(err, EngineError::Spawn { .. }));
    }

    #[test]
    fn failing_command_reports_error_count() {
        // `false` exits 1 without reading its arguments.
        let engine = CommandEngine::with_command("false");
        let mut sink = Vec::new();
        let errors = engine
            .render("<html></html>", &mut sink, &mut |u, _| u.to_string())
            .expect("command ran to completion");
        assert_eq!(errors, 1);
        assert!(sink.is_empty());
    }
}
