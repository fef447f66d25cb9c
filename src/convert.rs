//! Conversion orchestration: Markdown in, PDF out.
//!
//! The orchestrator ties the pipeline together — transform the Markdown,
//! wrap it in the document shell, hand it to the engine with a fresh
//! [`ResourceResolver`] as the lookup hook — and converts every failure
//! into a [`Md2PdfError`]. Nothing panics out of here: a nonzero engine
//! error count and an engine exception both surface as `Err`, and the
//! resolver's temp files are deleted when the call returns either way.

use crate::assemble;
use crate::config::RenderConfig;
use crate::engine::RenderEngine;
use crate::error::Md2PdfError;
use crate::output::{RenderOutput, RenderStats};
use crate::resolve::ResourceResolver;
use crate::transform;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Convert Markdown text to a PDF in memory.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `markdown` — Markdown source text
/// * `config` — Render configuration (title, base dir, fetch policy)
/// * `engine` — The HTML-to-PDF engine to delegate layout to
///
/// # Errors
/// Returns `Err(Md2PdfError)` when the engine reports a nonzero internal
/// error count or fails to run. Resource-resolution failures are never
/// errors — they degrade to the original URI and show up in
/// `stats.unresolved_resources`.
pub fn convert(
    markdown: &str,
    config: &RenderConfig,
    engine: &dyn RenderEngine,
) -> Result<RenderOutput, Md2PdfError> {
    let total_start = Instant::now();
    info!("Starting conversion ({} bytes of Markdown)", markdown.len());

    // ── Step 1: Markdown → HTML fragment ─────────────────────────────────
    let fragment = transform::markdown_to_html(markdown);

    // ── Step 2: Wrap in the styled document shell ────────────────────────
    let html = assemble::wrap_document(&fragment, config.title.as_deref());
    debug!("Assembled document: {} bytes of HTML", html.len());

    // ── Step 3: Render, resolving resources on demand ────────────────────
    let mut resolver = ResourceResolver::new(config);
    let mut pdf: Vec<u8> = Vec::new();

    let render_start = Instant::now();
    let errors = {
        let mut hook = |uri: &str, rel: &str| resolver.resolve(uri, rel);
        engine.render(&html, &mut pdf, &mut hook)?
    };
    let render_duration_ms = render_start.elapsed().as_millis() as u64;

    if errors > 0 {
        return Err(Md2PdfError::RenderFailed { errors });
    }

    let stats = RenderStats {
        html_bytes: html.len(),
        pdf_bytes: pdf.len(),
        resolved_resources: resolver.resolved_count(),
        unresolved_resources: resolver.unresolved_count(),
        total_duration_ms: total_start.elapsed().as_millis() as u64,
        render_duration_ms,
    };

    info!(
        "Conversion complete: {} bytes of PDF, {} resource(s) resolved, {} unresolved, {}ms",
        stats.pdf_bytes, stats.resolved_resources, stats.unresolved_resources, stats.total_duration_ms
    );

    // `resolver` drops here, deleting every materialized temp file.
    Ok(RenderOutput { pdf, stats })
}

/// Convert Markdown and write the PDF directly to a file.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub fn convert_to_file(
    markdown: &str,
    output_path: impl AsRef<Path>,
    config: &RenderConfig,
    engine: &dyn RenderEngine,
) -> Result<RenderStats, Md2PdfError> {
    let output = convert(markdown, config, engine)?;
    let path = output_path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| Md2PdfError::OutputWriteFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
    }

    let tmp_path = path.with_extension("pdf.tmp");
    std::fs::write(&tmp_path, &output.pdf).map_err(|e| Md2PdfError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    std::fs::rename(&tmp_path, path).map_err(|e| Md2PdfError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(output.stats)
}
