//! Error types for the md2pdf library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Md2PdfError`] — **Fatal**: the conversion cannot produce a PDF at all
//!   (engine reported errors, engine process failed, output not writable).
//!   Returned as `Err(Md2PdfError)` from the top-level `convert*` functions.
//!
//! * Resource-resolution failures are **non-fatal** by design and never
//!   appear here: a bad data URI, a blocked remote fetch, or a missing file
//!   degrades to [`crate::resolve::Resolution::Unresolved`] and the renderer
//!   is handed the original URI to try on its own. The degradation is logged
//!   at `warn!` so it stays visible in diagnostics and tests.
//!
//! The separation keeps the contract: a broken image never sinks the whole
//! document, while a broken rendering engine always does.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the md2pdf library.
#[derive(Debug, Error)]
pub enum Md2PdfError {
    // ── Rendering errors ──────────────────────────────────────────────────
    /// The HTML-to-PDF engine completed but reported internal errors.
    #[error("Rendering failed: the PDF engine reported {errors} error(s)")]
    RenderFailed { errors: u32 },

    /// The HTML-to-PDF engine itself failed (could not start, crashed, …).
    #[error("PDF engine failure: {0}")]
    EngineFailed(#[from] EngineError),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output PDF file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised by a [`crate::engine::RenderEngine`] implementation.
///
/// A nonzero *error count* from a completed render is not an `EngineError`;
/// it is reported through the `Ok(count)` channel of
/// [`crate::engine::RenderEngine::render`] and turned into
/// [`Md2PdfError::RenderFailed`] by the orchestrator. `EngineError` covers
/// the cases where the engine could not run to completion at all.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The external renderer binary could not be found or spawned.
    #[error("Failed to launch renderer '{command}': {source}\nInstall it or point MD2PDF_ENGINE_BIN at an HTML-to-PDF command.")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The renderer process was killed by a signal or its status is unknown.
    #[error("Renderer '{command}' terminated abnormally")]
    Terminated { command: String },

    /// Reading or writing the renderer's working files failed.
    #[error("Renderer I/O error: {0}")]
    Io(#[from] std::io::Error),
}
