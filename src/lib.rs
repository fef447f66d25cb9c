//! # md2pdf
//!
//! Render Markdown to a paginated A4 PDF, resolving embedded resources and
//! applying a fixed visual theme.
//!
//! ## Why this crate?
//!
//! Turning Markdown into a presentable PDF keeps coming up in bots and
//! report workers, and the hard part is never the Markdown — it is getting
//! images in: `data:` URIs that need decoding, `http(s)` references that
//! must not be fetched unless explicitly allowed, and relative paths that
//! should resolve against a configured assets directory. This crate does
//! exactly that plumbing, delegates the layout itself to a commodity
//! HTML-to-PDF engine, and stays deliberately un-themeable: one good A4
//! layout with a running header and page numbers.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown
//!  │
//!  ├─ 1. Transform  HR lines → forced page breaks, then pulldown-cmark → HTML
//!  ├─ 2. Assemble   wrap the fragment in the fixed A4 print shell
//!  ├─ 3. Resolve    data URIs / remote URLs / paths → local files (on demand)
//!  └─ 4. Render     external HTML-to-PDF engine → bytes
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use md2pdf::{convert_to_file, CommandEngine, RenderConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RenderConfig::builder()
//!         .title("Study Pack")
//!         .base_dir("assets")
//!         .build()?;
//!     let engine = CommandEngine::from_env();
//!     let stats = convert_to_file("# Hello\n\nworld", "out.pdf", &config, &engine)?;
//!     eprintln!("{} bytes, {} resources resolved", stats.pdf_bytes, stats.resolved_resources);
//!     Ok(())
//! }
//! ```
//!
//! ## Security defaults
//!
//! Remote fetching is **off** unless [`RenderConfig::allow_remote_fetch`]
//! is set: a rendered document cannot make the host issue HTTP requests by
//! default. Unresolvable references degrade to their original URI (logged
//! at `warn!`) rather than aborting the render.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2pdf` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! md2pdf = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod assemble;
pub mod config;
pub mod convert;
pub mod engine;
pub mod error;
pub mod output;
pub mod resolve;
pub mod transform;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{RenderConfig, RenderConfigBuilder};
pub use convert::{convert, convert_to_file};
pub use engine::{CommandEngine, RenderEngine};
pub use error::{EngineError, Md2PdfError};
pub use output::{RenderOutput, RenderStats};
pub use resolve::{classify, Resolution, ResourceResolver, UriClass};
