//! CLI binary for md2pdf.
//!
//! A thin shim over the library crate: reads Markdown from stdin, maps CLI
//! flags to [`RenderConfig`], and writes the PDF to the given output path.
//! Exit status: 0 on success, 1 on conversion failure, 2 on usage errors
//! (clap's default).

use anyhow::{Context, Result};
use clap::Parser;
use md2pdf::{convert_to_file, CommandEngine, RenderConfig};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion: Markdown on stdin, PDF out
  cat notes.md | md2pdf notes.pdf

  # Titled document with an assets directory for relative images
  md2pdf --title "Study Pack" --base ./assets out.pdf < pack.md

  # Permit http(s) image fetching (off by default)
  md2pdf --allow-remote report.pdf < report.md

  # Use wkhtmltopdf instead of weasyprint
  MD2PDF_ENGINE_BIN=wkhtmltopdf md2pdf out.pdf < doc.md

MARKDOWN NOTES:
  A line containing only a horizontal rule (---, ***, ___) forces a page
  break at that position. Tables, fenced code blocks, strikethrough,
  footnotes and smart punctuation are enabled.

ENVIRONMENT VARIABLES:
  MD2PDF_ALLOW_REMOTE   Permit http(s) resource fetching (same as --allow-remote)
  MD2PDF_BASE_DIR       Default base directory for relative resources (--base wins)
  MD2PDF_TMP_DIR        Directory for materialized temp resources
  MD2PDF_ENGINE_BIN     External HTML-to-PDF command (default: weasyprint)

SETUP:
  The layout engine is an external command. Install one of:
    pip install weasyprint          (default)
    apt install wkhtmltopdf         (then MD2PDF_ENGINE_BIN=wkhtmltopdf)
"#;

/// Render Markdown from stdin to a paginated A4 PDF.
#[derive(Parser, Debug)]
#[command(
    name = "md2pdf",
    version,
    about = "Render Markdown from stdin to a paginated A4 PDF",
    long_about = "Render Markdown (read from stdin) into a paginated A4 PDF with a running \
header/footer and page numbers. Embedded data-URI images are decoded, relative image paths \
resolve against --base, and remote images are fetched only with --allow-remote.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Output PDF path.
    output: PathBuf,

    /// Document title shown in the page header.
    #[arg(short, long)]
    title: Option<String>,

    /// Base directory for resolving relative resource references.
    #[arg(short, long, env = "MD2PDF_BASE_DIR")]
    base: Option<PathBuf>,

    /// Permit fetching http(s) resources (disabled by default).
    #[arg(long, env = "MD2PDF_ALLOW_REMOTE")]
    allow_remote: bool,

    /// Timeout per remote fetch, in seconds.
    #[arg(long, default_value_t = 30)]
    fetch_timeout: u64,

    /// Directory for materialized temporary resource files.
    #[arg(long, env = "MD2PDF_TMP_DIR")]
    tmp_dir: Option<PathBuf>,

    /// External HTML-to-PDF command to invoke.
    #[arg(long, env = "MD2PDF_ENGINE_BIN")]
    engine: Option<String>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    // ── Read Markdown from stdin ─────────────────────────────────────────
    let mut markdown = String::new();
    io::stdin()
        .read_to_string(&mut markdown)
        .context("Failed to read Markdown from stdin")?;

    // ── Build config (env already folded in by clap `env` attributes) ────
    let mut builder = RenderConfig::builder()
        .allow_remote_fetch(cli.allow_remote)
        .fetch_timeout_secs(cli.fetch_timeout);
    if let Some(ref title) = cli.title {
        builder = builder.title(title.as_str());
    }
    if let Some(ref base) = cli.base {
        builder = builder.base_dir(base);
    }
    if let Some(ref tmp) = cli.tmp_dir {
        builder = builder.temp_dir(tmp);
    }
    let config = builder.build().context("Invalid configuration")?;

    let engine = match cli.engine {
        Some(ref bin) => CommandEngine::with_command(bin.as_str()),
        None => CommandEngine::from_env(),
    };

    // ── Run conversion ───────────────────────────────────────────────────
    let stats = convert_to_file(&markdown, &cli.output, &config, &engine)
        .context("Conversion failed")?;

    if !cli.quiet {
        eprintln!(
            "✔ {} bytes → {}  ({} resource(s) resolved, {} unresolved, {}ms)",
            stats.pdf_bytes,
            cli.output.display(),
            stats.resolved_resources,
            stats.unresolved_resources,
            stats.total_duration_ms,
        );
    }

    Ok(())
}
