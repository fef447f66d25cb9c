//! Configuration for one Markdown-to-PDF conversion.
//!
//! All behaviour is controlled through [`RenderConfig`], built via its
//! [`RenderConfigBuilder`]. The struct is immutable for the duration of a
//! conversion and carries no hidden global state: environment variables
//! (`MD2PDF_ALLOW_REMOTE`, `MD2PDF_BASE_DIR`, `MD2PDF_TMP_DIR`) are parsed
//! once at the CLI boundary and injected here — the resolver and orchestrator
//! never read the environment themselves.
//!
//! # Design choice: builder over constructor
//! Most callers only care about one or two knobs (usually `title` and
//! `base_dir`); the builder lets them set exactly those and rely on
//! well-documented defaults for the rest.

use crate::error::Md2PdfError;
use std::path::PathBuf;

/// Configuration for a Markdown-to-PDF conversion.
///
/// Built via [`RenderConfig::builder()`] or [`RenderConfig::default()`].
///
/// # Example
/// ```rust
/// use md2pdf::RenderConfig;
///
/// let config = RenderConfig::builder()
///     .title("Quarterly Report")
///     .base_dir("/var/data/assets")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Document title shown in the running page header. Default: None.
    ///
    /// When `None`, the assembler falls back to
    /// [`crate::assemble::DEFAULT_TITLE`]. Angle brackets are stripped before
    /// the title reaches the HTML shell, so a title cannot inject markup into
    /// the header.
    pub title: Option<String>,

    /// Base directory for resolving relative resource references. Default: None.
    ///
    /// `None` means "resolve against the process working directory". When
    /// set, a relative `![...](img/fig.png)` is looked up under this
    /// directory first and only falls back to the working directory if the
    /// file is not there.
    pub base_dir: Option<PathBuf>,

    /// Permit HTTP(S) resource fetching. Default: false.
    ///
    /// Remote fetches are **off by default**: a rendered document should not
    /// reach out to the network unless the caller explicitly opted in. With
    /// this flag off, every `http(s)://` image reference resolves to its
    /// original URI and the engine renders whatever placeholder it uses for
    /// unreachable resources.
    pub allow_remote_fetch: bool,

    /// Timeout for each remote fetch, in seconds. Default: 30.
    ///
    /// The resolver blocks the rendering engine while it downloads, so an
    /// unresponsive host must not be allowed to stall the conversion
    /// indefinitely. 30 s is generous for images while keeping the worst
    /// case bounded.
    pub fetch_timeout_secs: u64,

    /// Directory for materialized temp files. Default: None (OS temp dir).
    ///
    /// Useful when the OS temp dir sits on a small tmpfs or when an external
    /// cleaner watches a dedicated scratch directory.
    pub temp_dir: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: None,
            base_dir: None,
            allow_remote_fetch: false,
            fetch_timeout_secs: 30,
            temp_dir: None,
        }
    }
}

impl RenderConfig {
    /// Create a new builder for `RenderConfig`.
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`RenderConfig`].
#[derive(Debug)]
pub struct RenderConfigBuilder {
    config: RenderConfig,
}

impl RenderConfigBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.base_dir = Some(dir.into());
        self
    }

    pub fn allow_remote_fetch(mut self, allow: bool) -> Self {
        self.config.allow_remote_fetch = allow;
        self
    }

    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.config.fetch_timeout_secs = secs;
        self
    }

    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.temp_dir = Some(dir.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RenderConfig, Md2PdfError> {
        let c = &self.config;
        if c.fetch_timeout_secs == 0 {
            return Err(Md2PdfError::InvalidConfig(
                "fetch_timeout_secs must be ≥ 1".into(),
            ));
        }
        if let Some(ref dir) = c.base_dir {
            if dir.as_os_str().is_empty() {
                return Err(Md2PdfError::InvalidConfig(
                    "base_dir must not be empty".into(),
                ));
            }
        }
        Ok(self.config)
    }
}
