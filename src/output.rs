//! Output types: the rendered PDF plus conversion statistics.

use serde::{Deserialize, Serialize};

/// Result of a successful conversion.
///
/// The PDF bytes are held in memory; use
/// [`crate::convert::convert_to_file`] to stream them to disk atomically
/// instead.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// The rendered PDF document.
    pub pdf: Vec<u8>,
    /// Statistics about the conversion.
    pub stats: RenderStats,
}

/// Statistics describing one conversion run.
///
/// Serialisable so callers can log a run as structured data and diff two
/// runs to understand why their outputs differ.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderStats {
    /// Size of the assembled HTML document handed to the engine, in bytes.
    pub html_bytes: usize,
    /// Size of the produced PDF, in bytes.
    pub pdf_bytes: usize,
    /// Resource references the resolver materialized to a local file.
    pub resolved_resources: usize,
    /// Resource references that fell back to their original URI.
    pub unresolved_resources: usize,
    /// Wall-clock duration of the whole conversion, in milliseconds.
    pub total_duration_ms: u64,
    /// Wall-clock duration of the engine's render call, in milliseconds.
    pub render_duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_serialize_roundtrip() {
        let stats = RenderStats {
            html_bytes: 1024,
            pdf_bytes: 2048,
            resolved_resources: 2,
            unresolved_resources: 1,
            total_duration_ms: 40,
            render_duration_ms: 30,
        };
        let json = serde_json::to_string(&stats).expect("stats serialize");
        let back: RenderStats = serde_json::from_str(&json).expect("stats deserialize");
        assert_eq!(back.pdf_bytes, 2048);
        assert_eq!(back.unresolved_resources, 1);
    }
}
