//! Document assembly: wrap an HTML fragment in the fixed print shell.
//!
//! The theme is deliberately not configurable. One good A4 layout beats a
//! styling API nobody asked for: DejaVu Sans body (wide Unicode coverage on
//! Linux render hosts), monospace code with bordered blocks, collapsed
//! bordered tables, and page-break hygiene (`page-break-after: avoid` on
//! headings, `page-break-inside: avoid` on tables).
//!
//! The running header shows the document title and the footer shows
//! `md2pdf • <page> / <pages>`, both via CSS paged-media margin boxes —
//! the engine fills in `counter(page)` / `counter(pages)` during layout.

use tracing::debug;

/// Title used when the caller provides none.
pub const DEFAULT_TITLE: &str = "md2pdf document";

/// Strip characters that could open markup inside the header.
///
/// Only `<` and `>` are removed — this prevents trivial tag injection into
/// the document shell, it is not a general HTML-escaping guarantee. The
/// title also lands inside a CSS string, so quotes and backslashes are
/// escaped for that context.
pub fn sanitize_title(title: &str) -> String {
    title.replace(['<', '>'], "")
}

fn css_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Wrap an HTML fragment in a complete, styled A4 document.
///
/// `title` falls back to [`DEFAULT_TITLE`] when `None` or blank.
pub fn wrap_document(fragment: &str, title: Option<&str>) -> String {
    let title = match title {
        Some(t) if !t.trim().is_empty() => sanitize_title(t),
        _ => DEFAULT_TITLE.to_string(),
    };
    let css_title = css_string(&title);

    debug!("Assembling document shell (title: {title:?}, fragment: {} bytes)", fragment.len());

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8"/>
    <title>{title}</title>
    <style>
      @page {{
        size: A4;
        margin: 18mm 14mm 18mm 14mm;
        @top-center {{
          content: "{css_title}";
          color: #666;
          font-family: "DejaVu Sans", Arial, Helvetica, sans-serif;
          font-size: 9pt;
        }}
        @bottom-right {{
          content: "md2pdf \2022 " counter(page) " / " counter(pages);
          color: #666;
          font-family: "DejaVu Sans", Arial, Helvetica, sans-serif;
          font-size: 9pt;
        }}
      }}
      body {{
        font-family: "DejaVu Sans", Arial, Helvetica, sans-serif;
        font-size: 11pt;
        line-height: 1.35;
      }}
      h1, h2, h3, h4, h5, h6 {{ margin: 8px 0 6px; page-break-after: avoid; }}
      p {{ margin: 6px 0; }}
      code, pre {{
        font-family: Consolas, "DejaVu Sans Mono", monospace;
        font-size: 10pt;
        white-space: pre-wrap;
        word-wrap: break-word;
      }}
      pre {{
        border: 1px solid #ddd;
        padding: 8px;
        border-radius: 4px;
        background: #fafafa;
      }}
      table {{
        border-collapse: collapse;
        width: 100%;
        page-break-inside: avoid;
      }}
      th, td {{ border: 1px solid #999; padding: 6px; vertical-align: top; }}
      img {{ max-width: 100%; height: auto; }}
      blockquote {{
        margin: 6px 0 6px 12px;
        padding-left: 10px;
        border-left: 3px solid #ccc;
        color: #444;
      }}
      hr.pagebreak {{
        page-break-after: always;
        border: 0;
        margin: 0;
        padding: 0;
      }}
    </style>
  </head>
  <body>
{fragment}
  </body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_fragment_in_full_document() {
        let doc = wrap_document("<p>hello</p>", Some("Notes"));
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<p>hello</p>"));
        assert!(doc.contains("<title>Notes</title>"));
        assert!(doc.contains("size: A4"));
    }

    #[test]
    fn default_title_when_none() {
        let doc = wrap_document("<p/>", None);
        assert!(doc.contains(DEFAULT_TITLE));
    }

    #[test]
    fn default_title_when_blank() {
        let doc = wrap_document("<p/>", Some("   "));
        assert!(doc.contains(DEFAULT_TITLE));
    }

    #[test]
    fn title_angle_brackets_stripped() {
        let doc = wrap_document("<p/>", Some("<script>alert(1)</script>Essay"));
        assert!(!doc.contains("<script>"));
        assert!(doc.contains("scriptalert(1)/scriptEssay"));
    }

    #[test]
    fn title_quotes_escaped_in_css() {
        let doc = wrap_document("<p/>", Some(r#"The "Big" One"#));
        assert!(doc.contains(r#"content: "The \"Big\" One";"#), "got: {doc}");
    }

    #[test]
    fn footer_counts_pages() {
        let doc = wrap_document("<p/>", None);
        assert!(doc.contains(r#"counter(page) " / " counter(pages)"#));
    }

    #[test]
    fn pagebreak_class_defined() {
        let doc = wrap_document("<p/>", None);
        assert!(doc.contains("hr.pagebreak"));
        assert!(doc.contains("page-break-after: always"));
    }

    #[test]
    fn sanitize_strips_only_angle_brackets() {
        assert_eq!(sanitize_title("a<b>c&d"), "abc&d");
    }
}
