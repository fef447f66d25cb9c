//! Markdown → HTML fragment transformation.
//!
//! ## Why a pre-pass for horizontal rules?
//!
//! In this pipeline a Markdown horizontal rule means "start a new page", not
//! "draw a line". Once pulldown-cmark has emitted a plain `<hr />` there is
//! no way to tell it apart from any other rule, so the rewrite happens
//! *before* parsing: any line that is solely an HR marker becomes the raw
//! HTML block `<hr class="pagebreak"/>`, which the parser passes through
//! untouched and the stylesheet in [`crate::assemble`] turns into a forced
//! page break. Everything else is standard CommonMark plus the GFM-style
//! extension set (tables, strikethrough, footnotes, smart punctuation;
//! fenced code blocks are core CommonMark).

use once_cell::sync::Lazy;
use pulldown_cmark::{html, Options, Parser};
use regex::Regex;
use tracing::debug;

/// The raw-HTML marker substituted for horizontal-rule lines.
///
/// `hr.pagebreak { page-break-after: always }` in the document stylesheet
/// makes the engine start a new page here.
pub const PAGE_BREAK_MARKER: &str = "<hr class=\"pagebreak\"/>";

/// A line consisting solely of a thematic break: at most three leading
/// spaces, then three or more `-`, `*` or `_` optionally separated by
/// spaces/tabs (CommonMark's definition).
static RE_HR_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ {0,3}(?:(?:-[ \t]*){3,}|(?:\*[ \t]*){3,}|(?:_[ \t]*){3,})$").unwrap()
});

/// Convert Markdown source into an HTML fragment.
///
/// Horizontal-rule lines become [`PAGE_BREAK_MARKER`]; the rest is parsed
/// with tables, strikethrough, footnotes and smart punctuation enabled.
/// Never fails — pulldown-cmark renders malformed input best-effort.
pub fn markdown_to_html(markdown: &str) -> String {
    let prepared = rewrite_page_breaks(markdown);

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);

    let parser = Parser::new_ext(&prepared, options);
    let mut out = String::with_capacity(prepared.len() * 3 / 2);
    html::push_html(&mut out, parser);

    debug!("Transformed {} bytes of Markdown → {} bytes of HTML", markdown.len(), out.len());
    out
}

/// Replace standalone horizontal-rule lines with the forced-page-break marker.
///
/// Lines inside fenced code blocks are left alone: a `---` in a YAML snippet
/// must not split the page. A `---` directly under a paragraph line would be
/// a setext heading in CommonMark; the pre-pass claims it as a page break,
/// so headings should use ATX (`#`) form.
fn rewrite_page_breaks(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len() + 64);
    let mut in_fence: Option<char> = None;

    for line in markdown.lines() {
        let trimmed = line.trim_start();
        if let Some(fence_char) = in_fence {
            out.push_str(line);
            out.push('\n');
            if is_fence(trimmed, fence_char) {
                in_fence = None;
            }
            continue;
        }
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = Some(trimmed.chars().next().unwrap_or('`'));
            out.push_str(line);
            out.push('\n');
            continue;
        }
        if RE_HR_LINE.is_match(line) {
            out.push_str(PAGE_BREAK_MARKER);
            out.push('\n');
        } else {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

fn is_fence(trimmed: &str, fence_char: char) -> bool {
    trimmed.chars().take_while(|&c| c == fence_char).count() >= 3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hr_becomes_page_break() {
        let html = markdown_to_html("before\n\n---\n\nafter");
        assert!(html.contains(PAGE_BREAK_MARKER), "got: {html}");
        assert!(
            !html.contains("<hr />"),
            "plain rule must not survive: {html}"
        );
    }

    #[test]
    fn all_hr_flavours_rewritten() {
        for src in ["---", "***", "___", "- - -", "  ****", "_ _ _ _"] {
            let html = markdown_to_html(&format!("a\n\n{src}\n\nb"));
            assert!(html.contains(PAGE_BREAK_MARKER), "HR {src:?} not rewritten: {html}");
        }
    }

    #[test]
    fn hr_inside_code_fence_untouched() {
        let html = markdown_to_html("```yaml\n---\nkey: value\n```");
        assert!(!html.contains(PAGE_BREAK_MARKER), "got: {html}");
        assert!(html.contains("---"));
    }

    #[test]
    fn dashes_in_text_untouched() {
        let html = markdown_to_html("some --- inline dashes");
        assert!(!html.contains(PAGE_BREAK_MARKER));
    }

    #[test]
    fn tables_enabled() {
        let html = markdown_to_html("| A | B |\n| --- | --- |\n| 1 | 2 |");
        assert!(html.contains("<table>"), "got: {html}");
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn table_separator_row_not_a_page_break() {
        // `| --- | --- |` starts with `|`, so the HR regex must not match it.
        let html = markdown_to_html("| A | B |\n| --- | --- |\n| 1 | 2 |");
        assert!(!html.contains(PAGE_BREAK_MARKER), "got: {html}");
    }

    #[test]
    fn fenced_code_rendered() {
        let html = markdown_to_html("```rust\nfn main() {}\n```");
        assert!(html.contains("<pre><code"), "got: {html}");
        assert!(html.contains("fn main()"));
    }

    #[test]
    fn strikethrough_and_footnotes_enabled() {
        let html = markdown_to_html("~~gone~~ and a note[^1]\n\n[^1]: the note");
        assert!(html.contains("<del>gone</del>"), "got: {html}");
        assert!(html.contains("footnote"), "got: {html}");
    }

    #[test]
    fn smart_punctuation_enabled() {
        let html = markdown_to_html("\"quoted\"");
        assert!(html.contains('\u{201C}'), "expected curly quotes, got: {html}");
    }

    #[test]
    fn output_is_fragment_not_document() {
        let html = markdown_to_html("# Title");
        assert!(html.contains("<h1>"));
        assert!(!html.contains("<html"));
        assert!(!html.contains("<body"));
    }
}
