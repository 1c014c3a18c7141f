// Compression modes: ordered pipelines of named rewrite steps.
//
// Each mode is a fixed sequence of small text rewrites. Ordering is load
// bearing: comment removal always runs before whitespace collapsing, or the
// collapse could mangle comment delimiters mid-pattern.

use once_cell::sync::Lazy;
use regex::Regex;

/// Compression policy selector. All modes are total; a document with no
/// recognizable anchors passes through the documented fallback instead of
/// failing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Compress only the first `<head>...</head>` span; absent head leaves
    /// the document untouched.
    HeaderOnly,
    /// Strip comments (conditional comments survive verbatim) and tighten
    /// each line while keeping inter-tag newlines readable.
    Smart,
    /// Strip comments and all line breaks/tabs; one long line per former
    /// paragraph of markup.
    Aggressive,
    /// Smallest output: one logical line with every removable byte gone.
    Complete,
    /// Left-justify existing indentation without destroying relative nesting.
    IndentPreserve,
    /// Complete on the head, IndentPreserve on the body.
    Hybrid,
}

static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static SPACE_TAB_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static BLANK_LINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());
static WS_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").unwrap());
static INTER_TAG_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r">\s+<").unwrap());
static EQUALS_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*=\s*").unwrap());
static WS_BEFORE_GT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+>").unwrap());
static WS_AFTER_LT: Lazy<Regex> = Lazy::new(|| Regex::new(r"<\s+").unwrap());
static WS_AFTER_SEMI: Lazy<Regex> = Lazy::new(|| Regex::new(r";\s+").unwrap());
static WS_AFTER_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s+").unwrap());
static HEAD_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<head>.*?</head>").unwrap());
static BODY_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<body[^>]*>.*?</body>").unwrap());

/// Apply `mode` to `doc`, producing a fresh document.
pub fn compress(doc: &str, mode: Mode) -> String {
    let out = match mode {
        Mode::HeaderOnly => header_only(doc),
        Mode::Smart => smart(doc),
        Mode::Aggressive => aggressive(doc),
        Mode::Complete => complete(doc),
        Mode::IndentPreserve => indent_preserve(doc),
        Mode::Hybrid => hybrid(doc),
    };
    tracing::debug!(
        ?mode,
        input_bytes = doc.len(),
        output_bytes = out.len(),
        "compressed"
    );
    out
}

/* ============================= Rewrite steps ============================= */

fn strip_comments(doc: &str) -> String {
    COMMENT.replace_all(doc, "").into_owned()
}

/// Like [`strip_comments`], but downlevel conditional comments
/// (`<!--[if ...]> ... <![endif]-->`) are kept verbatim.
fn strip_comments_keep_conditional(doc: &str) -> String {
    COMMENT
        .replace_all(doc, |caps: &regex::Captures| {
            let raw = &caps[0];
            if is_conditional_comment(raw) {
                raw.to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

fn is_conditional_comment(comment: &str) -> bool {
    comment.starts_with("<!--[if") && comment.ends_with("[endif]-->")
}

fn collapse_space_tab_runs(doc: &str) -> String {
    SPACE_TAB_RUN.replace_all(doc, " ").into_owned()
}

fn collapse_whitespace_runs(doc: &str) -> String {
    WS_RUN.replace_all(doc, " ").into_owned()
}

fn collapse_space_runs(doc: &str) -> String {
    SPACE_RUN.replace_all(doc, " ").into_owned()
}

fn remove_line_breaks(doc: &str) -> String {
    doc.chars()
        .filter(|c| !matches!(c, '\n' | '\r' | '\t'))
        .collect()
}

fn trim_lines(doc: &str) -> String {
    doc.lines().map(str::trim).collect::<Vec<_>>().join("\n")
}

fn collapse_blank_lines(doc: &str) -> String {
    BLANK_LINE_RUN.replace_all(doc, "\n").into_owned()
}

fn tighten_tag_gaps(doc: &str) -> String {
    INTER_TAG_WS.replace_all(doc, "><").into_owned()
}

fn tighten_equals(doc: &str) -> String {
    EQUALS_WS.replace_all(doc, "=").into_owned()
}

fn tighten_before_gt(doc: &str) -> String {
    WS_BEFORE_GT.replace_all(doc, ">").into_owned()
}

fn tighten_after_lt(doc: &str) -> String {
    WS_AFTER_LT.replace_all(doc, "<").into_owned()
}

fn tighten_after_semicolon(doc: &str) -> String {
    WS_AFTER_SEMI.replace_all(doc, ";").into_owned()
}

fn tighten_after_comma(doc: &str) -> String {
    WS_AFTER_COMMA.replace_all(doc, ",").into_owned()
}

/* ================================ Modes ================================== */

fn header_only(doc: &str) -> String {
    let Some(span) = HEAD_SPAN.find(doc) else {
        // No structural anchor: leave the document untouched.
        return doc.to_string();
    };
    let head = tighten_tag_gaps(&collapse_whitespace_runs(span.as_str()));
    let mut out = String::with_capacity(doc.len());
    out.push_str(&doc[..span.start()]);
    out.push_str(&head);
    out.push_str(&doc[span.end()..]);
    out
}

fn smart(doc: &str) -> String {
    let s = strip_comments_keep_conditional(doc);
    let s = collapse_space_tab_runs(&s);
    let s = trim_lines(&s);
    let s = collapse_blank_lines(&s);
    s.trim().to_string()
}

fn aggressive(doc: &str) -> String {
    let s = strip_comments(doc);
    let s = remove_line_breaks(&s);
    let s = collapse_space_runs(&s);
    let s = tighten_tag_gaps(&s);
    let s = tighten_equals(&s);
    s.trim().to_string()
}

fn complete(doc: &str) -> String {
    let s = strip_comments(doc);
    let s = collapse_whitespace_runs(&s);
    let s = tighten_tag_gaps(&s);
    let s = tighten_equals(&s);
    let s = tighten_before_gt(&s);
    let s = tighten_after_lt(&s);
    let s = tighten_after_semicolon(&s);
    let s = tighten_after_comma(&s);
    s.trim().to_string()
}

fn leading_spaces(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ').count()
}

fn indent_preserve(doc: &str) -> String {
    let lines: Vec<&str> = doc.lines().collect();
    let min_indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| leading_spaces(l))
        .min()
        .unwrap_or(0);

    let mut out = String::with_capacity(doc.len());
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let lead = leading_spaces(line);
        // Left-justify, then round down to the two-space grid.
        let indent = (lead - min_indent) / 2 * 2;
        if !out.is_empty() {
            out.push('\n');
        }
        for _ in 0..indent {
            out.push(' ');
        }
        out.push_str(&line[lead..]);
    }
    out
}

fn hybrid(doc: &str) -> String {
    let head = HEAD_SPAN.find(doc);
    // Only accept a body span that starts after the head span ends; an
    // overlapping match would double-process the head material.
    let body = BODY_SPAN
        .find(doc)
        .filter(|b| head.map_or(true, |h| b.start() >= h.end()));

    let parts: Vec<String> = match (head, body) {
        (None, None) => return indent_preserve(doc),
        (Some(h), Some(b)) => vec![
            doc[..h.start()].trim().to_string(),
            complete(h.as_str()),
            doc[h.end()..b.start()].trim().to_string(),
            indent_preserve(b.as_str()),
            doc[b.end()..].trim().to_string(),
        ],
        (Some(h), None) => vec![
            doc[..h.start()].trim().to_string(),
            complete(h.as_str()),
            indent_preserve(&doc[h.end()..]),
        ],
        (None, Some(b)) => vec![
            doc[..b.start()].trim().to_string(),
            indent_preserve(b.as_str()),
            doc[b.end()..].trim().to_string(),
        ],
    };

    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_comments_removes_multiline() {
        assert_eq!(strip_comments("a<!-- x\ny -->b"), "ab");
    }

    #[test]
    fn conditional_comments_survive_smart_strip() {
        let doc = "<!--[if IE]><p>old</p><![endif]--><!-- note -->";
        assert_eq!(
            strip_comments_keep_conditional(doc),
            "<!--[if IE]><p>old</p><![endif]-->"
        );
    }

    #[test]
    fn smart_keeps_newlines_between_tags() {
        let doc = "<div>\n\n\n  <p>  hi </p>\n<!-- note -->\n</div>";
        assert_eq!(compress(doc, Mode::Smart), "<div>\n<p> hi </p>\n</div>");
    }

    #[test]
    fn aggressive_flattens_lines() {
        let doc = "<div>\n\t<p>a  b</p>\n</div><!-- gone -->";
        assert_eq!(compress(doc, Mode::Aggressive), "<div><p>a b</p></div>");
    }

    #[test]
    fn aggressive_normalizes_attribute_equals() {
        assert_eq!(
            compress("<img src = \"x.png\">", Mode::Aggressive),
            "<img src=\"x.png\">"
        );
    }

    #[test]
    fn complete_tightens_attributes() {
        let doc = "<a  href = \"x\" >go</a>\n<p style=\"a: 1;  b: 2\">x,  y</p>";
        assert_eq!(
            compress(doc, Mode::Complete),
            "<a href=\"x\">go</a><p style=\"a: 1;b: 2\">x,y</p>"
        );
    }

    #[test]
    fn complete_leaves_minimal_input_alone() {
        let doc = "<head><title>A</title></head><body><p>Hi</p></body>";
        assert_eq!(compress(doc, Mode::Complete), doc);
    }

    #[test]
    fn header_only_leaves_body_byte_identical() {
        let doc = "<head>\n  <title>T</title>\n</head>\n<body>\n  <p>keep  me</p>\n</body>";
        let out = compress(doc, Mode::HeaderOnly);
        assert_eq!(
            out,
            "<head><title>T</title></head>\n<body>\n  <p>keep  me</p>\n</body>"
        );
    }

    #[test]
    fn header_only_without_head_is_identity() {
        let doc = "<body><p>x</p></body>";
        assert_eq!(compress(doc, Mode::HeaderOnly), doc);
    }

    #[test]
    fn indent_preserve_left_justifies_on_two_space_grid() {
        let doc = "    <div>\n      <p>\n\n    </div>";
        assert_eq!(
            compress(doc, Mode::IndentPreserve),
            "<div>\n  <p>\n</div>"
        );
    }

    #[test]
    fn indent_preserve_rounds_down_odd_offsets() {
        let doc = "  <div>\n   <p>x</p>\n  </div>";
        // Offsets 0, 1, 0 from the minimum; 1 rounds down to 0.
        assert_eq!(
            compress(doc, Mode::IndentPreserve),
            "<div>\n<p>x</p>\n</div>"
        );
    }

    #[test]
    fn hybrid_splits_head_and_body() {
        let doc = "<!doctype html>\n<head>\n  <title>T</title>\n</head>\n<body>\n  <p>x</p>\n</body>\n</html>";
        let out = compress(doc, Mode::Hybrid);
        assert_eq!(
            out,
            "<!doctype html>\n<head><title>T</title></head>\n<body>\n  <p>x</p>\n</body>\n</html>"
        );
    }

    #[test]
    fn hybrid_without_anchors_falls_back_to_indent_preserve() {
        let doc = "    <div>\n      <p>x</p>\n    </div>";
        assert_eq!(
            compress(doc, Mode::Hybrid),
            compress(doc, Mode::IndentPreserve)
        );
    }
}
