// Structural re-indentation: rebuild consistent nesting from the flat token
// stream, one token per line, two-space indent unit.

use crate::token::{tokenize, TokenKind};

const INDENT: &str = "  ";

/// Re-indent `doc` from its tag structure.
///
/// Whitespace-only text runs are dropped and every remaining token is emitted
/// on its own line at the current structural depth. Close tags decrement the
/// depth before emitting; open tags increment it after. Unbalanced close tags
/// clamp the depth at zero and are emitted without complaint — input HTML is
/// not guaranteed well-formed and leniency here is deliberate.
pub fn reformat(doc: &str) -> String {
    let mut out = String::with_capacity(doc.len() + doc.len() / 8);
    let mut depth = 0usize;

    for token in tokenize(doc) {
        let piece = token.raw.trim();
        if piece.is_empty() {
            continue;
        }
        match token.kind {
            TokenKind::Close => {
                depth = depth.saturating_sub(1);
                push_line(&mut out, depth, piece);
            }
            TokenKind::Open => {
                push_line(&mut out, depth, piece);
                depth += 1;
            }
            // Void, Comment, Doctype, Text: emitted at the current depth.
            _ => push_line(&mut out, depth, piece),
        }
    }
    out
}

fn push_line(out: &mut String, depth: usize, piece: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(piece);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nests_open_close_pairs() {
        assert_eq!(
            reformat("<div><p>x</p></div>"),
            "<div>\n  <p>\n    x\n  </p>\n</div>"
        );
    }

    #[test]
    fn void_and_doctype_do_not_nest() {
        assert_eq!(
            reformat("<!doctype html><div><br><img src=x></div>"),
            "<!doctype html>\n<div>\n  <br>\n  <img src=x>\n</div>"
        );
    }

    #[test]
    fn comment_keeps_current_depth() {
        assert_eq!(
            reformat("<div><!-- note --></div>"),
            "<div>\n  <!-- note -->\n</div>"
        );
    }

    #[test]
    fn extra_close_tags_clamp_at_zero() {
        let out = reformat("<div><p>x</p></div></div>");
        let last = out.lines().last().unwrap();
        // The unmatched close tag lands at column zero, never negative indent.
        assert_eq!(last, "</div>");
        assert_eq!(out.lines().filter(|l| *l == "</div>").count(), 2);
    }

    #[test]
    fn already_nested_input_keeps_structure() {
        let out = reformat("<div>\n  <p>x</p>\n</div>");
        assert_eq!(out, "<div>\n  <p>\n    x\n  </p>\n</div>");
    }

    #[test]
    fn empty_input() {
        assert_eq!(reformat(""), "");
        assert_eq!(reformat("   \n  "), "");
    }
}
