// Tag/text tokenization.
//
// Markup is treated as a flat stream of tag spans and text runs; there is no
// DOM and no error recovery. A tag span runs from '<' to the NEXT '>' with no
// quote awareness at this layer — a '>' inside a quoted attribute value ends
// the span early. That matches the historical behavior downstream callers
// were written against; only the line wrapper's quote tracking is stricter.

use memchr::memchr;

/// Elements with no end tag and no nesting effect.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// Opens a nesting level (`<div>`). XML-style `<tag/>` is NOT special-cased
    /// and lands here unless the name is a void element.
    Open,
    /// Closes a nesting level (`</div>`).
    Close,
    /// A void element (`<br>`, `<img ...>`).
    Void,
    /// `<!-- ... -->`
    Comment,
    /// `<!doctype ...>` or `<?xml ...>`; non-nesting.
    Doctype,
    /// A run of text between tag spans.
    Text,
}

/// One tag span or text run, borrowing from the source document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub raw: &'a str,
    pub kind: TokenKind,
}

impl Token<'_> {
    pub fn is_tag(&self) -> bool {
        self.kind != TokenKind::Text
    }

    /// True for text runs consisting entirely of whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Text && self.raw.chars().all(char::is_whitespace)
    }
}

#[inline]
fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'!' | b'?')
}

/// Extract the tag name from raw `<...>` bytes; empty for nameless tags.
fn tag_name(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    let mut i = 1; // past '<'
    if i < bytes.len() && bytes[i] == b'/' {
        i += 1;
    }
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    let start = i;
    while i < bytes.len() && is_name_byte(bytes[i]) {
        i += 1;
    }
    &raw[start..i]
}

fn classify(raw: &str) -> TokenKind {
    if raw.starts_with("</") {
        return TokenKind::Close;
    }
    if raw.starts_with("<!--") {
        return TokenKind::Comment;
    }
    let name = tag_name(raw);
    if name.eq_ignore_ascii_case("!doctype") || name.eq_ignore_ascii_case("?xml") {
        return TokenKind::Doctype;
    }
    if VOID_ELEMENTS.iter().any(|v| name.eq_ignore_ascii_case(v)) {
        return TokenKind::Void;
    }
    TokenKind::Open
}

/// Split `doc` into an ordered token stream. Lossless: concatenating the raw
/// slices of all tokens reproduces `doc` byte for byte. A trailing `<` with no
/// closing `>` is kept as a text run.
pub fn tokenize(doc: &str) -> Vec<Token<'_>> {
    let bytes = doc.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        let Some(lt) = memchr(b'<', &bytes[i..]).map(|off| i + off) else {
            tokens.push(Token {
                raw: &doc[i..],
                kind: TokenKind::Text,
            });
            break;
        };
        if lt > i {
            tokens.push(Token {
                raw: &doc[i..lt],
                kind: TokenKind::Text,
            });
        }
        let Some(gt) = memchr(b'>', &bytes[lt..]).map(|off| lt + off) else {
            tokens.push(Token {
                raw: &doc[lt..],
                kind: TokenKind::Text,
            });
            break;
        };
        let raw = &doc[lt..=gt];
        tokens.push(Token {
            raw,
            kind: classify(raw),
        });
        i = gt + 1;
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(doc: &str) -> Vec<TokenKind> {
        tokenize(doc).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn classifies_basic_tags() {
        assert_eq!(
            kinds("<div>hi</div>"),
            vec![TokenKind::Open, TokenKind::Text, TokenKind::Close]
        );
    }

    #[test]
    fn void_elements_are_non_nesting() {
        assert_eq!(kinds("<br>"), vec![TokenKind::Void]);
        assert_eq!(kinds("<IMG src=x>"), vec![TokenKind::Void]);
        assert_eq!(kinds("<meta charset=utf-8>"), vec![TokenKind::Void]);
    }

    #[test]
    fn doctype_and_xml_decl() {
        assert_eq!(kinds("<!DOCTYPE html>"), vec![TokenKind::Doctype]);
        assert_eq!(kinds("<?xml version=\"1.0\"?>"), vec![TokenKind::Doctype]);
    }

    #[test]
    fn self_closing_syntax_is_not_special() {
        // `<tag/>` classifies by name only; `<x/>` opens, `<br/>` stays void.
        assert_eq!(kinds("<x/>"), vec![TokenKind::Open]);
        assert_eq!(kinds("<br/>"), vec![TokenKind::Void]);
    }

    #[test]
    fn comments() {
        assert_eq!(
            kinds("a<!-- note -->b"),
            vec![TokenKind::Text, TokenKind::Comment, TokenKind::Text]
        );
    }

    #[test]
    fn unterminated_tag_is_text() {
        let tokens = tokenize("<div>tail<oops");
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Text));
        assert_eq!(tokens.last().map(|t| t.raw), Some("<oops"));
    }

    #[test]
    fn concatenation_is_lossless() {
        let doc = "<!doctype html>\n<div class=\"a\">\n  text & more\n</div><oops";
        let joined: String = tokenize(doc).iter().map(|t| t.raw).collect();
        assert_eq!(joined, doc);
    }

    // Known limitation, kept on purpose: the tag span ends at the first '>'
    // even when it sits inside a quoted attribute value.
    #[test]
    fn greedy_span_stops_at_first_gt() {
        let tokens = tokenize("<a href=\"x>y\">");
        assert_eq!(tokens[0].raw, "<a href=\"x>");
        assert_eq!(tokens[0].kind, TokenKind::Open);
    }
}
