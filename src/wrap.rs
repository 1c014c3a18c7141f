// Byte-budget line wrapping.
//
// Two strategies share one guarantee: every emitted line fits the budget,
// except a single code point whose own UTF-8 encoding is already wider than
// the budget — that code point stands alone on an over-budget line, and
// `find_violations` will report it afterwards.

use crate::error::Error;
use crate::token::tokenize;

/// How `wrap` cuts a document down to budget-sized lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WrapStrategy {
    /// Re-split existing lines in place, quote-aware. Lines already within
    /// budget pass through untouched and are never merged; over-budget lines
    /// are cut at tag boundaries outside quoted attribute values where
    /// possible.
    #[default]
    Lines,
    /// Re-pack the whole token stream greedily. Whitespace tokens are
    /// retained for reconstruction fidelity; oversized tokens split on words
    /// before falling back to per-code-point cuts.
    Tokens,
}

/// Wrap `doc` so no output line exceeds `budget` bytes.
///
/// A zero budget is an input-contract violation and is rejected here rather
/// than clamped. Everything else is total: unbalanced markup, missing tags,
/// and oversized atomic units all take best-effort paths.
pub fn wrap(doc: &str, budget: usize, strategy: WrapStrategy) -> Result<Vec<String>, Error> {
    if budget == 0 {
        return Err(Error::InvalidBudget);
    }
    let lines = match strategy {
        WrapStrategy::Lines => wrap_lines(doc, budget),
        WrapStrategy::Tokens => wrap_tokens(doc, budget),
    };
    tracing::debug!(budget, ?strategy, lines = lines.len(), "wrapped");
    Ok(lines)
}

/* ===================== Strategy A: whole-line re-split =================== */

fn wrap_lines(doc: &str, budget: usize) -> Vec<String> {
    let mut out = Vec::new();
    for line in doc.split('\n') {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        if line.len() <= budget {
            out.push(line.to_string());
        } else {
            split_long_line(line, budget, &mut out);
        }
    }
    out
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Default,
    InQuote(char),
}

/// Cut one over-budget line into budget-sized segments.
///
/// Scans code points with a quote-tracking state machine. A position just
/// after a '>' outside quotes is a safe split point; when the running segment
/// overflows, the cut lands at the last safe point still within budget, or
/// failing that just before the current code point. The safe point resets
/// after every cut. Cuts never land inside a code point's UTF-8 encoding.
fn split_long_line(line: &str, budget: usize, out: &mut Vec<String>) {
    let mut start = 0usize;
    let mut state = ScanState::Default;
    let mut safe_split: Option<usize> = None;

    for (i, ch) in line.char_indices() {
        // Overflow check first: a '>' that itself overflows must not clobber
        // the still-reachable safe point recorded before it.
        let end = i + ch.len_utf8();
        while end - start > budget {
            match safe_split.take().filter(|&s| s > start && s - start <= budget) {
                Some(s) => {
                    out.push(line[start..s].to_string());
                    start = s;
                }
                None if i > start => {
                    // Whitespace at a forced boundary becomes the line
                    // separator itself; trimming it keeps re-wrapping the
                    // output a fixed point.
                    let segment = line[start..i].trim_end();
                    if !segment.is_empty() {
                        out.push(segment.to_string());
                    }
                    start = i;
                }
                // A single code point wider than the budget; let it stand.
                None => break,
            }
        }

        match state {
            ScanState::InQuote(q) if ch == q => state = ScanState::Default,
            ScanState::InQuote(_) => {}
            ScanState::Default => match ch {
                '"' | '\'' => state = ScanState::InQuote(ch),
                '>' => safe_split = Some(end),
                _ => {}
            },
        }
    }

    if start < line.len() {
        out.push(line[start..].to_string());
    }
}

/* ================= Strategy B: token-budgeted accumulation =============== */

fn wrap_tokens(doc: &str, budget: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for token in tokenize(doc) {
        let raw = token.raw;
        if current.len() + raw.len() <= budget {
            current.push_str(raw);
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if raw.len() <= budget {
            current.push_str(raw);
        } else if token.is_whitespace() {
            // An oversized whitespace run carries no words; keep a single
            // space so the run still separates its neighbors.
            current.push(' ');
        } else {
            split_oversized_token(raw, budget, &mut lines, &mut current);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// A token too large for any line: split on whitespace-delimited words first,
/// so attribute boundaries survive where they can, then force-split any word
/// that is still over budget. The last piece stays in `current` so following
/// tokens can pack after it.
fn split_oversized_token(token: &str, budget: usize, lines: &mut Vec<String>, current: &mut String) {
    for word in token.split_whitespace() {
        let need = if current.is_empty() {
            word.len()
        } else {
            current.len() + 1 + word.len()
        };
        if need <= budget {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(current));
        }
        if word.len() <= budget {
            current.push_str(word);
        } else {
            force_split_word(word, budget, lines, current);
        }
    }
}

/// Per-code-point fallback for a single word over budget (long URLs, base64
/// blobs). Cuts land on char boundaries only; a code point wider than the
/// whole budget becomes its own over-budget chunk.
fn force_split_word(word: &str, budget: usize, lines: &mut Vec<String>, current: &mut String) {
    let mut chunk_start = 0usize;
    for (i, ch) in word.char_indices() {
        let end = i + ch.len_utf8();
        if end - chunk_start > budget && i > chunk_start {
            lines.push(word[chunk_start..i].to_string());
            chunk_start = i;
        }
    }
    current.push_str(&word[chunk_start..]);
}
