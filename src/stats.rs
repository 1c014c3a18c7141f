// Byte accounting and the post-transform statistics report.

/// UTF-8 encoded size of `s` in bytes.
///
/// Every budget comparison in this crate goes through here; character counts
/// are never a substitute, since multi-byte content changes the accounting.
#[inline]
pub fn byte_length(s: &str) -> usize {
    s.len()
}

/// Size delta between an original document and its transformed output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stats {
    pub original_bytes: usize,
    pub transformed_bytes: usize,
    /// Negative when a transform grew the document.
    pub reduction_bytes: i64,
    /// Zero when the original document is empty.
    pub reduction_percent: f64,
}

pub fn stats(original: &str, transformed: &str) -> Stats {
    let original_bytes = byte_length(original);
    let transformed_bytes = byte_length(transformed);
    let reduction_bytes = original_bytes as i64 - transformed_bytes as i64;
    let reduction_percent = if original_bytes > 0 {
        reduction_bytes as f64 / original_bytes as f64 * 100.0
    } else {
        0.0
    };
    Stats {
        original_bytes,
        transformed_bytes,
        reduction_bytes,
        reduction_percent,
    }
}

/// A line that still exceeds the byte budget after wrapping.
///
/// Produced for post-hoc auditing only; nothing branches on violations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// 1-based line index.
    pub line: usize,
    pub byte_length: usize,
    pub preview: String,
}

const PREVIEW_CHARS: usize = 40;

/// Defensive re-check: enumerate lines whose encoded size exceeds `budget`.
pub fn find_violations<S: AsRef<str>>(lines: &[S], budget: usize) -> Vec<Violation> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| {
            let line = line.as_ref();
            let len = byte_length(line);
            (len > budget).then(|| Violation {
                line: idx + 1,
                byte_length: len,
                preview: line.chars().take(PREVIEW_CHARS).collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_length_counts_utf8_bytes() {
        assert_eq!(byte_length(""), 0);
        assert_eq!(byte_length("abc"), 3);
        assert_eq!(byte_length("日本語"), 9);
    }

    #[test]
    fn stats_reduction() {
        let s = stats("aaaa", "aa");
        assert_eq!(s.original_bytes, 4);
        assert_eq!(s.transformed_bytes, 2);
        assert_eq!(s.reduction_bytes, 2);
        assert!((s.reduction_percent - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stats_empty_original_has_zero_percent() {
        let s = stats("", "");
        assert_eq!(s.reduction_percent, 0.0);
    }

    #[test]
    fn stats_can_go_negative() {
        let s = stats("a", "aaa");
        assert_eq!(s.reduction_bytes, -2);
    }

    #[test]
    fn violations_are_one_based() {
        let lines = ["ok", "too long here", "ok"];
        let v = find_violations(&lines, 5);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].line, 2);
        assert_eq!(v[0].byte_length, 13);
        assert_eq!(v[0].preview, "too long here");
    }

    #[test]
    fn preview_is_char_truncated() {
        let long = "é".repeat(100);
        let v = find_violations(&[long.as_str()], 10);
        assert_eq!(v[0].preview.chars().count(), 40);
    }
}
