//! Text helpers shared by logging and provider adapters.

use std::borrow::Cow;

/// The first `max_chars` characters of `s`, borrowed.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Like [`truncate_chars`], but marks a cut with a trailing `…`.
///
/// The ellipsis counts toward `max_chars`, so the result never exceeds it.
pub fn preview(s: &str, max_chars: usize) -> Cow<'_, str> {
    let kept = truncate_chars(s, max_chars);
    if kept.len() == s.len() {
        return Cow::Borrowed(s);
    }
    let mut out = truncate_chars(kept, max_chars.saturating_sub(1)).to_string();
    out.push('…');
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("¥100 → ¥120", 6), "¥100 →");
        assert_eq!(truncate_chars("涨跌幅", 2), "涨跌");
    }

    #[test]
    fn test_truncate_short_input_unchanged() {
        assert_eq!(truncate_chars("AAPL", 10), "AAPL");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_preview_borrows_when_it_fits() {
        assert!(matches!(preview("CPI", 3), Cow::Borrowed("CPI")));
    }

    #[test]
    fn test_preview_marks_cut() {
        assert_eq!(preview("consumer price index", 8), "consume…");
        assert_eq!(preview("consumer price index", 8).chars().count(), 8);
    }
}
