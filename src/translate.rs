//! Longest-match dialect substitution.
//!
//! Works on a case-folded copy of the input: if the whole trimmed text
//! is itself a dictionary key the value is returned directly, otherwise
//! every entry is applied once, longest key first, replacing standalone
//! occurrences only. Original casing of untranslated text is not
//! preserved beyond what case-folding leaves.

use regex::Regex;
use tracing::warn;

use crate::dict::Dictionary;

/// Translate dialect text to the standard language.
///
/// Never fails and never panics: an entry whose pattern cannot be
/// compiled is skipped and reported, and text with no matches comes
/// back as its case-folded self.
pub fn translate(text: &str, dict: &Dictionary) -> String {
    let mut buf = text.to_lowercase();

    // A whole-text match takes priority over partial substitution, so
    // multi-word keys are not chopped up by their own sub-entries.
    if let Some(standard) = dict.get(buf.trim()) {
        return standard.to_string();
    }

    for entry in dict.entries() {
        let key = entry.dialect.to_lowercase();
        let pattern = match Regex::new(&regex::escape(&key)) {
            Ok(p) => p,
            Err(e) => {
                warn!(key = %entry.dialect, error = %e, "substitution pattern failed, entry skipped");
                continue;
            }
        };
        buf = replace_standalone(&buf, &pattern, &entry.standard);
    }

    buf
}

/// Replace every standalone occurrence of `pattern` in `buf`.
///
/// An occurrence counts only when bounded by whitespace or the buffer
/// edges on both sides. The regex crate has no lookaround, so the
/// boundary check happens around each raw match instead of inside the
/// pattern.
fn replace_standalone(buf: &str, pattern: &Regex, replacement: &str) -> String {
    let mut out = String::with_capacity(buf.len());
    let mut last = 0;
    for m in pattern.find_iter(buf) {
        if !token_bounded(buf, m.start(), m.end()) {
            continue;
        }
        out.push_str(&buf[last..m.start()]);
        out.push_str(replacement);
        last = m.end();
    }
    out.push_str(&buf[last..]);
    out
}

/// True when the byte range `start..end` is adjacent to whitespace or a
/// buffer edge on both sides.
fn token_bounded(buf: &str, start: usize, end: usize) -> bool {
    let before_ok = buf[..start]
        .chars()
        .next_back()
        .map_or(true, char::is_whitespace);
    let after_ok = buf[end..].chars().next().map_or(true, char::is_whitespace);
    before_ok && after_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::{Dictionary, RawEntry};

    fn dict(pairs: &[(&str, &str)]) -> Dictionary {
        let raw = pairs
            .iter()
            .map(|&(d, s)| RawEntry {
                dialect: d.to_string(),
                standard: s.to_string(),
            })
            .collect();
        let (dict, diags) = Dictionary::from_entries(raw, 1);
        assert!(diags.is_empty());
        dict
    }

    #[test]
    fn empty_input_is_empty_output() {
        let d = dict(&[("mô", "đâu")]);
        assert_eq!(translate("", &d), "");
    }

    #[test]
    fn no_matches_passes_through_folded() {
        let d = dict(&[("mô", "đâu")]);
        assert_eq!(translate("Xin Chào", &d), "xin chào");
    }

    #[test]
    fn substitutes_unmatched_tokens_pass_through() {
        let d = dict(&[("mô", "đâu"), ("chừ", "bây giờ")]);
        assert_eq!(translate("mô chừ ri", &d), "đâu bây giờ ri");
    }

    #[test]
    fn exact_full_text_match_short_circuits() {
        let d = dict(&[("ăn cơm", "ăn cơm chuẩn"), ("cơm", "cơm chuẩn")]);
        assert_eq!(translate("ăn cơm", &d), "ăn cơm chuẩn");
        assert_eq!(translate("  Ăn Cơm  ", &d), "ăn cơm chuẩn");
    }

    #[test]
    fn longest_key_wins_overlaps() {
        let d = dict(&[("mần chi", "làm gì"), ("chi", "gì"), ("mần", "làm")]);
        assert_eq!(translate("mần chi rứa hè", &d), "làm gì rứa hè");
    }

    #[test]
    fn shorter_entry_does_not_resplit_replaced_span() {
        // "chi" must not re-apply inside the text produced by "mần chi".
        let d = dict(&[("mần chi", "làm gì"), ("chi", "cái gì")]);
        assert_eq!(translate("mần chi đó", &d), "làm gì đó");
    }

    #[test]
    fn no_substring_corruption() {
        let d = dict(&[("a", "x")]);
        assert_eq!(translate("an apple", &d), "an apple");
        assert_eq!(translate("a banana a", &d), "x banana x");
    }

    #[test]
    fn replaces_all_occurrences() {
        let d = dict(&[("mô", "đâu")]);
        assert_eq!(translate("mô đi mô về mô", &d), "đâu đi đâu về đâu");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let d = dict(&[("mô", "đâu")]);
        assert_eq!(translate("Mô đi MÔ", &d), "đâu đi đâu");
    }

    #[test]
    fn keys_at_buffer_edges_match() {
        let d = dict(&[("chừ", "bây giờ")]);
        assert_eq!(translate("chừ tui đi chừ", &d), "bây giờ tui đi bây giờ");
    }

    #[test]
    fn punctuation_blocks_token_boundary() {
        // Only whitespace and buffer edges bound a token.
        let d = dict(&[("mô", "đâu")]);
        assert_eq!(translate("đi mô? mô", &d), "đi mô? đâu");
    }

    #[test]
    fn translated_text_is_stable_when_vocabularies_are_disjoint() {
        let d = dict(&[("mô", "đâu"), ("chừ", "bây giờ")]);
        let once = translate("mô chừ ri", &d);
        assert_eq!(translate(&once, &d), once);
    }
}
