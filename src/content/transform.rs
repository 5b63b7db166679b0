//! Body text rewrites applied before content reaches the renderer

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::borrow::Cow;

lazy_static! {
    // ASCII-only case folding, so `ſ` (U+017F) never matches `s`
    static ref ISSUE_REFERENCE: Regex = Regex::new(r"(?i-u)Issue #([0-9]+)").unwrap();
}

/// Default issue tracker for `Issue #<n>` links
pub const DEFAULT_ISSUE_TRACKER_URL: &str = "https://github.com/mockoon/mockoon/issues";

/// Rewrites `Issue #<n>` references into markdown links to an issue tracker.
///
/// Matching is ASCII case-insensitive; the link text is always normalized to
/// `Issue #<n>`. A reference that is already the text of a markdown link is
/// left alone, so running the rewrite twice gives the same result as once.
#[derive(Debug, Clone)]
pub struct IssueLinker {
    base_url: String,
}

impl IssueLinker {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a single issue
    pub fn issue_url(&self, number: &str) -> String {
        format!("{}/{}", self.base_url, number)
    }

    /// Rewrite every bare issue reference in `body`
    pub fn link<'a>(&self, body: &'a str) -> Cow<'a, str> {
        ISSUE_REFERENCE.replace_all(body, |caps: &Captures| {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            let number = &caps[1];

            if is_link_text(body, whole.start, whole.end) {
                caps[0].to_string()
            } else {
                format!("[Issue #{}]({})", number, self.issue_url(number))
            }
        })
    }
}

impl Default for IssueLinker {
    fn default() -> Self {
        Self::new(DEFAULT_ISSUE_TRACKER_URL)
    }
}

/// `[Issue #7](` around the match means it is already a link's text
fn is_link_text(body: &str, start: usize, end: usize) -> bool {
    body[..start].ends_with('[') && body[end..].starts_with("](")
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://github.com/mockoon/mockoon/issues";

    #[test]
    fn test_link_issue_reference() {
        let linker = IssueLinker::default();
        assert_eq!(
            linker.link("See Issue #7 for details."),
            format!("See [Issue #7]({URL}/7) for details.")
        );
    }

    #[test]
    fn test_case_insensitive() {
        let linker = IssueLinker::default();
        assert_eq!(linker.link("issue #42"), format!("[Issue #42]({URL}/42)"));
        assert_eq!(linker.link("Issue #42"), format!("[Issue #42]({URL}/42)"));
        assert_eq!(linker.link("ISSUE #42"), format!("[Issue #42]({URL}/42)"));
    }

    #[test]
    fn test_case_folding_is_ascii_only() {
        let linker = IssueLinker::default();
        for body in ["I\u{17f}\u{17f}ue #3", "I\u{17f}sue #3", "\u{130}ssue #3"] {
            assert_eq!(linker.link(body), body);
            assert!(matches!(linker.link(body), Cow::Borrowed(_)));
        }
        assert_eq!(
            linker.link("caf\u{e9} issue #3"),
            format!("caf\u{e9} [Issue #3]({URL}/3)")
        );
    }

    #[test]
    fn test_all_occurrences() {
        let linker = IssueLinker::default();
        assert_eq!(
            linker.link("Issue #1, Issue #22 and issue #333."),
            format!("[Issue #1]({URL}/1), [Issue #22]({URL}/22) and [Issue #333]({URL}/333).")
        );
    }

    #[test]
    fn test_non_matching_preserved() {
        let linker = IssueLinker::default();
        for body in ["Issues #12", "Issue#12", "Issue #", "Issue #abc", "PR #5"] {
            assert_eq!(linker.link(body), body);
            assert!(matches!(linker.link(body), Cow::Borrowed(_)));
        }
    }

    #[test]
    fn test_idempotent() {
        let linker = IssueLinker::default();
        let once = linker.link("Fixed in issue #3 and Issue #10.").into_owned();
        let twice = linker.link(&once).into_owned();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_existing_link_untouched() {
        let linker = IssueLinker::default();
        let body = "Already linked: [Issue #9](https://example.com/9).";
        assert_eq!(linker.link(body), body);
    }

    #[test]
    fn test_custom_tracker_trailing_slash() {
        let linker = IssueLinker::new("https://tracker.example.com/browse/");
        assert_eq!(linker.base_url(), "https://tracker.example.com/browse");
        assert_eq!(
            linker.link("Issue #5"),
            "[Issue #5](https://tracker.example.com/browse/5)"
        );
    }

    #[test]
    fn test_digits_stop_at_first_non_digit() {
        let linker = IssueLinker::default();
        assert_eq!(linker.link("Issue #12abc"), format!("[Issue #12]({URL}/12)abc"));
    }
}
