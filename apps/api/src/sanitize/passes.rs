//! The ordered text passes applied to a chat answer.
//!
//! `StripCitations` and `CollapseDuplicatedLinks` rewrite plain text and are each run
//! to a fixpoint, so removing one marker can never expose another for a later call.
//! `linkify` runs last and is the only pass that produces link pairs.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::sanitize::text::{LinkPair, SanitizedText};

static CITATION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\d+\]").expect("invalid citation regex"));

static DUPLICATED_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(https?://[^\]\s]+)\]\((https?://[^)\s]+)\)")
        .expect("invalid duplicated link regex")
});

/// An existing `[label](url)` construct. Its span is left alone by `linkify`.
static LINK_CONSTRUCT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\[\]]*)\]\((https?://[^\s()]+)\)").expect("invalid link construct regex")
});

static BARE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s)\]}]+").expect("invalid bare url regex"));

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '\'', '"'];
const OBFUSCATION: &str = "--";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPass {
    StripCitations,
    CollapseDuplicatedLinks,
}

impl TextPass {
    /// Execution order. Both run before `linkify`.
    pub const ORDER: [TextPass; 2] = [TextPass::StripCitations, TextPass::CollapseDuplicatedLinks];

    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            TextPass::StripCitations => CITATION_MARKER.replace_all(text, ""),
            TextPass::CollapseDuplicatedLinks => DUPLICATED_LINK.replace_all(text, "$1"),
        }
    }

    /// Applies the pass until the text stops changing. Every rewrite shortens the
    /// text, so this terminates.
    pub fn apply_to_fixpoint(&self, text: &str) -> String {
        let mut current = text.to_string();
        loop {
            match self.apply(&current) {
                Cow::Borrowed(_) => return current,
                Cow::Owned(next) => current = next,
            }
        }
    }
}

/// Wraps every bare URL as a link pair. Spans already inside a link construct are
/// carried over as-is and never wrapped a second time.
pub fn linkify(text: &str) -> SanitizedText {
    let mut out = SanitizedText::default();
    let mut cursor = 0;

    for caps in LINK_CONSTRUCT.captures_iter(text) {
        let (Some(whole), Some(label), Some(target)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        linkify_bare(&text[cursor..whole.start()], &mut out);
        out.push_link(LinkPair {
            label: label.as_str().to_string(),
            target: target.as_str().to_string(),
        });
        cursor = whole.end();
    }
    linkify_bare(&text[cursor..], &mut out);

    out
}

fn linkify_bare(text: &str, out: &mut SanitizedText) {
    let mut cursor = 0;

    for m in BARE_URL.find_iter(text) {
        // Obfuscation goes first so punctuation it was hiding is still trimmed.
        let cleaned = m.as_str().replace(OBFUSCATION, "");
        let url = cleaned.trim_end_matches(TRAILING_PUNCTUATION);
        if !has_host_part(url) {
            continue;
        }
        out.push_text(&text[cursor..m.start()]);
        out.push_link(LinkPair::bare(url));
        out.push_text(&cleaned[url.len()..]);
        cursor = m.end();
    }
    out.push_text(&text[cursor..]);
}

fn has_host_part(url: &str) -> bool {
    url.split_once("://")
        .map(|(_, rest)| !rest.is_empty())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::text::Segment;

    #[test]
    fn test_strip_citations_handles_nested_markers() {
        assert_eq!(
            TextPass::StripCitations.apply_to_fixpoint("A[1] b[[2]3]."),
            "A b."
        );
    }

    #[test]
    fn test_collapse_duplicated_link_keeps_label_url() {
        let out = TextPass::CollapseDuplicatedLinks
            .apply_to_fixpoint("see [https://a.com/x](https://a.com/x) now");
        assert_eq!(out, "see https://a.com/x now");
    }

    #[test]
    fn test_collapse_leaves_named_links() {
        let input = "see [docs](https://a.com) now";
        assert_eq!(
            TextPass::CollapseDuplicatedLinks.apply_to_fixpoint(input),
            input
        );
    }

    #[test]
    fn test_linkify_trims_trailing_punctuation() {
        let out = linkify("Go to https://a.com/b. Then https://c.io!");
        let targets: Vec<_> = out.links().map(|l| l.target.as_str()).collect();
        assert_eq!(targets, vec!["https://a.com/b", "https://c.io"]);
        assert_eq!(
            out.to_string(),
            "Go to [https://a.com/b](https://a.com/b). Then [https://c.io](https://c.io)!"
        );
    }

    #[test]
    fn test_linkify_stops_at_closing_brackets() {
        let out = linkify("(https://a.com) {https://b.com} [https://c.com]");
        let targets: Vec<_> = out.links().map(|l| l.target.as_str()).collect();
        assert_eq!(targets, vec!["https://a.com", "https://b.com", "https://c.com"]);
    }

    #[test]
    fn test_linkify_removes_double_hyphen_obfuscation() {
        let out = linkify("https://info--rens.com/con--tact");
        let link = out.links().next().unwrap();
        assert_eq!(link.target, "https://inforens.com/contact");
        assert_eq!(link.label, link.target);
    }

    #[test]
    fn test_linkify_trims_punctuation_hidden_by_obfuscation() {
        let out = linkify("x https://a.com.-- y");
        assert_eq!(out.to_string(), "x [https://a.com](https://a.com). y");

        let out = linkify("https://a.com'--");
        assert_eq!(out.link_targets(), vec!["https://a.com"]);
        assert_eq!(out.to_string(), "[https://a.com](https://a.com)'");
    }

    #[test]
    fn test_linkify_skips_existing_link_constructs() {
        let out = linkify("read [the guide](https://a.com/guide) first");
        assert_eq!(
            out.segments(),
            &[
                Segment::Text("read ".to_string()),
                Segment::Link(LinkPair {
                    label: "the guide".to_string(),
                    target: "https://a.com/guide".to_string(),
                }),
                Segment::Text(" first".to_string()),
            ]
        );
    }

    #[test]
    fn test_scheme_without_host_stays_text() {
        let out = linkify("broken https://. link");
        assert_eq!(out.links().count(), 0);
        assert_eq!(out.to_string(), "broken https://. link");
    }
}
