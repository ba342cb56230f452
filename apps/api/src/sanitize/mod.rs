//! Chat answer sanitization: citation markers out, every URL an explicit link pair.

pub mod corpus;
pub mod passes;
pub mod text;

pub use corpus::TrustedCorpus;
pub use text::SanitizedText;

use passes::{linkify, TextPass};

/// Immutable sanitizer shared by every chat request.
#[derive(Debug, Clone, Default)]
pub struct SanitizationEngine {
    corpus: TrustedCorpus,
}

impl SanitizationEngine {
    pub fn new(corpus: TrustedCorpus) -> Self {
        Self { corpus }
    }

    pub fn sanitize(&self, raw: &str) -> SanitizedText {
        sanitize(raw)
    }

    pub fn corpus(&self) -> &TrustedCorpus {
        &self.corpus
    }

    /// Whether `url` appears in the trusted corpus. Answers are not filtered on it.
    pub fn is_trusted(&self, url: &str) -> bool {
        self.corpus.urls().contains(url)
    }
}

/// Runs the text passes in order, then linkifies.
pub fn sanitize(raw: &str) -> SanitizedText {
    let mut text = raw.to_string();
    for pass in TextPass::ORDER {
        text = pass.apply_to_fixpoint(&text);
    }
    linkify(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resanitize(raw: &str) -> (SanitizedText, SanitizedText) {
        let once = sanitize(raw);
        let twice = sanitize(&once.to_string());
        (once, twice)
    }

    #[test]
    fn test_citation_removed_and_url_linked() {
        let out = sanitize("See ref [1] at https://a.com,)");
        assert_eq!(out.to_string(), "See ref  at [https://a.com](https://a.com),)");
        let link = out.links().next().unwrap();
        assert_eq!(link.target, "https://a.com");
        assert_eq!(link.label, "https://a.com");
    }

    #[test]
    fn test_duplicated_bracket_link_becomes_single_pair() {
        let out = sanitize("Apply: [https://x.org/apply](https://x.org/apply)[2]");
        assert_eq!(out.links().count(), 1);
        assert_eq!(
            out.to_string(),
            "Apply: [https://x.org/apply](https://x.org/apply)"
        );
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let samples = [
            "See ref [1] at https://a.com,)",
            "plain text only",
            "[https://a.com](https://a.com) and https://b--c.com/d.",
            "[[https://a.io](https://a.io)](https://b.io)",
            "nested [[1]2] marker and [label](https://named.io) link",
            "(https://x.io/path) {https://y.io} https://z.io?q=1&r=2!",
            "x https://a.com.-- y",
            "https://a.com'--",
            "https://a.com.--.!-- and https://b.io---",
            "",
        ];
        for sample in samples {
            let (once, twice) = resanitize(sample);
            assert_eq!(once, twice, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_no_url_is_both_bare_and_wrapped() {
        let out = sanitize("https://a.com then [https://a.com](https://a.com)");
        assert_eq!(out.links().count(), 2);
        assert_eq!(
            out.to_string(),
            "[https://a.com](https://a.com) then [https://a.com](https://a.com)"
        );
    }

    #[test]
    fn test_engine_exposes_trusted_urls() {
        let engine = SanitizationEngine::new(TrustedCorpus::from_text(
            "Housing: https://inforens.com/housing",
        ));
        assert!(engine.is_trusted("https://inforens.com/housing"));
        assert!(!engine.is_trusted("https://elsewhere.com"));
        assert_eq!(engine.corpus().urls().len(), 1);
        // Untrusted URLs are still linked.
        let out = engine.sanitize("https://elsewhere.com");
        assert_eq!(out.links().count(), 1);
    }
}
