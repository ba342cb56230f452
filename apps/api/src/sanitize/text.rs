use std::fmt;

use serde::Serialize;

/// A hyperlink independent of any markup syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkPair {
    pub label: String,
    pub target: String,
}

impl LinkPair {
    /// A link whose label is its own target, as produced for bare URLs.
    pub fn bare(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            label: url.clone(),
            target: url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Link(LinkPair),
}

/// Model output with citation markers removed and every URL wrapped as a link pair.
///
/// `Display` renders the markdown form `[label](target)`; feeding that back through
/// `sanitize` yields the same value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizedText {
    segments: Vec<Segment>,
}

impl SanitizedText {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Segment::Text(last)) = self.segments.last_mut() {
            last.push_str(text);
        } else {
            self.segments.push(Segment::Text(text.to_string()));
        }
    }

    pub(crate) fn push_link(&mut self, link: LinkPair) {
        self.segments.push(Segment::Link(link));
    }

    pub fn links(&self) -> impl Iterator<Item = &LinkPair> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Link(link) => Some(link),
            Segment::Text(_) => None,
        })
    }

    /// Link targets in order of first appearance, without duplicates.
    pub fn link_targets(&self) -> Vec<String> {
        let mut targets: Vec<String> = Vec::new();
        for link in self.links() {
            if !targets.contains(&link.target) {
                targets.push(link.target.clone());
            }
        }
        targets
    }
}

impl fmt::Display for SanitizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in self.segments() {
            match segment {
                Segment::Text(text) => f.write_str(text)?,
                Segment::Link(link) => write!(f, "[{}]({})", link.label, link.target)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_text_segments_merge() {
        let mut text = SanitizedText::default();
        text.push_text("a");
        text.push_text("b");
        text.push_link(LinkPair::bare("https://x.io"));
        text.push_text("");
        assert_eq!(text.segments().len(), 2);
        assert_eq!(text.to_string(), "ab[https://x.io](https://x.io)");
    }

    #[test]
    fn test_link_targets_dedup_preserves_order() {
        let mut text = SanitizedText::default();
        text.push_link(LinkPair::bare("https://b.io"));
        text.push_text(" and ");
        text.push_link(LinkPair::bare("https://a.io"));
        text.push_link(LinkPair::bare("https://b.io"));
        assert_eq!(text.link_targets(), vec!["https://b.io", "https://a.io"]);
    }
}
