//! The in-memory document the assembler builds and the renderer serializes.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HyperlinkError {
    #[error("empty hyperlink target")]
    Empty,

    #[error("invalid hyperlink target {url:?}: {reason}")]
    Invalid { url: String, reason: String },
}

/// A validated hyperlink target. Scheme-less web addresses get `https://`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget(String);

impl LinkTarget {
    pub fn parse(raw: &str) -> Result<Self, HyperlinkError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(HyperlinkError::Empty);
        }

        let candidate = if raw.starts_with("mailto:") || raw.contains("://") {
            raw.to_string()
        } else {
            format!("https://{raw}")
        };

        reqwest::Url::parse(&candidate).map_err(|e| HyperlinkError::Invalid {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self(candidate))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    /// Falls back to the base size when unset.
    pub size_pt: Option<u32>,
}

impl TextStyle {
    pub const PLAIN: TextStyle = TextStyle {
        bold: false,
        italic: false,
        size_pt: None,
    };
    pub const ITALIC: TextStyle = TextStyle {
        bold: false,
        italic: true,
        size_pt: None,
    };
    pub const BOLD_ITALIC: TextStyle = TextStyle {
        bold: true,
        italic: true,
        size_pt: None,
    };

    pub fn sized(self, size_pt: u32) -> Self {
        Self {
            size_pt: Some(size_pt),
            ..self
        }
    }

    pub fn bold(self) -> Self {
        Self { bold: true, ..self }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text {
        text: String,
        style: TextStyle,
    },
    Link {
        label: String,
        target: LinkTarget,
        style: TextStyle,
    },
    /// Jumps to the paragraph's right tab stop.
    Tab,
}

impl Inline {
    pub fn text(text: impl Into<String>, style: TextStyle) -> Self {
        Inline::Text {
            text: text.into(),
            style,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<Inline>,
    pub alignment: Alignment,
    /// Adds a right-aligned tab stop at the text margin.
    pub right_tab_stop: bool,
}

impl Paragraph {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Inline::text(text, TextStyle::PLAIN)],
            ..Self::default()
        }
    }

    pub fn centered(mut self) -> Self {
        self.alignment = Alignment::Center;
        self
    }

    pub fn push(&mut self, run: Inline) {
        self.runs.push(run);
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Visible text with styling dropped; tabs become `\t`.
    pub fn text_content(&self) -> String {
        self.runs
            .iter()
            .map(|run| match run {
                Inline::Text { text, .. } => text.as_str(),
                Inline::Link { label, .. } => label.as_str(),
                Inline::Tab => "\t",
            })
            .collect()
    }

    pub fn link_targets(&self) -> impl Iterator<Item = &LinkTarget> {
        self.runs.iter().filter_map(|run| match run {
            Inline::Link { target, .. } => Some(target),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Paragraph(Paragraph),
    /// Bulleted item; level 0 is the outer list, level 1 one indent further.
    Bullet { level: u8, paragraph: Paragraph },
}

impl Element {
    pub fn bullet(text: impl Into<String>) -> Self {
        Element::Bullet {
            level: 0,
            paragraph: Paragraph::plain(text),
        }
    }

    pub fn paragraph(&self) -> &Paragraph {
        match self {
            Element::Paragraph(p) => p,
            Element::Bullet { paragraph, .. } => paragraph,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: Option<String>,
    pub elements: Vec<Element>,
}

impl Section {
    pub fn untitled(elements: Vec<Element>) -> Self {
        Self {
            title: None,
            elements,
        }
    }

    pub fn titled(title: impl Into<String>, elements: Vec<Element>) -> Self {
        Self {
            title: Some(title.into()),
            elements,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyMode {
    PlainText,
    Structured,
}

/// Built once per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledDocument {
    mode: AssemblyMode,
    sections: Vec<Section>,
}

impl AssembledDocument {
    pub fn new(mode: AssemblyMode, sections: Vec<Section>) -> Self {
        Self { mode, sections }
    }

    pub fn mode(&self) -> AssemblyMode {
        self.mode
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section_titles(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter_map(|s| s.title.as_deref())
            .collect()
    }

    /// One string per element, in document order, titles excluded.
    pub fn lines(&self) -> Vec<String> {
        self.sections
            .iter()
            .flat_map(|s| &s.elements)
            .map(|e| e.paragraph().text_content())
            .collect()
    }

    pub fn link_targets(&self) -> Vec<&str> {
        self.sections
            .iter()
            .flat_map(|s| &s.elements)
            .flat_map(|e| e.paragraph().link_targets())
            .map(LinkTarget::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_less_link_gets_https() {
        let target = LinkTarget::parse("github.com/ada").unwrap();
        assert_eq!(target.as_str(), "https://github.com/ada");
    }

    #[test]
    fn test_mailto_and_full_urls_kept_verbatim() {
        assert_eq!(
            LinkTarget::parse("mailto:ada@example.com").unwrap().as_str(),
            "mailto:ada@example.com"
        );
        assert_eq!(
            LinkTarget::parse("http://example.com").unwrap().as_str(),
            "http://example.com"
        );
    }

    #[test]
    fn test_bad_targets_rejected() {
        assert_eq!(LinkTarget::parse("  "), Err(HyperlinkError::Empty));
        assert!(matches!(
            LinkTarget::parse("https://exa mple.com"),
            Err(HyperlinkError::Invalid { .. })
        ));
    }

    #[test]
    fn test_text_content_flattens_runs() {
        let mut p = Paragraph::plain("Engineer");
        p.push(Inline::Tab);
        p.push(Inline::Link {
            label: "site".to_string(),
            target: LinkTarget::parse("https://a.io").unwrap(),
            style: TextStyle::PLAIN,
        });
        assert_eq!(p.text_content(), "Engineer\tsite");
        assert_eq!(p.link_targets().count(), 1);
    }
}
