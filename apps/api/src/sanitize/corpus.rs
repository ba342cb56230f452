use std::collections::BTreeSet;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

static CORPUS_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s,)]+").expect("invalid corpus url regex"));

/// Reference content the chat assistant answers from, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct TrustedCorpus {
    content: String,
    urls: BTreeSet<String>,
}

impl TrustedCorpus {
    pub fn from_text(content: impl Into<String>) -> Self {
        let content = content.into();
        let urls = CORPUS_URL
            .find_iter(&content)
            .map(|m| m.as_str().to_string())
            .collect();
        Self { content, urls }
    }

    /// Reads the corpus file. A missing or unreadable file yields an empty corpus.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            warn!("No CONTENT_FILE configured; chat answers are disabled");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => {
                let corpus = Self::from_text(content);
                info!(
                    "Loaded trusted corpus from {} ({} bytes, {} urls)",
                    path.display(),
                    corpus.content.len(),
                    corpus.urls.len()
                );
                corpus
            }
            Err(e) => {
                warn!("Content file {} not loaded: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn urls(&self) -> &BTreeSet<String> {
        &self.urls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_urls_stop_at_comma_and_paren() {
        let corpus = TrustedCorpus::from_text(
            "Visit https://inforens.com/mentors, or (https://inforens.com/housing) today.",
        );
        let urls: Vec<&str> = corpus.urls().iter().map(String::as_str).collect();
        assert_eq!(
            urls,
            vec!["https://inforens.com/housing", "https://inforens.com/mentors"]
        );
    }

    #[test]
    fn test_missing_file_yields_empty_corpus() {
        let corpus = TrustedCorpus::load(Some(Path::new("/definitely/not/here.txt")));
        assert!(corpus.is_empty());
        assert!(corpus.urls().is_empty());
    }

    #[test]
    fn test_load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Banking help: http://example.org/bank").unwrap();
        let corpus = TrustedCorpus::load(Some(file.path()));
        assert!(!corpus.is_empty());
        assert!(corpus.urls().contains("http://example.org/bank"));
    }
}
