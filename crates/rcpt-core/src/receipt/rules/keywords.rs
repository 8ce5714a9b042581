//! Case-insensitive substring vocabularies.

/// A set of keywords matched as case-insensitive substrings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Build a set from keywords. Blank entries are dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().to_lowercase())
            .filter(|k| !k.trim().is_empty())
            .collect();

        Self { keywords }
    }

    /// Whether any keyword occurs in `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.matches_lowercase(&text.to_lowercase())
    }

    /// Like [`matches`](Self::matches) for text that is already lowercased.
    pub fn matches_lowercase(&self, text: &str) -> bool {
        self.find_lowercase(text).is_some()
    }

    /// First keyword (in set order) that occurs in lowercased `text`.
    pub fn find_lowercase(&self, text: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|k| text.contains(k.as_str()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}
