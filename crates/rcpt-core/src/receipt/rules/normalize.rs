//! Line normalization for raw OCR text.

/// Receipt text split into trimmed, non-empty lines in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText {
    lines: Vec<String>,
}

impl NormalizedText {
    /// Split `raw` on line breaks, trim each line and drop the empty ones.
    ///
    /// Handles `\n`, `\r\n` and bare `\r` endings. Empty or whitespace-only
    /// input gives an empty result.
    pub fn new(raw: &str) -> Self {
        let lines = raw
            .split(['\n', '\r'])
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();

        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The first `n` lines, or all of them if there are fewer.
    pub fn head(&self, n: usize) -> &[String] {
        &self.lines[..n.min(self.lines.len())]
    }

    /// The last `n` lines, or all of them if there are fewer.
    pub fn tail(&self, n: usize) -> &[String] {
        &self.lines[self.lines.len().saturating_sub(n)..]
    }

    /// Offset of the first line returned by [`tail`](Self::tail).
    pub fn tail_start(&self, n: usize) -> usize {
        self.lines.len().saturating_sub(n)
    }

    /// All lines joined with `\n`.
    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }
}

impl From<&str> for NormalizedText {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_and_trim() {
        let text = NormalizedText::new("  Cafe Mocha \n\n   \r\nTotal: 120.00\r\n");
        assert_eq!(text.lines(), &["Cafe Mocha".to_string(), "Total: 120.00".to_string()]);
    }

    #[test]
    fn test_bare_carriage_returns() {
        let text = NormalizedText::new("a\rb\r\rc");
        assert_eq!(text.len(), 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(NormalizedText::new("").is_empty());
        assert!(NormalizedText::new(" \n\t\n  ").is_empty());
        assert_eq!(NormalizedText::new("").joined(), "");
    }

    #[test]
    fn test_head_and_tail() {
        let text = NormalizedText::new("1\n2\n3\n4\n5");
        assert_eq!(text.head(3), &["1", "2", "3"]);
        assert_eq!(text.tail(2), &["4", "5"]);
        assert_eq!(text.tail_start(2), 3);
        assert_eq!(text.head(10).len(), 5);
        assert_eq!(text.tail(10).len(), 5);
        assert_eq!(text.tail_start(10), 0);
    }
}
